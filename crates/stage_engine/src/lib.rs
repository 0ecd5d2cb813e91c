//! # Stage Engine
//!
//! An actor/component scene runtime with a fixed-step frame loop.
//!
//! ## Features
//!
//! - **Actors and components**: scene nodes owning ordered per-frame logic
//! - **Lazy transforms**: world matrices rebuilt on demand, dependents
//!   notified exactly once per rebuild
//! - **Fixed-step scheduling**: input, update and draw passes paced to a
//!   target frame interval
//! - **Deferred lifecycle**: registration and teardown stay safe while the
//!   live sequence is being iterated
//! - **Collaborator seams**: windowing, rendering and asset loading stay
//!   behind traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stage_engine::prelude::*;
//!
//! let mut world = World::with_frame_rate(60);
//! let mut draw_list = DrawList::new();
//!
//! let mut actor = Actor::new();
//! actor.transform_mut().set_position(Vec3::new(0.0, 0.0, 10.0));
//! world.add(actor);
//!
//! // world.run(&mut input_source, &mut draw_list);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

mod world;

pub use world::{ActorId, World, WorldCommands, WorldState};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetCatalog, MeshHandle, TerrainHandle, TextureHandle},
        config::{Config, EngineConfig},
        foundation::math::{Mat4, Quat, Vec3},
        input::{ButtonState, InputSource, InputState, KeyCode},
        render::{DrawList, RenderHost},
        scene::{Actor, ActorState, Component, Controller, Transform},
        ActorId, World, WorldCommands, WorldState,
    };
}
