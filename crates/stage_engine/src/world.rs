//! World scheduler: owns every actor and drives the fixed-step frame loop
//!
//! Each frame cycle polls input, forwards it to active actors, advances
//! logic, synchronizes the pending buffer, sweeps dead actors and hands off
//! to the render collaborator. Mutating the live sequence while it is being
//! iterated is the one hazard here: registration during a pass is parked in
//! the pending buffer and joins the live sequence at the synchronization
//! point, while removal is deferred entirely to the post-pass sweep.

use crate::config::EngineConfig;
use crate::foundation::collections::{Handle, HandleMap};
use crate::foundation::time::FrameClock;
use crate::input::{InputSource, InputSystem};
use crate::render::RenderHost;
use crate::scene::actor::{Actor, ActorState};

/// Stable identifier of a registered actor
pub type ActorId = Handle;

/// Scheduler run state, independent of individual actor states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    /// Frame cycles are executing
    Running,
    /// The loop exits once the current cycle completes
    Quitting,
}

/// Deferred world mutations requested from inside a frame pass.
///
/// Component and controller hooks cannot touch the world directly while its
/// live sequence is being iterated; they queue their requests here and the
/// scheduler applies them at the synchronization point.
#[derive(Default)]
pub struct WorldCommands {
    spawned: Vec<Actor>,
    quit: bool,
}

impl WorldCommands {
    /// Queue an actor for registration at the next synchronization point
    pub fn spawn(&mut self, actor: Actor) {
        self.spawned.push(actor);
    }

    /// Ask the scheduler to stop after the current cycle
    pub fn request_quit(&mut self) {
        self.quit = true;
    }
}

/// Owns every registered actor and drives the frame loop.
///
/// A registered actor's id lives in exactly one of the live sequence or the
/// pending buffer until it is despawned.
pub struct World {
    actors: HandleMap<Actor>,
    live: Vec<ActorId>,
    pending: Vec<ActorId>,
    updating: bool,
    state: WorldState,
    input: InputSystem,
    clock: FrameClock,
    commands: WorldCommands,
}

impl World {
    /// Create a world paced to the configured frame rate
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_frame_rate(config.timing.frames_per_second)
    }

    /// Create a world paced to an explicit frames-per-second target
    pub fn with_frame_rate(frames_per_second: u32) -> Self {
        Self {
            actors: HandleMap::default(),
            live: Vec::new(),
            pending: Vec::new(),
            updating: false,
            state: WorldState::Running,
            input: InputSystem::new(),
            clock: FrameClock::new(frames_per_second),
            commands: WorldCommands::default(),
        }
    }

    /// Current scheduler state
    pub fn state(&self) -> WorldState {
        self.state
    }

    /// Ask the loop to stop once the current cycle completes
    pub fn quit(&mut self) {
        log::info!("world shutdown requested");
        self.state = WorldState::Quitting;
    }

    /// Number of actors in the live sequence
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of actors parked in the pending buffer
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Ids of live actors, in sequence order
    pub fn live_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.live.iter().copied()
    }

    /// Shared access to a registered actor
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Exclusive access to a registered actor
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    /// Register an actor.
    ///
    /// While a frame pass is iterating the live sequence the actor is
    /// parked in the pending buffer and joins the live sequence at the next
    /// synchronization point; otherwise it goes live immediately.
    pub fn add(&mut self, actor: Actor) -> ActorId {
        let id = self.actors.insert(actor);
        if self.updating {
            self.pending.push(id);
        } else {
            self.live.push(id);
        }
        id
    }

    /// Unregister and tear down an actor.
    ///
    /// Removes the id from whichever of the live sequence or pending buffer
    /// holds it, then runs the component disposal cascade. Returns false
    /// when the actor is already gone; calling twice is a no-op.
    pub fn despawn(&mut self, id: ActorId, host: &mut dyn RenderHost) -> bool {
        self.live.retain(|&live_id| live_id != id);
        self.pending.retain(|&pending_id| pending_id != id);
        match self.actors.remove(id) {
            Some(mut actor) => {
                actor.dispose(host);
                true
            }
            None => false,
        }
    }

    /// Run frame cycles until a quit is requested
    pub fn run(&mut self, source: &mut dyn InputSource, host: &mut dyn RenderHost) {
        log::info!(
            "starting frame loop at {:?} per frame",
            self.clock.target_interval()
        );
        while self.state == WorldState::Running {
            let delta_time = self.clock.next_frame();
            self.process_input(source, host);
            self.update(delta_time, host);
            host.present();
        }
        log::info!("frame loop stopped after {} frames", self.clock.frame_count());
    }

    /// Poll the input source and forward the snapshot to every active live
    /// actor, in sequence order
    pub fn process_input(&mut self, source: &mut dyn InputSource, host: &mut dyn RenderHost) {
        let snapshot = source.poll();
        if snapshot.close_requested {
            self.quit();
        }
        self.input.update(&snapshot);

        if self.state != WorldState::Running {
            return;
        }

        self.updating = true;
        {
            let Self {
                actors,
                live,
                input,
                commands,
                ..
            } = self;
            for &id in live.iter() {
                if let Some(actor) = actors.get_mut(id) {
                    if actor.state() == ActorState::Active {
                        actor.process_input(host, commands, input.state());
                    }
                }
            }
        }
        self.updating = false;
    }

    /// Advance one frame of logic: update every live actor, synchronize the
    /// pending buffer, then sweep dead actors.
    pub fn update(&mut self, delta_time: f32, host: &mut dyn RenderHost) {
        if self.state == WorldState::Running {
            self.updating = true;
            {
                let Self {
                    actors,
                    live,
                    commands,
                    ..
                } = self;
                for &id in live.iter() {
                    if let Some(actor) = actors.get_mut(id) {
                        actor.update(host, commands, delta_time);
                    }
                }
            }

            // Spawns requested mid-pass land in the pending buffer
            for actor in std::mem::take(&mut self.commands.spawned) {
                self.add(actor);
            }
            self.updating = false;

            // Pending actors join the live sequence with a consistent world
            // matrix for their first frame
            for id in std::mem::take(&mut self.pending) {
                if let Some(actor) = self.actors.get_mut(id) {
                    actor.compute_world_transform(host);
                    self.live.push(id);
                }
            }

            // Dead actors never survive into the next frame
            let dead: Vec<ActorId> = self
                .live
                .iter()
                .copied()
                .filter(|&id| {
                    self.actors
                        .get(id)
                        .map_or(false, |actor| actor.state() == ActorState::Dead)
                })
                .collect();
            for id in dead {
                log::debug!("sweeping dead actor {:?}", id);
                self.despawn(id, host);
            }
        }

        if self.commands.quit {
            self.commands.quit = false;
            self.quit();
        }
    }
}
