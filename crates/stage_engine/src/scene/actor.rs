//! Actors: scene nodes owning a transform and an ordered component sequence

use crate::foundation::collections::OrderedList;
use crate::input::InputState;
use crate::render::RenderHost;
use crate::scene::component::Component;
use crate::scene::transform::Transform;
use crate::world::WorldCommands;

/// Lifecycle state of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Updating and receiving input
    Active,
    /// Parked: skips update and input but stays registered
    Paused,
    /// Marked for teardown at the scheduler's next synchronization point
    Dead,
}

/// Actor-specific logic that runs after the component pass.
///
/// The composition seam for what would otherwise be an actor subclass: its
/// update hook runs after every component each frame, its input hook after
/// every component each input pass.
pub trait Controller: 'static {
    /// Actor-specific update, after the component pass
    fn update(&mut self, ctx: &mut ActorCtx<'_>, delta_time: f32) {
        let _ = (ctx, delta_time);
    }

    /// Actor-specific input handling, after the component pass
    fn process_input(&mut self, ctx: &mut ActorCtx<'_>, input: &InputState) {
        let _ = (ctx, input);
    }
}

/// Borrows handed to component and controller hooks for the duration of a
/// single call.
///
/// The owning actor's component sequence is deliberately not part of the
/// bundle: a hook cannot add or remove components on its own actor while
/// the sequence is being iterated.
pub struct ActorCtx<'a> {
    /// The owning actor's transform
    pub transform: &'a mut Transform,
    /// The owning actor's lifecycle state
    pub state: &'a mut ActorState,
    /// The render collaborator
    pub host: &'a mut dyn RenderHost,
    /// Deferred world mutations (spawn requests, quit)
    pub commands: &'a mut WorldCommands,
}

/// A scene node: one transform plus an ordered sequence of components.
///
/// Components stay sorted ascending by update order, with insertion order
/// preserved among equals.
pub struct Actor {
    state: ActorState,
    transform: Transform,
    components: OrderedList<Box<dyn Component>>,
    controller: Option<Box<dyn Controller>>,
    disposed: bool,
}

impl Actor {
    /// Create an active actor with an identity transform
    pub fn new() -> Self {
        Self {
            state: ActorState::Active,
            transform: Transform::new(),
            components: OrderedList::new(),
            controller: None,
            disposed: false,
        }
    }

    /// Create an actor driven by the given controller
    pub fn with_controller<C: Controller>(controller: C) -> Self {
        let mut actor = Self::new();
        actor.controller = Some(Box::new(controller));
        actor
    }

    /// Current lifecycle state
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Change the lifecycle state.
    ///
    /// Dead is terminal: once set, further transitions are ignored and the
    /// scheduler tears the actor down at its next synchronization point.
    pub fn set_state(&mut self, state: ActorState) {
        if self.state == ActorState::Dead {
            return;
        }
        self.state = state;
    }

    /// The actor's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the actor's transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Attach a component at its update order, after existing components of
    /// equal order
    pub fn add_component(&mut self, component: Box<dyn Component>) {
        let order = component.update_order();
        self.components.insert(component, order);
    }

    /// The first attached component of the given type, or `None`
    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| component.as_any().downcast_ref::<T>())
    }

    /// Mutable access to the first attached component of the given type
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Detach and dispose the first component of the given type.
    ///
    /// Returns false when none is attached; removing twice is a no-op.
    pub fn remove_component<T: Component>(&mut self, host: &mut dyn RenderHost) -> bool {
        match self
            .components
            .remove_by(|component| component.as_any().is::<T>())
        {
            Some(mut component) => {
                component.dispose(host);
                true
            }
            None => false,
        }
    }

    /// Rebuild the world matrix if it is stale and notify every component in
    /// stored order, exactly once per rebuild
    pub fn compute_world_transform(&mut self, host: &mut dyn RenderHost) {
        if self.transform.compute_world_transform() {
            for component in self.components.iter_mut() {
                component.on_world_transform(&self.transform, host);
            }
        }
    }

    /// Frame update; a no-op unless the actor is active.
    ///
    /// The world matrix is recomputed before and after the logic pass, so
    /// any transform change made by a component or the controller reaches
    /// the draw handles before the frame is presented.
    pub fn update(
        &mut self,
        host: &mut dyn RenderHost,
        commands: &mut WorldCommands,
        delta_time: f32,
    ) {
        if self.state != ActorState::Active {
            return;
        }
        self.compute_world_transform(host);
        {
            let Self {
                state,
                transform,
                components,
                controller,
                ..
            } = self;
            let mut ctx = ActorCtx {
                transform,
                state,
                host: &mut *host,
                commands: &mut *commands,
            };
            for component in components.iter_mut() {
                component.update(&mut ctx, delta_time);
            }
            if let Some(controller) = controller {
                controller.update(&mut ctx, delta_time);
            }
        }
        self.compute_world_transform(host);
    }

    /// Input pass; a no-op unless the actor is active. Components run in
    /// update order, then the controller.
    pub fn process_input(
        &mut self,
        host: &mut dyn RenderHost,
        commands: &mut WorldCommands,
        input: &InputState,
    ) {
        if self.state != ActorState::Active {
            return;
        }
        let Self {
            state,
            transform,
            components,
            controller,
            ..
        } = self;
        let mut ctx = ActorCtx {
            transform,
            state,
            host,
            commands,
        };
        for component in components.iter_mut() {
            component.process_input(&mut ctx, input);
        }
        if let Some(controller) = controller {
            controller.process_input(&mut ctx, input);
        }
    }

    /// Tear down: dispose every component, consuming from the tail until
    /// the sequence is empty.
    ///
    /// Idempotent, so the cascade is safe to reach from both an explicit
    /// call and the world's dead sweep.
    pub fn dispose(&mut self, host: &mut dyn RenderHost) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.state = ActorState::Dead;
        while let Some(mut component) = self.components.pop_back() {
            component.dispose(host);
        }
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::DrawList;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the order in which its siblings run and how often each hook
    /// fires.
    struct Probe {
        id: u32,
        order: i32,
        updates: Rc<RefCell<Vec<u32>>>,
        transform_notices: Rc<RefCell<u32>>,
        disposals: Rc<RefCell<u32>>,
    }

    impl Probe {
        fn new(id: u32, order: i32, log: &ProbeLog) -> Self {
            Self {
                id,
                order,
                updates: Rc::clone(&log.updates),
                transform_notices: Rc::clone(&log.transform_notices),
                disposals: Rc::clone(&log.disposals),
            }
        }
    }

    #[derive(Default)]
    struct ProbeLog {
        updates: Rc<RefCell<Vec<u32>>>,
        transform_notices: Rc<RefCell<u32>>,
        disposals: Rc<RefCell<u32>>,
    }

    impl Component for Probe {
        fn update_order(&self) -> i32 {
            self.order
        }

        fn update(&mut self, _ctx: &mut ActorCtx<'_>, _delta_time: f32) {
            self.updates.borrow_mut().push(self.id);
        }

        fn on_world_transform(&mut self, _transform: &Transform, _host: &mut dyn RenderHost) {
            *self.transform_notices.borrow_mut() += 1;
        }

        fn dispose(&mut self, _host: &mut dyn RenderHost) {
            *self.disposals.borrow_mut() += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// Moves its actor by a fixed offset every update.
    struct Nudge;

    impl Component for Nudge {
        fn update(&mut self, ctx: &mut ActorCtx<'_>, _delta_time: f32) {
            let position = ctx.transform.position() + Vec3::new(1.0, 0.0, 0.0);
            ctx.transform.set_position(position);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_components_run_in_priority_order_with_fifo_ties() {
        let log = ProbeLog::default();
        let mut actor = Actor::new();
        actor.add_component(Box::new(Probe::new(1, 50, &log)));
        actor.add_component(Box::new(Probe::new(2, 10, &log)));
        actor.add_component(Box::new(Probe::new(3, 50, &log)));
        actor.add_component(Box::new(Probe::new(4, 30, &log)));

        let mut host = DrawList::new();
        let mut commands = WorldCommands::default();
        actor.update(&mut host, &mut commands, 0.016);

        assert_eq!(*log.updates.borrow(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_update_notifies_transform_dependents_once_per_rebuild() {
        let log = ProbeLog::default();
        let mut actor = Actor::new();
        actor.add_component(Box::new(Probe::new(1, 100, &log)));

        let mut host = DrawList::new();
        let mut commands = WorldCommands::default();

        // Fresh transform: only the pre-pass rebuild fires
        actor.update(&mut host, &mut commands, 0.016);
        assert_eq!(*log.transform_notices.borrow(), 1);

        // Nothing changed: neither pass rebuilds
        actor.update(&mut host, &mut commands, 0.016);
        assert_eq!(*log.transform_notices.borrow(), 1);

        // A component mutation triggers the post-pass rebuild
        actor.add_component(Box::new(Nudge));
        actor.update(&mut host, &mut commands, 0.016);
        assert_eq!(*log.transform_notices.borrow(), 2);
        assert!(!actor.transform().is_dirty());
    }

    #[test]
    fn test_paused_actor_skips_update() {
        let log = ProbeLog::default();
        let mut actor = Actor::new();
        actor.add_component(Box::new(Probe::new(1, 100, &log)));
        actor.set_state(ActorState::Paused);

        let mut host = DrawList::new();
        let mut commands = WorldCommands::default();
        actor.update(&mut host, &mut commands, 0.016);

        assert!(log.updates.borrow().is_empty());
    }

    #[test]
    fn test_dead_state_is_terminal() {
        let mut actor = Actor::new();
        actor.set_state(ActorState::Dead);
        actor.set_state(ActorState::Active);
        assert_eq!(actor.state(), ActorState::Dead);
    }

    #[test]
    fn test_typed_component_queries() {
        let log = ProbeLog::default();
        let mut actor = Actor::new();
        actor.add_component(Box::new(Probe::new(7, 100, &log)));

        assert_eq!(actor.component::<Probe>().map(|p| p.id), Some(7));
        assert!(actor.component::<Nudge>().is_none());

        actor.component_mut::<Probe>().unwrap().id = 8;
        assert_eq!(actor.component::<Probe>().map(|p| p.id), Some(8));
    }

    #[test]
    fn test_remove_component_tolerates_absence() {
        let log = ProbeLog::default();
        let mut actor = Actor::new();
        actor.add_component(Box::new(Probe::new(1, 100, &log)));

        let mut host = DrawList::new();
        assert!(actor.remove_component::<Probe>(&mut host));
        assert_eq!(*log.disposals.borrow(), 1);
        assert!(!actor.remove_component::<Probe>(&mut host));
        assert_eq!(actor.component_count(), 0);
    }

    #[test]
    fn test_dispose_is_idempotent_and_drains_components() {
        let log = ProbeLog::default();
        let mut actor = Actor::new();
        actor.add_component(Box::new(Probe::new(1, 10, &log)));
        actor.add_component(Box::new(Probe::new(2, 20, &log)));

        let mut host = DrawList::new();
        actor.dispose(&mut host);
        assert_eq!(actor.component_count(), 0);
        assert_eq!(*log.disposals.borrow(), 2);

        actor.dispose(&mut host);
        assert_eq!(*log.disposals.borrow(), 2);
        assert_eq!(actor.state(), ActorState::Dead);
    }
}
