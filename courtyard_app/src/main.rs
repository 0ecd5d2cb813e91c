//! Courtyard demo application
//!
//! Builds a walled courtyard scene (floor terrain, wall planes, a pair of
//! meshes, HUD sprites and a fly camera) and drives the frame loop end to
//! end with scripted input, so the runtime can be exercised without a
//! window or a GPU device.

use stage_engine::foundation::math::constants;
use stage_engine::input::{InputSnapshot, InputSource, KeyEvent};
use stage_engine::prelude::*;
use stage_engine::scene::camera::CameraController;
use stage_engine::scene::components::{
    MeshComponent, MoveComponent, SpriteComponent, TerrainComponent,
};
use stage_engine::scene::ActorCtx;

/// Input source that replays a fixed script: drive forward for two seconds,
/// release, then press Escape.
struct ScriptedInput {
    frame: u32,
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frame += 1;
        let mut snapshot = InputSnapshot::default();
        match self.frame {
            1 => snapshot.key_events.push(KeyEvent {
                key: KeyCode::W,
                down: true,
            }),
            120 => snapshot.key_events.push(KeyEvent {
                key: KeyCode::W,
                down: false,
            }),
            121 => snapshot.key_events.push(KeyEvent {
                key: KeyCode::Escape,
                down: true,
            }),
            _ => {}
        }
        snapshot
    }
}

/// Controller that quits the world when Escape is pressed.
struct QuitOnEscape;

impl Controller for QuitOnEscape {
    fn process_input(&mut self, ctx: &mut ActorCtx<'_>, input: &InputState) {
        if input.keyboard.key_state(KeyCode::Escape) == ButtonState::Pressed {
            ctx.commands.request_quit();
        }
    }
}

fn main() {
    env_logger::init();

    let config = EngineConfig::load_from_file("courtyard.toml").unwrap_or_else(|_| {
        log::info!("no courtyard.toml found, using defaults");
        EngineConfig::default()
    });
    log::info!(
        "starting {} ({}x{} target)",
        config.window.title,
        config.window.width,
        config.window.height
    );

    let mut catalog = AssetCatalog::new();
    let mut draw_list = DrawList::new();
    let mut world = World::new(&config);

    load_scene(&mut world, &mut catalog, &mut draw_list);

    let mut input = ScriptedInput { frame: 0 };
    world.run(&mut input, &mut draw_list);

    log::info!("{} draw items registered at shutdown", draw_list.len());
}

fn load_scene(world: &mut World, catalog: &mut AssetCatalog, draw_list: &mut DrawList) {
    let cube = catalog.register_mesh("Assets/Cube.gpmesh");
    let sphere = catalog.register_mesh("Assets/Sphere.gpmesh");
    let plane = catalog.register_mesh("Assets/Plane.gpmesh");
    let floor = catalog.register_terrain("Assets/heightmap_flat.png");
    let health_bar = catalog.register_texture("Assets/HealthBar.png", 256, 64);
    let radar = catalog.register_texture("Assets/Radar.png", 128, 128);

    // A slowly spinning cube and a small sphere
    let mut actor = Actor::new();
    actor
        .transform_mut()
        .set_position(Vec3::new(200.0, 75.0, 0.0));
    actor.transform_mut().set_scale(100.0);
    actor.add_component(Box::new(MeshComponent::new(draw_list, cube)));
    let mut spin = MoveComponent::new();
    spin.angular_speed = constants::HALF_PI;
    actor.add_component(Box::new(spin));
    world.add(actor);

    let mut actor = Actor::new();
    actor
        .transform_mut()
        .set_position(Vec3::new(200.0, -75.0, 0.0));
    actor.transform_mut().set_scale(3.0);
    actor.add_component(Box::new(MeshComponent::new(draw_list, sphere)));
    world.add(actor);

    // Floor
    let mut actor = Actor::new();
    actor
        .transform_mut()
        .set_position(Vec3::new(0.0, 0.0, -100.0));
    actor.add_component(Box::new(TerrainComponent::new(draw_list, floor)));
    world.add(actor);

    // Surrounding walls, ten planes per side
    let start = -1250.0;
    let size = 250.0;
    let side = Quat::from_axis_angle(&Vec3::x_axis(), constants::HALF_PI);
    for i in 0..10 {
        let offset = start + i as f32 * size;
        spawn_plane(world, draw_list, plane, Vec3::new(offset, start - size, 0.0), side);
        spawn_plane(world, draw_list, plane, Vec3::new(offset, -start + size, 0.0), side);
    }
    let end = Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI) * side;
    for i in 0..10 {
        let offset = start + i as f32 * size;
        spawn_plane(world, draw_list, plane, Vec3::new(start - size, offset, 0.0), end);
        spawn_plane(world, draw_list, plane, Vec3::new(-start + size, offset, 0.0), end);
    }

    // Fly camera
    let mut camera = Actor::with_controller(CameraController::new());
    camera
        .transform_mut()
        .set_position(Vec3::new(0.0, 0.0, 100.0));
    world.add(camera);

    // HUD sprites
    let mut actor = Actor::new();
    actor
        .transform_mut()
        .set_position(Vec3::new(-350.0, -350.0, 0.0));
    let (width, height) = catalog.texture_size(health_bar).unwrap_or((1, 1));
    actor.add_component(Box::new(SpriteComponent::new(
        draw_list, health_bar, width, height, 100,
    )));
    world.add(actor);

    let mut actor = Actor::new();
    actor
        .transform_mut()
        .set_position(Vec3::new(375.0, -275.0, 0.0));
    actor.transform_mut().set_scale(0.75);
    let (width, height) = catalog.texture_size(radar).unwrap_or((1, 1));
    actor.add_component(Box::new(SpriteComponent::new(
        draw_list, radar, width, height, 101,
    )));
    world.add(actor);

    // Game-level key bindings
    world.add(Actor::with_controller(QuitOnEscape));

    log::info!("scene loaded: {} live actors", world.live_count());
}

fn spawn_plane(
    world: &mut World,
    draw_list: &mut DrawList,
    mesh: MeshHandle,
    position: Vec3,
    rotation: Quat,
) {
    let mut actor = Actor::new();
    actor.transform_mut().set_position(position);
    actor.transform_mut().set_scale(10.0);
    actor.transform_mut().set_rotation(rotation);
    actor.add_component(Box::new(MeshComponent::new(draw_list, mesh)));
    world.add(actor);
}
