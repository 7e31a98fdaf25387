//! Floor plus two tori, one grey and one red, with an elapsed-time readout.

use glam::Vec3;
use orbit_app::AppHandler;
use orbit_core::material::{DEFAULT_MATERIAL, Material, MaterialCache};
use orbit_core::math::quat_from_axis_degrees;
use orbit_core::mesh::{Mesh, TorusDescriptor, generate_quad, generate_torus};
use orbit_ecs::{Core, Entity, Phase, ScheduleError, SystemError, Time, World};
use orbit_std::render::ShaderLibrary;
use orbit_std::{MaterialHandle, ModelHandle, ShaderHandle, Transform};

pub const GREY_MATERIAL: &str = "TESTTorus";
pub const RED_MATERIAL: &str = "TESTTorus2";

/// Text shown by the elapsed-time readout. Font rendering is external, so
/// the demo keeps the string in a resource and logs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElapsedTimeText {
    pub text: String,
    /// Whole seconds already reported at `info`.
    reported_seconds: u64,
}

/// The scene handler passed to [`orbit_app::App`].
#[derive(Debug, Default)]
pub struct TorusScene;

impl AppHandler for TorusScene {
    fn on_init(&mut self, core: &mut Core) -> Result<(), ScheduleError> {
        core.register_system(Phase::Startup, setup_scene)?;
        core.register_system(Phase::Update, update_elapsed_time)
    }
}

/// Startup: register the tori materials and spawn the three models.
pub fn setup_scene(world: &mut World) -> Result<(), SystemError> {
    let materials = world.resource_mut::<MaterialCache>()?;
    materials.add(GREY_MATERIAL, Material::grey(0.1, 0.4, 0.9, 180.0));
    materials.add(
        RED_MATERIAL,
        Material::new(
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.4, 0.0, 0.0),
            Vec3::new(0.9, 0.0, 0.0),
            180.0,
        ),
    );

    let floor = Transform::from_translation(Vec3::new(0.0, -1.0, 0.0))
        .with_rotation(quat_from_axis_degrees(Vec3::X, 90.0))
        .with_uniform_scale(10.0);
    spawn_model(world, generate_quad(1.0), "floor", DEFAULT_MATERIAL, floor)?;

    let torus = generate_torus(&TorusDescriptor::default().with_closed_seam(true))?;
    spawn_model(
        world,
        torus.clone(),
        "torus",
        GREY_MATERIAL,
        Transform::from_rotation(quat_from_axis_degrees(Vec3::X, 90.0)),
    )?;
    spawn_model(world, torus, "torus2", RED_MATERIAL, Transform::IDENTITY)?;

    world.init_resource::<ElapsedTimeText>()?;
    log::info!("Scene ready: {} entities", world.entity_count());
    Ok(())
}

fn spawn_model(
    world: &mut World,
    mesh: Mesh,
    model: &str,
    material: &str,
    transform: Transform,
) -> Result<Entity, SystemError> {
    let entity = world.spawn();
    world.insert(entity, mesh)?;
    world.insert(entity, transform)?;
    world.insert(entity, ModelHandle::new(model))?;
    world.insert(entity, MaterialHandle::new(material))?;
    world.insert(entity, ShaderHandle::new(ShaderLibrary::DEFAULT))?;
    Ok(entity)
}

/// Update: refresh the elapsed-time text from [`Time`].
pub fn update_elapsed_time(world: &mut World) -> Result<(), SystemError> {
    let elapsed = world.resource::<Time>()?.elapsed_seconds();
    let readout = world.resource_mut::<ElapsedTimeText>()?;
    readout.text = format!("Time elapsed: {elapsed:.6}s");

    let whole = elapsed as u64;
    if whole > readout.reported_seconds {
        readout.reported_seconds = whole;
        log::info!("{}", readout.text);
    } else {
        log::trace!("{}", readout.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_ecs::ManualClock;
    use std::time::Duration;

    fn started_world() -> World {
        let mut world = World::new();
        world.init_resource::<MaterialCache>().unwrap();
        setup_scene(&mut world).unwrap();
        world
    }

    #[test]
    fn spawns_floor_and_two_tori() {
        let world = started_world();
        let models: Vec<_> = world
            .entities_with::<ModelHandle>()
            .into_iter()
            .filter_map(|e| world.get::<ModelHandle>(e).map(|h| h.as_str().to_owned()))
            .collect();
        assert_eq!(models, ["floor", "torus", "torus2"]);

        let materials = world.resource::<MaterialCache>().unwrap();
        assert_eq!(materials.get(RED_MATERIAL).unwrap().diffuse, Vec3::new(0.4, 0.0, 0.0));
        assert_eq!(materials.get(GREY_MATERIAL).unwrap().shininess, 180.0);
    }

    #[test]
    fn tori_join_every_ring_pair() {
        let world = started_world();
        let closed = TorusDescriptor::default().with_closed_seam(true);
        let tori: Vec<_> = world
            .entities_with::<ModelHandle>()
            .into_iter()
            .filter(|&e| world.get::<ModelHandle>(e).is_some_and(|h| h.as_str() != "floor"))
            .collect();
        assert_eq!(tori.len(), 2);
        for entity in tori {
            let mesh = world.get::<Mesh>(entity).unwrap();
            assert_eq!(mesh.index_count(), closed.index_count());
            assert_eq!(mesh.index_count(), 100 * 100 * 6);
        }
    }

    #[test]
    fn floor_lies_below_the_tori() {
        let world = started_world();
        let floor = world.entities_with::<Transform>()[0];
        let transform = world.get::<Transform>(floor).unwrap();
        let up = transform.transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!(up.abs_diff_eq(Vec3::new(0.0, -1.0, 10.0), 1e-5));
    }

    #[test]
    fn elapsed_text_tracks_time() {
        let clock = ManualClock::new();
        let mut core = Core::with_clock(clock.clone());
        core.world_mut().init_resource::<ElapsedTimeText>().unwrap();
        core.register_system(Phase::Update, update_elapsed_time).unwrap();
        core.run_startup().unwrap();

        clock.advance(Duration::from_millis(1500));
        core.run_update_tick().unwrap();

        let readout = core.world().resource::<ElapsedTimeText>().unwrap();
        assert_eq!(readout.text, "Time elapsed: 1.500000s");
        assert_eq!(readout.reported_seconds, 1);
    }
}
