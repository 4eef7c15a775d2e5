mod common;

use common::test_utils::{WIDTH, HEIGHT, assert_close, empty_stage, ms, test_config};
use instant::Duration;
use neon_folio::{Config, Stage, render::Pass, sections};

fn full_stage() -> Stage {
    let mut stage = empty_stage(&test_config());
    for flow in sections::all() {
        stage.register(flow);
    }
    stage
}

#[test]
fn should_keep_three_floats_per_particle() {
    let mut stage = empty_stage(&test_config());
    for i in 0..10 {
        stage.tick(ms(i * 16));
    }
    let particles = &stage.scene().particles;
    assert_eq!(particles.count(), 64);
    assert_eq!(particles.positions().len(), 64 * 3);
    assert_eq!(particles.colors().len(), 64 * 3);
}

#[test]
fn should_spin_the_particle_field_with_time() {
    let mut stage = empty_stage(&test_config());
    stage.tick(ms(2000));
    assert_close(stage.scene().particles.rotation_y, 0.1);
}

#[test]
fn should_lay_out_particles_reproducibly_from_a_seed() {
    let a = empty_stage(&test_config());
    let b = empty_stage(&test_config());
    assert_eq!(
        a.scene().particles.positions(),
        b.scene().particles.positions()
    );
    let spread = test_config().particle_spread;
    assert!(
        a.scene()
            .particles
            .positions()
            .iter()
            .all(|p| p.abs() <= spread / 2.0)
    );
}

#[test]
fn should_pull_the_camera_back_with_scroll() {
    let mut stage = empty_stage(&test_config());
    assert_close(stage.camera().position.z, 5.0);
    stage.on_scroll(50.0);
    assert_close(stage.camera().position.z, 6.0);
    stage.on_scroll(100.0);
    assert_close(stage.camera().position.z, 7.0);
}

#[test]
fn should_ease_camera_towards_pointer() {
    let mut stage = empty_stage(&test_config());
    stage.on_pointer_moved(1.0, -1.0);
    assert_eq!(stage.camera().target_rotation, (-0.1, 0.1));

    stage.tick(ms(16));
    assert_close(stage.camera().rotation.1, 0.005);
    assert_close(stage.camera().rotation.0, -0.005);

    for i in 2..500 {
        stage.tick(ms(i * 16));
    }
    assert_close(stage.camera().rotation.1, 0.1);
}

#[test]
fn should_orbit_the_point_lights() {
    let mut stage = empty_stage(&test_config());
    stage.tick(Duration::ZERO);
    let lights = &stage.scene().lights;
    assert_close(lights.points[0].position.x, 0.0);
    assert_close(lights.points[0].position.y, 5.0);
    assert_close(lights.points[1].position.x, 5.0);
    assert_close(lights.points[1].position.y, 0.0);
}

#[test]
fn should_draw_nothing_without_particles_or_sections() {
    let config = Config {
        particle_count: 0,
        ..test_config()
    };
    let mut stage = empty_stage(&config);
    let list = stage.tick(ms(16));
    assert!(list.is_empty());
    assert!(list.instances.is_empty());
}

#[test]
fn should_batch_every_section_node() {
    let mut stage = full_stage();
    assert_eq!(stage.flow_count(), 5);
    let list = stage.tick(ms(16));

    assert_eq!(list.particles.as_ref().map(|p| p.count), Some(64));
    let passes: Vec<Pass> = list.batches.iter().map(|b| b.pass).collect();
    for pass in [Pass::Surface, Pass::Hologram, Pass::Wireframe, Pass::Lines] {
        assert!(passes.contains(&pass), "no batch for {:?}", pass);
    }
    // batches come sorted by pass and cover the instance buffer exactly once
    assert!(passes.windows(2).all(|w| w[0] <= w[1]));
    let covered: u32 = list.batches.iter().map(|b| b.instances.len() as u32).sum();
    assert_eq!(covered as usize, list.instances.len());
}

#[test]
fn should_skip_hidden_nodes() {
    let mut stage = full_stage();
    let before = stage.tick(ms(16)).instances.len();
    stage.configure(|scene| {
        let ids: Vec<_> = scene.graph.nodes().map(|(id, _)| id).take(1).collect();
        for id in ids {
            if let Some(node) = scene.graph.node_mut(id) {
                node.visible = false;
            }
        }
    });
    let after = stage.tick(ms(32)).instances.len();
    assert!(after < before);
}

#[test]
fn should_apply_runtime_configuration() {
    let mut stage = empty_stage(&test_config());
    stage.configure(|scene| {
        scene.clear_colour = wgpu::Color::WHITE;
        scene.glitch_intensity = Some(0.3);
    });
    assert_eq!(stage.scene().clear_colour, wgpu::Color::WHITE);
    assert_eq!(stage.scene().glitch_intensity, Some(0.3));
}

#[test]
fn should_ignore_zero_sized_resizes() {
    let mut stage = empty_stage(&test_config());
    let aspect = stage.camera().projection.aspect();
    stage.resize(0, HEIGHT);
    assert_close(stage.camera().projection.aspect(), aspect);
    stage.resize(WIDTH * 2, HEIGHT);
    assert_close(stage.camera().projection.aspect(), 2.0 * WIDTH as f32 / HEIGHT as f32);
}
