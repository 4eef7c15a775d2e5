mod common;

use cgmath::Vector3;
use common::test_utils::{assert_close, frame_at, test_scene};
use neon_folio::{
    camera::Ray,
    data_structures::scene_graph::Material,
    flow::SectionFlow,
    sections::{
        About, ContactGrid, Hero, Projects, Skills,
        about::PANEL_COUNT,
        hero::{LETTER_COUNT, SHAPE_COUNT},
        projects::CARD_COUNT,
        skills::{ORBIT_RADIUS, OrbitState, SKILL_COUNT},
    },
};

#[test]
fn hero_should_build_name_blocks_and_shapes() {
    let mut scene = test_scene();
    let mut hero = Hero::new();
    hero.on_init(&mut scene);

    assert_eq!(hero.letters().len(), LETTER_COUNT);
    assert_eq!(hero.shapes().len(), SHAPE_COUNT);
    let group = hero.group().expect("hero group");
    for letter in hero.letters() {
        assert_eq!(scene.graph.node(*letter).and_then(|n| n.parent), Some(group));
    }
    for shape in hero.shapes() {
        let material = scene
            .graph
            .node(shape.node)
            .and_then(|n| n.renderable)
            .and_then(|(_, m)| scene.graph.material(m));
        assert!(matches!(material, Some(Material::Phong(p)) if p.wireframe));
    }
}

#[test]
fn hero_should_turn_the_name_with_time() {
    let mut scene = test_scene();
    let mut hero = Hero::new();
    hero.on_init(&mut scene);
    hero.on_update(&mut scene, &frame_at(2000));

    let group = scene.graph.transform(hero.group().expect("hero group")).expect("transform");
    assert_close(group.rotation.y, 0.6);
    assert_close(group.position.y, 1f32.sin() * 0.2);
}

#[test]
fn about_should_link_neighbouring_panels() {
    let mut scene = test_scene();
    let mut about = About::new();
    about.on_init(&mut scene);

    assert_eq!(about.panels().len(), PANEL_COUNT);
    assert_eq!(about.links().len(), PANEL_COUNT - 1);
    let indices: Vec<usize> = about.panels().iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn about_panels_should_bob_around_their_base() {
    let mut scene = test_scene();
    let mut about = About::new();
    about.on_init(&mut scene);
    let base: Vec<f32> = about
        .panels()
        .iter()
        .map(|p| scene.graph.position(p.node).expect("panel").y)
        .collect();

    about.on_update(&mut scene, &frame_at(1000));
    for (panel, base_y) in about.panels().iter().zip(base) {
        let y = scene.graph.position(panel.node).expect("panel").y;
        assert_close(y, base_y + (1.0 + panel.index as f32).sin() * 0.3);
    }
}

#[test]
fn skills_should_spread_evenly_on_the_orbit() {
    let mut scene = test_scene();
    let mut skills = Skills::new();
    skills.on_init(&mut scene);

    assert_eq!(skills.orbs().len(), SKILL_COUNT);
    let step = std::f32::consts::TAU / SKILL_COUNT as f32;
    for (i, orb) in skills.orbs().iter().enumerate() {
        assert_close(orb.orbit.angle, step * i as f32);
        assert_close(orb.orbit.radius, ORBIT_RADIUS);

        let angle = step * i as f32;
        let p = scene.graph.position(orb.node).expect("orb position");
        assert_close(p.x, ORBIT_RADIUS * angle.cos());
        assert_close(p.y, -15.0 + (i as f32).sin() * 2.0);
        assert_close(p.z, ORBIT_RADIUS * angle.sin() - 5.0);
    }

    // four solids in two colours, repeating
    let renderable = |i: usize| {
        scene
            .graph
            .node(skills.orbs()[i].node)
            .and_then(|n| n.renderable)
            .expect("orb renderable")
    };
    assert_eq!(renderable(0).0, renderable(4).0);
    assert_ne!(renderable(0).0, renderable(1).0);
    assert_eq!(renderable(0).1, renderable(2).1);
    assert_ne!(renderable(0).1, renderable(1).1);
}

#[test]
fn skills_orbit_should_keep_its_radius() {
    let orbit = OrbitState::layout(3, SKILL_COUNT, ORBIT_RADIUS);
    for t in [0.0, 1.5, 20.0] {
        let p = orbit.position(3, t);
        assert_close((p.x * p.x + (p.z + 5.0) * (p.z + 5.0)).sqrt(), ORBIT_RADIUS);
    }
}

#[test]
fn projects_should_pick_the_card_under_the_ray() {
    let mut scene = test_scene();
    let mut projects = Projects::new();
    projects.on_init(&mut scene);
    assert_eq!(projects.cards().len(), CARD_COUNT);

    let ray_at = |x: f32| Ray {
        origin: Vector3::new(x, -25.0, 5.0),
        direction: Vector3::new(0.0, 0.0, -1.0),
    };
    assert_eq!(projects.pick(&scene, &ray_at(0.0)), Some(1));
    assert_eq!(projects.pick(&scene, &ray_at(4.0)), Some(2));
    assert_eq!(projects.pick(&scene, &ray_at(100.0)), None);

    projects.on_pointer(&scene, &ray_at(-4.0));
    let hovered: Vec<bool> = projects.cards().iter().map(|c| c.hovered).collect();
    assert_eq!(hovered, vec![true, false, false]);
}

#[test]
fn projects_should_lift_hovered_cards() {
    let mut scene = test_scene();
    let mut projects = Projects::new();
    projects.on_init(&mut scene);
    projects.set_hovered(0, true);
    // out of range hover is ignored
    projects.set_hovered(7, true);

    for _ in 0..200 {
        projects.on_update(&mut scene, &frame_at(0));
    }
    let cards = projects.cards();
    let lifted = scene.graph.position(cards[0].node).expect("card").y;
    let resting = scene.graph.position(cards[2].node).expect("card").y;
    assert_close(lifted, cards[0].base_y + 0.5);
    assert_close(resting, cards[2].base_y + 2f32.sin() * 0.2);
    assert_eq!(cards.iter().filter(|c| c.hovered).count(), 1);
}

#[test]
fn contact_grid_should_turn_a_little_every_frame() {
    let mut scene = test_scene();
    let mut contact = ContactGrid::new();
    contact.on_init(&mut scene);
    let grid = contact.grid().expect("grid");

    for i in 0..10 {
        contact.on_update(&mut scene, &frame_at(i * 16));
    }
    let transform = scene.graph.transform(grid).expect("grid transform");
    assert_close(transform.rotation.y, 0.01);
    assert_close(transform.position.y, -35.0);
}
