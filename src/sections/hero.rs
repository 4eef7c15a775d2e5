//! Hero section: the hologram name and the shapes floating around it.

use std::f32::consts::PI;

use rand::Rng;

use crate::{
    clock::Clock,
    data_structures::{
        geometry::Geometry,
        instance::Transform,
        scene_graph::{HologramMaterial, Material, MaterialId, Node, NodeId, PhongMaterial, LineMaterial},
    },
    flow::{Frame, SectionFlow},
    sections::Spin,
    stage::Scene,
    utils::random_range,
};

pub const LETTER_COUNT: usize = 8;
pub const SHAPE_COUNT: usize = 15;
const LETTER_SPACING: f32 = 0.7;

#[derive(Debug, Clone, Copy)]
pub struct FloatingShape {
    pub node: NodeId,
    pub spin: Spin,
}

#[derive(Debug, Default)]
pub struct Hero {
    clock: Option<Clock>,
    group: Option<NodeId>,
    hologram: Option<MaterialId>,
    letters: Vec<NodeId>,
    shapes: Vec<FloatingShape>,
}

impl Hero {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> Option<NodeId> {
        self.group
    }

    pub fn letters(&self) -> &[NodeId] {
        &self.letters
    }

    pub fn shapes(&self) -> &[FloatingShape] {
        &self.shapes
    }

    fn build_name(&mut self, scene: &mut Scene) {
        let graph = &mut scene.graph;
        let block = Geometry::cuboid(0.5, 0.8, 0.1);
        let outline = graph.add_geometry(block.edges());
        let block = graph.add_geometry(block);
        let hologram = graph.add_material(Material::Hologram(HologramMaterial::default()));
        let glow = graph.add_material(Material::Line(LineMaterial::new(0x00f0ff, 0.8)));

        let group = graph.add_node(Node::group(Transform::new()));
        let x = |i: usize| (i as f32 - 3.5) * LETTER_SPACING;
        for i in 0..LETTER_COUNT {
            let letter = graph.add_child(group, Node::mesh(block, hologram, Transform::at(x(i), 0.0, 0.0)));
            self.letters.push(letter);
        }
        for i in 0..LETTER_COUNT {
            graph.add_child(group, Node::mesh(outline, glow, Transform::at(x(i), 0.0, 0.0)));
        }

        self.group = Some(group);
        self.hologram = Some(hologram);
    }

    fn build_shapes(&mut self, scene: &mut Scene) {
        let kinds = [
            scene.graph.add_geometry(Geometry::octahedron(0.3)),
            scene.graph.add_geometry(Geometry::tetrahedron(0.3)),
            scene.graph.add_geometry(Geometry::icosahedron(0.3)),
        ];
        let material = scene.graph.add_material(Material::Phong(
            PhongMaterial::glowing(0x00f0ff, 0.5, 0.3).wireframe(),
        ));

        let rng = &mut scene.rng;
        for _ in 0..SHAPE_COUNT {
            let geometry = kinds[rng.gen_range(0..kinds.len())];
            let mut transform = Transform::at(
                random_range(rng, -0.5, 0.5) * 20.0,
                random_range(rng, -0.5, 0.5) * 20.0,
                random_range(rng, -0.5, 0.5) * 10.0 - 5.0,
            );
            transform.rotation.x = random_range(rng, 0.0, PI);
            transform.rotation.y = random_range(rng, 0.0, PI);
            transform.rotation.z = random_range(rng, 0.0, PI);
            let spin = Spin {
                x: random_range(rng, -0.01, 0.01),
                y: random_range(rng, -0.01, 0.01),
                z: random_range(rng, -0.01, 0.01),
            };
            let node = scene.graph.add_node(Node::mesh(geometry, material, transform));
            self.shapes.push(FloatingShape { node, spin });
        }
    }
}

impl SectionFlow for Hero {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn on_init(&mut self, scene: &mut Scene) {
        self.clock = Some(Clock::starting_at(scene.now));
        self.build_name(scene);
        self.build_shapes(scene);
    }

    fn on_update(&mut self, scene: &mut Scene, frame: &Frame) {
        let Some(clock) = self.clock else {
            return;
        };
        let t = clock.elapsed(frame.now);

        if let Some(group) = self.group.and_then(|id| scene.graph.transform_mut(id)) {
            group.rotation.y = t * 0.3;
            group.position.y = (t * 0.5).sin() * 0.2;
        }
        if let Some(Material::Hologram(m)) = self.hologram.and_then(|id| scene.graph.material_mut(id)) {
            m.time = t;
        }

        for shape in &self.shapes {
            if let Some(transform) = scene.graph.transform_mut(shape.node) {
                transform.rotation.x += shape.spin.x;
                transform.rotation.y += shape.spin.y;
                transform.rotation.z += shape.spin.z;
                transform.position.y += (t + transform.position.x).sin() * 0.001;
            }
        }
    }
}
