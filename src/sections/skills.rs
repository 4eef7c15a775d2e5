//! Skills section: eight wireframe solids orbiting below the about panels.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::{
    clock::Clock,
    data_structures::{
        geometry::Geometry,
        instance::Transform,
        scene_graph::{Material, Node, NodeId, PhongMaterial},
    },
    flow::{Frame, SectionFlow},
    stage::Scene,
};

pub const SKILL_COUNT: usize = 8;
pub const ORBIT_RADIUS: f32 = 4.0;
const ORBIT_SPEED: f32 = 0.2;
const CENTER_Z: f32 = -5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Starting angle on the orbit, radians.
    pub angle: f32,
    pub radius: f32,
    pub base_y: f32,
}

impl OrbitState {
    /// Starting orbit of skill `index` out of `count`.
    pub fn layout(index: usize, count: usize, radius: f32) -> Self {
        Self {
            angle: index as f32 / count as f32 * PI * 2.0,
            radius,
            base_y: -15.0 + (index as f32).sin() * 2.0,
        }
    }

    /// Position on the orbit at `time` seconds; `index` phases the bobbing.
    pub fn position(&self, index: usize, time: f32) -> Vector3<f32> {
        let angle = self.angle + time * ORBIT_SPEED;
        Vector3::new(
            angle.cos() * self.radius,
            self.base_y + (time + index as f32).sin() * 0.3,
            angle.sin() * self.radius + CENTER_Z,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SkillOrb {
    pub node: NodeId,
    pub orbit: OrbitState,
}

#[derive(Debug, Default)]
pub struct Skills {
    clock: Option<Clock>,
    orbs: Vec<SkillOrb>,
}

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orbs(&self) -> &[SkillOrb] {
        &self.orbs
    }
}

impl SectionFlow for Skills {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn on_init(&mut self, scene: &mut Scene) {
        self.clock = Some(Clock::starting_at(scene.now));
        let graph = &mut scene.graph;

        let solids = [
            graph.add_geometry(Geometry::octahedron(0.4)),
            graph.add_geometry(Geometry::tetrahedron(0.4)),
            graph.add_geometry(Geometry::icosahedron(0.4)),
            graph.add_geometry(Geometry::dodecahedron(0.4)),
        ];
        let palette = [
            graph.add_material(Material::Phong(PhongMaterial::glowing(0x00f0ff, 0.5, 0.6).wireframe())),
            graph.add_material(Material::Phong(PhongMaterial::glowing(0xff00ff, 0.5, 0.6).wireframe())),
        ];

        for i in 0..SKILL_COUNT {
            let orbit = OrbitState::layout(i, SKILL_COUNT, ORBIT_RADIUS);
            let start = Transform::at(
                orbit.angle.cos() * orbit.radius,
                orbit.base_y,
                orbit.angle.sin() * orbit.radius + CENTER_Z,
            );
            let node = graph.add_node(Node::mesh(
                solids[i % solids.len()],
                palette[i % palette.len()],
                start,
            ));
            self.orbs.push(SkillOrb { node, orbit });
        }
    }

    fn on_update(&mut self, scene: &mut Scene, frame: &Frame) {
        let Some(clock) = self.clock else {
            return;
        };
        let t = clock.elapsed(frame.now);
        for (i, orb) in self.orbs.iter().enumerate() {
            if let Some(transform) = scene.graph.transform_mut(orb.node) {
                transform.position = orb.orbit.position(i, t);
                transform.rotation.x += 0.01;
                transform.rotation.y += 0.01;
            }
        }
    }
}
