//! Contact section: a neon floor grid that turns very slowly.

use crate::{
    data_structures::{
        geometry::Geometry,
        instance::Transform,
        scene_graph::{LineMaterial, Material, Node, NodeId},
    },
    flow::{Frame, SectionFlow},
    stage::Scene,
    utils::color::Color3,
};

const GRID_SIZE: f32 = 10.0;
const GRID_DIVISIONS: u32 = 10;
const TURN_PER_FRAME: f32 = 0.001;

#[derive(Debug, Default)]
pub struct ContactGrid {
    grid: Option<NodeId>,
}

impl ContactGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> Option<NodeId> {
        self.grid
    }
}

impl SectionFlow for ContactGrid {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn on_init(&mut self, scene: &mut Scene) {
        let graph = &mut scene.graph;
        let geometry = graph.add_geometry(Geometry::grid(
            GRID_SIZE,
            GRID_DIVISIONS,
            Color3::from_hex(0x00f0ff),
            Color3::from_hex(0xff00ff),
        ));
        let material = graph.add_material(Material::Line(LineMaterial {
            vertex_colors: true,
            ..LineMaterial::new(0xffffff, 0.3)
        }));
        self.grid = Some(graph.add_node(Node::mesh(
            geometry,
            material,
            Transform::at(0.0, -35.0, -5.0),
        )));
    }

    fn on_update(&mut self, scene: &mut Scene, _frame: &Frame) {
        if let Some(transform) = self.grid.and_then(|id| scene.graph.transform_mut(id)) {
            transform.rotation.y += TURN_PER_FRAME;
        }
    }
}
