//! About section: three floating glass panels joined by two lines.

use cgmath::Vector3;

use crate::{
    clock::Clock,
    data_structures::{
        geometry::Geometry,
        instance::Transform,
        scene_graph::{LineMaterial, Material, Node, NodeId, PhongMaterial},
    },
    flow::{Frame, SectionFlow},
    stage::Scene,
};

pub const PANEL_COUNT: usize = 3;
const BASE_Y: f32 = -5.0;

/// Rest pose of a panel; the animation oscillates around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    pub node: NodeId,
    pub index: usize,
    pub base_yaw: f32,
}

#[derive(Debug, Default)]
pub struct About {
    clock: Option<Clock>,
    panels: Vec<PanelState>,
    links: Vec<NodeId>,
}

impl About {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &[PanelState] {
        &self.panels
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }
}

impl SectionFlow for About {
    fn name(&self) -> &'static str {
        "about"
    }

    fn on_init(&mut self, scene: &mut Scene) {
        self.clock = Some(Clock::starting_at(scene.now));
        let graph = &mut scene.graph;

        let plane = Geometry::plane(2.0, 1.5);
        let outline = graph.add_geometry(plane.edges());
        let plane = graph.add_geometry(plane);
        let glass = graph.add_material(Material::Phong(PhongMaterial::glowing(0x00f0ff, 0.2, 0.1)));
        let rim = graph.add_material(Material::Line(LineMaterial::new(0x00f0ff, 0.5)));

        let mut anchors = Vec::with_capacity(PANEL_COUNT);
        for index in 0..PANEL_COUNT {
            let offset = index as f32 - 1.0;
            let mut transform = Transform::at(offset * 3.0, BASE_Y, -2.0);
            transform.rotation.y = offset * 0.2;
            anchors.push(transform.position);

            let node = graph.add_node(Node::mesh(plane, glass, transform));
            graph.add_child(node, Node::mesh(outline, rim, Transform::new()));
            self.panels.push(PanelState {
                node,
                index,
                base_yaw: offset * 0.2,
            });
        }

        // static: the lines keep the panels' starting positions
        let link = graph.add_material(Material::Line(LineMaterial::new(0xff00ff, 0.3)));
        for pair in anchors.windows(2) {
            let points: [Vector3<f32>; 2] = [pair[0], pair[1]];
            let geometry = graph.add_geometry(Geometry::polyline(&points));
            self.links.push(graph.add_node(Node::mesh(geometry, link, Transform::new())));
        }
    }

    fn on_update(&mut self, scene: &mut Scene, frame: &Frame) {
        let Some(clock) = self.clock else {
            return;
        };
        let t = clock.elapsed(frame.now);
        for panel in &self.panels {
            if let Some(transform) = scene.graph.transform_mut(panel.node) {
                transform.position.y = BASE_Y + (t + panel.index as f32).sin() * 0.3;
                transform.rotation.y = panel.base_yaw + (t * 0.5).sin() * 0.1;
            }
        }
    }
}
