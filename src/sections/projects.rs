//! Projects section: three glass cards that lift and tilt while hovered.
//!
//! Hover arrives either from the page (`set_hovered` with the card's
//! position among the `.project-card` elements) or from a pointer ray tested
//! against the card boxes.

use cgmath::{SquareMatrix, Vector3};

use crate::{
    camera::Ray,
    clock::Clock,
    data_structures::{
        geometry::Geometry,
        instance::Transform,
        scene_graph::{LineMaterial, Material, Node, NodeId, PhongMaterial},
    },
    flow::{Frame, SectionFlow},
    stage::Scene,
    utils::smooth_towards,
};

pub const CARD_COUNT: usize = 3;
const HOVER_LIFT: f32 = 0.5;
const FOLLOW: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardState {
    pub node: NodeId,
    pub base_y: f32,
    pub hovered: bool,
}

impl CardState {
    /// Height the card is heading to at `time`.
    pub fn target_y(&self, index: usize, time: f32) -> f32 {
        let lift = if self.hovered { HOVER_LIFT } else { 0.0 };
        self.base_y + (time + index as f32).sin() * 0.2 + lift
    }
}

#[derive(Debug, Default)]
pub struct Projects {
    clock: Option<Clock>,
    cards: Vec<CardState>,
    // local bounds of the card box
    bounds: Option<(Vector3<f32>, Vector3<f32>)>,
}

impl Projects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    /// Index of the nearest card hit by `ray`.
    pub fn pick(&self, scene: &Scene, ray: &Ray) -> Option<usize> {
        let (min, max) = self.bounds?;
        let worlds = scene.graph.world_transforms();
        self.cards
            .iter()
            .enumerate()
            .filter_map(|(i, card)| {
                let inverse = worlds.get(card.node.0)?.0.invert()?;
                let distance = ray.transformed(&inverse).intersect_aabb(min, max)?;
                Some((i, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl SectionFlow for Projects {
    fn name(&self) -> &'static str {
        "projects"
    }

    fn on_init(&mut self, scene: &mut Scene) {
        self.clock = Some(Clock::starting_at(scene.now));
        let graph = &mut scene.graph;

        let card = Geometry::cuboid(2.5, 1.8, 0.1);
        self.bounds = Some(card.bounds());
        let outline = graph.add_geometry(card.edges());
        let card = graph.add_geometry(card);
        let glass = graph.add_material(Material::Phong(PhongMaterial::glowing(0x00f0ff, 0.2, 0.15)));
        let rim = graph.add_material(Material::Line(LineMaterial::new(0x00f0ff, 0.6)));

        for i in 0..CARD_COUNT {
            let transform = Transform::at((i as f32 - 1.0) * 4.0, -25.0, -3.0);
            let base_y = transform.position.y;
            let node = graph.add_node(Node::mesh(card, glass, transform));
            graph.add_child(node, Node::mesh(outline, rim, Transform::new()));
            self.cards.push(CardState {
                node,
                base_y,
                hovered: false,
            });
        }
    }

    fn on_update(&mut self, scene: &mut Scene, frame: &Frame) {
        let Some(clock) = self.clock else {
            return;
        };
        let t = clock.elapsed(frame.now);
        for (i, card) in self.cards.iter().enumerate() {
            let Some(transform) = scene.graph.transform_mut(card.node) else {
                continue;
            };
            let target = card.target_y(i, t);
            transform.position.y = smooth_towards(transform.position.y, target, FOLLOW);
            transform.rotation.y = (t * 0.5 + i as f32).sin() * 0.1;
            if card.hovered {
                transform.rotation.z += 0.01;
            } else {
                transform.rotation.z *= 0.95;
            }
        }
    }

    fn on_pointer(&mut self, scene: &Scene, ray: &Ray) {
        let hit = self.pick(scene, ray);
        for (i, card) in self.cards.iter_mut().enumerate() {
            card.hovered = hit == Some(i);
        }
    }

    fn set_hovered(&mut self, index: usize, hovered: bool) {
        match self.cards.get_mut(index) {
            Some(card) => card.hovered = hovered,
            None => log::warn!(
                "Hover reported for project card {} but only {} exist, ignoring it.",
                index,
                self.cards.len()
            ),
        }
    }
}
