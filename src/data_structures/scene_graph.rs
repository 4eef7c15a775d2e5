//! Arena-backed scene graph.
//!
//! Nodes, geometries and materials live in flat vectors and are addressed by
//! small copyable ids. A section keeps the ids of the nodes it created next
//! to its own typed animation records; the graph itself stores no
//! per-section data.
//!
//! Parents are always inserted before their children, so a single pass in
//! insertion order is enough to resolve world transforms.

use cgmath::Vector3;

use crate::{
    data_structures::{
        geometry::Geometry,
        instance::{Transform, WorldTransform},
    },
    utils::color::Color3,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) usize);

/// Lit surface with an emissive term, drawn filled or as a wireframe.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial {
    pub color: Color3,
    pub emissive: Color3,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl PhongMaterial {
    /// Glowing, see-through surface where the emissive colour equals the
    /// base colour.
    pub fn glowing(hex: u32, emissive_intensity: f32, opacity: f32) -> Self {
        let color = Color3::from_hex(hex);
        Self {
            color,
            emissive: color,
            emissive_intensity,
            opacity,
            wireframe: false,
        }
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

/// Unlit lines, optionally tinted per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: Color3,
    pub opacity: f32,
    pub vertex_colors: bool,
}

impl LineMaterial {
    pub fn new(hex: u32, opacity: f32) -> Self {
        Self {
            color: Color3::from_hex(hex),
            opacity,
            vertex_colors: false,
        }
    }
}

/// Fresnel glow with scan lines and flicker, animated by `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct HologramMaterial {
    pub color: Color3,
    pub opacity: f32,
    pub time: f32,
}

impl Default for HologramMaterial {
    fn default() -> Self {
        Self {
            color: Color3::from_hex(0x00f0ff),
            opacity: 0.8,
            time: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Phong(PhongMaterial),
    Line(LineMaterial),
    Hologram(HologramMaterial),
}

impl Material {
    /// Raw uniform block shared by every material pipeline.
    pub fn to_raw(&self) -> MaterialRaw {
        match self {
            Material::Phong(m) => MaterialRaw {
                color: [m.color.r, m.color.g, m.color.b, m.opacity],
                emissive: [
                    m.emissive.r * m.emissive_intensity,
                    m.emissive.g * m.emissive_intensity,
                    m.emissive.b * m.emissive_intensity,
                    0.0,
                ],
                params: [0.0; 4],
            },
            Material::Line(m) => MaterialRaw {
                color: [m.color.r, m.color.g, m.color.b, m.opacity],
                emissive: [0.0; 4],
                params: [0.0, if m.vertex_colors { 1.0 } else { 0.0 }, 0.0, 0.0],
            },
            Material::Hologram(m) => MaterialRaw {
                color: [m.color.r, m.color.g, m.color.b, m.opacity],
                emissive: [0.0; 4],
                params: [m.time, 0.0, 0.0, 0.0],
            },
        }
    }
}

/// Material uniform: colour + opacity, emissive, and `(time, vertex_colors, _, _)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialRaw {
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    pub params: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct Node {
    pub transform: Transform,
    pub parent: Option<NodeId>,
    /// `None` for pure grouping nodes.
    pub renderable: Option<(GeometryId, MaterialId)>,
    pub visible: bool,
}

impl Node {
    pub fn mesh(geometry: GeometryId, material: MaterialId, transform: Transform) -> Self {
        Self {
            transform,
            parent: None,
            renderable: Some((geometry, material)),
            visible: true,
        }
    }

    pub fn group(transform: Transform) -> Self {
        Self {
            transform,
            parent: None,
            renderable: None,
            visible: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Inserts `node` below `parent`. An unknown parent attaches it to the root.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        if parent.0 < self.nodes.len() {
            node.parent = Some(parent);
        } else {
            log::warn!(
                "Parent node {} does not exist, attaching child to the root.",
                parent.0
            );
        }
        self.add_node(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|node| &node.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|node| &mut node.transform)
    }

    pub fn position(&self, id: NodeId) -> Option<Vector3<f32>> {
        self.transform(id).map(|t| t.position)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// World transforms of every node, indexed like the nodes themselves.
    pub fn world_transforms(&self) -> Vec<WorldTransform> {
        let mut worlds: Vec<WorldTransform> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = node
                .parent
                .and_then(|p| worlds.get(p.0).copied())
                .unwrap_or_else(WorldTransform::identity);
            worlds.push(&parent * &node.transform);
        }
        worlds
    }

    /// A node is drawn only if it and all of its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = self.node(id);
        while let Some(node) = current {
            if !node.visible {
                return false;
            }
            current = node.parent.and_then(|p| self.node(p));
        }
        true
    }
}
