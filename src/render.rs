//! Render composition and pipeline batching.
//!
//! The stage does not talk to the GPU. Once per frame it flattens its scene
//! into a [`RenderList`]: every visible node becomes one instance, and
//! instances sharing a pipeline, geometry and material are grouped into a
//! single [`DrawBatch`] so the renderer can draw them with one instanced call.
//!
//! # Key types
//!
//! - [`Pass`] selects the pipeline a node is drawn with
//! - [`DrawBatch`] is one instanced draw call
//! - [`RenderList`] is everything the renderer needs for one frame
//!

use std::{collections::BTreeMap, ops::Range};

use cgmath::{Matrix4, Rad};

use crate::{
    data_structures::{
        instance::InstanceRaw,
        scene_graph::{GeometryId, Material, MaterialId},
    },
    stage::Scene,
};

/// Pipeline used to draw a batch. Batches are drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pass {
    /// Lit, filled triangles.
    Surface,
    /// Fresnel hologram shader.
    Hologram,
    /// Lit triangle edges.
    Wireframe,
    /// Unlit line segments.
    Lines,
}

impl Pass {
    pub fn for_material(material: &Material) -> Self {
        match material {
            Material::Phong(m) if m.wireframe => Pass::Wireframe,
            Material::Phong(_) => Pass::Surface,
            Material::Hologram(_) => Pass::Hologram,
            Material::Line(_) => Pass::Lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    pub pass: Pass,
    pub geometry: GeometryId,
    pub material: MaterialId,
    /// Range into [`RenderList::instances`].
    pub instances: Range<u32>,
}

/// Particle draw parameters; the positions themselves stay in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDraw {
    pub count: u32,
    pub model: [[f32; 4]; 4],
    pub size: f32,
    pub opacity: f32,
}

#[derive(Debug, Default)]
pub struct RenderList {
    pub instances: Vec<InstanceRaw>,
    pub batches: Vec<DrawBatch>,
    pub particles: Option<ParticleDraw>,
}

impl RenderList {
    pub fn build(scene: &Scene) -> Self {
        let graph = &scene.graph;
        let worlds = graph.world_transforms();

        let mut groups: BTreeMap<(Pass, GeometryId, MaterialId), Vec<InstanceRaw>> =
            BTreeMap::new();
        for (id, node) in graph.nodes() {
            let Some((geometry, material)) = node.renderable else {
                continue;
            };
            if !graph.is_visible(id) {
                continue;
            }
            let Some(mat) = graph.material(material) else {
                log::warn!("Node {:?} references a missing material, skipping it.", id);
                continue;
            };
            let pass = Pass::for_material(mat);
            groups
                .entry((pass, geometry, material))
                .or_default()
                .push(worlds[id.0].to_raw());
        }

        let mut instances = Vec::new();
        let mut batches = Vec::with_capacity(groups.len());
        for ((pass, geometry, material), mut raws) in groups {
            let start = instances.len() as u32;
            instances.append(&mut raws);
            batches.push(DrawBatch {
                pass,
                geometry,
                material,
                instances: start..instances.len() as u32,
            });
        }

        let field = &scene.particles;
        let particles = (field.count() > 0).then(|| ParticleDraw {
            count: field.count() as u32,
            model: Matrix4::from_angle_y(Rad(field.rotation_y)).into(),
            size: field.size,
            opacity: field.opacity,
        });

        Self {
            instances,
            batches,
            particles,
        }
    }

    /// Nothing to draw besides the clear colour.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.particles.is_none()
    }
}
