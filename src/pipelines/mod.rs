//! Render pipelines and their WGSL shaders.
//!
//! Bind group convention for the scene pipelines: group 0 is the per-frame
//! camera/fog uniform, group 1 the light rig (or the particle uniform for
//! the particle pipeline), group 2 the material.
//!
//! - `basic` shared pipeline construction and uniform helpers
//! - `mesh` lit surfaces and lit wireframes
//! - `line` unlit line segments
//! - `hologram` the fresnel hologram shader
//! - `particles` additive particle billboards
//! - `glitch` the optional full-screen glitch overlay

pub mod basic;
pub mod glitch;
pub mod hologram;
pub mod line;
pub mod mesh;
pub mod particles;

use crate::render::Pass;

/// Bind group layouts shared between pipelines and the renderer.
#[derive(Debug)]
pub struct Layouts {
    pub camera: wgpu::BindGroupLayout,
    pub lights: wgpu::BindGroupLayout,
    pub material: wgpu::BindGroupLayout,
    pub particles: wgpu::BindGroupLayout,
    pub glitch: wgpu::BindGroupLayout,
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let all = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        Self {
            camera: basic::mk_uniform_layout(device, "camera_bind_group_layout", all),
            lights: basic::mk_uniform_layout(device, "lights_bind_group_layout", wgpu::ShaderStages::FRAGMENT),
            material: basic::mk_uniform_layout(device, "material_bind_group_layout", all),
            particles: basic::mk_uniform_layout(device, "particles_bind_group_layout", all),
            glitch: glitch::mk_bind_group_layout(device),
        }
    }
}

#[derive(Debug)]
pub struct Pipelines {
    pub surface: wgpu::RenderPipeline,
    pub wireframe: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub hologram: wgpu::RenderPipeline,
    pub particles: wgpu::RenderPipeline,
    pub glitch: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, layouts: &Layouts) -> Self {
        Self {
            surface: mesh::mk_mesh_pipeline(device, format, layouts, wgpu::PrimitiveTopology::TriangleList),
            wireframe: mesh::mk_mesh_pipeline(device, format, layouts, wgpu::PrimitiveTopology::LineList),
            lines: line::mk_line_pipeline(device, format, layouts),
            hologram: hologram::mk_hologram_pipeline(device, format, layouts),
            particles: particles::mk_particle_pipeline(device, format, layouts),
            glitch: glitch::mk_glitch_pipeline(device, format, layouts),
        }
    }

    pub fn for_pass(&self, pass: Pass) -> &wgpu::RenderPipeline {
        match pass {
            Pass::Surface => &self.surface,
            Pass::Hologram => &self.hologram,
            Pass::Wireframe => &self.wireframe,
            Pass::Lines => &self.lines,
        }
    }
}
