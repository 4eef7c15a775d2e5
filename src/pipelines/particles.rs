use cgmath::SquareMatrix;

use crate::{
    data_structures::{particles::ParticleRaw, texture::Texture},
    pipelines::{Layouts, basic},
    render::ParticleDraw,
};

/// Vertices per particle billboard (two triangles, no index buffer).
pub const QUAD_VERTICES: u32 = 6;

/// Field-wide particle parameters.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniform {
    pub model: [[f32; 4]; 4],
    // size, opacity, unused, unused
    pub params: [f32; 4],
}

impl ParticleUniform {
    pub fn new() -> Self {
        Self {
            model: cgmath::Matrix4::<f32>::identity().into(),
            params: [0.1, 0.6, 0.0, 0.0],
        }
    }

    pub fn update(&mut self, draw: &ParticleDraw) {
        self.model = draw.model;
        self.params = [draw.size, draw.opacity, 0.0, 0.0];
    }
}

impl Default for ParticleUniform {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mk_particle_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layouts: &Layouts,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Particle Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.particles],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Particle Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("particles.wgsl").into()),
    };
    basic::mk_render_pipeline(
        device,
        &layout,
        format,
        Some(basic::ADDITIVE_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        false,
        wgpu::PrimitiveTopology::TriangleList,
        &[ParticleRaw::desc()],
        shader,
    )
}
