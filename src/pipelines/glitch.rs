//! Full-screen glitch overlay: RGB split of `tDiffuse`, scan lines, noise
//! and random glitch blocks. Added on top of the finished frame.

use crate::pipelines::{Layouts, basic};

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlitchUniform {
    pub time: f32,
    pub intensity: f32,
    pub _padding: [f32; 2],
}

impl GlitchUniform {
    pub fn new(time: f32, intensity: f32) -> Self {
        Self {
            time,
            intensity,
            _padding: [0.0; 2],
        }
    }
}

/// `tDiffuse` texture, its sampler and the uniform.
pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
        label: Some("glitch_bind_group_layout"),
    })
}

pub fn mk_glitch_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layouts: &Layouts,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Glitch Pipeline Layout"),
        bind_group_layouts: &[&layouts.glitch],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Glitch Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("glitch.wgsl").into()),
    };
    basic::mk_render_pipeline(
        device,
        &layout,
        format,
        Some(basic::ADDITIVE_BLENDING),
        None,
        false,
        wgpu::PrimitiveTopology::TriangleList,
        &[],
        shader,
    )
}
