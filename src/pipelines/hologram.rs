use crate::{
    data_structures::{geometry::MeshVertex, instance::InstanceRaw, texture::Texture},
    pipelines::{Layouts, basic},
};

/// Fresnel rim, scan lines and flicker driven by the material's `time`.
/// Unlit and unfogged.
pub fn mk_hologram_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layouts: &Layouts,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Hologram Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.lights, &layouts.material],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Hologram Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("hologram.wgsl").into()),
    };
    basic::mk_render_pipeline(
        device,
        &layout,
        format,
        Some(basic::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        false,
        wgpu::PrimitiveTopology::TriangleList,
        &[MeshVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
