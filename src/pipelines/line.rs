use crate::{
    data_structures::{geometry::MeshVertex, instance::InstanceRaw, texture::Texture},
    pipelines::{Layouts, basic},
};

pub fn mk_line_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layouts: &Layouts,
) -> wgpu::RenderPipeline {
    // the light group is unused but kept so every scene pipeline shares slots
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Line Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.lights, &layouts.material],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Line Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("line.wgsl").into()),
    };
    basic::mk_render_pipeline(
        device,
        &layout,
        format,
        Some(basic::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        false,
        wgpu::PrimitiveTopology::LineList,
        &[MeshVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
