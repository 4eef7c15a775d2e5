use crate::{
    data_structures::{geometry::MeshVertex, instance::InstanceRaw, texture::Texture},
    pipelines::{Layouts, basic},
};

/// Blinn-Phong shading with emissive term and fog. `topology` picks filled
/// triangles or the wireframe line list.
pub fn mk_mesh_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layouts: &Layouts,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Mesh Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera, &layouts.lights, &layouts.material],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some(match topology {
            wgpu::PrimitiveTopology::TriangleList => "Mesh Shader",
            _ => "Wireframe Shader",
        }),
        source: wgpu::ShaderSource::Wgsl(include_str!("mesh.wgsl").into()),
    };
    basic::mk_render_pipeline(
        device,
        &layout,
        format,
        Some(basic::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        false,
        topology,
        &[MeshVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
