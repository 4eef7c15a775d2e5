//! GPU side of the backdrop.
//!
//! [`SceneRenderer`] mirrors the stage's scene on the GPU: geometries and
//! materials are uploaded the first time they show up, the per-frame
//! uniforms, instances and (when dirty) particles are rewritten every frame,
//! and a [`RenderList`] is drawn with one instanced call per batch.

use std::{iter, time::Duration};

use anyhow::Context as _;
use wgpu::util::DeviceExt;

use crate::{
    camera::CameraUniform,
    data_structures::{
        geometry::{Geometry, Topology},
        instance::InstanceRaw,
        particles::ParticleRaw,
        scene_graph::Material,
        texture::Texture,
    },
    pipelines::{
        Layouts, Pipelines, basic,
        glitch::GlitchUniform,
        particles::{ParticleUniform, QUAD_VERTICES},
    },
    render::{Pass, RenderList},
    stage::Scene,
};

#[derive(Debug)]
struct GpuGeometry {
    vertices: wgpu::Buffer,
    triangles: Option<(wgpu::Buffer, u32)>,
    lines: Option<(wgpu::Buffer, u32)>,
}

impl GpuGeometry {
    fn upload(device: &wgpu::Device, geometry: &Geometry, index: usize) -> Self {
        let index_buffer = |indices: &[u32], kind: &str| {
            (!indices.is_empty()).then(|| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("geometry {index} {kind} indices")),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (buffer, indices.len() as u32)
            })
        };
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("geometry {index} vertices")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangles = match geometry.topology {
            Topology::Triangles => index_buffer(&geometry.indices, "triangle"),
            Topology::Lines => None,
        };
        let lines = index_buffer(&geometry.wireframe_indices(), "line");
        Self {
            vertices,
            triangles,
            lines,
        }
    }

    fn indices(&self, pass: Pass) -> Option<&(wgpu::Buffer, u32)> {
        match pass {
            Pass::Surface | Pass::Hologram => self.triangles.as_ref(),
            Pass::Wireframe | Pass::Lines => self.lines.as_ref(),
        }
    }
}

#[derive(Debug)]
struct GpuMaterial {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Grows `buffer` to hold at least `needed` elements of `stride` bytes.
fn ensure_capacity(
    device: &wgpu::Device,
    buffer: &mut wgpu::Buffer,
    capacity: &mut usize,
    needed: usize,
    stride: usize,
    usage: wgpu::BufferUsages,
    label: &str,
) {
    if needed <= *capacity {
        return;
    }
    let new_capacity = needed.next_power_of_two();
    log::debug!("Growing {} from {} to {} elements", label, capacity, new_capacity);
    *buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (new_capacity * stride) as wgpu::BufferAddress,
        usage,
        mapped_at_creation: false,
    });
    *capacity = new_capacity;
}

#[derive(Debug)]
pub struct SceneRenderer {
    format: wgpu::TextureFormat,
    size: [u32; 2],
    layouts: Layouts,
    pipelines: Pipelines,
    depth_texture: Texture,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    lights_buffer: wgpu::Buffer,
    lights_bind_group: wgpu::BindGroup,
    geometries: Vec<GpuGeometry>,
    materials: Vec<GpuMaterial>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    particle_buffer: wgpu::Buffer,
    particle_capacity: usize,
    particle_uniform: ParticleUniform,
    particle_uniform_buffer: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,
    glitch_buffer: wgpu::Buffer,
    glitch_bind_group: wgpu::BindGroup,
    glitch_intensity: Option<f32>,
}

impl SceneRenderer {
    const INITIAL_INSTANCES: usize = 64;
    const INSTANCE_USAGE: wgpu::BufferUsages =
        wgpu::BufferUsages::VERTEX.union(wgpu::BufferUsages::COPY_DST);

    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        size: [u32; 2],
    ) -> Self {
        let layouts = Layouts::new(device);
        let pipelines = Pipelines::new(device, format, &layouts);
        let depth_texture = Texture::create_depth_texture(device, size, "depth_texture");

        let camera_uniform = CameraUniform::new();
        let camera_buffer = basic::mk_uniform_buffer(device, "Camera Buffer", &camera_uniform);
        let camera_bind_group =
            basic::mk_uniform_bind_group(device, "camera_bind_group", &layouts.camera, &camera_buffer);

        let lights = crate::data_structures::lights::LightRig::default().to_raw();
        let lights_buffer = basic::mk_uniform_buffer(device, "Lights Buffer", &lights);
        let lights_bind_group =
            basic::mk_uniform_bind_group(device, "lights_bind_group", &layouts.lights, &lights_buffer);

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (Self::INITIAL_INSTANCES * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: Self::INSTANCE_USAGE,
            mapped_at_creation: false,
        });
        let particle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Buffer"),
            size: std::mem::size_of::<ParticleRaw>() as wgpu::BufferAddress,
            usage: Self::INSTANCE_USAGE,
            mapped_at_creation: false,
        });

        let particle_uniform = ParticleUniform::new();
        let particle_uniform_buffer =
            basic::mk_uniform_buffer(device, "Particle Uniform Buffer", &particle_uniform);
        let particle_bind_group = basic::mk_uniform_bind_group(
            device,
            "particle_bind_group",
            &layouts.particles,
            &particle_uniform_buffer,
        );

        let placeholder = Texture::create_placeholder(device, queue);
        let glitch_buffer =
            basic::mk_uniform_buffer(device, "Glitch Buffer", &GlitchUniform::new(0.0, 1.0));
        let sampler = placeholder
            .sampler
            .clone()
            .unwrap_or_else(|| device.create_sampler(&wgpu::SamplerDescriptor::default()));
        let glitch_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layouts.glitch,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&placeholder.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: glitch_buffer.as_entire_binding(),
                },
            ],
            label: Some("glitch_bind_group"),
        });

        Self {
            format,
            size,
            layouts,
            pipelines,
            depth_texture,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            lights_buffer,
            lights_bind_group,
            geometries: Vec::new(),
            materials: Vec::new(),
            instance_buffer,
            instance_capacity: Self::INITIAL_INSTANCES,
            particle_buffer,
            particle_capacity: 1,
            particle_uniform,
            particle_uniform_buffer,
            particle_bind_group,
            glitch_buffer,
            glitch_bind_group,
            glitch_intensity: None,
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn resize(&mut self, device: &wgpu::Device, size: [u32; 2]) {
        if size[0] == 0 || size[1] == 0 {
            return;
        }
        self.size = size;
        self.depth_texture = Texture::create_depth_texture(device, size, "depth_texture");
    }

    /// Uploads everything `list` refers to. Clears the particle dirty flag.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &mut Scene,
        list: &RenderList,
    ) {
        self.camera_uniform.update_view_proj(&scene.camera);
        self.camera_uniform.update_fog(&scene.fog, scene.time);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[self.camera_uniform]));
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[scene.lights.to_raw()]));

        self.sync_geometries(device, scene);
        self.sync_materials(device, queue, scene.graph.materials());

        if !list.instances.is_empty() {
            ensure_capacity(
                device,
                &mut self.instance_buffer,
                &mut self.instance_capacity,
                list.instances.len(),
                std::mem::size_of::<InstanceRaw>(),
                Self::INSTANCE_USAGE,
                "Instance Buffer",
            );
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&list.instances));
        }

        if scene.particles.is_dirty() {
            let raw = scene.particles.to_raw();
            if !raw.is_empty() {
                ensure_capacity(
                    device,
                    &mut self.particle_buffer,
                    &mut self.particle_capacity,
                    raw.len(),
                    std::mem::size_of::<ParticleRaw>(),
                    Self::INSTANCE_USAGE,
                    "Particle Buffer",
                );
                queue.write_buffer(&self.particle_buffer, 0, bytemuck::cast_slice(&raw));
            }
            scene.particles.mark_clean();
        }
        if let Some(draw) = &list.particles {
            self.particle_uniform.update(draw);
            queue.write_buffer(
                &self.particle_uniform_buffer,
                0,
                bytemuck::cast_slice(&[self.particle_uniform]),
            );
        }

        self.glitch_intensity = scene.glitch_intensity;
        if let Some(intensity) = self.glitch_intensity {
            queue.write_buffer(
                &self.glitch_buffer,
                0,
                bytemuck::cast_slice(&[GlitchUniform::new(scene.time, intensity)]),
            );
        }
    }

    fn sync_geometries(&mut self, device: &wgpu::Device, scene: &Scene) {
        let geometries = scene.graph.geometries();
        for (index, geometry) in geometries.iter().enumerate().skip(self.geometries.len()) {
            self.geometries.push(GpuGeometry::upload(device, geometry, index));
        }
    }

    fn sync_materials(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, materials: &[Material]) {
        for (index, material) in materials.iter().enumerate() {
            let raw = material.to_raw();
            match self.materials.get(index) {
                Some(gpu) => queue.write_buffer(&gpu.buffer, 0, bytemuck::cast_slice(&[raw])),
                None => {
                    let buffer = basic::mk_uniform_buffer(device, &format!("material {index}"), &raw);
                    let bind_group = basic::mk_uniform_bind_group(
                        device,
                        &format!("material {index} bind group"),
                        &self.layouts.material,
                        &buffer,
                    );
                    self.materials.push(GpuMaterial { buffer, bind_group });
                }
            }
        }
    }

    /// Records the frame into `encoder`. [`prepare`](Self::prepare) must run first.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
        list: &RenderList,
    ) {
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(particles) = &list.particles {
                render_pass.set_pipeline(&self.pipelines.particles);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.particle_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
                render_pass.draw(0..QUAD_VERTICES, 0..particles.count);
            }

            for batch in &list.batches {
                let (Some(geometry), Some(material)) = (
                    self.geometries.get(batch.geometry.0),
                    self.materials.get(batch.material.0),
                ) else {
                    log::warn!("Batch {:?} has not been uploaded, skipping it.", batch);
                    continue;
                };
                let Some((indices, count)) = geometry.indices(batch.pass) else {
                    continue;
                };
                if batch.instances.is_empty() {
                    log::warn!("you attemted to render something with zero instances");
                    continue;
                }
                render_pass.set_pipeline(self.pipelines.for_pass(batch.pass));
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.lights_bind_group, &[]);
                render_pass.set_bind_group(2, &material.bind_group, &[]);
                render_pass.set_vertex_buffer(0, geometry.vertices.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..*count, 0, batch.instances.clone());
            }
        }

        if self.glitch_intensity.is_some() {
            let mut overlay = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Glitch Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            overlay.set_pipeline(&self.pipelines.glitch);
            overlay.set_bind_group(0, &self.glitch_bind_group, &[]);
            overlay.draw(0..3, 0..1);
        }
    }

    /// Prepares, draws and submits one frame onto `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &mut Scene,
        list: &RenderList,
    ) {
        self.prepare(device, queue, scene, list);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        self.draw(&mut encoder, view, scene.clear_colour, list);
        queue.submit(iter::once(encoder.finish()));
    }

    /// Renders one frame offscreen and reads it back, tightly packed, in the
    /// renderer's colour format.
    pub async fn capture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &mut Scene,
        list: &RenderList,
    ) -> anyhow::Result<Vec<u8>> {
        let [width, height] = self.size;
        let target = Texture::create_render_target(device, self.size, self.format, "capture target");
        self.prepare(device, queue, scene, list);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Capture Encoder"),
        });
        self.draw(&mut encoder, &target.view, scene.clear_colour, list);

        let unpadded = 4 * width;
        let padded = unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            size: (padded * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            label: Some("Capture Buffer"),
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(iter::once(encoder.finish()));

        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .context("Waiting for the capture copy failed")?;
        rx.receive()
            .await
            .context("Capture buffer mapping was dropped")?
            .context("Capture buffer could not be mapped")?;

        let pixels = {
            let data = buffer_slice.get_mapped_range();
            data.chunks(padded as usize)
                .flat_map(|row| &row[..unpadded as usize])
                .copied()
                .collect()
        };
        output_buffer.unmap();
        Ok(pixels)
    }
}
