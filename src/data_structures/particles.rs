//! Background particle field.
//!
//! Positions and colours are flat `x, y, z` buffers that are uploaded to the
//! GPU as per-instance data. The update mutates positions in place and only
//! flags the buffer as dirty; the renderer re-uploads and clears the flag.

use rand::Rng;

use crate::utils::{color::Color3, math::random_range};

pub const DEFAULT_PALETTE: [u32; 3] = [0x00f0ff, 0xff00ff, 0xb000ff];

#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<f32>,
    colors: Vec<f32>,
    pub rotation_y: f32,
    pub size: f32,
    pub opacity: f32,
    dirty: bool,
}

impl ParticleField {
    /// Scatters `count` particles uniformly inside a cube of edge `spread`
    /// centred on the origin, each tinted with a random palette entry.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, count: usize, spread: f32, palette: &[u32]) -> Self {
        let palette: Vec<Color3> = palette.iter().copied().map(Color3::from_hex).collect();
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        for _ in 0..count {
            for _ in 0..3 {
                positions.push(random_range(rng, -0.5, 0.5) * spread);
            }
            let color = if palette.is_empty() {
                Color3::new(1.0, 1.0, 1.0)
            } else {
                palette[rng.gen_range(0..palette.len())]
            };
            colors.extend_from_slice(&color.to_array());
        }
        Self {
            positions,
            colors,
            rotation_y: 0.0,
            size: 0.1,
            opacity: 0.6,
            dirty: true,
        }
    }

    /// Slow spin of the whole field plus a sine drift on every particle's
    /// height. Particles are never wrapped back into the cube.
    pub fn update(&mut self, time: f32) {
        self.rotation_y = time * 0.05;
        for p in self.positions.chunks_exact_mut(3) {
            p[1] += (time + p[0]).sin() * 0.001;
        }
        self.dirty = true;
    }

    pub fn count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Interleaved per-instance data for the particle pipeline.
    pub fn to_raw(&self) -> Vec<ParticleRaw> {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| ParticleRaw {
                position: [p[0], p[1], p[2]],
                color: [c[0], c[1], c[2]],
            })
            .collect()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleRaw {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ParticleRaw {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ParticleRaw>() as wgpu::BufferAddress,
            // one billboard quad per particle
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
