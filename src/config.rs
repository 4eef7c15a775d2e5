//! Runtime configuration of the backdrop.
//!
//! Every knob has the value the portfolio ships with as its default, so
//! `Config::default()` reproduces the stock look.

use instant::Duration;

use crate::{stage::Fog, utils::color::Color3};

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of background particles.
    pub particle_count: usize,
    /// Edge length of the cube the particles are scattered in.
    pub particle_spread: f32,
    /// Per-frame factor the camera rotation moves towards its target with.
    pub camera_smoothing: f32,
    /// Pointer position (NDC) to camera rotation (radians).
    pub pointer_scale: f32,
    pub camera_base_z: f32,
    /// Extra camera distance at 100% scroll.
    pub scroll_depth: f32,
    pub idle_delay: Duration,
    pub clear_colour: wgpu::Color,
    pub fog: Fog,
    /// Strength of the full-screen glitch overlay, `None` to disable it.
    pub glitch_intensity: Option<f32>,
    /// Fixed RNG seed for reproducible layouts; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Height in pixels of the virtual page scrolled by the mouse wheel on
    /// native, where there is no document to scroll.
    pub page_height: f32,
    /// Id of the canvas element the renderer attaches to on the web.
    pub canvas_id: String,
}

impl Default for Config {
    fn default() -> Self {
        let bg = Color3::from_hex(0x0a0a0f);
        Self {
            particle_count: 1000,
            particle_spread: 50.0,
            camera_smoothing: 0.05,
            pointer_scale: 0.1,
            camera_base_z: 5.0,
            scroll_depth: 2.0,
            idle_delay: Duration::from_millis(3000),
            clear_colour: wgpu::Color {
                r: bg.r as f64,
                g: bg.g as f64,
                b: bg.b as f64,
                a: 0.0,
            },
            fog: Fog {
                color: bg,
                near: 10.0,
                far: 50.0,
            },
            glitch_intensity: None,
            seed: None,
            page_height: 5000.0,
            canvas_id: "webgl-canvas".to_string(),
        }
    }
}
