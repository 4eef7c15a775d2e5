//! neon-folio
//!
//! Animated 3D backdrop for a single-page portfolio, running natively and in
//! the browser on WASM. A particle field, per-section decorative scenes and
//! a pointer-following camera are drawn behind the page, while page-level
//! animations (scroll reveals, idle breathing, parallax and the loading
//! screen) are driven from the same frame loop.
//!
//! High-level modules
//! - `stage`: the scene manager owning scene graph, particles, lights, camera and frame loop
//! - `flow`: the section trait, the central frame loop and the application event loop
//! - `sections`: hero, about, skills, projects and contact decorations
//! - `animation`: page reveal, idle and parallax animation controller
//! - `backdrop`: loader, page animations and stage advanced together each frame
//! - `loader`: the staged loading sequence
//! - `page`: the abstract page the animations act on, with an in-memory version
//! - `camera`: camera, projection, picking rays and uniforms
//! - `context`: window, surface and GPU device
//! - `data_structures`: geometry, transforms, scene graph, particles, lights and textures
//! - `pipelines`: the render pipelines and their shaders
//! - `render`: turns a scene into batched draw calls
//! - `renderer`: uploads scene data and records draw calls
//! - `sequencer`: explicit-time scheduling of delayed steps
//! - `utils`: easing, math, timing gates, colours and device detection
//!

pub mod animation;
pub mod backdrop;
pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod flow;
pub mod loader;
pub mod page;
pub mod pipelines;
pub mod render;
pub mod renderer;
pub mod sections;
pub mod sequencer;
pub mod stage;
pub mod utils;

// Re-exports commonly used types for convenience in downstream code.
pub use backdrop::Backdrop;
pub use config::Config;
pub use flow::{FrameLoop, SectionFlow, run};
pub use stage::{Scene, Stage};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point when loaded as a web module.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run(Config::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
