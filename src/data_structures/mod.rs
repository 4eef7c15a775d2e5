//! Scene data: everything the stage and the sections mutate each frame.
//!
//! - `geometry` generates the procedural meshes and line sets
//! - `instance` holds node transforms and their per-instance GPU layout
//! - `scene_graph` is the node/geometry/material arena addressed by ids
//! - `particles` is the flat particle buffer with its dirty flag
//! - `lights` is the animated light rig
//! - `texture` wraps the few GPU textures the renderer needs

pub mod geometry;
pub mod instance;
pub mod lights;
pub mod particles;
pub mod scene_graph;
pub mod texture;
