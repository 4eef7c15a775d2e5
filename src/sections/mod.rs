//! Decorative 3D content of the page sections.
//!
//! Each section is a [`SectionFlow`]: it builds a handful of nodes in
//! `on_init` and animates them from its own clock in `on_update`. A section
//! keeps the ids of its nodes next to small typed records holding whatever
//! per-object animation state it needs.
//!
//! - `hero` holds the hologram name blocks and the floating wireframe shapes
//! - `about` holds the three info panels and their connecting lines
//! - `skills` holds the orbiting skill solids
//! - `projects` holds the hoverable project cards
//! - `contact` holds the slowly turning floor grid

pub mod about;
pub mod contact;
pub mod hero;
pub mod projects;
pub mod skills;

use crate::flow::SectionFlow;

pub use about::About;
pub use contact::ContactGrid;
pub use hero::Hero;
pub use projects::Projects;
pub use skills::Skills;

/// Per-axis rotation added every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Every section of the page, in the order they are registered.
pub fn all() -> Vec<Box<dyn SectionFlow>> {
    vec![
        Box::new(Hero::new()),
        Box::new(About::new()),
        Box::new(Skills::new()),
        Box::new(Projects::new()),
        Box::new(ContactGrid::new()),
    ]
}
