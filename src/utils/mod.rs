//! Small shared helpers used across the stage, sections and page logic.
//!
//! - `easing` contains the easing curves used by reveal and loader animations
//! - `math` holds interpolation, clamping, range mapping and randomness
//! - `timing` provides debounce/throttle gates driven by explicit timestamps
//! - `fps` is the rolling frame counter
//! - `device` classifies the host from a user agent and the GPU adapter
//! - `color` converts between hex and normalised RGB

pub mod color;
pub mod device;
pub mod easing;
pub mod fps;
pub mod math;
pub mod timing;

pub use math::{clamp, lerp, map_range, random_int, random_range, smooth_towards};

/// Percentage (0..=100) of how far the page has been scrolled.
///
/// Returns `0.0` when the document is not taller than the viewport.
pub fn scroll_percentage(scroll_top: f32, scroll_height: f32, client_height: f32) -> f32 {
    let scrollable = scroll_height - client_height;
    if scrollable > 0.0 {
        (scroll_top / scrollable) * 100.0
    } else {
        0.0
    }
}

/// Parses a declarative attribute the way the page markup expects:
/// leading whitespace, an optional sign and as many digits as there are.
/// Anything else (missing attribute, no digits) yields `0`.
pub fn parse_index(attr: Option<&str>) -> i32 {
    let Some(raw) = attr else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i32>()
        .map(|value| sign * value)
        .unwrap_or(0)
}

/// Euclidean distance between two 2D points.
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Unit vector in the direction of `(x, y)`; the zero vector stays zero.
pub fn normalize(x: f32, y: f32) -> (f32, f32) {
    let length = (x * x + y * y).sqrt();
    if length > 0.0 {
        (x / length, y / length)
    } else {
        (0.0, 0.0)
    }
}
