use rand::Rng;

pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Maps `value` linearly from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    ((value - in_min) * (out_max - out_min)) / (in_max - in_min) + out_min
}

/// Uniform float in `[min, max)`.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.r#gen::<f32>() * (max - min) + min
}

/// Uniform integer in `[min, max]`, both inclusive.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// One step of exponential smoothing: `current + (target - current) * factor`.
///
/// No overshoot for `factor` in `(0, 1]`; converges only asymptotically.
pub fn smooth_towards(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
