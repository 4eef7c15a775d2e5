use instant::Duration;

/// Rolling frames-per-second counter.
///
/// Frames are counted until at least one second has passed since the window
/// opened; then `fps` is recomputed and the window restarts.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    fps: u32,
    frames: u32,
    window_start: Duration,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_millis(1000);

    pub fn new(now: Duration) -> Self {
        Self {
            fps: 0,
            frames: 0,
            window_start: now,
        }
    }

    pub fn update(&mut self, now: Duration) {
        self.frames += 1;
        if now >= self.window_start + Self::WINDOW {
            let elapsed_ms = (now - self.window_start).as_secs_f64() * 1000.0;
            self.fps = ((self.frames as f64 * 1000.0) / elapsed_ms).round() as u32;
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
