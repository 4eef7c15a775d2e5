use instant::Duration;

/// Elapsed time since a module was constructed.
///
/// The clock never reads the system time itself: it remembers the frame
/// timestamp it was started at and measures against later frame timestamps,
/// so every module sharing a frame sees a consistent, monotonic value.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    started_at: Duration,
}

impl Clock {
    pub fn starting_at(now: Duration) -> Self {
        Self { started_at: now }
    }

    /// Seconds since construction; never negative.
    pub fn elapsed(&self, now: Duration) -> f32 {
        now.saturating_sub(self.started_at).as_secs_f32()
    }
}
