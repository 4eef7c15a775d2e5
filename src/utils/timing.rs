//! Debounce and throttle gates.
//!
//! Both are driven by explicit timestamps so that the caller's frame clock is
//! the only timer. Each gate owns at most one pending deadline.

use instant::Duration;

/// Trailing-edge debounce: every `call` cancels the pending one and
/// reschedules it `wait` after the latest call.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    wait: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debounce<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn call(&mut self, now: Duration, args: T) {
        self.pending = Some((now + self.wait, args));
    }

    /// Releases the pending arguments once their deadline has been reached.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Leading-edge throttle: the first call passes and opens a window of
/// `limit`; calls while the window is open are dropped.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    open_until: Option<Duration>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            open_until: None,
        }
    }

    /// Returns `true` when the call should run.
    pub fn call(&mut self, now: Duration) -> bool {
        match self.open_until {
            Some(until) if now < until => false,
            _ => {
                self.open_until = Some(now + self.limit);
                true
            }
        }
    }
}
