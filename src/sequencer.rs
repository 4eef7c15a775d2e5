//! Timed action sequences.
//!
//! A [`Sequencer`] replaces chains of one-shot timers: it holds a list of
//! `(due, action)` pairs and a single start timestamp. Advancing it with the
//! current frame time drains every action that became due, in order.
//! Cancelling drops all pending actions at once.

use std::collections::VecDeque;

use instant::Duration;

#[derive(Debug, Clone)]
pub struct Sequencer<A> {
    started_at: Option<Duration>,
    // offsets relative to `started_at`, sorted ascending
    steps: VecDeque<(Duration, A)>,
}

impl<A> Default for Sequencer<A> {
    fn default() -> Self {
        Self {
            started_at: None,
            steps: VecDeque::new(),
        }
    }
}

impl<A> Sequencer<A> {
    /// Each delay is measured from the previous step (a timer chain).
    pub fn chained(steps: impl IntoIterator<Item = (Duration, A)>) -> Self {
        let mut offset = Duration::ZERO;
        let steps = steps
            .into_iter()
            .map(|(delay, action)| {
                offset += delay;
                (offset, action)
            })
            .collect();
        Self {
            started_at: None,
            steps,
        }
    }

    /// Each delay is measured from the start (a stagger).
    pub fn staggered(steps: impl IntoIterator<Item = (Duration, A)>) -> Self {
        let mut steps: Vec<_> = steps.into_iter().collect();
        steps.sort_by_key(|(offset, _)| *offset);
        Self {
            started_at: None,
            steps: steps.into(),
        }
    }

    pub fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    /// Adds one more step `delay` after `now`, starting the sequence if needed.
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: A) {
        let started_at = *self.started_at.get_or_insert(now);
        let offset = now.saturating_sub(started_at) + delay;
        let idx = self.steps.partition_point(|(due, _)| *due <= offset);
        self.steps.insert(idx, (offset, action));
    }

    /// Removes and returns every action due at `now`, oldest first.
    pub fn advance(&mut self, now: Duration) -> Vec<A> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        let elapsed = now.saturating_sub(started_at);
        let mut due = Vec::new();
        while let Some((offset, _)) = self.steps.front() {
            if *offset > elapsed {
                break;
            }
            if let Some((_, action)) = self.steps.pop_front() {
                due.push(action);
            }
        }
        due
    }

    /// Timestamp of the next pending step, if the sequence is running.
    pub fn next_due(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        self.steps.front().map(|(offset, _)| started_at + *offset)
    }

    pub fn cancel(&mut self) {
        self.steps.clear();
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.steps.len()
    }
}
