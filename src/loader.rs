//! The loading sequence shown before the stage exists.
//!
//! Five chained steps push the progress target to 20, 40, 60, 80 and 100
//! percent, each with its own status text; half a second after the last
//! one the loader emits [`LoaderEvent::Complete`] exactly once. The visible
//! progress eases towards the target every frame and snaps onto it once it
//! is within half a percent.

use instant::Duration;

use crate::{
    page::{Page, StyleUpdate, Target},
    sequencer::Sequencer,
    utils::smooth_towards,
};

const STEPS: [(u64, u8, &str); 5] = [
    (200, 20, "Loading assets..."),
    (400, 40, "Initializing 3D engine..."),
    (600, 60, "Compiling shaders..."),
    (800, 80, "Building scene..."),
    (1000, 100, "Ready"),
];
const COMPLETE_DELAY: Duration = Duration::from_millis(500);
const PROGRESS_EASE: f32 = 0.1;
const SNAP_DISTANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    Progress { percent: u8, text: &'static str },
    Complete,
}

#[derive(Debug)]
pub struct Loader {
    steps: Sequencer<LoaderEvent>,
    progress: f32,
    target: f32,
    text: &'static str,
    complete: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        let steps = STEPS
            .iter()
            .map(|&(delay, percent, text)| {
                (
                    Duration::from_millis(delay),
                    LoaderEvent::Progress { percent, text },
                )
            })
            .chain(std::iter::once((COMPLETE_DELAY, LoaderEvent::Complete)));
        Self {
            steps: Sequencer::chained(steps),
            progress: 0.0,
            target: 0.0,
            text: "",
            complete: false,
        }
    }

    pub fn start(&mut self, now: Duration) {
        self.steps.start(now);
    }

    /// Advances the sequence and eases the progress bar. Returns the events
    /// that fired during this frame.
    pub fn update(&mut self, now: Duration) -> Vec<LoaderEvent> {
        let events = self.steps.advance(now);
        for event in &events {
            match *event {
                LoaderEvent::Progress { percent, text } => {
                    log::info!("Loader: {} ({}%)", text, percent);
                    self.target = percent as f32;
                    self.text = text;
                }
                LoaderEvent::Complete => {
                    log::info!("Loader: complete");
                    self.complete = true;
                }
            }
        }

        self.progress = smooth_towards(self.progress, self.target, PROGRESS_EASE);
        if (self.target - self.progress).abs() <= SNAP_DISTANCE {
            self.progress = self.target;
        }
        events
    }

    /// Mirrors the loader state onto the page's loading screen.
    pub fn render(&self, page: &mut dyn Page, events: &[LoaderEvent]) {
        page.apply(&StyleUpdate::style(
            Target::LoadingBar,
            "width",
            format!("{}%", self.progress),
        ));
        page.apply(&StyleUpdate::text(
            Target::LoadingPercentage,
            format!("{}%", self.displayed_percent()),
        ));
        for event in events {
            match event {
                LoaderEvent::Progress { text, .. } => {
                    page.apply(&StyleUpdate::text(Target::LoadingText, *text));
                }
                LoaderEvent::Complete => {
                    page.apply(&StyleUpdate::add_class(Target::LoadingScreen, "hidden"));
                    page.apply(&StyleUpdate::add_class(Target::Body, "loaded"));
                }
            }
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn displayed_percent(&self) -> u32 {
        self.progress.round() as u32
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn cancel(&mut self) {
        self.steps.cancel();
    }

    pub fn pending(&self) -> usize {
        self.steps.pending()
    }
}
