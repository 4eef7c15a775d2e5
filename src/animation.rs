//! Page-side animation: reveals, idle breathing, parallax and scroll easing.
//!
//! The controller owns no timers of its own. Staggered reveals and the idle
//! breathing run on [`Sequencer`]s and the idle timeout is a [`Debounce`];
//! all of them advance from the frame timestamp passed to
//! [`AnimationController::update`] and can be dropped together with
//! [`AnimationController::shutdown`].

use std::collections::HashSet;

use instant::Duration;

use crate::{
    page::{ElementKind, Observed, Page, StyleUpdate, Target},
    sequencer::Sequencer,
    utils::{parse_index, smooth_towards, timing::Debounce},
};

const PANEL_STAGGER: Duration = Duration::from_millis(200);
const SKILL_DELAY: Duration = Duration::from_millis(100);
const PROJECT_STAGGER: Duration = Duration::from_millis(150);
const BREATH_STAGGER: Duration = Duration::from_millis(300);
const BREATH_HOLD: Duration = Duration::from_millis(1000);
const SCROLL_EASE: f32 = 0.1;
const PARALLAX_SPEED: f32 = 0.5;

/// Formats a pixel offset without a negative zero.
fn px(value: f32) -> String {
    if value == 0.0 {
        "0px".to_string()
    } else {
        format!("{value}px")
    }
}

fn delay_for(index: i32, step: Duration) -> Duration {
    step * index.max(0) as u32
}

#[derive(Debug)]
pub struct AnimationController {
    observed: Vec<Observed>,
    revealed: HashSet<Target>,
    reveals: Sequencer<StyleUpdate>,
    idle_timer: Debounce<()>,
    is_idle: bool,
    breathing: Sequencer<StyleUpdate>,
    pub scroll_y: f32,
    pub target_scroll_y: f32,
    pub scroll_speed: f32,
}

impl AnimationController {
    /// Starts observing `page` and arms the idle timer.
    pub fn new(page: &mut dyn Page, now: Duration, idle_delay: Duration) -> Self {
        let observed = page.observed();
        log::debug!("Observing {} page elements", observed.len());

        let mut controller = Self {
            observed,
            revealed: HashSet::new(),
            reveals: Sequencer::default(),
            idle_timer: Debounce::new(idle_delay),
            is_idle: false,
            breathing: Sequencer::default(),
            scroll_y: 0.0,
            target_scroll_y: 0.0,
            scroll_speed: 0.0,
        };
        controller.apply_skill_levels(page);
        controller.on_activity(page, now);
        controller
    }

    fn apply_skill_levels(&self, page: &mut dyn Page) {
        for (i, attr) in page.skill_levels().into_iter().enumerate() {
            let level = parse_index(attr.as_deref());
            page.apply(&StyleUpdate::style(
                Target::SkillLevel(i),
                "--level",
                format!("{level}%"),
            ));
        }
    }

    /// Pointer move or press, key press, scroll or touch: leave idle and
    /// restart the idle timer.
    pub fn on_activity(&mut self, page: &mut dyn Page, now: Duration) {
        self.is_idle = false;
        page.apply(&StyleUpdate::remove_class(Target::Body, "idle"));
        self.idle_timer.call(now, ());
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle
    }

    pub fn is_revealed(&self, target: Target) -> bool {
        self.revealed.contains(&target)
    }

    /// Runs once per frame.
    pub fn update(&mut self, page: &mut dyn Page, now: Duration) {
        self.reveal_visible(page, now);
        page.apply_all(&self.reveals.advance(now));

        if self.idle_timer.poll(now).is_some() {
            self.enter_idle(page, now);
        }
        page.apply_all(&self.breathing.advance(now));

        let metrics = page.scroll_metrics();
        self.target_scroll_y = metrics.scroll_top;
        self.scroll_y = smooth_towards(self.scroll_y, self.target_scroll_y, SCROLL_EASE);
        self.scroll_speed = self.target_scroll_y - self.scroll_y;

        self.update_parallax(page, metrics.percent());
    }

    fn reveal_visible(&mut self, page: &mut dyn Page, now: Duration) {
        for target in page.visible() {
            if !self.revealed.insert(target) {
                continue;
            }
            let Some(observed) = self.observed.iter().find(|o| o.target == target).copied()
            else {
                continue;
            };
            page.apply(&StyleUpdate::add_class(target, "fade-in"));

            let (delay, transform) = match observed.kind {
                ElementKind::AboutPanel => (delay_for(observed.index, PANEL_STAGGER), "translateY(0)"),
                ElementKind::SkillItem => (SKILL_DELAY, "translateX(0)"),
                ElementKind::ProjectCard => {
                    (delay_for(observed.index, PROJECT_STAGGER), "translateY(0)")
                }
            };
            self.reveals
                .schedule(now, delay, StyleUpdate::style(target, "opacity", "1"));
            self.reveals
                .schedule(now, delay, StyleUpdate::style(target, "transform", transform));
        }
    }

    fn enter_idle(&mut self, page: &mut dyn Page, now: Duration) {
        self.is_idle = true;
        page.apply(&StyleUpdate::add_class(Target::Body, "idle"));

        let panels = self
            .observed
            .iter()
            .filter(|o| o.kind == ElementKind::AboutPanel)
            .enumerate();
        for (i, panel) in panels {
            let start = BREATH_STAGGER * i as u32;
            self.breathing.schedule(
                now,
                start,
                StyleUpdate::style(panel.target, "transform", "translateY(-5px)"),
            );
            self.breathing.schedule(
                now,
                start + BREATH_HOLD,
                StyleUpdate::style(panel.target, "transform", "translateY(0)"),
            );
        }
    }

    fn update_parallax(&self, page: &mut dyn Page, scroll_percent: f32) {
        for i in 0..page.section_count() {
            let speed = if i % 2 == 0 { PARALLAX_SPEED } else { -PARALLAX_SPEED };
            page.apply(&StyleUpdate::style(
                Target::Section(i),
                "transform",
                format!("translateY({})", px(scroll_percent * speed)),
            ));
        }
    }

    /// Drops every pending reveal, breathing step and the idle timer.
    pub fn shutdown(&mut self) {
        self.reveals.cancel();
        self.breathing.cancel();
        self.idle_timer.cancel();
    }

    pub fn pending(&self) -> usize {
        self.reveals.pending() + self.breathing.pending()
    }
}
