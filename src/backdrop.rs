//! The part of the application that runs with or without a GPU.
//!
//! The loading screen and the page animations only touch the page, so they
//! advance every frame from the moment the backdrop is created. The stage is
//! built once the loader completes and is ticked on every frame after that;
//! whoever owns a renderer draws the [`RenderList`] it returns.

use instant::Duration;

use crate::{
    animation::AnimationController,
    config::Config,
    loader::{Loader, LoaderEvent},
    page::Page,
    render::RenderList,
    sections,
    stage::Stage,
};

pub struct Backdrop {
    config: Config,
    size: [u32; 2],
    ray_hover: bool,
    loader: Loader,
    animations: AnimationController,
    stage: Option<Stage>,
}

impl Backdrop {
    /// Starts the loading sequence and observes `page` at `now`.
    pub fn new(page: &mut dyn Page, config: Config, now: Duration) -> Self {
        let mut loader = Loader::new();
        loader.start(now);
        let animations = AnimationController::new(page, now, config.idle_delay);
        Self {
            config,
            size: [1, 1],
            ray_hover: true,
            loader,
            animations,
            stage: None,
        }
    }

    /// Whether the stage picks hovered cards from the pointer ray.
    pub fn with_ray_hover(mut self, enabled: bool) -> Self {
        self.ray_hover = enabled;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn animations(&self) -> &AnimationController {
        &self.animations
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    pub fn stage_mut(&mut self) -> Option<&mut Stage> {
        self.stage.as_mut()
    }

    /// Runs one frame. Returns what to draw once the stage exists.
    pub fn advance(&mut self, page: &mut dyn Page, now: Duration) -> Option<RenderList> {
        let events = self.loader.update(now);
        self.loader.render(page, &events);
        if self.stage.is_none() && events.contains(&LoaderEvent::Complete) {
            self.build_stage(now);
        }

        self.animations.update(page, now);

        let stage = self.stage.as_mut()?;
        stage.on_scroll(page.scroll_metrics().percent());
        Some(stage.tick(now))
    }

    fn build_stage(&mut self, now: Duration) {
        let [width, height] = self.size;
        let mut stage = Stage::new(width, height, &self.config, now);
        stage.set_ray_hover(self.ray_hover);
        for flow in sections::all() {
            stage.register(flow);
        }
        log::info!("Stage ready with {} sections", stage.flow_count());
        self.stage = Some(stage);
    }

    pub fn on_activity(&mut self, page: &mut dyn Page, now: Duration) {
        self.animations.on_activity(page, now);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = [width.max(1), height.max(1)];
        if let Some(stage) = &mut self.stage {
            stage.resize(width, height);
        }
    }

    /// Cancels the loader, every page timer and the stage's sections.
    pub fn shutdown(&mut self) {
        self.loader.cancel();
        self.animations.shutdown();
        if let Some(stage) = &mut self.stage {
            stage.shutdown();
        }
    }

    /// Loader steps, page timers and sections still waiting to run.
    pub fn pending(&self) -> usize {
        self.loader.pending()
            + self.animations.pending()
            + self.stage.as_ref().map_or(0, Stage::flow_count)
    }
}
