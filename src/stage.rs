//! The scene manager.
//!
//! [`Stage`] owns the [`Scene`] (graph, particle field, lights, camera and
//! fog) together with the central [`FrameLoop`] that drives the section
//! flows. It is built once the loading sequence completes and is the only
//! thing sections ever receive: they get `&mut Scene` explicitly in
//! `on_init` and `on_update`, never through a global.
//!
//! One call to [`Stage::tick`] advances everything by one frame, in a fixed
//! order, and returns the [`RenderList`] the renderer draws.

use instant::Duration;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    camera::Camera,
    clock::Clock,
    config::Config,
    data_structures::{
        lights::LightRig,
        particles::{DEFAULT_PALETTE, ParticleField},
        scene_graph::SceneGraph,
    },
    flow::{FlowHandle, Frame, FrameLoop, SectionFlow},
    render::RenderList,
    utils::{color::Color3, fps::FpsCounter, timing::Throttle},
};

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color3,
    pub near: f32,
    pub far: f32,
}

/// Everything that is drawn, plus the shared randomness sections build from.
#[derive(Debug)]
pub struct Scene {
    pub graph: SceneGraph,
    pub particles: ParticleField,
    pub lights: LightRig,
    pub camera: Camera,
    pub fog: Fog,
    pub clear_colour: wgpu::Color,
    pub glitch_intensity: Option<f32>,
    pub rng: StdRng,
    /// Stage clock in seconds at the latest tick.
    pub time: f32,
    /// Frame timestamp of the latest tick.
    pub now: Duration,
}

impl Scene {
    pub fn new(width: u32, height: u32, config: &Config, now: Duration) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = ParticleField::new(
            &mut rng,
            config.particle_count,
            config.particle_spread,
            &DEFAULT_PALETTE,
        );
        let camera = Camera::new(width, height).with_motion(
            config.camera_smoothing,
            config.pointer_scale,
            config.camera_base_z,
            config.scroll_depth,
        );
        Self {
            graph: SceneGraph::new(),
            particles,
            lights: LightRig::default(),
            camera,
            fog: config.fog,
            clear_colour: config.clear_colour,
            glitch_intensity: config.glitch_intensity,
            rng,
            time: 0.0,
            now,
        }
    }
}

pub struct Stage {
    scene: Scene,
    clock: Clock,
    flows: FrameLoop,
    fps: FpsCounter,
    fps_check: Throttle,
    last_tick: Option<Duration>,
    ray_hover: bool,
}

impl Stage {
    /// How often the frame rate is checked in debug builds.
    const FPS_CHECK_INTERVAL: Duration = Duration::from_secs(5);
    const LOW_FPS: u32 = 30;

    pub fn new(width: u32, height: u32, config: &Config, now: Duration) -> Self {
        log::info!(
            "Building stage ({}x{}, {} particles)",
            width,
            height,
            config.particle_count
        );
        Self {
            scene: Scene::new(width, height, config, now),
            clock: Clock::starting_at(now),
            flows: FrameLoop::new(),
            fps: FpsCounter::new(now),
            fps_check: Throttle::new(Self::FPS_CHECK_INTERVAL),
            last_tick: None,
            ray_hover: !cfg!(target_arch = "wasm32"),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    /// Hover from pointer rays; turned off where the page reports hover itself.
    pub fn set_ray_hover(&mut self, enabled: bool) {
        self.ray_hover = enabled;
    }

    /// Initialises `flow` against the scene and appends it to the frame loop.
    pub fn register(&mut self, mut flow: Box<dyn SectionFlow>) -> FlowHandle {
        flow.on_init(&mut self.scene);
        log::info!("Section '{}' initialised", flow.name());
        self.flows.register(flow)
    }

    pub fn cancel(&mut self, handle: FlowHandle) -> bool {
        self.flows.cancel(handle)
    }

    /// Applies a runtime tweak to the scene, e.g. the clear colour.
    pub fn configure(&mut self, f: impl FnOnce(&mut Scene)) {
        f(&mut self.scene)
    }

    /// Pointer in normalised device coordinates, y up.
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        self.scene.camera.set_pointer(x, y);
        if self.ray_hover {
            let ray = self.scene.camera.ray_from_ndc(x, y);
            let scene = &self.scene;
            self.flows.for_each(|flow| flow.on_pointer(scene, &ray));
        }
    }

    /// Hover of a project card reported by the page.
    pub fn set_hovered(&mut self, index: usize, hovered: bool) {
        self.flows.for_each(|flow| flow.set_hovered(index, hovered));
    }

    /// `percent` is the page scroll position in `0..=100`.
    pub fn on_scroll(&mut self, percent: f32) {
        self.scene.camera.set_scroll(percent / 100.0);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.scene.camera.resize(width, height);
        }
    }

    /// Advances the scene by one frame and returns what to draw.
    ///
    /// Order: camera easing, particle drift and spin, light orbits, every
    /// registered section in registration order, render list, frame counter.
    pub fn tick(&mut self, now: Duration) -> RenderList {
        let dt = self
            .last_tick
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        self.last_tick = Some(now);

        let time = self.clock.elapsed(now);
        self.scene.time = time;
        self.scene.now = now;

        self.scene.camera.update();
        self.scene.particles.update(time);
        self.scene.lights.animate(time);

        let frame = Frame { now, dt };
        self.flows.tick(&mut self.scene, &frame);

        let list = RenderList::build(&self.scene);

        self.fps.update(now);
        if cfg!(debug_assertions) && self.fps_check.call(now) {
            let fps = self.fps.fps();
            if fps > 0 && fps < Self::LOW_FPS {
                log::warn!("Low FPS detected: {}", fps);
            }
        }
        list
    }

    /// Drops every section; the scene stays as it is.
    pub fn shutdown(&mut self) {
        self.flows.clear();
    }
}
