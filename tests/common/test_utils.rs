use std::{cell::RefCell, rc::Rc};

use instant::Duration;
use neon_folio::{
    Config,
    camera::Ray,
    flow::{Frame, SectionFlow},
    stage::{Scene, Stage},
};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Seeded, small configuration so layouts are reproducible and cheap.
pub fn test_config() -> Config {
    Config {
        particle_count: 64,
        seed: Some(7),
        ..Config::default()
    }
}

pub fn test_scene() -> Scene {
    Scene::new(WIDTH, HEIGHT, &test_config(), Duration::ZERO)
}

pub fn frame_at(millis: u64) -> Frame {
    Frame {
        now: ms(millis),
        dt: Duration::ZERO,
    }
}

/// Shared log of what the recording flows saw.
#[derive(Debug, Clone, Default)]
pub struct Calls {
    log: Rc<RefCell<Vec<String>>>,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl Calls {
    pub fn push(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }
}

/// Flow that builds nothing and records every hook invocation.
pub struct RecordingFlow {
    name: &'static str,
    calls: Calls,
}

impl RecordingFlow {
    pub fn boxed(name: &'static str, calls: &Calls) -> Box<dyn SectionFlow> {
        Box::new(Self {
            name,
            calls: calls.clone(),
        })
    }
}

impl SectionFlow for RecordingFlow {
    fn name(&self) -> &'static str {
        self.name
    }

    fn on_init(&mut self, _scene: &mut Scene) {
        self.calls.push(format!("init {}", self.name));
    }

    fn on_update(&mut self, _scene: &mut Scene, frame: &Frame) {
        self.calls.push(format!("update {}", self.name));
        self.calls.frames.borrow_mut().push(*frame);
    }

    fn on_pointer(&mut self, _scene: &Scene, _ray: &Ray) {
        self.calls.push(format!("pointer {}", self.name));
    }

    fn set_hovered(&mut self, index: usize, hovered: bool) {
        self.calls
            .push(format!("hover {} {} {}", self.name, index, hovered));
    }
}

/// A stage without any sections.
pub fn empty_stage(config: &Config) -> Stage {
    Stage::new(WIDTH, HEIGHT, config, Duration::ZERO)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
