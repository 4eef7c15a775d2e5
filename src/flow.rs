//! Frame loop and application event loop.
//!
//! A "flow" is one section of the backdrop: it builds its nodes once and
//! animates them every frame. Flows never run their own timers; the single
//! [`FrameLoop`] owned by the stage calls every registered flow once per
//! frame, in registration order, with the scene passed in explicitly.
//!
//! # User-facing types
//!
//! - [`SectionFlow`] is the trait sections implement
//! - [`FrameLoop`] is the ordered registry the stage drives
//! - [`run`] opens the window and runs the backdrop until it is closed
//!
//! # Lifecycle
//!
//! 1. The loader plays its progress steps while the GPU context is created;
//!    it and the page animations advance on every redraw, GPU or not
//! 2. Once the loader completes, the stage is built and every section is
//!    registered, which calls its `on_init`
//! 3. Each redraw ticks the stage (camera, particles, lights, then every
//!    flow's `on_update`) and draws the result when a context exists
//! 4. Pointer, scroll and keyboard input are routed to the stage and count
//!    as user activity for the idle timer
//! 5. Closing the window or unloading the page cancels the frame loop and
//!    all pending timers

use std::{fmt::Debug, sync::Arc};

use instant::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::Key,
    window::Window,
};

use crate::{
    backdrop::Backdrop,
    camera::Ray,
    config::Config,
    context::Context,
    renderer::SceneRenderer,
    stage::Scene,
    utils::device::{self, DeviceClass},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Timing of the frame being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// Time since the application started.
    pub now: Duration,
    /// Time since the previous frame, zero on the first one.
    pub dt: Duration,
}

/// Trait for one animated section of the backdrop.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is registered; build nodes here
/// 2. `on_update()` is called every frame while the flow is registered
/// 3. `on_pointer()` is called for pointer moves when hover is ray based
/// 4. `set_hovered()` is called when the page reports hover on a card
///
pub trait SectionFlow {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Builds the flow's nodes and materials.
    ///
    /// Anything the flow needs later (node ids, per-object animation records)
    /// should be kept on `self`.
    fn on_init(&mut self, scene: &mut Scene);

    /// Advances the flow's animation to `frame.now`.
    fn on_update(&mut self, scene: &mut Scene, frame: &Frame);

    /// Pointer ray in world space.
    fn on_pointer(&mut self, _scene: &Scene, _ray: &Ray) {}

    /// Hover reported for the `index`-th hoverable page element.
    fn set_hovered(&mut self, _index: usize, _hovered: bool) {}
}

// Dummy impl to make the frame loop printable
impl Debug for dyn SectionFlow + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SectionFlow({})", self.name())
    }
}

/// Returned by [`FrameLoop::register`], used to cancel the flow again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowHandle(u64);

/// Ordered set of flows ticked once per frame.
#[derive(Debug, Default)]
pub struct FrameLoop {
    flows: Vec<(FlowHandle, Box<dyn SectionFlow>)>,
    next_id: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, flow: Box<dyn SectionFlow>) -> FlowHandle {
        let handle = FlowHandle(self.next_id);
        self.next_id += 1;
        self.flows.push((handle, flow));
        handle
    }

    /// Removes the flow; `false` if it was not registered (anymore).
    pub fn cancel(&mut self, handle: FlowHandle) -> bool {
        let before = self.flows.len();
        self.flows.retain(|(h, flow)| {
            let keep = *h != handle;
            if !keep {
                log::debug!("Cancelled section '{}'", flow.name());
            }
            keep
        });
        self.flows.len() != before
    }

    /// Updates every flow in registration order.
    pub fn tick(&mut self, scene: &mut Scene, frame: &Frame) {
        for (_, flow) in self.flows.iter_mut() {
            flow.on_update(scene, frame);
        }
    }

    pub fn for_each(&mut self, mut f: impl FnMut(&mut dyn SectionFlow)) {
        for (_, flow) in self.flows.iter_mut() {
            f(flow.as_mut());
        }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn clear(&mut self) {
        self.flows.clear();
    }
}

#[cfg(not(target_arch = "wasm32"))]
type AppPage = crate::page::HeadlessPage;
#[cfg(target_arch = "wasm32")]
type AppPage = crate::dom::DomPage;

/// Window, surface and GPU resources; present once the context is ready.
#[derive(Debug)]
pub(crate) struct AppState {
    ctx: Context,
    renderer: SceneRenderer,
    is_surface_configured: bool,
}

impl AppState {
    fn new(ctx: Context) -> Self {
        let renderer = SceneRenderer::new(&ctx.device, &ctx.queue, ctx.config.format, ctx.size());
        Self {
            ctx,
            renderer,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
            self.renderer.resize(&self.ctx.device, [width, height]);
        }
    }
}

#[derive(Debug)]
pub(crate) enum FlowEvent {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Initialized(Context),
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Hover { index: usize, hovered: bool },
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Activity,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Exit,
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    start: Instant,
    window: Option<Arc<Window>>,
    state: Option<AppState>,
    page: AppPage,
    backdrop: Backdrop,
}

impl App {
    /// Pixels scrolled per wheel line on native.
    #[cfg(not(target_arch = "wasm32"))]
    const LINE_HEIGHT: f32 = 40.0;

    fn new(event_loop: &EventLoop<FlowEvent>, config: Config) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        #[cfg(not(target_arch = "wasm32"))]
        let mut page = {
            let mut page = AppPage::new().with_sections(5);
            page.scroll.scroll_height = config.page_height;
            page
        };
        #[cfg(target_arch = "wasm32")]
        let mut page = AppPage::new(proxy.clone(), &config.canvas_id)?;
        let start = Instant::now();
        // The page reports card hover itself on the web.
        let backdrop = Backdrop::new(&mut page, config, start.elapsed())
            .with_ray_hover(!cfg!(target_arch = "wasm32"));
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            start,
            window: None,
            state: None,
            page,
            backdrop,
        })
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn init(&mut self, ctx: Context) {
        log::info!(
            "Running on {:?}, GPU: {}",
            DeviceClass::detect(),
            device::gpu_name(Some(&ctx.adapter_info)).unwrap_or_else(|| "unknown".to_string())
        );
        let mut state = AppState::new(ctx);
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        self.backdrop.resize(size.width, size.height);
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.page.scroll.client_height = size.height as f32;
        }
        state.ctx.window.request_redraw();
        self.state = Some(state);
    }

    fn on_activity(&mut self) {
        let now = self.now();
        self.backdrop.on_activity(&mut self.page, now);
    }

    fn toggle_glitch(&mut self) {
        let intensity = self.backdrop.config().glitch_intensity.unwrap_or(0.5);
        if let Some(stage) = self.backdrop.stage_mut() {
            stage.configure(|scene| {
                scene.glitch_intensity = match scene.glitch_intensity {
                    Some(_) => None,
                    None => Some(intensity),
                };
                log::info!("Glitch overlay: {:?}", scene.glitch_intensity);
            });
        }
    }

    fn shutdown(&mut self) {
        self.backdrop.shutdown();
        self.state = None;
        log::info!("Backdrop shut down");
    }

    fn redraw(&mut self) {
        let now = self.now();
        // Page animations run even when no GPU context could be created.
        let list = self.backdrop.advance(&mut self.page, now);
        if let Some(window) = &self.window {
            // invoke main render loop
            window.request_redraw();
        }

        let (Some(state), Some(list)) = (&mut self.state, list) else {
            return;
        };
        if !state.is_surface_configured {
            return;
        }
        let Some(stage) = self.backdrop.stage_mut() else {
            return;
        };

        match state.ctx.surface.get_current_texture() {
            Ok(output) => {
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                state.renderer.render(
                    &state.ctx.device,
                    &state.ctx.queue,
                    &view,
                    stage.scene_mut(),
                    &list,
                );
                output.present();
            }
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("neon-folio");

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&self.backdrop.config().canvas_id))
                .and_then(|canvas| canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok());
            if canvas.is_none() {
                log::error!("No canvas with id '{}' found", self.backdrop.config().canvas_id);
            }
            window_attributes = window_attributes.with_canvas(canvas);
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.backdrop.resize(size.width, size.height);
        window.request_redraw();
        self.window = Some(window.clone());
        let init_future = Context::new(window);

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(ctx) => self.init(ctx),
                Err(e) => {
                    log::error!("App initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok(ctx) => {
                        if proxy.send_event(FlowEvent::Initialized(ctx)).is_err() {
                            log::error!("Event loop closed before the context was ready");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(ctx) => self.init(ctx),
            FlowEvent::Hover { index, hovered } => {
                if let Some(stage) = self.backdrop.stage_mut() {
                    stage.set_hovered(index, hovered);
                }
            }
            FlowEvent::Activity => self.on_activity(),
            FlowEvent::Exit => {
                self.shutdown();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.resize(size.width, size.height);
                }
                self.backdrop.resize(size.width, size.height);
                #[cfg(not(target_arch = "wasm32"))]
                {
                    self.page.scroll.client_height = size.height as f32;
                }
            }
            WindowEvent::Occluded(hidden) => {
                log::debug!("Page visibility changed: hidden = {}", hidden);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(state), Some(stage)) = (&self.state, self.backdrop.stage_mut()) {
                    let [width, height] = state.ctx.size();
                    let x = (position.x as f32 / width as f32) * 2.0 - 1.0;
                    let y = -((position.y as f32 / height as f32) * 2.0 - 1.0);
                    stage.on_pointer_moved(x, y);
                }
                self.on_activity();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let dy = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y * Self::LINE_HEIGHT,
                        MouseScrollDelta::PixelDelta(position) => position.y as f32,
                    };
                    let scroll = &mut self.page.scroll;
                    let max = (scroll.scroll_height - scroll.client_height).max(0.0);
                    scroll.scroll_top = (scroll.scroll_top - dy).clamp(0.0, max);
                }
                #[cfg(target_arch = "wasm32")]
                let _: MouseScrollDelta = delta;
                self.on_activity();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && matches!(&event.logical_key, Key::Character(c) if c.as_str().eq_ignore_ascii_case("g"))
                {
                    self.toggle_glitch();
                }
                self.on_activity();
            }
            WindowEvent::MouseInput { .. } | WindowEvent::Touch(_) => self.on_activity(),
            _ => {}
        }
    }
}

/// Opens the window and runs the backdrop until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Could not initialize logger: {}",
                e
            )));
        }
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
