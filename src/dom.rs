//! The real document, seen through [`Page`].
//!
//! Visibility is computed from bounding rects each frame with the same
//! threshold and bottom margin the page styles assume. Activity, hover and
//! visibility listeners forward into the event loop through its proxy, and
//! unloading the page asks the event loop to shut down.

use anyhow::Context as _;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, Element, HtmlElement, Window};
use winit::event_loop::EventLoopProxy;

use crate::{
    flow::FlowEvent,
    page::{ElementKind, Observed, Page, ScrollMetrics, StyleChange, StyleUpdate, Target},
    utils::parse_index,
};

const ACTIVITY_EVENTS: [&str; 5] = ["mousemove", "mousedown", "keypress", "scroll", "touchstart"];
/// Fraction of an element that must be on screen before it counts as visible.
const VISIBLE_THRESHOLD: f64 = 0.2;
/// Pixels cut off the bottom of the viewport for visibility tests.
const BOTTOM_MARGIN: f64 = 100.0;

type Listener = Closure<dyn FnMut(web_sys::Event)>;

pub struct DomPage {
    window: Window,
    document: Document,
    observed: Vec<Observed>,
    _listeners: Vec<Listener>,
}

impl std::fmt::Debug for DomPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomPage")
            .field("observed", &self.observed.len())
            .finish()
    }
}

fn listen(target: &web_sys::EventTarget, kind: &str, listener: Listener) -> anyhow::Result<Listener> {
    target
        .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("Could not listen for '{}': {:?}", kind, e))?;
    Ok(listener)
}

fn forward(proxy: &EventLoopProxy<FlowEvent>, mk: impl Fn() -> FlowEvent + 'static) -> Listener {
    let proxy = proxy.clone();
    Closure::new(move |_event: web_sys::Event| {
        if proxy.send_event(mk()).is_err() {
            log::debug!("Event loop closed, dropping DOM event");
        }
    })
}

impl DomPage {
    pub(crate) fn new(proxy: EventLoopProxy<FlowEvent>, canvas_id: &str) -> anyhow::Result<Self> {
        let window = web_sys::window().context("No global window")?;
        let document = window.document().context("Window has no document")?;

        let observed = Self::collect_observed(&document);
        log::debug!("Observing {} page elements", observed.len());

        let mut listeners = Vec::new();
        for kind in ACTIVITY_EVENTS {
            listeners.push(listen(&document, kind, forward(&proxy, || FlowEvent::Activity))?);
        }

        let cards = Self::query_all(&document, ".project-card");
        for (index, card) in cards.iter().enumerate() {
            listeners.push(listen(
                card,
                "mouseenter",
                forward(&proxy, move || FlowEvent::Hover { index, hovered: true }),
            )?);
            listeners.push(listen(
                card,
                "mouseleave",
                forward(&proxy, move || FlowEvent::Hover { index, hovered: false }),
            )?);
        }

        for kind in ["beforeunload", "pagehide"] {
            listeners.push(listen(&window, kind, forward(&proxy, || FlowEvent::Exit))?);
        }

        let doc = document.clone();
        listeners.push(listen(
            &document,
            "visibilitychange",
            Closure::new(move |_event: web_sys::Event| {
                if doc.hidden() {
                    log::info!("Page hidden - pausing animations");
                } else {
                    log::info!("Page visible - resuming animations");
                }
            }),
        )?);

        if let Some(canvas) = document.get_element_by_id(canvas_id) {
            listeners.push(listen(
                &canvas,
                "contextmenu",
                Closure::new(|event: web_sys::Event| event.prevent_default()),
            )?);
        }

        Ok(Self {
            window,
            document,
            observed,
            _listeners: listeners,
        })
    }

    fn query_all(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(nodes) = document.query_selector_all(selector) else {
            log::warn!("Invalid selector '{}'", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn collect_observed(document: &Document) -> Vec<Observed> {
        let selector = ElementKind::ALL
            .iter()
            .map(|kind| format!(".{}", kind.class_name()))
            .collect::<Vec<_>>()
            .join(", ");
        let mut counts = [0usize; ElementKind::ALL.len()];
        Self::query_all(document, &selector)
            .into_iter()
            .filter_map(|element| {
                let (slot, kind) = ElementKind::ALL
                    .iter()
                    .copied()
                    .enumerate()
                    .find(|(_, kind)| element.class_list().contains(kind.class_name()))?;
                let position = counts[slot];
                counts[slot] += 1;
                let attr = kind
                    .index_attribute()
                    .and_then(|name| element.get_attribute(&format!("data-{name}")));
                Some(Observed {
                    target: Target::Element(kind, position),
                    kind,
                    index: parse_index(attr.as_deref()),
                })
            })
            .collect()
    }

    fn nth(&self, selector: &str, position: usize) -> Option<Element> {
        self.document
            .query_selector_all(selector)
            .ok()?
            .item(position as u32)?
            .dyn_into::<Element>()
            .ok()
    }

    fn first(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn element(&self, target: Target) -> Option<Element> {
        match target {
            Target::Body => self.document.body().map(Into::into),
            Target::Element(kind, position) => self.nth(&format!(".{}", kind.class_name()), position),
            Target::Section(i) => self.nth(".section", i),
            Target::SkillLevel(i) => self.nth(".skill-level", i),
            Target::LoadingScreen => self.document.get_element_by_id("loading-screen"),
            Target::LoadingBar => self.first(".loading-progress"),
            Target::LoadingPercentage => self.first(".loading-percentage"),
            Target::LoadingText => self.first(".loading-text"),
        }
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default()
    }
}

impl Page for DomPage {
    fn observed(&self) -> Vec<Observed> {
        self.observed.clone()
    }

    fn visible(&self) -> Vec<Target> {
        let bottom = self.viewport_height() - BOTTOM_MARGIN;
        self.observed
            .iter()
            .filter(|observed| {
                let Some(element) = self.element(observed.target) else {
                    return false;
                };
                let rect = element.get_bounding_client_rect();
                if rect.height() <= 0.0 {
                    return false;
                }
                let shown = rect.bottom().min(bottom) - rect.top().max(0.0);
                shown / rect.height() >= VISIBLE_THRESHOLD
            })
            .map(|observed| observed.target)
            .collect()
    }

    fn section_count(&self) -> usize {
        self.document
            .query_selector_all(".section")
            .map(|nodes| nodes.length() as usize)
            .unwrap_or_default()
    }

    fn skill_levels(&self) -> Vec<Option<String>> {
        Self::query_all(&self.document, ".skill-level")
            .iter()
            .map(|element| element.get_attribute("data-level"))
            .collect()
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        match self.document.document_element() {
            Some(root) => ScrollMetrics {
                scroll_top: root.scroll_top() as f32,
                scroll_height: root.scroll_height() as f32,
                client_height: root.client_height() as f32,
            },
            None => ScrollMetrics::default(),
        }
    }

    fn apply(&mut self, update: &StyleUpdate) {
        let Some(element) = self.element(update.target) else {
            return;
        };
        let result = match &update.change {
            StyleChange::Style { property, value } => match element.dyn_ref::<HtmlElement>() {
                Some(html) => html.style().set_property(property, value),
                None => Ok(()),
            },
            StyleChange::AddClass(class) => element.class_list().add_1(class),
            StyleChange::RemoveClass(class) => element.class_list().remove_1(class),
            StyleChange::Text(text) => {
                element.set_text_content(Some(text));
                Ok(())
            }
        };
        if let Err(e) = result {
            log::warn!("Could not apply {:?}: {:?}", update, e);
        }
    }
}
