//! The page the backdrop sits behind.
//!
//! Everything the core needs from the hosting document goes through the
//! [`Page`] trait: which elements to observe, which of them are on screen,
//! how far the document is scrolled, and a sink for [`StyleUpdate`]s. The web
//! build implements it on top of the DOM; [`HeadlessPage`] records the
//! updates instead, for native runs and tests.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::utils::scroll_percentage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    AboutPanel,
    SkillItem,
    ProjectCard,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [
        ElementKind::AboutPanel,
        ElementKind::SkillItem,
        ElementKind::ProjectCard,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            ElementKind::AboutPanel => "about-panel",
            ElementKind::SkillItem => "skill-item",
            ElementKind::ProjectCard => "project-card",
        }
    }

    /// Data attribute carrying the declared index, if the kind has one.
    pub fn index_attribute(self) -> Option<&'static str> {
        match self {
            ElementKind::AboutPanel => Some("panel"),
            ElementKind::SkillItem => None,
            ElementKind::ProjectCard => Some("project"),
        }
    }
}

/// An addressable piece of the page. Positions count elements of the same
/// kind in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Body,
    Element(ElementKind, usize),
    Section(usize),
    SkillLevel(usize),
    LoadingScreen,
    LoadingBar,
    LoadingPercentage,
    LoadingText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleChange {
    /// Inline style property, custom properties included.
    Style { property: &'static str, value: String },
    AddClass(&'static str),
    RemoveClass(&'static str),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleUpdate {
    pub target: Target,
    pub change: StyleChange,
}

impl StyleUpdate {
    pub fn style(target: Target, property: &'static str, value: impl Into<String>) -> Self {
        Self {
            target,
            change: StyleChange::Style {
                property,
                value: value.into(),
            },
        }
    }

    pub fn add_class(target: Target, class: &'static str) -> Self {
        Self {
            target,
            change: StyleChange::AddClass(class),
        }
    }

    pub fn remove_class(target: Target, class: &'static str) -> Self {
        Self {
            target,
            change: StyleChange::RemoveClass(class),
        }
    }

    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Self {
            target,
            change: StyleChange::Text(text.into()),
        }
    }
}

/// An element to watch, with its declared index (`data-panel`, ...) parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observed {
    pub target: Target,
    pub kind: ElementKind,
    pub index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn percent(&self) -> f32 {
        scroll_percentage(self.scroll_top, self.scroll_height, self.client_height)
    }
}

pub trait Page {
    /// Every element that gets a reveal animation, in document order.
    fn observed(&self) -> Vec<Observed>;

    /// Observed elements currently intersecting the viewport.
    fn visible(&self) -> Vec<Target>;

    /// Number of `.section` elements.
    fn section_count(&self) -> usize;

    /// Raw `data-level` attribute of every `.skill-level`, in document order.
    fn skill_levels(&self) -> Vec<Option<String>>;

    fn scroll_metrics(&self) -> ScrollMetrics;

    fn apply(&mut self, update: &StyleUpdate);

    fn apply_all(&mut self, updates: &[StyleUpdate]) {
        for update in updates {
            self.apply(update);
        }
    }
}

/// In-memory page: elements and scroll state are set by the owner, applied
/// updates are recorded.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    elements: Vec<Observed>,
    visible: HashSet<Target>,
    sections: usize,
    skill_levels: Vec<Option<String>>,
    pub scroll: ScrollMetrics,
    styles: HashMap<(Target, &'static str), String>,
    classes: HashMap<Target, BTreeSet<&'static str>>,
    texts: HashMap<Target, String>,
    applied: Vec<StyleUpdate>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element of `kind`; `attr` is the raw declared-index attribute.
    pub fn with_element(mut self, kind: ElementKind, attr: Option<&str>) -> Self {
        let position = self.elements.iter().filter(|e| e.kind == kind).count();
        self.elements.push(Observed {
            target: Target::Element(kind, position),
            kind,
            index: crate::utils::parse_index(attr),
        });
        self
    }

    pub fn with_sections(mut self, count: usize) -> Self {
        self.sections = count;
        self
    }

    pub fn with_skill_level(mut self, attr: Option<&str>) -> Self {
        self.skill_levels.push(attr.map(str::to_string));
        self
    }

    pub fn set_visible(&mut self, target: Target, visible: bool) {
        if visible {
            self.visible.insert(target);
        } else {
            self.visible.remove(&target);
        }
    }

    pub fn style(&self, target: Target, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|((t, p), _)| *t == target && *p == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.classes
            .get(&target)
            .is_some_and(|set| set.contains(class))
    }

    pub fn text(&self, target: Target) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    /// Every update applied so far, oldest first.
    pub fn applied(&self) -> &[StyleUpdate] {
        &self.applied
    }

    pub fn clear_applied(&mut self) {
        self.applied.clear();
    }
}

impl Page for HeadlessPage {
    fn observed(&self) -> Vec<Observed> {
        self.elements.clone()
    }

    fn visible(&self) -> Vec<Target> {
        self.elements
            .iter()
            .map(|e| e.target)
            .filter(|t| self.visible.contains(t))
            .collect()
    }

    fn section_count(&self) -> usize {
        self.sections
    }

    fn skill_levels(&self) -> Vec<Option<String>> {
        self.skill_levels.clone()
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.scroll
    }

    fn apply(&mut self, update: &StyleUpdate) {
        match &update.change {
            StyleChange::Style { property, value } => {
                self.styles
                    .insert((update.target, *property), value.clone());
            }
            StyleChange::AddClass(class) => {
                self.classes.entry(update.target).or_default().insert(*class);
            }
            StyleChange::RemoveClass(class) => {
                if let Some(set) = self.classes.get_mut(&update.target) {
                    set.remove(class);
                }
            }
            StyleChange::Text(text) => {
                self.texts.insert(update.target, text.clone());
            }
        }
        self.applied.push(update.clone());
    }
}
