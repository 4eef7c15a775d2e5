mod common;

use common::test_utils::{HEIGHT, WIDTH, ms, test_config};
use neon_folio::{
    Backdrop,
    page::{ElementKind, HeadlessPage, Target},
    sections,
};

const FRAME_MS: u64 = 16;

fn backdrop(page: &mut HeadlessPage) -> Backdrop {
    let mut backdrop = Backdrop::new(page, test_config(), ms(0));
    backdrop.resize(WIDTH, HEIGHT);
    backdrop
}

#[test]
fn should_load_and_animate_an_empty_page() {
    let mut page = HeadlessPage::new();
    let mut backdrop = backdrop(&mut page);

    let mut last = None;
    for frame in 1..=300 {
        last = backdrop.advance(&mut page, ms(frame * FRAME_MS));
    }

    assert!(backdrop.loader().is_complete());
    assert!(page.has_class(Target::LoadingScreen, "hidden"));
    assert!(page.has_class(Target::Body, "loaded"));

    let stage = backdrop.stage().expect("stage built after loading");
    assert_eq!(stage.flow_count(), sections::all().len());
    let list = last.expect("stage produces a render list");
    assert!(!list.is_empty());

    assert!(backdrop.animations().is_idle());
    assert!(page.has_class(Target::Body, "idle"));
    assert_eq!(backdrop.animations().pending(), 0);
}

#[test]
fn should_run_page_animations_before_the_stage_exists() {
    let mut page = HeadlessPage::new()
        .with_element(ElementKind::AboutPanel, Some("0"))
        .with_skill_level(Some("70"));
    let mut backdrop = backdrop(&mut page);
    assert_eq!(page.style(Target::SkillLevel(0), "--level"), Some("70%"));

    let panel = Target::Element(ElementKind::AboutPanel, 0);
    page.set_visible(panel, true);
    assert!(backdrop.advance(&mut page, ms(FRAME_MS)).is_none());

    assert!(backdrop.stage().is_none());
    assert_eq!(page.style(panel, "opacity"), Some("1"));
    assert_eq!(page.style(Target::LoadingBar, "width"), Some("0%"));
    assert_eq!(page.text(Target::LoadingPercentage), Some("0%"));
}

#[test]
fn should_leave_nothing_pending_after_shutdown() {
    let mut page = HeadlessPage::new().with_element(ElementKind::AboutPanel, Some("3"));
    let mut backdrop = backdrop(&mut page);
    page.set_visible(Target::Element(ElementKind::AboutPanel, 0), true);
    backdrop.advance(&mut page, ms(FRAME_MS));
    // loader steps and the staggered reveal are still queued
    assert!(backdrop.pending() > 0);

    backdrop.shutdown();
    assert_eq!(backdrop.pending(), 0);

    // nothing fires afterwards, not even the loader's completion
    assert!(backdrop.advance(&mut page, ms(10_000)).is_none());
    assert!(!backdrop.loader().is_complete());
    assert!(backdrop.stage().is_none());
    assert_eq!(
        page.style(Target::Element(ElementKind::AboutPanel, 0), "opacity"),
        None
    );
}

#[test]
fn should_stop_every_section_when_shut_down_after_loading() {
    let mut page = HeadlessPage::new();
    let mut backdrop = backdrop(&mut page);
    backdrop.advance(&mut page, ms(5_000));
    assert!(backdrop.stage().is_some());
    assert!(backdrop.pending() > 0);

    backdrop.shutdown();
    assert_eq!(backdrop.pending(), 0);
    assert_eq!(backdrop.stage().map(|s| s.flow_count()), Some(0));
}
