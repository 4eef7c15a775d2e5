mod common;

use common::test_utils::ms;
use neon_folio::{
    loader::{Loader, LoaderEvent},
    page::{HeadlessPage, Target},
};

fn percents(events: &[LoaderEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            LoaderEvent::Progress { percent, .. } => Some(*percent),
            LoaderEvent::Complete => None,
        })
        .collect()
}

#[test]
fn should_do_nothing_before_start() {
    let mut loader = Loader::new();
    assert!(loader.update(ms(10_000)).is_empty());
    assert!(!loader.is_complete());
}

#[test]
fn should_chain_steps_and_complete_once() {
    let mut loader = Loader::new();
    loader.start(ms(0));

    assert!(loader.update(ms(199)).is_empty());
    assert_eq!(percents(&loader.update(ms(200))), vec![20]);
    assert_eq!(loader.text(), "Loading assets...");
    // each step waits on the previous one
    assert_eq!(percents(&loader.update(ms(600))), vec![40]);
    assert_eq!(percents(&loader.update(ms(1200))), vec![60]);
    assert_eq!(percents(&loader.update(ms(2000))), vec![80]);
    assert_eq!(percents(&loader.update(ms(3000))), vec![100]);
    assert_eq!(loader.text(), "Ready");
    assert!(!loader.is_complete());

    assert_eq!(loader.update(ms(3500)), vec![LoaderEvent::Complete]);
    assert!(loader.is_complete());
    assert!(loader.update(ms(10_000)).is_empty());
}

#[test]
fn should_fire_late_steps_together() {
    let mut loader = Loader::new();
    loader.start(ms(0));
    let events = loader.update(ms(5000));
    assert_eq!(percents(&events), vec![20, 40, 60, 80, 100]);
    assert_eq!(events.last(), Some(&LoaderEvent::Complete));
}

#[test]
fn should_ease_displayed_progress_and_snap() {
    let mut loader = Loader::new();
    loader.start(ms(0));
    loader.update(ms(200));
    assert!((loader.progress() - 2.0).abs() < 1e-4);

    let mut now = 200;
    while loader.progress() < 20.0 {
        now += 4;
        loader.update(ms(now));
        assert!(loader.progress() <= 20.0);
        // the next step fires at 600ms
        assert!(now < 600, "progress never reached its target");
    }
    assert_eq!(loader.displayed_percent(), 20);
}

#[test]
fn should_mirror_state_onto_the_loading_screen() {
    let mut loader = Loader::new();
    let mut page = HeadlessPage::new();
    loader.start(ms(0));

    let events = loader.update(ms(200));
    loader.render(&mut page, &events);
    assert_eq!(page.text(Target::LoadingText), Some("Loading assets..."));
    assert_eq!(page.text(Target::LoadingPercentage), Some("2%"));
    assert_eq!(page.style(Target::LoadingBar, "width"), Some("2%"));
    assert!(!page.has_class(Target::LoadingScreen, "hidden"));

    let events = loader.update(ms(5000));
    loader.render(&mut page, &events);
    assert_eq!(page.text(Target::LoadingText), Some("Ready"));
    assert!(page.has_class(Target::LoadingScreen, "hidden"));
    assert!(page.has_class(Target::Body, "loaded"));
}

#[test]
fn should_not_complete_after_cancel() {
    let mut loader = Loader::new();
    loader.start(ms(0));
    loader.cancel();
    assert!(loader.update(ms(10_000)).is_empty());
    assert!(!loader.is_complete());
}
