mod common;

use common::test_utils::ms;
use neon_folio::{
    animation::AnimationController,
    page::{ElementKind, HeadlessPage, Page, ScrollMetrics, Target},
};

fn portfolio_page() -> HeadlessPage {
    HeadlessPage::new()
        .with_element(ElementKind::AboutPanel, Some("0"))
        .with_element(ElementKind::AboutPanel, Some("1"))
        .with_element(ElementKind::AboutPanel, Some("2"))
        .with_element(ElementKind::SkillItem, None)
        .with_element(ElementKind::ProjectCard, Some("2"))
        .with_element(ElementKind::ProjectCard, Some("oops"))
        .with_sections(3)
        .with_skill_level(Some("85"))
        .with_skill_level(None)
}

fn controller(page: &mut HeadlessPage) -> AnimationController {
    AnimationController::new(page, ms(0), ms(3000))
}

#[test]
fn should_set_skill_levels_as_percentages() {
    let mut page = portfolio_page();
    controller(&mut page);
    assert_eq!(page.style(Target::SkillLevel(0), "--level"), Some("85%"));
    assert_eq!(page.style(Target::SkillLevel(1), "--level"), Some("0%"));
}

#[test]
fn should_stagger_panel_reveals_by_declared_index() {
    let mut page = portfolio_page();
    let mut animations = controller(&mut page);
    let panel = |i| Target::Element(ElementKind::AboutPanel, i);
    for i in 0..3 {
        page.set_visible(panel(i), true);
    }

    animations.update(&mut page, ms(0));
    for i in 0..3 {
        assert!(page.has_class(panel(i), "fade-in"));
    }
    assert_eq!(page.style(panel(0), "opacity"), Some("1"));
    assert_eq!(page.style(panel(1), "opacity"), None);

    animations.update(&mut page, ms(200));
    assert_eq!(page.style(panel(1), "opacity"), Some("1"));
    assert_eq!(page.style(panel(1), "transform"), Some("translateY(0)"));
    assert_eq!(page.style(panel(2), "opacity"), None);

    animations.update(&mut page, ms(400));
    assert_eq!(page.style(panel(2), "opacity"), Some("1"));
    assert_eq!(animations.pending(), 0);
}

#[test]
fn should_reveal_skills_and_projects_with_their_delays() {
    let mut page = portfolio_page();
    let mut animations = controller(&mut page);
    let skill = Target::Element(ElementKind::SkillItem, 0);
    let project = Target::Element(ElementKind::ProjectCard, 0);
    let broken = Target::Element(ElementKind::ProjectCard, 1);
    for target in [skill, project, broken] {
        page.set_visible(target, true);
    }

    animations.update(&mut page, ms(0));
    // unparsable index counts as zero
    assert_eq!(page.style(broken, "opacity"), Some("1"));
    assert_eq!(page.style(skill, "opacity"), None);

    animations.update(&mut page, ms(100));
    assert_eq!(page.style(skill, "transform"), Some("translateX(0)"));
    assert_eq!(page.style(project, "opacity"), None);

    animations.update(&mut page, ms(300));
    assert_eq!(page.style(project, "transform"), Some("translateY(0)"));
}

#[test]
fn should_reveal_each_element_once() {
    let mut page = portfolio_page();
    let mut animations = controller(&mut page);
    let panel = Target::Element(ElementKind::AboutPanel, 0);
    page.set_visible(panel, true);
    animations.update(&mut page, ms(0));
    assert!(animations.is_revealed(panel));

    page.set_visible(panel, false);
    animations.update(&mut page, ms(16));
    page.set_visible(panel, true);
    page.clear_applied();
    animations.update(&mut page, ms(32));
    let fades = page
        .applied()
        .iter()
        .filter(|u| u.target == panel)
        .count();
    assert_eq!(fades, 0);
}

#[test]
fn should_breathe_panels_after_idle_delay() {
    let mut page = portfolio_page();
    let mut animations = controller(&mut page);
    let panel = |i| Target::Element(ElementKind::AboutPanel, i);

    animations.update(&mut page, ms(2999));
    assert!(!animations.is_idle());

    animations.update(&mut page, ms(3000));
    assert!(animations.is_idle());
    assert!(page.has_class(Target::Body, "idle"));
    assert_eq!(page.style(panel(0), "transform"), Some("translateY(-5px)"));
    assert_eq!(page.style(panel(1), "transform"), None);

    animations.update(&mut page, ms(3300));
    assert_eq!(page.style(panel(1), "transform"), Some("translateY(-5px)"));

    animations.update(&mut page, ms(4000));
    assert_eq!(page.style(panel(0), "transform"), Some("translateY(0)"));
}

#[test]
fn should_leave_idle_on_activity() {
    let mut page = portfolio_page();
    let mut animations = controller(&mut page);
    animations.update(&mut page, ms(3000));
    assert!(animations.is_idle());

    animations.on_activity(&mut page, ms(3500));
    assert!(!animations.is_idle());
    assert!(!page.has_class(Target::Body, "idle"));

    // the timer restarted from the activity
    animations.update(&mut page, ms(6000));
    assert!(!animations.is_idle());
    animations.update(&mut page, ms(6500));
    assert!(animations.is_idle());
}

#[test]
fn should_move_sections_in_alternating_directions() {
    let mut page = portfolio_page();
    page.scroll = ScrollMetrics {
        scroll_top: 500.0,
        scroll_height: 2000.0,
        client_height: 1000.0,
    };
    let mut animations = controller(&mut page);
    animations.update(&mut page, ms(16));

    assert_eq!(page.style(Target::Section(0), "transform"), Some("translateY(25px)"));
    assert_eq!(page.style(Target::Section(1), "transform"), Some("translateY(-25px)"));
    assert_eq!(page.style(Target::Section(2), "transform"), Some("translateY(25px)"));
}

#[test]
fn should_ease_scroll_position() {
    let mut page = portfolio_page();
    page.scroll.scroll_top = 100.0;
    page.scroll.scroll_height = 1000.0;
    let mut animations = controller(&mut page);
    animations.update(&mut page, ms(16));
    assert_eq!(animations.target_scroll_y, 100.0);
    assert!((animations.scroll_y - 10.0).abs() < 1e-4);
    assert!((animations.scroll_speed - 90.0).abs() < 1e-4);
}

#[test]
fn should_drop_pending_work_on_shutdown() {
    let mut page = portfolio_page();
    let mut animations = controller(&mut page);
    page.set_visible(Target::Element(ElementKind::AboutPanel, 2), true);
    animations.update(&mut page, ms(0));
    assert!(animations.pending() > 0);

    animations.shutdown();
    assert_eq!(animations.pending(), 0);
    animations.update(&mut page, ms(10_000));
    assert!(!animations.is_idle());
    assert_eq!(page.observed().len(), 6);
}
