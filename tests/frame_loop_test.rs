mod common;

use common::test_utils::{Calls, RecordingFlow, empty_stage, ms, test_config};
use instant::Duration;

#[test]
fn should_init_on_register_and_update_in_order() {
    let calls = Calls::default();
    let mut stage = empty_stage(&test_config());
    stage.register(RecordingFlow::boxed("a", &calls));
    stage.register(RecordingFlow::boxed("b", &calls));
    assert_eq!(calls.take(), vec!["init a", "init b"]);

    stage.tick(ms(16));
    stage.tick(ms(32));
    assert_eq!(
        calls.take(),
        vec!["update a", "update b", "update a", "update b"]
    );
}

#[test]
fn should_pass_frame_time_and_delta() {
    let calls = Calls::default();
    let mut stage = empty_stage(&test_config());
    stage.register(RecordingFlow::boxed("a", &calls));

    stage.tick(ms(100));
    stage.tick(ms(116));
    let frames = calls.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].now, ms(100));
    assert_eq!(frames[0].dt, Duration::ZERO);
    assert_eq!(frames[1].dt, ms(16));
}

#[test]
fn should_stop_updating_cancelled_flows() {
    let calls = Calls::default();
    let mut stage = empty_stage(&test_config());
    let a = stage.register(RecordingFlow::boxed("a", &calls));
    stage.register(RecordingFlow::boxed("b", &calls));
    calls.take();

    assert!(stage.cancel(a));
    assert!(!stage.cancel(a));
    assert_eq!(stage.flow_count(), 1);

    stage.tick(ms(16));
    assert_eq!(calls.take(), vec!["update b"]);
}

#[test]
fn should_drop_every_flow_on_shutdown() {
    let calls = Calls::default();
    let mut stage = empty_stage(&test_config());
    stage.register(RecordingFlow::boxed("a", &calls));
    calls.take();

    stage.shutdown();
    stage.tick(ms(16));
    assert_eq!(stage.flow_count(), 0);
    assert!(calls.take().is_empty());
}

#[test]
fn should_route_pointer_rays_only_when_enabled() {
    let calls = Calls::default();
    let mut stage = empty_stage(&test_config());
    stage.register(RecordingFlow::boxed("a", &calls));
    calls.take();

    stage.set_ray_hover(true);
    stage.on_pointer_moved(0.5, 0.5);
    assert_eq!(calls.take(), vec!["pointer a"]);

    stage.set_ray_hover(false);
    stage.on_pointer_moved(0.5, 0.5);
    assert!(calls.take().is_empty());
}

#[test]
fn should_forward_page_hover_to_every_flow() {
    let calls = Calls::default();
    let mut stage = empty_stage(&test_config());
    stage.register(RecordingFlow::boxed("a", &calls));
    stage.register(RecordingFlow::boxed("b", &calls));
    calls.take();

    stage.set_hovered(2, true);
    assert_eq!(calls.take(), vec!["hover a 2 true", "hover b 2 true"]);
}
