mod common;

use common::test_utils::ms;
use neon_folio::{
    sequencer::Sequencer,
    utils::{
        fps::FpsCounter,
        timing::{Debounce, Throttle},
    },
};

#[test]
fn debounce_should_fire_once_after_the_last_call() {
    let mut debounce = Debounce::new(ms(50));
    debounce.call(ms(0), 1);
    debounce.call(ms(10), 2);
    debounce.call(ms(10), 3);

    assert_eq!(debounce.poll(ms(59)), None);
    assert_eq!(debounce.poll(ms(60)), Some(3));
    assert_eq!(debounce.poll(ms(100)), None);
}

#[test]
fn debounce_cancel_should_drop_the_pending_call() {
    let mut debounce = Debounce::new(ms(50));
    debounce.call(ms(0), ());
    assert_eq!(debounce.deadline(), Some(ms(50)));
    debounce.cancel();
    assert_eq!(debounce.poll(ms(1000)), None);
}

#[test]
fn throttle_should_pass_one_call_per_window() {
    let mut throttle = Throttle::new(ms(50));
    let passed: Vec<u64> = (0..10)
        .map(|i| i * 10)
        .filter(|&t| throttle.call(ms(t)))
        .collect();
    assert_eq!(passed, vec![0, 50]);
}

#[test]
fn fps_should_count_frames_per_second_window() {
    let mut fps = FpsCounter::new(ms(0));
    for i in 1..=60 {
        fps.update(ms(i * 1000 / 60));
        if i < 60 {
            assert_eq!(fps.fps(), 0);
        }
    }
    assert_eq!(fps.fps(), 60);
}

#[test]
fn chained_sequencer_should_accumulate_delays() {
    let mut seq = Sequencer::chained([(ms(100), 'a'), (ms(100), 'b'), (ms(50), 'c')]);
    assert!(seq.advance(ms(500)).is_empty(), "not started yet");

    seq.start(ms(1000));
    assert_eq!(seq.next_due(), Some(ms(1100)));
    assert_eq!(seq.advance(ms(1100)), vec!['a']);
    assert_eq!(seq.advance(ms(1249)), vec!['b']);
    assert_eq!(seq.advance(ms(1250)), vec!['c']);
    assert!(seq.is_finished());
}

#[test]
fn staggered_sequencer_should_order_by_offset() {
    let mut seq = Sequencer::staggered([(ms(300), 3), (ms(0), 1), (ms(100), 2)]);
    seq.start(ms(0));
    assert_eq!(seq.advance(ms(1000)), vec![1, 2, 3]);
}

#[test]
fn scheduled_steps_should_keep_insertion_order_for_equal_times() {
    let mut seq = Sequencer::default();
    seq.schedule(ms(10), ms(20), "first");
    seq.schedule(ms(20), ms(10), "second");
    seq.schedule(ms(20), ms(0), "now");
    assert!(seq.is_running());
    assert_eq!(seq.advance(ms(20)), vec!["now"]);
    assert_eq!(seq.advance(ms(30)), vec!["first", "second"]);
}

#[test]
fn cancelled_sequencer_should_never_fire() {
    let mut seq = Sequencer::chained([(ms(10), ())]);
    seq.start(ms(0));
    seq.cancel();
    assert_eq!(seq.pending(), 0);
    assert!(seq.advance(ms(100)).is_empty());
}
