//! End-to-end runs of the dispatch pipeline against a recording injector

use echoclick::{ClickButton, Engine, InputEvent, MockInjector, PointerButton, Settings};
use std::thread;
use std::time::{Duration, Instant};

const HOTKEY_A: u32 = 30;

fn hotkey() -> InputEvent {
    InputEvent::KeyDown { code: HOTKEY_A }
}

fn left_press() -> InputEvent {
    InputEvent::MouseDown {
        button: PointerButton::Primary,
    }
}

fn base_settings() -> Settings {
    Settings::new(HOTKEY_A)
        .with_enabled(true)
        .with_delay(100)
        .with_check(ClickButton::Left)
        .with_target(ClickButton::Right)
}

fn wait_until(timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if done() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn toggle_then_press_clicks_target_once() {
    let probe = MockInjector::new();
    let mut engine = Engine::start(base_settings(), Box::new(probe.clone())).unwrap();

    assert!(engine.ingest(hotkey()));
    assert!(wait_until(Duration::from_secs(1), || engine.state().is_active()));
    assert!(engine.ingest(left_press()));

    assert!(wait_until(Duration::from_secs(2), || !probe.clicks().is_empty()));
    thread::sleep(Duration::from_millis(150));
    assert_eq!(probe.clicks(), vec![ClickButton::Right]);

    engine.shutdown();
}

#[test]
fn press_without_toggle_never_clicks() {
    let probe = MockInjector::new();
    let mut engine = Engine::start(base_settings(), Box::new(probe.clone())).unwrap();

    engine.ingest(left_press());
    thread::sleep(Duration::from_millis(300));

    assert!(!engine.state().is_active());
    assert!(probe.clicks().is_empty());
    engine.shutdown();
}

#[test]
fn toggle_off_during_delay_suppresses_click() {
    let probe = MockInjector::new();
    let mut engine = Engine::start(base_settings(), Box::new(probe.clone())).unwrap();

    engine.ingest(hotkey());
    engine.ingest(left_press());
    thread::sleep(Duration::from_millis(10));
    engine.ingest(hotkey());

    thread::sleep(Duration::from_millis(300));
    assert!(!engine.state().is_active());
    assert!(probe.clicks().is_empty());
    assert_eq!(engine.gate().in_flight(), 0);
    engine.shutdown();
}

#[test]
fn disabled_config_never_clicks() {
    let probe = MockInjector::new();
    let settings = base_settings().with_enabled(false).with_delay(0);
    let mut engine = Engine::start(settings, Box::new(probe.clone())).unwrap();

    for _ in 0..3 {
        engine.ingest(hotkey());
        engine.ingest(left_press());
        engine.ingest(left_press());
    }
    thread::sleep(Duration::from_millis(200));

    // Hotkey still toggles; clicks stay suppressed
    assert!(engine.state().is_active());
    assert!(probe.clicks().is_empty());
    engine.shutdown();
}

#[test]
fn saturated_gate_drops_second_press() {
    let probe = MockInjector::new();
    let settings = base_settings().with_delay(1000).with_max_in_flight(1);
    let mut engine = Engine::start(settings, Box::new(probe.clone())).unwrap();

    engine.ingest(hotkey());
    engine.ingest(left_press());
    thread::sleep(Duration::from_millis(10));
    engine.ingest(left_press());

    assert!(wait_until(Duration::from_secs(3), || !probe.clicks().is_empty()));
    thread::sleep(Duration::from_millis(200));
    assert_eq!(probe.clicks().len(), 1);
    engine.shutdown();
}

#[test]
fn burst_never_exceeds_admission_ceiling() {
    let probe = MockInjector::new().with_hold(Duration::from_millis(2));
    let settings = base_settings().with_delay(50).with_max_in_flight(3);
    let mut engine = Engine::start(settings, Box::new(probe.clone())).unwrap();

    engine.ingest(hotkey());
    let mut peak = 0;
    for _ in 0..40 {
        engine.ingest(left_press());
        peak = peak.max(engine.gate().in_flight());
        thread::sleep(Duration::from_millis(2));
    }
    assert!(wait_until(Duration::from_secs(2), || engine.gate().in_flight() == 0));

    assert!(peak <= 3);
    let clicks = probe.clicks().len();
    assert!(clicks >= 1 && clicks < 40, "clicks = {}", clicks);
    assert_eq!(probe.max_concurrent(), 1);
    engine.shutdown();
}

#[test]
fn injection_failure_keeps_pipeline_running() {
    let probe = MockInjector::new().failing();
    let settings = base_settings().with_delay(0).with_max_in_flight(1);
    let mut engine = Engine::start(settings, Box::new(probe.clone())).unwrap();

    engine.ingest(hotkey());
    engine.ingest(left_press());
    assert!(wait_until(Duration::from_secs(1), || engine.gate().in_flight() == 0));

    // Dispatcher still toggles after the failed click
    engine.ingest(hotkey());
    assert!(wait_until(Duration::from_secs(1), || !engine.state().is_active()));
    engine.shutdown();
}

#[test]
fn shutdown_does_not_wait_for_pending_clicks() {
    let probe = MockInjector::new();
    let settings = base_settings().with_delay(2000);
    let mut engine = Engine::start(settings, Box::new(probe.clone())).unwrap();

    engine.ingest(hotkey());
    engine.ingest(left_press());
    assert!(wait_until(Duration::from_secs(1), || engine.gate().in_flight() == 1));

    let start = Instant::now();
    engine.shutdown();
    assert!(start.elapsed() < Duration::from_millis(1000));
    assert!(!engine.ingest(left_press()));
    assert!(engine.queue().is_closed());
}
