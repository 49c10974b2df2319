use std::sync::mpsc;
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use countdown::runtime::{FixedTicker, Runner, TestEventSource, TimerEvent};
use countdown::widget::{Focus, KeyOutcome};
use countdown::{RunState, TimerWidget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> TimerEvent {
    TimerEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

// Enter 10, set, start, pause after 3s, resume and run out.
#[test]
fn headless_set_start_pause_resume_scenario() {
    let t0 = Instant::now();
    let mut widget = TimerWidget::new();

    widget.type_char('1');
    widget.type_char('0');
    widget.activate(Focus::Set, t0);
    assert_eq!(widget.countdown.display(), "00:10");
    assert_matches!(widget.countdown.run_state(), RunState::Idle);

    widget.activate(Focus::Start, t0);
    assert_eq!(widget.on_tick(t0 + secs(3)), 3);
    assert_eq!(widget.countdown.display(), "00:07");
    assert_matches!(widget.countdown.run_state(), RunState::Running);

    widget.activate(Focus::Pause, t0 + secs(3));
    let t1 = t0 + secs(20);
    widget.on_tick(t1);
    assert_eq!(widget.countdown.display(), "00:07");
    assert_matches!(widget.countdown.run_state(), RunState::Paused);
    assert_eq!(widget.countdown.primary_label(), "Resume");

    widget.activate(Focus::Start, t1);
    assert_eq!(widget.on_tick(t1 + secs(7)), 7);
    assert_eq!(widget.countdown.display(), "00:00");
    assert!(!widget.countdown.is_ticking());
    assert!(widget.countdown.is_expired());
}

#[test]
fn headless_runner_drives_keys_into_widget() {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut widget = TimerWidget::new();

    for code in [
        KeyCode::Char('4'),
        KeyCode::Char('5'),
        KeyCode::Enter,
        KeyCode::Tab,
        KeyCode::Tab,
        KeyCode::Char(' '),
        KeyCode::Esc,
    ] {
        tx.send(key(code)).unwrap();
    }

    let mut quit = false;
    for _ in 0..100u32 {
        let event = runner.step_until(widget.countdown.next_due());
        let now = Instant::now();
        widget.on_tick(now);
        if let TimerEvent::Key(k) = event {
            if widget.handle_key(k, now) == KeyOutcome::Quit {
                quit = true;
                break;
            }
        }
    }

    assert!(quit, "escape should end the loop");
    assert_eq!(widget.countdown.configured(), Some(45));
    assert_eq!(widget.focus, Focus::Start);
    assert_matches!(widget.countdown.run_state(), RunState::Running);
    assert!(widget.countdown.remaining() <= 45);
}

#[test]
fn headless_countdown_finishes_in_real_time() {
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(20)),
    );
    let mut widget = TimerWidget::with_duration(1);
    widget.activate(Focus::Start, Instant::now());

    // up to ~3s of polling
    for _ in 0..150u32 {
        if let TimerEvent::Tick = runner.step_until(widget.countdown.next_due()) {
            widget.on_tick(Instant::now());
        }
        if !widget.countdown.is_ticking() {
            break;
        }
    }

    assert_eq!(widget.countdown.remaining(), 0);
    assert!(!widget.countdown.is_ticking());
}

#[test]
fn start_without_duration_does_nothing() {
    let t0 = Instant::now();
    let mut widget = TimerWidget::new();
    widget.activate(Focus::Start, t0);
    assert_matches!(widget.countdown.run_state(), RunState::Idle);
    assert_eq!(widget.on_tick(t0 + secs(5)), 0);
    assert_eq!(widget.countdown.display(), "00:00");
}

#[test]
fn reset_restores_after_partial_run() {
    let t0 = Instant::now();
    let mut widget = TimerWidget::with_duration(90);
    widget.activate(Focus::Start, t0);
    widget.on_tick(t0 + secs(31));
    assert_eq!(widget.countdown.display(), "00:59");

    widget.activate(Focus::Reset, t0 + secs(31));
    assert_eq!(widget.countdown.display(), "01:30");
    assert_matches!(widget.countdown.run_state(), RunState::Idle);
    assert!(!widget.countdown.is_ticking());
}
