use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::countdown::Countdown;
use crate::input::DurationInput;

/// The five interactive controls, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Focus {
    Input,
    Set,
    Start,
    Pause,
    Reset,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Input,
        Focus::Set,
        Focus::Start,
        Focus::Pause,
        Focus::Reset,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
    Quit,
}

/// Countdown timer: a duration field, a Set button, the `MM:SS` readout and
/// Start/Resume, Pause and Reset.
#[derive(Debug)]
pub struct TimerWidget {
    pub input: DurationInput,
    pub countdown: Countdown,
    pub focus: Focus,
}

impl Default for TimerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerWidget {
    pub fn new() -> Self {
        Self {
            input: DurationInput::new(),
            countdown: Countdown::new(),
            focus: Focus::Input,
        }
    }

    /// Starts with `secs` typed in and confirmed, as if the user had pressed Set
    pub fn with_duration(secs: u64) -> Self {
        let mut widget = Self::new();
        widget.input = DurationInput::with_value(secs);
        widget.countdown.set_configured(widget.input.value());
        widget.countdown.confirm();
        widget.focus = Focus::Start;
        widget
    }

    pub fn type_char(&mut self, c: char) {
        let value = self.input.push(c);
        self.countdown.set_configured(value);
    }

    pub fn erase_char(&mut self) {
        let value = self.input.backspace();
        self.countdown.set_configured(value);
    }

    /// Runs the action behind a button
    pub fn activate(&mut self, target: Focus, now: Instant) {
        match target {
            Focus::Input | Focus::Set => self.countdown.confirm(),
            Focus::Start => self.countdown.start(now),
            Focus::Pause => self.countdown.pause(),
            Focus::Reset => self.countdown.reset(),
        }
    }

    pub fn on_tick(&mut self, now: Instant) -> u32 {
        self.countdown.advance(now)
    }

    pub fn teardown(&mut self) {
        self.countdown.teardown();
    }

    fn move_focus(&mut self, focus: Focus) {
        debug!(from = %self.focus, to = %focus, "focus moved");
        self.focus = focus;
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Tab | KeyCode::Right => {
                self.move_focus(self.focus.next());
                return KeyOutcome::Handled;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.move_focus(self.focus.prev());
                return KeyOutcome::Handled;
            }
            KeyCode::Enter => {
                self.activate(self.focus, now);
                return KeyOutcome::Handled;
            }
            _ => {}
        }

        if self.focus == Focus::Input {
            return match key.code {
                KeyCode::Char(c) => {
                    self.type_char(c);
                    KeyOutcome::Handled
                }
                KeyCode::Backspace => {
                    self.erase_char();
                    KeyOutcome::Handled
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match key.code {
            KeyCode::Char(' ') => self.activate(self.focus, now),
            KeyCode::Char('s') => self.activate(Focus::Start, now),
            KeyCode::Char('p') => self.activate(Focus::Pause, now),
            KeyCode::Char('r') => self.activate(Focus::Reset, now),
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('i') | KeyCode::Char('e') => self.move_focus(Focus::Input),
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }
}
