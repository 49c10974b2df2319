// Library surface for headless/integration tests and the binary.
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod schedule;
pub mod ui;
pub mod widget;

pub use countdown::{format_time, Countdown, RunState};
pub use widget::TimerWidget;
