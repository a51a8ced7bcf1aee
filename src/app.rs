use std::time::Instant;

use chrono::{DateTime, Local};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use tracing::{debug, info};

use crate::history::History;
use crate::input::{self, Action};
use crate::runtime::{AppEvent, AppEventSource, Runner, Ticker};
use crate::sampler;
use crate::tracker::{Metrics, Tracker};
use crate::ui;

/// Caption shown on each control button
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Button {
    #[strum(serialize = "Start Tracking")]
    Start,
    #[strum(serialize = "Stop Tracking")]
    Stop,
    #[strum(serialize = "Reset Counters")]
    Reset,
}

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the UI loop owns: metrics, sampled history and the controls.
#[derive(Debug)]
pub struct App {
    pub tracker: Tracker,
    pub history: History,
    /// Wall-clock time the current session started, for display only
    pub started_wall: Option<DateTime<Local>>,
    /// Button hit boxes from the last draw, ordered start, stop, reset
    pub button_areas: [Rect; 3],
    /// Set when the global hook died after start-up
    pub observer_error: Option<String>,
    now: Instant,
}

impl App {
    pub fn new() -> Self {
        Self {
            tracker: Tracker::new(),
            history: History::new(),
            started_wall: None,
            button_areas: [Rect::default(); 3],
            observer_error: None,
            now: Instant::now(),
        }
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        match button {
            Button::Start => !self.tracker.is_tracking(),
            Button::Stop => self.tracker.is_tracking(),
            Button::Reset => true,
        }
    }

    /// Apply a user action. Actions on disabled buttons are dropped.
    pub fn apply(&mut self, action: Action, now: Instant) -> Flow {
        match action {
            Action::Start if self.is_enabled(Button::Start) => {
                self.tracker.start_at(now);
                if self.started_wall.is_none() {
                    self.started_wall = Some(Local::now());
                }
            }
            Action::Stop if self.is_enabled(Button::Stop) => self.tracker.stop(),
            Action::Reset => {
                self.tracker.reset();
                self.history.clear();
                self.started_wall = None;
            }
            Action::Quit => return Flow::Quit,
            Action::Start | Action::Stop => debug!(?action, "ignored on disabled button"),
            Action::None => {}
        }
        Flow::Continue
    }

    /// Feed one runtime event through the app.
    pub fn handle_event(&mut self, event: AppEvent, now: Instant) -> Flow {
        self.now = now;
        match event {
            AppEvent::Keystroke(at) => {
                self.tracker.on_keystroke(at);
                Flow::Continue
            }
            AppEvent::Tick => {
                sampler::sample(&self.tracker, &mut self.history, now);
                Flow::Continue
            }
            AppEvent::Key(key) => self.apply(input::handle_key(key), now),
            AppEvent::Mouse(mouse) => self.apply(input::handle_mouse(mouse, self.button_areas), now),
            AppEvent::Resize => Flow::Continue,
            AppEvent::ObserverFailed(msg) => {
                info!(error = %msg, "stopping after observer failure");
                self.observer_error = Some(msg);
                Flow::Quit
            }
        }
    }

    /// Metrics as of the last handled event
    pub fn metrics(&self) -> Metrics {
        self.tracker.snapshot(self.now)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive the app until the user quits or the observer fails.
///
/// Every tick redraws, sample or not. Keystrokes alone do not redraw; their
/// effect shows up on the next tick.
pub fn run<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> std::io::Result<()> {
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let event = runner.step();
        let redraw = !matches!(event, AppEvent::Keystroke(_));

        if app.handle_event(event, Instant::now()) == Flow::Quit {
            break;
        }
        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}
