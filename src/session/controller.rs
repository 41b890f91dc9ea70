use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

use crate::feedback::feedback::FeedbackDispatcher;
use crate::session::session::{CycleState, TickOutcome, TimerSession};

/// Everything the main loop reacts to: ticker beats and user commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick,
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    Quit,
}

impl Command {
    /// Parse one interactive input line. Unknown input yields None.
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim().to_lowercase().as_str() {
            "start" | "s" => Some(Command::Start),
            "pause" | "p" => Some(Command::Pause),
            "resume" | "r" => Some(Command::Resume),
            "reset" => Some(Command::Reset),
            "quit" | "q" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Owns the live session and the one ticker task allowed to exist for it.
/// Starting or resetting a cycle aborts the previous ticker before (maybe)
/// spawning a new one, so ticks never overlap or double up.
pub struct TimerController {
    session: TimerSession,
    ticker: Option<JoinHandle<()>>,
    events: EventSender,
    feedback: FeedbackDispatcher,
}

impl TimerController {
    pub fn new(events: EventSender, feedback: FeedbackDispatcher) -> Self {
        Self {
            session: TimerSession::new(),
            ticker: None,
            events,
            feedback,
        }
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start_work(),
            Command::Pause => {
                if self.session.is_running() {
                    info!("countdown paused");
                    self.session.pause();
                }
            }
            Command::Resume => {
                if self.session.is_paused() {
                    info!("countdown resumed");
                    self.session.resume();
                }
            }
            Command::Reset => self.reset(),
            // Quit is handled by the event loop before it reaches us.
            Command::Quit => {}
        }
    }

    pub fn start_work(&mut self) {
        info!("starting {} minute work session", super::session::WORK_SECONDS / 60);
        self.session.start_work();
        self.spawn_ticker();
    }

    fn start_break(&mut self) {
        info!("starting {} minute break", super::session::BREAK_SECONDS / 60);
        self.session.start_break();
        self.spawn_ticker();
    }

    pub fn reset(&mut self) {
        debug!("resetting session to idle");
        self.cancel_ticker();
        self.session.reset();
    }

    /// Drive the session one second forward and chain phases when one
    /// completes. Work flows into a break, a finished break goes idle.
    pub fn on_tick(&mut self) {
        match self.session.tick() {
            TickOutcome::PhaseComplete(CycleState::Work) => {
                self.cancel_ticker();
                self.feedback.work_ended();
                self.start_break();
            }
            TickOutcome::PhaseComplete(CycleState::Break) => {
                self.cancel_ticker();
                self.feedback.break_ended();
                self.session.reset();
            }
            // Idle sessions never tick, so Idle cannot complete a phase.
            TickOutcome::PhaseComplete(CycleState::Idle) => {}
            TickOutcome::Ticked | TickOutcome::Unchanged => {}
        }
    }

    /// Replace any live ticker with a fresh 1-second interval task that
    /// forwards beats into the event channel. The pause state does not
    /// stop the ticker; a paused session just ignores the beats.
    fn spawn_ticker(&mut self) {
        self.cancel_ticker();
        let events = self.events.clone();
        self.ticker = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut beat = interval_at(Instant::now() + period, period);
            loop {
                beat.tick().await;
                if events.send(Event::Tick).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
