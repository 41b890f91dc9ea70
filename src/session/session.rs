pub const WORK_SECONDS: u32 = 25 * 60; // Default Pomodoro work time
pub const BREAK_SECONDS: u32 = 5 * 60; // Default Pomodoro break time

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Work,
    Break,
}

impl CycleState {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            CycleState::Idle => "IDLE",
            CycleState::Work => "WORK",
            CycleState::Break => "BREAK",
        }
    }

    pub(crate) fn emoji(&self) -> &str {
        match self {
            CycleState::Idle => "🍅",
            CycleState::Work => "💼",
            CycleState::Break => "☕",
        }
    }

    /// Total duration in seconds of one cycle in this state. Idle has none.
    pub fn phase_total(&self) -> u32 {
        match self {
            CycleState::Idle => 0,
            CycleState::Work => WORK_SECONDS,
            CycleState::Break => BREAK_SECONDS,
        }
    }
}

/// What a single tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed (session is idle or paused).
    Unchanged,
    /// One second elapsed, countdown still running.
    Ticked,
    /// The countdown just hit zero; carries the phase that finished.
    PhaseComplete(CycleState),
}

/// Countdown state for one work/break cycle. Pure state machine: no
/// timers, no notifications, no I/O. The owner drives it with `tick()`
/// once per second and reacts to the returned outcome.
#[derive(Debug, Clone)]
pub struct TimerSession {
    cycle_state: CycleState,
    remaining_seconds: u32,
    paused: bool,
}

impl TimerSession {
    pub fn new() -> Self {
        Self {
            cycle_state: CycleState::Idle,
            remaining_seconds: 0,
            paused: false,
        }
    }

    pub fn cycle_state(&self) -> CycleState {
        self.cycle_state
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while a countdown is active and not paused.
    pub fn is_running(&self) -> bool {
        self.cycle_state != CycleState::Idle && !self.paused
    }

    pub fn start_work(&mut self) {
        self.cycle_state = CycleState::Work;
        self.remaining_seconds = WORK_SECONDS;
        self.paused = false;
    }

    pub fn start_break(&mut self) {
        self.cycle_state = CycleState::Break;
        self.remaining_seconds = BREAK_SECONDS;
        self.paused = false;
    }

    /// Suspend the countdown. Ticks keep arriving but stop decrementing.
    pub fn pause(&mut self) {
        if self.cycle_state != CycleState::Idle {
            self.paused = true;
        }
    }

    /// No-op unless currently paused.
    pub fn resume(&mut self) {
        if self.cycle_state != CycleState::Idle {
            self.paused = false;
        }
    }

    pub fn reset(&mut self) {
        self.cycle_state = CycleState::Idle;
        self.remaining_seconds = 0;
        self.paused = false;
    }

    /// Advance the countdown by one second. Idle and paused sessions are
    /// left untouched, so a tick that arrives late (after a reset) is
    /// harmless.
    pub fn tick(&mut self) -> TickOutcome {
        if self.cycle_state == CycleState::Idle || self.paused || self.remaining_seconds == 0 {
            return TickOutcome::Unchanged;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            TickOutcome::PhaseComplete(self.cycle_state)
        } else {
            TickOutcome::Ticked
        }
    }

    /// "MM:SS" countdown readout, empty while idle.
    pub fn display_text(&self) -> String {
        if self.cycle_state == CycleState::Idle {
            return String::new();
        }
        let mins = self.remaining_seconds / 60;
        let secs = self.remaining_seconds % 60;
        format!("{:02}:{:02}", mins, secs)
    }

    /// Fraction of the current phase still remaining, in [0, 1].
    /// Idle reports 0.0 so the ring renders as unstarted.
    pub fn progress_ratio(&self) -> f64 {
        let total = self.cycle_state.phase_total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.remaining_seconds) / f64::from(total)
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = TimerSession::new();
        assert_eq!(session.cycle_state(), CycleState::Idle);
        assert_eq!(session.remaining_seconds(), 0);
        assert!(!session.is_running());
        assert!(!session.is_paused());
        assert_eq!(session.display_text(), "");
    }

    #[test]
    fn start_work_loads_full_phase() {
        let mut session = TimerSession::new();
        session.start_work();
        assert_eq!(session.cycle_state(), CycleState::Work);
        assert_eq!(session.remaining_seconds(), 1500);
        assert_eq!(session.display_text(), "25:00");
        assert!(session.is_running());
    }

    #[test]
    fn first_tick_display_and_ratio() {
        let mut session = TimerSession::new();
        session.start_work();
        assert_eq!(session.tick(), TickOutcome::Ticked);
        assert_eq!(session.display_text(), "24:59");
        assert!((session.progress_ratio() - 1499.0 / 1500.0).abs() < 1e-9);
    }

    #[test]
    fn work_cycle_completes_after_phase_total_ticks() {
        let mut session = TimerSession::new();
        session.start_work();
        for _ in 0..1499 {
            assert_eq!(session.tick(), TickOutcome::Ticked);
        }
        assert_eq!(session.tick(), TickOutcome::PhaseComplete(CycleState::Work));
        assert_eq!(session.remaining_seconds(), 0);

        // The controller chains straight into the break phase.
        session.start_break();
        assert_eq!(session.cycle_state(), CycleState::Break);
        assert_eq!(session.remaining_seconds(), 300);
    }

    #[test]
    fn break_cycle_completes_and_resets_to_idle() {
        let mut session = TimerSession::new();
        session.start_break();
        for _ in 0..299 {
            assert_eq!(session.tick(), TickOutcome::Ticked);
        }
        assert_eq!(
            session.tick(),
            TickOutcome::PhaseComplete(CycleState::Break)
        );

        session.reset();
        assert_eq!(session.cycle_state(), CycleState::Idle);
        assert_eq!(session.display_text(), "");
        assert_eq!(session.progress_ratio(), 0.0);
    }

    #[test]
    fn pause_freezes_countdown() {
        let mut session = TimerSession::new();
        session.start_work();
        session.tick();
        session.pause();
        assert!(!session.is_running());

        for _ in 0..100 {
            assert_eq!(session.tick(), TickOutcome::Unchanged);
        }
        assert_eq!(session.remaining_seconds(), 1499);

        session.resume();
        assert_eq!(session.tick(), TickOutcome::Ticked);
        assert_eq!(session.remaining_seconds(), 1498);
    }

    #[test]
    fn resume_without_pause_is_a_no_op() {
        let mut session = TimerSession::new();
        session.start_work();
        session.resume();
        assert!(session.is_running());
        assert_eq!(session.remaining_seconds(), 1500);
    }

    #[test]
    fn ticks_after_reset_do_not_decrement() {
        let mut session = TimerSession::new();
        session.start_work();
        session.tick();
        session.reset();

        // The interval may fire once more before the task is torn down.
        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Unchanged);
        }
        assert_eq!(session.remaining_seconds(), 0);
        assert_eq!(session.cycle_state(), CycleState::Idle);
    }

    #[test]
    fn pause_in_idle_does_nothing() {
        let mut session = TimerSession::new();
        session.pause();
        assert!(!session.is_paused());
    }

    #[test]
    fn remaining_never_exceeds_phase_total() {
        let mut session = TimerSession::new();
        session.start_work();
        assert!(session.remaining_seconds() <= session.cycle_state().phase_total());
        for _ in 0..1500 {
            session.tick();
            assert!(session.remaining_seconds() <= session.cycle_state().phase_total());
        }
    }
}
