use std::f64::consts::PI;

use crate::session::session::{CycleState, TimerSession};

/// Circular-indicator geometry: the countdown is drawn as a ring stroke
/// whose dash offset shrinks from the full circumference (nothing elapsed)
/// to zero (phase complete).
#[derive(Debug, Clone, Copy)]
pub struct ProgressRing {
    pub radius: f64,
    pub circumference: f64,
}

impl ProgressRing {
    pub fn new() -> Self {
        let radius = 100.0;
        Self {
            radius,
            circumference: 2.0 * PI * radius,
        }
    }

    /// Stroke offset for a remaining-fraction `ratio` in [0, 1].
    pub fn dash_offset(&self, ratio: f64) -> f64 {
        self.circumference * (1.0 - ratio.clamp(0.0, 1.0))
    }
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self::new()
    }
}

const BAR_WIDTH: usize = 20;

/// Terminal projection of the ring: the stroke offset, normalized by the
/// circumference, becomes the filled fraction of a segment bar.
fn render_bar(ring: &ProgressRing, remaining_ratio: f64) -> String {
    let elapsed = ring.dash_offset(remaining_ratio) / ring.circumference;
    let filled = (elapsed * BAR_WIDTH as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// One redrawable status line: wall clock, mode, countdown, progress.
pub fn status_line(clock: &str, session: &TimerSession, ring: &ProgressRing) -> String {
    if session.cycle_state() == CycleState::Idle {
        return format!(
            "🕐 {}  {} idle, type 'start' to begin",
            clock,
            session.cycle_state().emoji()
        );
    }

    let ratio = session.progress_ratio();
    let elapsed_pct = ((1.0 - ratio) * 100.0) as u8;
    let paused_tag = if session.is_paused() { " (paused)" } else { "" };
    format!(
        "🕐 {}  {} {} {} [{}] {:3}%{}",
        clock,
        session.cycle_state().emoji(),
        session.cycle_state().as_str(),
        session.display_text(),
        render_bar(ring, ratio),
        elapsed_pct,
        paused_tag
    )
}
