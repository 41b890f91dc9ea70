use notify_rust::Notification;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SoundConfig;

/// One-time startup check that a notification server is reachable.
/// Failure is logged and otherwise ignored; the timer runs without it.
pub fn probe_notification_server() {
    #[cfg(all(unix, not(target_os = "macos")))]
    match notify_rust::get_server_information() {
        Ok(info) => debug!("notification server: {} {}", info.name, info.version),
        Err(e) => tracing::error!("notification server unreachable: {}", e),
    }
}

/// Fires the session-transition side effects: desktop notification, sound
/// playback, and the terminal stand-ins for a vibration pulse. All of it is
/// fire-and-forget; a failed effect never stalls the timer.
pub struct FeedbackDispatcher {
    sounds_dir: PathBuf,
    work_end_sound: String,
    break_end_sound: String,
    sound_enabled: bool,
    notifications_enabled: bool,
    haptics_enabled: bool,
}

impl FeedbackDispatcher {
    pub fn new(sounds: &SoundConfig, sound_enabled: bool) -> Self {
        Self {
            sounds_dir: sounds.sounds_dir(),
            work_end_sound: sounds.work_end.clone(),
            break_end_sound: sounds.break_end.clone(),
            sound_enabled,
            notifications_enabled: true,
            haptics_enabled: true,
        }
    }

    /// Dispatcher that does nothing at all, for exercising the controller.
    #[cfg(test)]
    pub fn silent() -> Self {
        Self {
            sounds_dir: PathBuf::new(),
            work_end_sound: String::new(),
            break_end_sound: String::new(),
            sound_enabled: false,
            notifications_enabled: false,
            haptics_enabled: false,
        }
    }

    pub fn work_ended(&self) {
        self.notify("Work session ended! Time for a break.");
        self.play_sound(&self.work_end_sound);
        self.pulse();
    }

    pub fn break_ended(&self) {
        self.notify("Break ended! Ready to work again.");
        self.play_sound(&self.break_end_sound);
        self.pulse();
    }

    fn notify(&self, body: &str) {
        if !self.notifications_enabled {
            return;
        }
        let result = Notification::new()
            .summary("Pomodoro Timer")
            .body(body)
            .timeout(0) // No auto-dismiss
            .show();
        if let Err(e) = result {
            warn!("failed to send notification: {}", e);
        }
    }

    /// Spawn the first system player that starts, and don't wait for it.
    fn play_sound(&self, file: &str) {
        if !self.sound_enabled {
            return;
        }
        let path = self.sounds_dir.join(file);
        if !path.exists() {
            warn!("sound asset not found: {}", path.display());
            return;
        }

        let players: &[&str] = if cfg!(target_os = "macos") {
            &["afplay"]
        } else {
            &["paplay", "pw-play", "aplay"]
        };

        for player in players {
            match Command::new(player).arg(&path).spawn() {
                Ok(_) => {
                    debug!("playing {} via {}", path.display(), player);
                    return;
                }
                Err(e) => debug!("player {} unavailable: {}", player, e),
            }
        }
        warn!("no audio player available for {}", path.display());
    }

    /// Vibration stand-in: a bell pattern and a short reverse-video flash,
    /// both fired without checking whether the terminal honors them.
    fn pulse(&self) {
        if !self.haptics_enabled {
            return;
        }
        let bell = self.sound_enabled;
        tokio::spawn(async move {
            if bell {
                eprint!("\x07");
                tokio::time::sleep(Duration::from_millis(300)).await;
                eprint!("\x07");
            }
        });
        tokio::spawn(async move {
            eprint!("\x1b[?5h");
            tokio::time::sleep(Duration::from_millis(150)).await;
            eprint!("\x1b[?5l");
        });
    }
}
