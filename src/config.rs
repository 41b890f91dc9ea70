use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "focusring")]
#[command(about = "A terminal Pomodoro timer with a circular progress readout")]
#[command(version)]
pub struct Config {
    /// Path to the sound configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable sound playback and the terminal bell
    #[arg(long)]
    pub no_sound: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Sound asset configuration, stored as JSON next to the user's other
/// dotfiles. Missing or unreadable files fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoundConfig {
    #[serde(default)]
    pub sounds_dir: Option<PathBuf>,
    #[serde(default = "default_work_end")]
    pub work_end: String,
    #[serde(default = "default_break_end")]
    pub break_end: String,
}

fn default_work_end() -> String {
    "work-end.mp3".to_string()
}

fn default_break_end() -> String {
    "break-end.mp3".to_string()
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            work_end: default_work_end(),
            break_end: default_break_end(),
        }
    }
}

impl SoundConfig {
    /// Load from the given path, or the default location. A fresh default
    /// file is written on first run; parse failures keep the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("invalid config {} ({}), using defaults", path.display(), e);
                        SoundConfig::default()
                    }
                },
                Err(e) => {
                    warn!("could not read {} ({}), using defaults", path.display(), e);
                    SoundConfig::default()
                }
            }
        } else {
            let config = SoundConfig::default();
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(&config) {
                let _ = fs::write(&path, json);
            }
            config
        }
    }

    /// Directory holding the sound assets.
    pub fn sounds_dir(&self) -> PathBuf {
        match &self.sounds_dir {
            Some(dir) => dir.clone(),
            None => PathBuf::from(format!(
                "{}/.local/share/focusring/sounds",
                std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
            )),
        }
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from(format!(
        "{}/.config/focusring/config.json",
        std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config: SoundConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SoundConfig::default());
        assert_eq!(config.work_end, "work-end.mp3");
        assert_eq!(config.break_end, "break-end.mp3");
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: SoundConfig = serde_json::from_str(
            r#"{"sounds_dir": "/tmp/sounds", "work_end": "gong.wav"}"#,
        )
        .unwrap();
        assert_eq!(config.sounds_dir(), PathBuf::from("/tmp/sounds"));
        assert_eq!(config.work_end, "gong.wav");
        assert_eq!(config.break_end, "break-end.mp3");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SoundConfig {
            sounds_dir: Some(PathBuf::from("/opt/assets")),
            work_end: "done.ogg".to_string(),
            break_end: "back.ogg".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SoundConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("focusring-test-nonexistent/config.json");
        let _ = fs::remove_file(&path);
        let config = SoundConfig::load(Some(&path));
        assert_eq!(config, SoundConfig::default());
        // First run writes the default file for the user to edit.
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }
}
