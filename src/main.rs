use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, interval};
use tracing::{info, warn};

mod clock;
mod config;
mod feedback;
mod session;
mod ui;

use clock::clock::current_time_string;
use config::{Config, SoundConfig};
use feedback::feedback::{FeedbackDispatcher, probe_notification_server};
use session::controller::{Command, Event, TimerController, create_event_channel};
use session::session::{BREAK_SECONDS, WORK_SECONDS};
use ui::ring::{ProgressRing, status_line};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!("focusring={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    println!("🍅 focusring - Pomodoro Timer");
    println!("======================================================");
    println!(
        "Pomodoro settings: {}min work / {}min break",
        WORK_SECONDS / 60,
        BREAK_SECONDS / 60
    );
    println!("Commands: start (s), pause (p), resume (r), reset, quit (q)");
    println!("Press Ctrl+C to exit\n");

    probe_notification_server();

    let sounds = SoundConfig::load(config.config.as_deref());
    let feedback = FeedbackDispatcher::new(&sounds, !config.no_sound);

    let (event_tx, mut event_rx) = create_event_channel();
    let mut controller = TimerController::new(event_tx.clone(), feedback);

    // Forward interactive commands from stdin into the event channel.
    let command_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match Command::parse(&line) {
                Some(command) => {
                    if command_tx.send(Event::Command(command)).is_err() {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        warn!("unknown command: {}", line.trim());
                    }
                }
            }
        }
    });

    let ring = ProgressRing::new();

    // The wall clock redraws on its own beat so a paused countdown never
    // freezes the time of day.
    let mut clock_beat = interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = clock_beat.tick() => {
                redraw(&controller, &ring);
            }
            Some(event) = event_rx.recv() => match event {
                Event::Tick => {
                    controller.on_tick();
                    redraw(&controller, &ring);
                }
                Event::Command(Command::Quit) => {
                    println!();
                    info!("exiting");
                    std::process::exit(0);
                }
                Event::Command(command) => {
                    controller.handle_command(command);
                    redraw(&controller, &ring);
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                info!("exiting");
                std::process::exit(0);
            }
        }
    }
}

fn redraw(controller: &TimerController, ring: &ProgressRing) {
    let line = status_line(&current_time_string(), controller.session(), ring);
    print!("\r\x1b[2K{}", line);
    let _ = std::io::stdout().flush();
}
