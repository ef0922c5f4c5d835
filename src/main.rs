//! Airsoft prop host simulator entry point.
//!
//! Runs the same polling loop as the prop, with the terminal standing in
//! for the keypad, team buttons, LCD and speaker.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  SystemClock   ConsoleDisplay   ConsoleSound   LogEventSink  │
//! │  (Clock)       (Display)        (Sound)        (EventSink)   │
//! │  StoredSettings<FileStorage> (ConfigPort)                    │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │          GameRunner (pure logic)                   │      │
//! │  │  DefuseController | DominationController           │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `airsoft-prop [config.json]`. Type keys and press enter:
//!
//! | Input       | Effect                               |
//! |-------------|--------------------------------------|
//! | `0`–`9 * #` | keypad                               |
//! | `r` / `g`   | toggle the red / green team button   |
//! | `m`         | switch game mode                     |
//! | `s`         | save settings                        |
//! | `x`         | erase saved settings                 |
//! | `q`         | quit                                 |
#![deny(unused_must_use)]

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use airsoft_prop::adapters::host::HostPeripherals;
use airsoft_prop::adapters::settings::{FileStorage, StoredSettings};
use airsoft_prop::app::commands::AppCommand;
use airsoft_prop::app::input::Key;
use airsoft_prop::app::ports::ConfigPort;
use airsoft_prop::app::service::GameRunner;
use airsoft_prop::config::{GameConfig, GameModeKind};
use airsoft_prop::drivers::team_buttons::TeamButtons;
use airsoft_prop::game::GameMode;

const DEFAULT_STATE_DIR: &str = ".airsoft-prop";
const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    // `log` records from the library reach the subscriber via its
    // LogTracer bridge.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("PROP_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing logger")?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Airsoft prop v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Load config (JSON file, else settings store) ───────
    let state_dir =
        std::env::var("PROP_STATE_DIR").unwrap_or_else(|_| DEFAULT_STATE_DIR.to_string());
    let mut settings = StoredSettings::new(FileStorage::new(&state_dir));

    let config = match std::env::args().nth(1) {
        Some(path) => load_json_config(&path)?,
        None => match settings.load() {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Stored settings unusable ({}), using defaults", e);
                GameConfig::default()
            }
        },
    };
    let loop_interval = Duration::from_millis(u64::from(config.loop_interval_ms));

    // ── 3. Adapters + runner ──────────────────────────────────
    let mut io = HostPeripherals::console(std::env::var_os("PROP_BEEPS").is_some());
    let mut runner = GameRunner::new(config);
    runner.start(&mut io);

    let input = spawn_stdin_reader();
    let mut buttons = TeamButtons::RELEASED;

    info!("Ready. Entering game loop.");

    // ── 4. Game loop ──────────────────────────────────────────
    loop {
        let mut key = None;
        match input.try_recv() {
            Ok(c) => match c {
                'q' => break,
                'r' => {
                    buttons.red = !buttons.red;
                    info!("red button {}", if buttons.red { "held" } else { "released" });
                }
                'g' => {
                    buttons.green = !buttons.green;
                    info!("green button {}", if buttons.green { "held" } else { "released" });
                }
                'm' => {
                    let next = match runner.game().kind() {
                        GameModeKind::Defuse => GameModeKind::Domination,
                        GameModeKind::Domination => GameModeKind::Defuse,
                    };
                    buttons = TeamButtons::RELEASED;
                    runner.handle_command(AppCommand::SelectMode(next), &mut io);
                }
                's' => runner.handle_command(AppCommand::SaveConfig, &mut io),
                'x' => match settings.erase() {
                    Ok(()) => info!("Saved settings erased"),
                    Err(e) => warn!("Erase failed: {}", e),
                },
                // Only keypad symbols reach the game from the terminal;
                // team markers come from the button edges.
                c @ ('0'..='9' | '*' | '#') => key = Key::from_char(c),
                c if c.is_whitespace() => {}
                other => warn!("Unmapped input {:?}", other),
            },
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                info!("Input closed");
                break;
            }
        }

        runner.tick(key, buttons, &mut io);
        runner.persist_if_needed(&mut settings);

        std::thread::sleep(loop_interval);
    }

    if runner.is_config_dirty() {
        runner.handle_command(AppCommand::SaveConfig, &mut io);
        runner.persist_if_needed(&mut settings);
    }
    info!("Shut down after {} ticks", runner.tick_count());
    Ok(())
}

/// Filter directives from `PROP_LOG`, falling back to `info` when the
/// variable is unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Read a JSON config file. Missing fields take defaults; out-of-range
/// values are replaced by defaults.
fn load_json_config(path: &str) -> Result<GameConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading config file {path}"))?;
    let config: GameConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?;
    info!("Config loaded from {}", path);
    Ok(config.sanitized())
}

/// Forward stdin one character at a time. The channel closes on EOF.
fn spawn_stdin_reader() -> Receiver<char> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for c in line.chars() {
                if tx.send(c).is_err() {
                    return;
                }
            }
        }
    });
    rx
}
