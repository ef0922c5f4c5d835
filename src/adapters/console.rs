//! Terminal adapters for the host simulator.
//!
//! - [`ConsoleDisplay`] renders [`Screen`]s as single status lines on
//!   stdout, skipping a frame identical to the previous one (the loop asks
//!   for a redraw every tick).
//! - [`ConsoleSound`] prints sound cues.

use std::io::Write;

use crate::app::ports::{Display, Screen, Sound, SoundEffect};
use crate::game::Team;

/// `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One-line rendering of a screen.
pub fn render_line(screen: &Screen) -> String {
    match screen {
        Screen::Welcome => "AIRSOFT PROP  ready".to_string(),
        Screen::ModeBanner(kind) => format!("MODE  {}", kind.to_string().to_uppercase()),
        Screen::Defuse {
            remaining_secs,
            armed,
            entered,
        } => {
            let mut code = String::from(entered.as_str());
            while code.len() < 4 {
                code.push('_');
            }
            let status = if *armed { "ARMED " } else { "SAFE  " };
            format!("{} {}  code [{}]", status, format_clock(*remaining_secs), code)
        }
        Screen::MissionResult { victory: true } => "*** BOMB DEFUSED ***".to_string(),
        Screen::MissionResult { victory: false } => "*** BOOM ***".to_string(),
        Screen::DominationSetup { minutes } => {
            format!("SETUP  {} min   R:-  G:+  #:start", minutes)
        }
        Screen::DominationLive {
            red_score,
            green_score,
            capture_progress,
            owner,
            remaining_secs,
        } => format!(
            "R {:>4} | G {:>4} | {} | cap {:>3}% | {}",
            red_score,
            green_score,
            owner_tag(*owner),
            capture_progress,
            format_clock(*remaining_secs)
        ),
        Screen::DominationResult {
            winner,
            red_score,
            green_score,
        } => {
            let headline = match winner {
                Team::Neutral => "DRAW".to_string(),
                team => format!("{} WINS", team.to_string().to_uppercase()),
            };
            format!("{}  R {} : G {}   #:again", headline, red_score, green_score)
        }
    }
}

fn owner_tag(team: Team) -> &'static str {
    match team {
        Team::Neutral => "---",
        Team::Red => "RED",
        Team::Green => "GRN",
    }
}

// ───────────────────────────────────────────────────────────────
// Display
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    last: Option<Screen>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for ConsoleDisplay {
    fn show(&mut self, screen: &Screen) {
        if self.last.as_ref() == Some(screen) {
            return;
        }
        let mut out = std::io::stdout().lock();
        // A closed stdout only loses the frame.
        let _ = writeln!(out, "[screen] {}", render_line(screen));
        self.last = Some(screen.clone());
    }
}

// ───────────────────────────────────────────────────────────────
// Sound
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ConsoleSound {
    /// Per-key beeps are noisy; off unless asked for.
    verbose: bool,
}

impl ConsoleSound {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Sound for ConsoleSound {
    fn play(&mut self, effect: SoundEffect) {
        if !self.verbose && matches!(effect, SoundEffect::Beep | SoundEffect::ButtonPress) {
            return;
        }
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "[sound]  {:?} (track {})", effect, effect as u8);
    }
}
