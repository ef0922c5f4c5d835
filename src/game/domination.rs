//! Domination mode: two teams hold buttons to capture a point and score
//! one point per second of ownership.
//!
//! ## Capture
//!
//! Progress is derived from wall-clock time since the attempt started,
//! never incremented per tick, so loop jitter cannot change how long a
//! capture takes. An attempt needs [`CAPTURE_DURATION_MS`] of continuous
//! hold by a team that does not already own the point.
//!
//! | Held buttons            | Effect                                          |
//! |-------------------------|-------------------------------------------------|
//! | one team, not the owner | start an attempt, or keep the running one       |
//! | one team, the owner     | abandon any attempt                             |
//! | neither                 | abandon any attempt                             |
//! | both (contested)        | abandon any attempt, nobody progresses          |
//!
//! ## Scoring
//!
//! Scores accrue in whole seconds. The accrual timestamp advances by
//! exactly the seconds consumed, so the sub-second remainder carries into
//! the next tick instead of being lost.

use log::{debug, info};

use crate::app::events::GameEvent;
use crate::app::input::Key;
use crate::app::ports::{Peripherals, Screen, SoundEffect};
use crate::config::{
    CAPTURE_DURATION_MS, DOMINATION_MAX_MINUTES, DOMINATION_MIN_MINUTES,
    DOMINATION_STEP_MINUTES, GameConfig, GameModeKind,
};

use super::{GameMode, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominationState {
    Setup,
    Running,
    GameOver,
}

/// Direction of a setup-time adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAdjust {
    Increase,
    Decrease,
}

#[derive(Debug)]
pub struct DominationController {
    state: DominationState,
    /// Match length restored by `reset` (minutes).
    default_minutes: u32,
    /// Match length for the next or current match (seconds).
    game_time_secs: u32,
    start_ms: u32,
    elapsed_secs: u32,

    owner: Team,
    capturing_team: Team,
    /// 0–100.
    capture_progress: u8,
    /// Start of the active capture attempt, `None` when nobody is capturing.
    capture_started: Option<u32>,

    red_held: bool,
    green_held: bool,

    red_score: u32,
    green_score: u32,
    last_score_ms: u32,
}

impl DominationController {
    pub fn new(default_minutes: u32) -> Self {
        let mut game = Self {
            state: DominationState::Setup,
            default_minutes,
            game_time_secs: default_minutes * 60,
            start_ms: 0,
            elapsed_secs: 0,
            owner: Team::Neutral,
            capturing_team: Team::Neutral,
            capture_progress: 0,
            capture_started: None,
            red_held: false,
            green_held: false,
            red_score: 0,
            green_score: 0,
            last_score_ms: 0,
        };
        game.reset();
        game
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.domination_minutes)
    }

    // ── Setup ─────────────────────────────────────────────────

    /// Move the match length one step, clamped to the setup range.
    /// Ignored outside SETUP.
    pub fn adjust_setup_time(&mut self, direction: TimeAdjust) {
        if self.state != DominationState::Setup {
            return;
        }
        let minutes = self.game_time_secs / 60;
        let adjusted = match direction {
            TimeAdjust::Increase => minutes.saturating_add(DOMINATION_STEP_MINUTES),
            TimeAdjust::Decrease => minutes.saturating_sub(DOMINATION_STEP_MINUTES),
        }
        .clamp(DOMINATION_MIN_MINUTES, DOMINATION_MAX_MINUTES);
        self.game_time_secs = adjusted * 60;
        debug!("domination: match length {} min", adjusted);
    }

    /// SETUP → RUNNING. Ignored in any other state.
    pub fn begin_match(&mut self, io: &mut impl Peripherals) {
        if self.state != DominationState::Setup {
            return;
        }
        let now = io.now_ms();
        self.start_ms = now;
        self.last_score_ms = now;
        self.elapsed_secs = 0;
        self.state = DominationState::Running;

        let minutes = self.game_time_secs / 60;
        info!("domination: match started, {} min", minutes);
        io.play(SoundEffect::GameStart);
        io.emit(&GameEvent::MatchStarted { minutes });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> DominationState {
        self.state
    }

    pub fn game_time_secs(&self) -> u32 {
        self.game_time_secs
    }

    pub fn game_minutes(&self) -> u32 {
        self.game_time_secs / 60
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.game_time_secs.saturating_sub(self.elapsed_secs)
    }

    pub fn owner(&self) -> Team {
        self.owner
    }

    pub fn capturing_team(&self) -> Team {
        self.capturing_team
    }

    pub fn capture_progress(&self) -> u8 {
        self.capture_progress
    }

    pub fn capture_started_at(&self) -> Option<u32> {
        self.capture_started
    }

    /// Latest (red, green) hold snapshot.
    pub fn buttons_held(&self) -> (bool, bool) {
        (self.red_held, self.green_held)
    }

    pub fn red_score(&self) -> u32 {
        self.red_score
    }

    pub fn green_score(&self) -> u32 {
        self.green_score
    }

    /// Higher score wins; a tie is `Team::Neutral`.
    pub fn winner(&self) -> Team {
        match self.red_score.cmp(&self.green_score) {
            core::cmp::Ordering::Greater => Team::Red,
            core::cmp::Ordering::Less => Team::Green,
            core::cmp::Ordering::Equal => Team::Neutral,
        }
    }

    // ── Per-tick steps ────────────────────────────────────────

    /// Advance the active capture attempt and resolve it at 100%.
    fn update_capture(&mut self, now: u32, io: &mut impl Peripherals) {
        let Some(team) = self.sole_holder() else {
            return;
        };
        if team == self.owner {
            return;
        }
        let Some(started) = self.capture_started else {
            return;
        };

        let held_ms = now.wrapping_sub(started) as u64;
        let progress = (held_ms * 100 / CAPTURE_DURATION_MS as u64).min(100) as u8;
        self.capture_progress = progress;

        if progress >= 100 {
            self.owner = self.capturing_team;
            self.capture_started = None;
            info!("domination: point captured by {}", self.owner);
            io.play(SoundEffect::Beep);
            io.emit(&GameEvent::PointCaptured(self.owner));
        }
    }

    /// Credit the owner one point per whole second since the last accrual.
    fn update_scores(&mut self, now: u32) {
        let whole_secs = now.wrapping_sub(self.last_score_ms) / 1000;
        if whole_secs == 0 {
            return;
        }
        match self.owner {
            Team::Red => self.red_score += whole_secs,
            Team::Green => self.green_score += whole_secs,
            Team::Neutral => {}
        }
        self.last_score_ms = self.last_score_ms.wrapping_add(whole_secs * 1000);
    }

    fn finish_match(&mut self, io: &mut impl Peripherals) {
        self.state = DominationState::GameOver;
        self.capture_started = None;
        self.capture_progress = 0;
        let winner = self.winner();
        info!(
            "domination: match over, red={} green={} winner={}",
            self.red_score, self.green_score, winner
        );
        io.play(SoundEffect::Warning);
        io.emit(&GameEvent::MatchOver {
            winner,
            red_score: self.red_score,
            green_score: self.green_score,
        });
    }

    // ── Internal ──────────────────────────────────────────────

    /// The one team holding its button, `None` for nobody or both.
    fn sole_holder(&self) -> Option<Team> {
        match (self.red_held, self.green_held) {
            (true, false) => Some(Team::Red),
            (false, true) => Some(Team::Green),
            _ => None,
        }
    }

    fn abandon_capture(&mut self) {
        if self.capture_started.is_some() {
            debug!(
                "domination: {} capture abandoned at {}%",
                self.capturing_team, self.capture_progress
            );
        }
        self.capture_started = None;
        self.capture_progress = 0;
    }

    fn render(&self, io: &mut impl Peripherals) {
        let screen = match self.state {
            DominationState::Setup => Screen::DominationSetup {
                minutes: self.game_minutes(),
            },
            DominationState::Running => Screen::DominationLive {
                red_score: self.red_score,
                green_score: self.green_score,
                capture_progress: self.capture_progress,
                owner: self.owner,
                remaining_secs: self.remaining_secs(),
            },
            DominationState::GameOver => Screen::DominationResult {
                winner: self.winner(),
                red_score: self.red_score,
                green_score: self.green_score,
            },
        };
        io.show(&screen);
    }
}

impl GameMode for DominationController {
    fn kind(&self) -> GameModeKind {
        GameModeKind::Domination
    }

    fn init(&mut self, io: &mut impl Peripherals) {
        self.reset();
        self.render(io);
    }

    fn update(&mut self, io: &mut impl Peripherals) {
        if self.state == DominationState::Running {
            // Captures and scoring stop at the match end, however late
            // this tick runs.
            let since_start = io
                .now_ms()
                .wrapping_sub(self.start_ms)
                .min(self.game_time_secs * 1000);
            let now = self.start_ms.wrapping_add(since_start);
            self.elapsed_secs = since_start / 1000;
            self.update_capture(now, io);
            self.update_scores(now);
            if self.elapsed_secs >= self.game_time_secs {
                self.finish_match(io);
            }
        }
        self.render(io);
    }

    fn handle_key(&mut self, key: Key, io: &mut impl Peripherals) {
        match (self.state, key) {
            (DominationState::Setup, Key::Hash) => self.begin_match(io),
            (DominationState::Setup, Key::TeamPress(Team::Red)) => {
                self.adjust_setup_time(TimeAdjust::Decrease);
                io.play(SoundEffect::ButtonPress);
            }
            (DominationState::Setup, Key::TeamPress(Team::Green)) => {
                self.adjust_setup_time(TimeAdjust::Increase);
                io.play(SoundEffect::ButtonPress);
            }
            (DominationState::GameOver, Key::Hash) => {
                info!("domination: restart requested");
                self.reset();
            }
            // Held-state snapshots drive capture while running.
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.state = DominationState::Setup;
        self.game_time_secs = self.default_minutes * 60;
        self.start_ms = 0;
        self.elapsed_secs = 0;
        self.owner = Team::Neutral;
        self.capturing_team = Team::Neutral;
        self.capture_progress = 0;
        self.capture_started = None;
        self.red_held = false;
        self.green_held = false;
        self.red_score = 0;
        self.green_score = 0;
        self.last_score_ms = 0;
    }

    fn is_finished(&self) -> bool {
        self.state == DominationState::GameOver
    }

    fn is_idle(&self) -> bool {
        self.state == DominationState::Setup
    }

    /// Replace the hold snapshot and start or abandon capture attempts.
    /// Only acts while RUNNING.
    fn update_buttons(&mut self, red: bool, green: bool, io: &mut impl Peripherals) {
        if self.state != DominationState::Running {
            return;
        }
        self.red_held = red;
        self.green_held = green;

        match self.sole_holder() {
            Some(team) if team != self.owner => {
                if self.capture_started.is_none() || self.capturing_team != team {
                    let now = io.now_ms();
                    debug!("domination: {} capture started", team);
                    self.capture_started = Some(now);
                    self.capturing_team = team;
                    self.capture_progress = 0;
                }
            }
            _ => self.abandon_capture(),
        }
    }
}
