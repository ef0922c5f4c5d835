//! Defuse mode: arm with one code, disarm with another before the countdown ends.
//!
//! Input mapping: digits fill a four-slot buffer, `*` clears it, `#`
//! submits it. A submission compares against the arming code while
//! waiting and against the defuse code while armed.
//!
//! A session ends with a fixed presentation hold (see
//! [`TERMINAL_HOLD_MS`]): the result screen stays up and the loop is
//! stalled on purpose, then the controller resets itself for the next
//! round. The hold goes through [`Clock::hold`](crate::app::ports::Clock::hold)
//! so simulated clocks can skip it.

use heapless::{String, Vec};
use log::{debug, info, warn};

use crate::app::events::{GameEvent, RejectReason};
use crate::app::input::Key;
use crate::app::ports::{Peripherals, Screen, SoundEffect};
use crate::config::{CODE_LEN, Code, GameConfig, GameModeKind, TERMINAL_HOLD_MS};

use super::{GameMode, SessionOutcome};

/// Seconds left at which countdown beeps turn into warnings.
const WARNING_WINDOW_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefuseState {
    WaitingToArm,
    Armed,
}

#[derive(Debug)]
pub struct DefuseController {
    state: DefuseState,
    arming_code: Code,
    defuse_code: Code,
    /// Digits typed since the last clear or submit.
    input: Vec<u8, CODE_LEN>,
    /// Clock reading when the bomb was armed.
    start_ms: u32,
    /// Countdown applied on the next arm.
    time_limit_secs: u32,
    /// Countdown captured at arm time; later `set_time_limit` calls don't move it.
    armed_limit_secs: u32,
    /// Whole seconds elapsed when the last countdown beep played.
    last_beep_sec: u32,
    last_outcome: Option<SessionOutcome>,
}

impl DefuseController {
    pub fn new(arming_code: Code, defuse_code: Code, time_limit_secs: u32) -> Self {
        Self {
            state: DefuseState::WaitingToArm,
            arming_code,
            defuse_code,
            input: Vec::new(),
            start_ms: 0,
            time_limit_secs,
            armed_limit_secs: time_limit_secs,
            last_beep_sec: 0,
            last_outcome: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.arming_code, config.defuse_code, config.defuse_time_secs)
    }

    // ── Operator controls ─────────────────────────────────────

    /// Set the countdown length. Takes effect on the next arm.
    pub fn set_time_limit(&mut self, seconds: u32) {
        self.time_limit_secs = seconds;
        debug!("defuse: time limit set to {}s", seconds);
    }

    // ── Key handlers ──────────────────────────────────────────

    /// Append a digit. Digits past the fourth are dropped without feedback.
    pub fn handle_digit(&mut self, digit: u8, io: &mut impl Peripherals) {
        if digit > 9 {
            warn!("defuse: ignoring invalid digit {}", digit);
            return;
        }
        if self.input.push(digit).is_ok() {
            io.play(SoundEffect::ButtonPress);
        }
    }

    /// Empty the code buffer. The game state is untouched.
    pub fn handle_clear(&mut self, io: &mut impl Peripherals) {
        self.input.clear();
        io.play(SoundEffect::Beep);
    }

    /// Check the buffered code against the code for the current state.
    ///
    /// Once the countdown has run out, any submission while armed
    /// detonates; a correct code arriving late does not count.
    pub fn handle_submit(&mut self, io: &mut impl Peripherals) {
        if self.state == DefuseState::Armed
            && self.elapsed_secs(io.now_ms()) >= self.armed_limit_secs
        {
            info!("defuse: code submitted after the deadline");
            self.conclude(SessionOutcome::Detonated, io);
            return;
        }

        if self.input.len() < CODE_LEN {
            info!("defuse: code rejected, only {} digits", self.input.len());
            self.input.clear();
            io.play(SoundEffect::Error);
            io.emit(&GameEvent::CodeRejected(RejectReason::TooShort));
            return;
        }

        let expected = match self.state {
            DefuseState::WaitingToArm => &self.arming_code,
            DefuseState::Armed => &self.defuse_code,
        };
        let matched = expected.matches(&self.input);
        self.input.clear();

        if !matched {
            info!("defuse: incorrect code while {:?}", self.state);
            io.play(SoundEffect::Error);
            io.emit(&GameEvent::CodeRejected(RejectReason::Mismatch));
            return;
        }

        match self.state {
            DefuseState::WaitingToArm => self.arm(io),
            DefuseState::Armed => self.conclude(SessionOutcome::Defused, io),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> DefuseState {
        self.state
    }

    /// Number of digits currently buffered (0–4).
    pub fn code_position(&self) -> usize {
        self.input.len()
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Clock reading at arm time, `None` while waiting.
    pub fn armed_at(&self) -> Option<u32> {
        match self.state {
            DefuseState::Armed => Some(self.start_ms),
            DefuseState::WaitingToArm => None,
        }
    }

    /// Seconds left on the countdown at `now_ms`. Zero once expired.
    pub fn remaining_secs(&self, now_ms: u32) -> u32 {
        match self.state {
            DefuseState::Armed => self.armed_limit_secs.saturating_sub(self.elapsed_secs(now_ms)),
            DefuseState::WaitingToArm => self.time_limit_secs,
        }
    }

    /// How the most recent session ended.
    pub fn last_outcome(&self) -> Option<SessionOutcome> {
        self.last_outcome
    }

    // ── Internal ──────────────────────────────────────────────

    fn elapsed_secs(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms) / 1000
    }

    fn arm(&mut self, io: &mut impl Peripherals) {
        self.state = DefuseState::Armed;
        self.start_ms = io.now_ms();
        self.armed_limit_secs = self.time_limit_secs;
        self.last_beep_sec = 0;
        info!("defuse: ARMED, {}s on the clock", self.armed_limit_secs);
        io.play(SoundEffect::GameStart);
        io.emit(&GameEvent::Armed {
            time_limit_secs: self.armed_limit_secs,
        });
    }

    /// Terminal step: announce the result, hold the screen, start over.
    fn conclude(&mut self, outcome: SessionOutcome, io: &mut impl Peripherals) {
        let remaining = self.remaining_secs(io.now_ms());
        match outcome {
            SessionOutcome::Defused => {
                info!("defuse: DEFUSED with {}s left", remaining);
                io.play(SoundEffect::Defused);
                io.emit(&GameEvent::Defused {
                    remaining_secs: remaining,
                });
                io.show(&Screen::MissionResult { victory: true });
            }
            SessionOutcome::Detonated => {
                info!("defuse: DETONATED");
                io.play(SoundEffect::Explosion);
                io.emit(&GameEvent::Exploded);
                io.show(&Screen::MissionResult { victory: false });
            }
        }

        io.hold(TERMINAL_HOLD_MS);

        self.reset();
        self.last_outcome = Some(outcome);
    }

    fn countdown_beep(&mut self, elapsed: u32, remaining: u32, io: &mut impl Peripherals) {
        if elapsed > self.last_beep_sec {
            self.last_beep_sec = elapsed;
            io.play(if remaining <= WARNING_WINDOW_SECS {
                SoundEffect::Warning
            } else {
                SoundEffect::Beep
            });
        }
    }

    fn render(&self, remaining_secs: u32, io: &mut impl Peripherals) {
        let mut entered: String<4> = String::new();
        for &d in &self.input {
            // Capacity equals CODE_LEN, so this cannot overflow.
            let _ = entered.push((b'0' + d) as char);
        }
        io.show(&Screen::Defuse {
            remaining_secs,
            armed: self.state == DefuseState::Armed,
            entered,
        });
    }
}

impl GameMode for DefuseController {
    fn kind(&self) -> GameModeKind {
        GameModeKind::Defuse
    }

    fn init(&mut self, io: &mut impl Peripherals) {
        self.reset();
        self.render(self.time_limit_secs, io);
    }

    fn update(&mut self, io: &mut impl Peripherals) {
        match self.state {
            DefuseState::WaitingToArm => self.render(self.time_limit_secs, io),
            DefuseState::Armed => {
                let elapsed = self.elapsed_secs(io.now_ms());
                if elapsed >= self.armed_limit_secs {
                    self.conclude(SessionOutcome::Detonated, io);
                    return;
                }
                let remaining = self.armed_limit_secs - elapsed;
                self.countdown_beep(elapsed, remaining, io);
                self.render(remaining, io);
            }
        }
    }

    fn handle_key(&mut self, key: Key, io: &mut impl Peripherals) {
        match key {
            Key::Digit(d) => self.handle_digit(d, io),
            Key::Star => self.handle_clear(io),
            Key::Hash => self.handle_submit(io),
            Key::TeamPress(_) | Key::TeamRelease(_) => {}
        }
    }

    /// Back to waiting with an empty buffer. The configured time limit
    /// (including any `set_time_limit` override) is kept.
    fn reset(&mut self) {
        self.state = DefuseState::WaitingToArm;
        self.input.clear();
        self.start_ms = 0;
        self.last_beep_sec = 0;
    }

    /// Sessions end by resetting themselves, so there is never a
    /// terminal state left waiting for a restart.
    fn is_finished(&self) -> bool {
        false
    }

    fn is_idle(&self) -> bool {
        self.state == DefuseState::WaitingToArm && self.input.is_empty()
    }
}
