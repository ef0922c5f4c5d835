//! Fuzz target: `GameRunner::tick`
//!
//! Decodes arbitrary bytes into a stream of ticks (optional key, team
//! button snapshot, clock gap) and drives both game modes with it. The
//! controllers must never panic and must stay inside their documented
//! ranges.
//!
//! cargo fuzz run fuzz_key_sequence

#![no_main]

use airsoft_prop::app::events::GameEvent;
use airsoft_prop::app::input::Key;
use airsoft_prop::app::ports::{Clock, Display, EventSink, Screen, Sound, SoundEffect};
use airsoft_prop::app::service::GameRunner;
use airsoft_prop::config::{GameConfig, GameModeKind};
use airsoft_prop::drivers::team_buttons::TeamButtons;
use airsoft_prop::game::ActiveGame;
use libfuzzer_sys::fuzz_target;

const KEYS: &[u8] = b"0123456789*#";

struct FuzzIo {
    now: u32,
}

impl Clock for FuzzIo {
    fn now_ms(&self) -> u32 {
        self.now
    }
    fn hold(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl Display for FuzzIo {
    fn show(&mut self, screen: &Screen) {
        if let Screen::DominationLive {
            capture_progress, ..
        } = screen
        {
            assert!(*capture_progress <= 100);
        }
    }
}

impl Sound for FuzzIo {
    fn play(&mut self, _effect: SoundEffect) {}
}

impl EventSink for FuzzIo {
    fn emit(&mut self, _event: &GameEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let config = GameConfig {
        mode: if first & 1 == 0 {
            GameModeKind::Defuse
        } else {
            GameModeKind::Domination
        },
        defuse_time_secs: 5,
        ..GameConfig::default()
    };
    // Start anywhere on the clock, including just before the wrap.
    let mut io = FuzzIo {
        now: u32::MAX.wrapping_sub(u32::from(first) * 1_000),
    };
    let mut runner = GameRunner::new(config);
    runner.start(&mut io);

    for chunk in rest.chunks_exact(2) {
        let (a, b) = (chunk[0], chunk[1]);
        let key = match a >> 4 {
            n if usize::from(n) < KEYS.len() => Key::from_char(KEYS[usize::from(n)] as char),
            _ => None,
        };
        let buttons = TeamButtons::new(a & 0b01 != 0, a & 0b10 != 0);
        runner.tick(key, buttons, &mut io);
        io.now = io.now.wrapping_add(u32::from(b) * 8);

        match runner.game() {
            ActiveGame::Defuse(game) => assert!(game.code_position() <= 4),
            ActiveGame::Domination(game) => {
                assert!(game.capture_progress() <= 100);
                assert!((1..=60).contains(&game.game_minutes()));
            }
        }
    }
});
