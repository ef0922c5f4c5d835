//! Defuse-mode sessions driven end to end through the public API.

use crate::mock_hw::MockPeripherals;

use airsoft_prop::app::events::{GameEvent, RejectReason};
use airsoft_prop::app::input::Key;
use airsoft_prop::app::ports::{Screen, SoundEffect};
use airsoft_prop::config::{Code, TERMINAL_HOLD_MS};
use airsoft_prop::game::{DefuseController, DefuseState, GameMode, SessionOutcome};

fn code(s: &str) -> Code {
    s.parse().unwrap()
}

fn scenario_game() -> DefuseController {
    DefuseController::new(code("1234"), code("5678"), 5)
}

fn press(game: &mut DefuseController, keys: &str, io: &mut MockPeripherals) {
    for c in keys.chars() {
        game.handle_key(Key::from_char(c).unwrap(), io);
        game.update(io);
    }
}

// ── Scenario 1: timeout ──────────────────────────────────────

#[test]
fn armed_bomb_explodes_after_time_limit() {
    let mut io = MockPeripherals::at(1_000);
    let mut game = scenario_game();
    game.init(&mut io);

    press(&mut game, "1234#", &mut io);
    assert_eq!(game.state(), DefuseState::Armed);
    assert_eq!(game.armed_at(), Some(1_000));

    for _ in 0..60 {
        io.advance(100);
        game.update(&mut io);
    }

    assert_eq!(game.state(), DefuseState::WaitingToArm);
    assert_eq!(game.last_outcome(), Some(SessionOutcome::Detonated));
    assert_eq!(io.count_event(|e| *e == GameEvent::Exploded), 1);
    assert_eq!(io.count_sound(SoundEffect::Explosion), 1);
    assert_eq!(io.holds, vec![TERMINAL_HOLD_MS]);
    assert!(io.screens.contains(&Screen::MissionResult { victory: false }));
}

// ── Scenario 2: defused in time ──────────────────────────────

#[test]
fn correct_defuse_code_wins_the_session() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();
    game.init(&mut io);

    press(&mut game, "1234#", &mut io);
    io.advance(2_000);
    game.update(&mut io);
    press(&mut game, "5678#", &mut io);

    assert_eq!(game.state(), DefuseState::WaitingToArm);
    assert_eq!(game.last_outcome(), Some(SessionOutcome::Defused));
    assert_eq!(
        io.count_event(|e| matches!(e, GameEvent::Defused { remaining_secs: 3 })),
        1
    );
    assert!(io.screens.contains(&Screen::MissionResult { victory: true }));
    assert_eq!(io.holds.len(), 1);
}

// ── Rejections ───────────────────────────────────────────────

#[test]
fn short_and_wrong_codes_are_rejected_without_state_change() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();

    press(&mut game, "12#", &mut io);
    assert_eq!(game.state(), DefuseState::WaitingToArm);
    assert_eq!(game.code_position(), 0);

    press(&mut game, "9999#", &mut io);
    assert_eq!(game.state(), DefuseState::WaitingToArm);
    assert_eq!(game.code_position(), 0);

    assert_eq!(
        io.events,
        vec![
            GameEvent::CodeRejected(RejectReason::TooShort),
            GameEvent::CodeRejected(RejectReason::Mismatch),
        ]
    );
    assert_eq!(io.count_sound(SoundEffect::Error), 2);
}

#[test]
fn arming_code_does_not_defuse() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();
    press(&mut game, "1234#", &mut io);
    press(&mut game, "1234#", &mut io);
    assert_eq!(game.state(), DefuseState::Armed);
    assert_eq!(game.last_outcome(), None);
}

#[test]
fn star_clears_partial_entry() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();
    press(&mut game, "12*34", &mut io);
    assert_eq!(game.code_position(), 2);
    press(&mut game, "#", &mut io);
    assert_eq!(game.state(), DefuseState::WaitingToArm);
}

#[test]
fn team_markers_are_ignored() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();
    press(&mut game, "12RrGg", &mut io);
    assert_eq!(game.code_position(), 2);
}

// ── Rendering ────────────────────────────────────────────────

#[test]
fn armed_screen_counts_down() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();
    press(&mut game, "1234#", &mut io);
    io.advance(2_500);
    game.update(&mut io);
    match io.last_screen() {
        Some(Screen::Defuse {
            remaining_secs,
            armed,
            entered,
        }) => {
            assert_eq!(*remaining_secs, 3);
            assert!(*armed);
            assert!(entered.is_empty());
        }
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn next_session_can_be_armed_after_a_loss() {
    let mut io = MockPeripherals::new();
    let mut game = scenario_game();
    press(&mut game, "1234#", &mut io);
    io.advance(5_000);
    game.update(&mut io);
    assert_eq!(game.state(), DefuseState::WaitingToArm);

    press(&mut game, "1234#", &mut io);
    assert_eq!(game.state(), DefuseState::Armed);
    assert_eq!(game.armed_at(), Some(io.now));
}
