//! Integration tests for the GameRunner loop driver: key routing, team
//! buttons, mode switching and config persistence.

use crate::mock_hw::{FullStorage, MockPeripherals, RecordingConfigStore};

use airsoft_prop::adapters::settings::StoredSettings;
use airsoft_prop::app::commands::AppCommand;
use airsoft_prop::app::events::GameEvent;
use airsoft_prop::app::input::Key;
use airsoft_prop::app::ports::{Screen, SoundEffect};
use airsoft_prop::app::service::GameRunner;
use airsoft_prop::config::{GameConfig, GameModeKind};
use airsoft_prop::drivers::team_buttons::TeamButtons;
use airsoft_prop::game::{DefuseState, DominationState, GameMode, Team};

const TICK_MS: u32 = 10;

fn domination_config() -> GameConfig {
    GameConfig {
        mode: GameModeKind::Domination,
        ..GameConfig::default()
    }
}

fn make_runner(config: GameConfig) -> (GameRunner, MockPeripherals) {
    let mut io = MockPeripherals::new();
    let mut runner = GameRunner::new(config);
    runner.start(&mut io);
    (runner, io)
}

fn step(runner: &mut GameRunner, key: Option<char>, buttons: TeamButtons, io: &mut MockPeripherals) {
    runner.tick(key.and_then(Key::from_char), buttons, io);
    io.advance(TICK_MS);
}

fn type_keys(runner: &mut GameRunner, keys: &str, io: &mut MockPeripherals) {
    for c in keys.chars() {
        step(runner, Some(c), TeamButtons::RELEASED, io);
    }
}

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn boot_sequence_order() {
    let (_runner, io) = make_runner(domination_config());
    assert_eq!(io.sounds[0], SoundEffect::Startup);
    assert_eq!(io.screens[0], Screen::Welcome);
    assert_eq!(io.screens[1], Screen::ModeBanner(GameModeKind::Domination));
    assert_eq!(io.screens[2], Screen::DominationSetup { minutes: 1 });
}

// ── Defuse through the runner ────────────────────────────────

#[test]
fn every_keypad_key_beeps() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    io.clear_history();
    type_keys(&mut runner, "12*#", &mut io);
    assert_eq!(io.count_sound(SoundEffect::Beep), 4 + 1); // clear also beeps
}

#[test]
fn defuse_session_via_runner() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    type_keys(&mut runner, "1234#", &mut io);
    let defuse = runner.game().as_defuse().unwrap();
    assert_eq!(defuse.state(), DefuseState::Armed);

    type_keys(&mut runner, "5678#", &mut io);
    assert_eq!(
        runner.game().as_defuse().unwrap().state(),
        DefuseState::WaitingToArm
    );
    assert_eq!(
        io.count_event(|e| matches!(e, GameEvent::Defused { .. })),
        1
    );
}

#[test]
fn late_defuse_code_loses_even_when_key_precedes_update() {
    let config = GameConfig {
        defuse_time_secs: 5,
        ..GameConfig::default()
    };
    let (mut runner, mut io) = make_runner(config);
    type_keys(&mut runner, "1234#5678", &mut io);

    // The loop stalls past the deadline; the submit lands before `update`.
    io.advance(6_000);
    step(&mut runner, Some('#'), TeamButtons::RELEASED, &mut io);

    assert_eq!(io.count_event(|e| *e == GameEvent::Exploded), 1);
    assert_eq!(
        io.count_event(|e| matches!(e, GameEvent::Defused { .. })),
        0
    );
    assert!(runner.game().is_idle());
}

#[test]
fn team_buttons_are_not_routed_in_defuse() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    io.clear_history();
    step(&mut runner, None, TeamButtons::new(true, true), &mut io);
    assert!(io.sounds.is_empty());
    assert!(runner.game().is_idle());
}

// ── Domination through the runner ────────────────────────────

#[test]
fn green_press_in_setup_adds_five_minutes() {
    let (mut runner, mut io) = make_runner(domination_config());
    step(&mut runner, None, TeamButtons::new(false, true), &mut io);
    // holding does not repeat
    step(&mut runner, None, TeamButtons::new(false, true), &mut io);
    step(&mut runner, None, TeamButtons::RELEASED, &mut io);
    assert_eq!(runner.game().as_domination().unwrap().game_minutes(), 6);

    step(&mut runner, None, TeamButtons::new(true, false), &mut io);
    assert_eq!(runner.game().as_domination().unwrap().game_minutes(), 5);
}

#[test]
fn held_button_captures_point_via_runner() {
    let (mut runner, mut io) = make_runner(domination_config());
    step(&mut runner, Some('#'), TeamButtons::RELEASED, &mut io);
    assert_eq!(
        runner.game().as_domination().unwrap().state(),
        DominationState::Running
    );

    let red = TeamButtons::new(true, false);
    for _ in 0..=100 {
        step(&mut runner, None, red, &mut io);
    }
    assert_eq!(runner.game().as_domination().unwrap().owner(), Team::Red);

    let green = TeamButtons::new(false, true);
    for _ in 0..=100 {
        step(&mut runner, None, green, &mut io);
    }
    assert_eq!(runner.game().as_domination().unwrap().owner(), Team::Green);
}

#[test]
fn one_minute_match_ends_with_result_screen() {
    let (mut runner, mut io) = make_runner(domination_config());
    step(&mut runner, Some('#'), TeamButtons::RELEASED, &mut io);
    for _ in 0..6_100 {
        step(&mut runner, None, TeamButtons::RELEASED, &mut io);
    }
    assert!(runner.game().is_finished());
    assert_eq!(
        io.last_screen(),
        Some(&Screen::DominationResult {
            winner: Team::Neutral,
            red_score: 0,
            green_score: 0,
        })
    );

    step(&mut runner, Some('#'), TeamButtons::RELEASED, &mut io);
    assert!(runner.game().is_idle());
}

// ── Commands ─────────────────────────────────────────────────

#[test]
fn select_mode_swaps_controller() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    type_keys(&mut runner, "12", &mut io);
    runner.handle_command(AppCommand::SelectMode(GameModeKind::Domination), &mut io);

    assert_eq!(runner.game().kind(), GameModeKind::Domination);
    assert_eq!(runner.config().mode, GameModeKind::Domination);
    assert!(io.events.contains(&GameEvent::ModeSelected(GameModeKind::Domination)));
    assert!(io.screens.contains(&Screen::ModeBanner(GameModeKind::Domination)));
    assert!(runner.is_config_dirty());
}

#[test]
fn config_update_waits_for_idle_session() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    type_keys(&mut runner, "1234#", &mut io);

    let mut cfg = GameConfig::default();
    cfg.defuse_time_secs = 60;
    runner.handle_command(AppCommand::UpdateConfig(cfg), &mut io);

    // still the armed session with the old limit
    step(&mut runner, None, TeamButtons::RELEASED, &mut io);
    let defuse = runner.game().as_defuse().unwrap();
    assert_eq!(defuse.state(), DefuseState::Armed);
    assert_eq!(defuse.time_limit_secs(), 300);

    type_keys(&mut runner, "5678#", &mut io);
    let defuse = runner.game().as_defuse().unwrap();
    assert_eq!(defuse.state(), DefuseState::WaitingToArm);
    assert_eq!(defuse.time_limit_secs(), 60);
}

#[test]
fn config_update_with_new_mode_switches_now() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    let mut cfg = domination_config();
    cfg.domination_minutes = 10;
    runner.handle_command(AppCommand::UpdateConfig(cfg), &mut io);
    let dom = runner.game().as_domination().unwrap();
    assert_eq!(dom.game_minutes(), 10);
}

// ── Persistence ──────────────────────────────────────────────

#[test]
fn explicit_save_is_immediate() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    let mut store = RecordingConfigStore::default();
    assert!(!runner.persist_if_needed(&mut store));

    runner.handle_command(AppCommand::SaveConfig, &mut io);
    assert!(runner.persist_if_needed(&mut store));
    assert_eq!(store.saved.len(), 1);
    assert!(!runner.persist_if_needed(&mut store));
}

#[test]
fn dirty_config_auto_saves_after_five_seconds_of_ticks() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    let mut store = RecordingConfigStore::default();
    runner.handle_command(AppCommand::SelectMode(GameModeKind::Domination), &mut io);

    for _ in 0..499 {
        step(&mut runner, None, TeamButtons::RELEASED, &mut io);
        assert!(!runner.persist_if_needed(&mut store));
    }
    step(&mut runner, None, TeamButtons::RELEASED, &mut io);
    assert!(runner.persist_if_needed(&mut store));
    assert_eq!(store.saved[0].mode, GameModeKind::Domination);
    assert!(!runner.is_config_dirty());
}

#[test]
fn failed_save_keeps_config_dirty() {
    let (mut runner, mut io) = make_runner(GameConfig::default());
    let mut settings = StoredSettings::new(FullStorage);
    runner.handle_command(AppCommand::SelectMode(GameModeKind::Domination), &mut io);
    runner.handle_command(AppCommand::SaveConfig, &mut io);
    assert!(!runner.persist_if_needed(&mut settings));
    assert!(runner.is_config_dirty());
}
