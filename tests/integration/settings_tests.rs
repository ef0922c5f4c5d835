//! Settings store behaviour across the ConfigPort boundary.

use airsoft_prop::adapters::settings::{FileStorage, MemoryStorage, StoredSettings};
use airsoft_prop::app::ports::{ConfigError, ConfigPort, StoragePort};
use airsoft_prop::config::{GameConfig, GameModeKind};
use airsoft_prop::error::Error;

#[test]
fn stale_blob_is_sanitised_on_load() {
    let mut stale = GameConfig::default();
    stale.defuse_time_secs = 9_999;
    stale.domination_minutes = 0;
    stale.mode = GameModeKind::Domination;

    let mut storage = MemoryStorage::new();
    let bytes = postcard::to_allocvec(&stale).unwrap();
    storage.write("prop", "settings", &bytes).unwrap();

    let loaded = StoredSettings::new(storage).load().unwrap();
    assert_eq!(loaded.defuse_time_secs, 300);
    assert_eq!(loaded.domination_minutes, 1);
    assert_eq!(loaded.mode, GameModeKind::Domination);
    assert!(loaded.validate().is_ok());
}

#[test]
fn custom_codes_survive_a_save() {
    let mut settings = StoredSettings::new(MemoryStorage::new());
    let mut cfg = GameConfig::default();
    cfg.arming_code = "0000".parse().unwrap();
    cfg.defuse_code = "9876".parse().unwrap();
    settings.save(&cfg).unwrap();

    let loaded = settings.load().unwrap();
    assert_eq!(loaded.arming_code.to_string(), "0000");
    assert_eq!(loaded.defuse_code.digits(), &[9, 8, 7, 6]);
}

#[test]
fn invalid_config_is_never_written() {
    let mut settings = StoredSettings::new(MemoryStorage::new());
    let mut cfg = GameConfig::default();
    cfg.domination_minutes = 90;
    let err = settings.save(&cfg).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed(_)));
    assert!(!settings.storage().exists("prop", "settings"));

    let wrapped: Error = err.into();
    assert!(wrapped.to_string().starts_with("config:"));
}

#[test]
fn file_backed_settings_persist_between_runs() {
    let dir = std::env::temp_dir().join(format!("airsoft-prop-it-{}", std::process::id()));
    let mut cfg = GameConfig::default();
    cfg.mode = GameModeKind::Domination;
    cfg.domination_minutes = 30;

    {
        let mut settings = StoredSettings::new(FileStorage::new(&dir));
        settings.save(&cfg).unwrap();
    }
    {
        let mut settings = StoredSettings::new(FileStorage::new(&dir));
        assert!(settings.has_saved_config());
        assert_eq!(settings.load().unwrap(), cfg);
        settings.erase().unwrap();
        assert_eq!(settings.load().unwrap(), GameConfig::default());
    }
    let _ = std::fs::remove_dir_all(&dir);
}
