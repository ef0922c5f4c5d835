//! Fuzz target: `StoredSettings::load`
//!
//! Feeds arbitrary bytes as the stored settings blob. Loading must either
//! fail with `Corrupted` or hand back a config that passes validation.
//!
//! cargo fuzz run fuzz_settings_blob

#![no_main]

use airsoft_prop::adapters::settings::{MemoryStorage, StoredSettings};
use airsoft_prop::app::ports::{ConfigError, ConfigPort, StoragePort};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut storage = MemoryStorage::new();
    let _ = storage.write("prop", "settings", data);
    let settings = StoredSettings::new(storage);

    match settings.load() {
        Ok(config) => assert!(config.validate().is_ok(), "loaded config must be in range"),
        Err(e) => assert_eq!(e, ConfigError::Corrupted),
    }
});
