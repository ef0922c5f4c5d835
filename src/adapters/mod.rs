//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements          | Connects to                  |
//! |------------|---------------------|------------------------------|
//! | `console`  | Display, Sound      | Terminal (simulator)         |
//! | `host`     | Peripherals         | Bundle of the adapters below |
//! | `log_sink` | EventSink           | `log` facade                 |
//! | `settings` | ConfigPort          | Any StoragePort              |
//! |            | StoragePort         | In-memory map / state files  |
//! | `time`     | Clock               | Monotonic host timer         |

pub mod console;
pub mod host;
pub mod log_sink;
pub mod settings;
pub mod time;
