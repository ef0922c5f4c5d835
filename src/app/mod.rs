//! Application core: pure domain orchestration, zero I/O.
//!
//! This module holds the per-tick game loop driver and everything that
//! crosses its boundary: key events in, game events and render requests
//! out. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer testable without a real prop.

pub mod commands;
pub mod events;
pub mod input;
pub mod ports;
pub mod service;
