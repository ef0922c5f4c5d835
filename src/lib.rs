//! Airsoft prop game core.
//!
//! Exposes the pure-logic game controllers, the collaborator port traits,
//! and the host-side adapters for integration testing and simulation.
//! Hardware bring-up lives outside this crate; everything here is driven
//! from a cooperative polling loop through [`app::service::GameRunner`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod game;
