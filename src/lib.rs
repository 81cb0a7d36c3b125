//! EnvNode firmware library.
//!
//! Exposes the task pipeline, drivers, and runtime for integration
//! testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod power;
pub mod retained;
pub mod runtime;
pub mod tasks;
