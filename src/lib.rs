//! SentryBox firmware library.
//!
//! Exposes the pure-logic core and the adapters for integration testing
//! and host-side simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;
