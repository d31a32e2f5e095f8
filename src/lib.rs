//! Smartmarks — client-side synchronization core for a personal bookmark manager.
//!
//! This library crate exposes all modules for use by embedding UIs and
//! integration tests.

pub mod auth;
pub mod logging;
pub mod managers;
pub mod services;
pub mod store;
pub mod types;
