// Smartmarks shared type definitions
// Each submodule defines types used across the crate.

pub mod bookmark;
pub mod errors;
pub mod message;
pub mod settings;
pub mod user;
