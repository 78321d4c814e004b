//! Gin Input
//!
//! Input abstraction for real-time applications: raw device samples in,
//! frame-accurate key state and ordered event groups out.

/// Profile-based configuration (registry defaults, pointer dispatch)
pub mod config;

/// Configuration errors raised by the registry
pub mod error;

/// Keys, aggregators, bindings and the per-frame event pipeline
pub mod input;

pub use config::InputConfig;
pub use error::InputError;
pub use input::Input;
