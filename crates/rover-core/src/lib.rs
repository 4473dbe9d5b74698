//! Configuration loading, env overrides, and startup validation.

pub mod config;

pub use config::Config;
