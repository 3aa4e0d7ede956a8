//! Persistence adapters for the host.
//!
//! Currently only the TOML configuration file; registry state itself is
//! deliberately not persisted across restarts.

pub mod config;

pub use config::{
    load_config, save_config, BindingEntry, ConfigError, HostConfig,
};
