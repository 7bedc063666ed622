//! Alert Configuration Module
//!
//! Provides the station, rule-set, feed and notification configuration
//! loaded from TOML, with built-in defaults for every value.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `BIRD_ALERT_CONFIG` environment variable (path to TOML file)
//! 3. `bird_alert.toml` in the current working directory
//! 4. Built-in defaults
//!
//! The loaded [`AlertConfig`] is passed explicitly into the rule set,
//! throttle and dispatcher; there is no global config.

mod alert_config;
pub mod defaults;
pub mod validation;

pub use alert_config::*;
