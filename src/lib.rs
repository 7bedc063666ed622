//! BirdAlert: ADS-B aircraft watch
//!
//! Polls a local readsb receiver, decides which nearby aircraft deserve a
//! notification, and delivers alerts through an ordered chain of channels.
//!
//! ## Architecture
//!
//! - **Geometry**: great-circle distance and compass octant from the station
//! - **Classifier**: ordered rule chain producing one verdict per report
//! - **Throttle**: per-aircraft cooldown between alerts
//! - **Notify**: channel fallback (email, Telegram, Pushover, IFTTT, Signal)
//! - **Pipeline**: feed source, per-report engine and the polling loop

pub mod classifier;
pub mod config;
pub mod geometry;
pub mod notify;
pub mod pipeline;
pub mod registry;
pub mod throttle;
pub mod types;

// Re-export configuration
pub use config::{AlertConfig, ConfigError};

// Re-export commonly used types
pub use types::{
    AircraftReport, AlertReason, Decision, Fix, GeoPoint, NoMatchReason, Verdict,
};

pub use classifier::{classify, ClassificationError, RuleSet};
pub use geometry::CompassOctant;
pub use notify::{AlertMessage, ChannelResult, DispatchOutcome, Dispatcher, NotificationChannel};
pub use pipeline::{AlertEngine, CycleStats, PollingLoop, ReportOutcome};
pub use registry::{MictronicsRegistry, RegistryLookup};
pub use throttle::AlertThrottle;
