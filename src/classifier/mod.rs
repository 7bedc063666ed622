//! Aircraft classification: static rule set plus the ordered decision chain.
//!
//! ## Chain
//!
//! 1. Missing position → no-match
//! 2. Outside the geofence → no-match
//! 3. Identifier watchlist → alert
//! 4. Callsign watchlist → alert
//! 5. Emergency (optional) → alert
//! 6. Commercial carrier (optional) → no-match
//! 7. Military (optional) → alert
//! 8. Transponder type → alert or no-match

pub mod pipeline;
pub mod rules;

pub use pipeline::classify;
pub use rules::{is_emergency, parse_address, ClassificationError, MilitaryRange, Rule, RuleSet};
