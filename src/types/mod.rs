//! Shared data structures for the aircraft alert pipeline
//!
//! - AircraftReport: one decoded observation from the receiver feed
//! - Verdict: the decision pipeline's output for one report

mod aircraft;
mod verdict;

pub use aircraft::*;
pub use verdict::*;
