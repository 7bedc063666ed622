//! Alert Pipeline Module
//!
//! ## Per-Cycle Flow
//!
//! ```text
//! STEP 1: Registry refresh (only when the local copy is stale)
//! STEP 2: Feed poll (one aircraft.json snapshot)
//! STEP 3: Classification (pure, per report)
//! STEP 4: Throttle check (ONLY if the verdict is an alert)
//! STEP 5: Render + dispatch (ONLY if the throttle allows it)
//! STEP 6: Throttle record (per record policy)
//! STEP 7: Cycle statistics
//! ```
//!
//! A report that cannot be classified is logged and dropped; the rest of
//! the snapshot still runs.

mod engine;
pub mod processing_loop;
pub mod source;

pub use engine::{AlertEngine, CycleStats, ReportOutcome};
pub use processing_loop::{LoopStats, PollingLoop};
pub use source::{FeedError, FeedSource, ReadsbFileSource, ReplaySource};
