//! Classification output: Fix, AlertReason, NoMatchReason, Decision, Verdict

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::CompassOctant;

/// Distance and bearing from the station to an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub distance_miles: f64,
    pub bearing: CompassOctant,
}

/// Why an aircraft warrants a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum AlertReason {
    WatchlistedIdentifier { label: String },
    WatchlistedCallsign { prefix: String, category: String },
    Emergency { status: String },
    Military,
    TransponderTypeMatch { transponder_type: String },
}

impl AlertReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WatchlistedIdentifier { .. } => "watchlisted-identifier",
            Self::WatchlistedCallsign { .. } => "watchlisted-callsign",
            Self::Emergency { .. } => "emergency",
            Self::Military => "military",
            Self::TransponderTypeMatch { .. } => "transponder-type-match",
        }
    }
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an aircraft was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchReason {
    MissingPosition,
    OutOfRange,
    Commercial,
    TransponderTypeMismatch,
}

impl NoMatchReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingPosition => "missing position",
            Self::OutOfRange => "out of range",
            Self::Commercial => "commercial",
            Self::TransponderTypeMismatch => "transponder-type-mismatch",
        }
    }
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Alert(AlertReason),
    NoMatch(NoMatchReason),
}

/// Result of running one report through the decision pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    /// Present whenever the report carried a position.
    pub fix: Option<Fix>,
}

impl Verdict {
    pub const fn alert(reason: AlertReason, fix: Fix) -> Self {
        Self {
            decision: Decision::Alert(reason),
            fix: Some(fix),
        }
    }

    pub const fn no_match(reason: NoMatchReason, fix: Option<Fix>) -> Self {
        Self {
            decision: Decision::NoMatch(reason),
            fix,
        }
    }

    pub const fn should_alert(&self) -> bool {
        matches!(self.decision, Decision::Alert(_))
    }

    pub const fn alert_reason(&self) -> Option<&AlertReason> {
        match &self.decision {
            Decision::Alert(reason) => Some(reason),
            Decision::NoMatch(_) => None,
        }
    }

    pub const fn no_match_reason(&self) -> Option<NoMatchReason> {
        match self.decision {
            Decision::NoMatch(reason) => Some(reason),
            Decision::Alert(_) => None,
        }
    }

    /// Short reason label for logs.
    pub fn reason_label(&self) -> &'static str {
        match &self.decision {
            Decision::Alert(reason) => reason.as_str(),
            Decision::NoMatch(reason) => reason.as_str(),
        }
    }
}
