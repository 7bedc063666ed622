//! Stateless classifier predicates over a single report plus static tables.

use std::collections::{HashMap, HashSet};

use crate::config::{AlertConfig, ConfigError};
use crate::types::{strip_address_marker, AircraftReport, EMERGENCY_NONE};

/// Raised when a report cannot be classified at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("aircraft address '{hex}' is not valid hexadecimal")]
    InvalidHex { hex: String },
}

/// Inclusive `[start, end]` block of the 24-bit ICAO address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilitaryRange {
    pub start: u32,
    pub end: u32,
}

impl MilitaryRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub const fn contains(&self, address: u32) -> bool {
        self.start <= address && address <= self.end
    }
}

/// One optional step of the decision chain, in evaluation order.
///
/// The geofence checks (position present, distance within range) always run
/// first and are not part of this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    IdentifierWatchlist,
    CallsignWatchlist,
    Emergency,
    CommercialSuppression,
    Military,
    TransponderType,
}

/// Static configuration the classifier consults for every report.
///
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct RuleSet {
    range_miles: f64,
    /// Keyed by lower-cased address.
    identifiers: HashMap<String, String>,
    /// `(prefix, category)`, longest prefix first.
    callsigns: Vec<(String, String)>,
    military_ranges: Vec<MilitaryRange>,
    carrier_prefixes: Vec<String>,
    transponder_types: HashSet<String>,
    chain: Vec<Rule>,
}

impl RuleSet {
    /// Build the rule set from a validated config.
    pub fn from_config(config: &AlertConfig) -> Result<Self, ConfigError> {
        let military_ranges = config
            .military
            .parse_ranges()
            .map_err(ConfigError::Validation)?
            .into_iter()
            .map(|(start, end)| MilitaryRange::new(start, end))
            .collect();

        let identifiers = config
            .watchlist
            .identifiers
            .iter()
            .map(|(hex, label)| (hex.trim().to_ascii_lowercase(), label.clone()))
            .collect();

        let mut callsigns: Vec<(String, String)> = config
            .watchlist
            .callsigns
            .iter()
            .map(|(prefix, category)| (prefix.trim().to_string(), category.clone()))
            .filter(|(prefix, _)| !prefix.is_empty())
            .collect();
        callsigns.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let alerting = &config.alerting;
        let mut chain = vec![Rule::IdentifierWatchlist, Rule::CallsignWatchlist];
        if alerting.include_emergency_check {
            chain.push(Rule::Emergency);
        }
        if alerting.skip_commercial {
            chain.push(Rule::CommercialSuppression);
        }
        if alerting.include_military_check {
            chain.push(Rule::Military);
        }
        chain.push(Rule::TransponderType);

        Ok(Self {
            range_miles: alerting.range_miles,
            identifiers,
            callsigns,
            military_ranges,
            carrier_prefixes: config.commercial.carrier_prefixes.clone(),
            transponder_types: alerting.transponder_types.iter().cloned().collect(),
            chain,
        })
    }

    pub const fn range_miles(&self) -> f64 {
        self.range_miles
    }

    /// Enabled rules in evaluation order.
    pub fn chain(&self) -> &[Rule] {
        &self.chain
    }

    /// Owner / description label when `hex` is watchlisted (case-insensitive).
    pub fn watchlisted_identifier(&self, hex: &str) -> Option<&str> {
        self.identifiers
            .get(&hex.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// `(prefix, category)` of the watched prefix the trimmed callsign starts
    /// with. When several match, the longest prefix wins.
    pub fn watchlisted_callsign(&self, flight: &str) -> Option<(&str, &str)> {
        let flight = flight.trim();
        self.callsigns
            .iter()
            .find(|(prefix, _)| flight.starts_with(prefix.as_str()))
            .map(|(prefix, category)| (prefix.as_str(), category.as_str()))
    }

    /// Airline callsign. Case-sensitive; a missing callsign is not commercial.
    pub fn is_commercial(&self, flight: Option<&str>) -> bool {
        flight.map(str::trim).is_some_and(|flight| {
            self.carrier_prefixes
                .iter()
                .any(|prefix| flight.starts_with(prefix.as_str()))
        })
    }

    /// Explicit military flag, or an address inside a military block.
    ///
    /// A malformed address is an error, never a silent `false`.
    pub fn is_military(&self, report: &AircraftReport) -> Result<bool, ClassificationError> {
        if report.military == Some(true) {
            return Ok(true);
        }
        let address = parse_address(&report.hex)?;
        Ok(self.military_ranges.iter().any(|r| r.contains(address)))
    }

    pub fn matches_transponder_type(&self, kind: Option<&str>) -> bool {
        kind.is_some_and(|kind| self.transponder_types.contains(kind))
    }
}

/// Declared emergency: present and not the literal `"none"`.
pub fn is_emergency(report: &AircraftReport) -> bool {
    report
        .emergency
        .as_deref()
        .is_some_and(|status| status != EMERGENCY_NONE)
}

/// Parse a receiver address into its 24-bit value, ignoring a leading marker.
pub fn parse_address(hex: &str) -> Result<u32, ClassificationError> {
    let stripped = strip_address_marker(hex);
    u32::from_str_radix(stripped, 16).map_err(|_| ClassificationError::InvalidHex {
        hex: hex.to_string(),
    })
}
