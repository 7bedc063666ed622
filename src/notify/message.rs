//! Alert message rendering.

use serde::Serialize;
use std::fmt::Write as _;

use crate::config::defaults::ALERT_SUBJECT;
use crate::geometry::CompassOctant;
use crate::types::{AircraftReport, AlertReason, Fix};

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Everything a channel needs to deliver one alert.
///
/// Built once per fired verdict; channels only read the rendered [`body`](Self::body).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMessage {
    /// Upper-cased address, matching the registry key format.
    pub hex: String,
    pub callsign: Option<String>,
    /// Registry description or type code.
    pub aircraft_type: Option<String>,
    /// Watchlist label, when the aircraft is watchlisted.
    pub owner: Option<String>,
    pub distance_miles: f64,
    pub bearing: CompassOctant,
    pub ground_speed: Option<f64>,
    pub transponder_type: Option<String>,
    pub military: bool,
    pub emergency: String,
    pub reason: AlertReason,
}

impl AlertMessage {
    pub fn new(report: &AircraftReport, fix: Fix, reason: AlertReason) -> Self {
        let military = report.military == Some(true) || reason == AlertReason::Military;
        Self {
            hex: report.stripped_hex().to_ascii_uppercase(),
            callsign: report.callsign().map(str::to_string),
            aircraft_type: None,
            owner: None,
            distance_miles: fix.distance_miles,
            bearing: fix.bearing,
            ground_speed: report.ground_speed,
            transponder_type: report.transponder_type.clone(),
            military,
            emergency: report.emergency_status().to_string(),
            reason,
        }
    }

    pub fn with_aircraft_type(mut self, aircraft_type: Option<String>) -> Self {
        self.aircraft_type = aircraft_type;
        self
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_military(mut self, military: bool) -> Self {
        self.military = self.military || military;
        self
    }

    /// Plain-text body shared by every channel.
    pub fn body(&self) -> String {
        let mut out = String::with_capacity(256);
        let _ = writeln!(out, "{ALERT_SUBJECT}");
        let _ = writeln!(out, "Aircraft hex: {}", self.hex);
        let _ = writeln!(out, "Callsign: {}", self.callsign.as_deref().unwrap_or(NOT_AVAILABLE));
        let _ = writeln!(out, "Type: {}", self.aircraft_type.as_deref().unwrap_or(UNKNOWN));
        let _ = writeln!(out, "Owner: {}", self.owner.as_deref().unwrap_or(UNKNOWN));
        let _ = writeln!(out, "Distance: {:.2}mi", self.distance_miles);
        let _ = writeln!(out, "Direction: {}", self.bearing);
        match self.ground_speed {
            Some(gs) => {
                let _ = writeln!(out, "Ground Speed: {gs} knots");
            }
            None => {
                let _ = writeln!(out, "Ground Speed: {NOT_AVAILABLE} knots");
            }
        }
        let _ = writeln!(
            out,
            "Transponder: {}",
            self.transponder_type.as_deref().unwrap_or(NOT_AVAILABLE)
        );
        let _ = writeln!(out, "Military: {}", if self.military { "Yes" } else { UNKNOWN });
        let _ = writeln!(out, "Emergency: {}", self.emergency);
        let _ = write!(out, "Reason: {}", self.reason.as_str());
        out
    }
}
