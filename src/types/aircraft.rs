//! Aircraft observation types: GeoPoint, AircraftReport

use serde::{Deserialize, Serialize};

/// Emergency status value meaning "no emergency declared".
pub const EMERGENCY_NONE: &str = "none";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One observation of one aircraft from a single poll of the feed.
///
/// Reports are built once per cycle and never mutated afterwards; every
/// optional field mirrors a field the receiver may not have decoded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftReport {
    /// ICAO 24-bit address as rendered by the receiver. May carry a leading
    /// `~` marker for non-ICAO (anonymised / TIS-B) addressing.
    pub hex: String,
    /// Resolved position, `None` until the receiver has a fix.
    #[serde(default)]
    pub position: Option<GeoPoint>,
    /// Callsign / flight string, often space padded.
    #[serde(default)]
    pub flight: Option<String>,
    /// Transponder / source category (e.g. `adsb_icao`, `mlat`).
    #[serde(default)]
    pub transponder_type: Option<String>,
    /// Ground speed in knots.
    #[serde(default)]
    pub ground_speed: Option<f64>,
    /// Emergency status tag; absent means `"none"`.
    #[serde(default)]
    pub emergency: Option<String>,
    /// Explicit military flag from the feed.
    #[serde(default)]
    pub military: Option<bool>,
}

impl AircraftReport {
    /// Minimal report with only an address; used by tests and tooling.
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            position: None,
            flight: None,
            transponder_type: None,
            ground_speed: None,
            emergency: None,
            military: None,
        }
    }

    pub fn with_position(mut self, lat: f64, lon: f64) -> Self {
        self.position = Some(GeoPoint::new(lat, lon));
        self
    }

    pub fn with_flight(mut self, flight: impl Into<String>) -> Self {
        self.flight = Some(flight.into());
        self
    }

    pub fn with_transponder_type(mut self, kind: impl Into<String>) -> Self {
        self.transponder_type = Some(kind.into());
        self
    }

    pub fn with_ground_speed(mut self, knots: f64) -> Self {
        self.ground_speed = Some(knots);
        self
    }

    pub fn with_emergency(mut self, status: impl Into<String>) -> Self {
        self.emergency = Some(status.into());
        self
    }

    pub fn with_military(mut self, military: bool) -> Self {
        self.military = Some(military);
        self
    }

    /// Lower-cased address used as the key for watchlist and throttle lookups.
    pub fn key(&self) -> String {
        self.hex.trim().to_ascii_lowercase()
    }

    /// The address with the non-ICAO marker removed.
    pub fn stripped_hex(&self) -> &str {
        strip_address_marker(&self.hex)
    }

    /// Callsign with receiver padding removed. Empty callsigns count as absent.
    pub fn callsign(&self) -> Option<&str> {
        self.flight
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// Emergency status, defaulting to `"none"`.
    pub fn emergency_status(&self) -> &str {
        self.emergency.as_deref().unwrap_or(EMERGENCY_NONE)
    }
}

/// Marker readsb prepends to non-ICAO (anonymised / TIS-B) addresses.
pub const NON_ICAO_MARKER: char = '~';

/// Strip the non-ICAO marker and surrounding whitespace from an address.
pub fn strip_address_marker(hex: &str) -> &str {
    hex.trim().trim_start_matches(NON_ICAO_MARKER)
}
