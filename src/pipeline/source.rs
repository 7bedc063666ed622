//! Feed source abstraction for aircraft snapshots.
//!
//! Provides a unified trait for reading one snapshot of visible aircraft per
//! cycle: the readsb / dump1090 `aircraft.json` file in production, or a
//! pre-loaded replay in tests and tooling.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::types::AircraftReport;

/// `dbFlags` bit readsb sets for aircraft the database marks as military.
const DB_FLAG_MILITARY: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed I/O error ({0:?}): {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Feed parse error ({0:?}): {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// Trait abstracting where aircraft snapshots come from.
///
/// The polling loop calls [`poll`](FeedSource::poll) once per cycle in a
/// `select!` with cancellation.
#[async_trait]
pub trait FeedSource: Send + 'static {
    /// Read the current snapshot of visible aircraft.
    async fn poll(&mut self) -> Result<Vec<AircraftReport>, FeedError>;

    /// Human-readable name for logging (e.g. "readsb", "replay").
    fn source_name(&self) -> &str;
}

// ============================================================================
// readsb aircraft.json
// ============================================================================

#[derive(Debug, Deserialize)]
struct ReadsbSnapshot {
    #[serde(default)]
    aircraft: Vec<ReadsbAircraft>,
}

#[derive(Debug, Deserialize)]
struct ReadsbAircraft {
    #[serde(default)]
    hex: String,
    #[serde(default)]
    flight: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    gs: Option<f64>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    emergency: Option<String>,
    #[serde(default)]
    military: Option<bool>,
    #[serde(default, rename = "dbFlags")]
    db_flags: Option<u32>,
}

impl ReadsbAircraft {
    fn into_report(self) -> AircraftReport {
        let flagged = self.db_flags.map(|f| f & DB_FLAG_MILITARY != 0);
        let military = match (self.military, flagged) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), _) | (_, Some(false)) => Some(false),
            (None, None) => None,
        };

        let mut report = AircraftReport::new(self.hex);
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            report = report.with_position(lat, lon);
        }
        report.flight = self.flight;
        report.transponder_type = self.kind;
        report.ground_speed = self.gs;
        report.emergency = self.emergency;
        report.military = military;
        report
    }
}

/// Parse a readsb / dump1090 `aircraft.json` document.
///
/// Entries without an address are dropped.
pub fn parse_aircraft_json(contents: &str) -> Result<Vec<AircraftReport>, serde_json::Error> {
    let snapshot: ReadsbSnapshot = serde_json::from_str(contents)?;
    Ok(snapshot
        .aircraft
        .into_iter()
        .filter(|a| !a.hex.trim().is_empty())
        .map(ReadsbAircraft::into_report)
        .collect())
}

/// Reads the `aircraft.json` file readsb rewrites every second.
pub struct ReadsbFileSource {
    path: PathBuf,
}

impl ReadsbFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeedSource for ReadsbFileSource {
    async fn poll(&mut self) -> Result<Vec<AircraftReport>, FeedError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::Io(self.path.clone(), e))?;
        parse_aircraft_json(&contents).map_err(|e| FeedError::Parse(self.path.clone(), e))
    }

    fn source_name(&self) -> &str {
        "readsb"
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Replays pre-loaded snapshots, one per poll. Empty once exhausted.
pub struct ReplaySource {
    snapshots: VecDeque<Vec<AircraftReport>>,
}

impl ReplaySource {
    pub fn new(snapshots: Vec<Vec<AircraftReport>>) -> Self {
        Self {
            snapshots: snapshots.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.snapshots.len()
    }
}

#[async_trait]
impl FeedSource for ReplaySource {
    async fn poll(&mut self) -> Result<Vec<AircraftReport>, FeedError> {
        Ok(self.snapshots.pop_front().unwrap_or_default())
    }

    fn source_name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeoPoint;

    const SAMPLE: &str = r#"{
        "now": 1718000000.1,
        "messages": 1234,
        "aircraft": [
            {"hex": "a35e6b", "type": "adsb_icao", "flight": "N540W   ",
             "lat": 40.1, "lon": -105.2, "gs": 312.4, "emergency": "none"},
            {"hex": "~2a0001", "type": "tisb_other"},
            {"hex": "ae1234", "lat": 40.0, "dbFlags": 1},
            {"hex": "abc123", "lat": 40.0, "military": false},
            {"type": "mode_s"}
        ]
    }"#;

    #[test]
    fn parses_readsb_snapshot() {
        let reports = parse_aircraft_json(SAMPLE).unwrap();
        assert_eq!(reports.len(), 4);

        let first = &reports[0];
        assert_eq!(first.hex, "a35e6b");
        assert_eq!(first.position, Some(GeoPoint::new(40.1, -105.2)));
        assert_eq!(first.callsign(), Some("N540W"));
        assert_eq!(first.transponder_type.as_deref(), Some("adsb_icao"));
        assert_eq!(first.ground_speed, Some(312.4));
        assert_eq!(first.military, None);
    }

    #[test]
    fn partial_position_is_no_position() {
        let reports = parse_aircraft_json(SAMPLE).unwrap();
        assert_eq!(reports[1].position, None);
        assert_eq!(reports[2].position, None);
    }

    #[test]
    fn db_flags_mark_military() {
        let reports = parse_aircraft_json(SAMPLE).unwrap();
        assert_eq!(reports[2].military, Some(true));
        assert_eq!(reports[3].military, Some(false));
    }

    #[test]
    fn missing_aircraft_array_is_empty() {
        assert!(parse_aircraft_json(r#"{"now": 1}"#).unwrap().is_empty());
        assert!(parse_aircraft_json("[").is_err());
    }

    #[tokio::test]
    async fn file_source_reads_and_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aircraft.json");

        let mut source = ReadsbFileSource::new(&path);
        assert!(matches!(source.poll().await, Err(FeedError::Io(..))));

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(source.poll().await.unwrap().len(), 4);

        std::fs::write(&path, "{ truncated").unwrap();
        assert!(matches!(source.poll().await, Err(FeedError::Parse(..))));
    }

    #[tokio::test]
    async fn replay_drains_then_goes_quiet() {
        let mut source = ReplaySource::new(vec![vec![AircraftReport::new("a35e6b")]]);
        assert_eq!(source.poll().await.unwrap().len(), 1);
        assert!(source.poll().await.unwrap().is_empty());
        assert_eq!(source.remaining(), 0);
    }
}
