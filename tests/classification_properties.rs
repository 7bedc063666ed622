//! Classification Properties
//!
//! End-to-end checks of the decision chain against the built-in default
//! tables, from a station near Denver.

use bird_alert::classifier::{classify, ClassificationError, RuleSet};
use bird_alert::config::AlertConfig;
use bird_alert::geometry::{self, CompassOctant};
use bird_alert::types::{AircraftReport, AlertReason, Decision, GeoPoint, NoMatchReason};

const STATION: GeoPoint = GeoPoint::new(39.74, -104.99);

fn default_rules() -> RuleSet {
    RuleSet::from_config(&AlertConfig::default()).unwrap()
}

/// ~3.5 miles north of the station.
fn close(hex: &str) -> AircraftReport {
    AircraftReport::new(hex).with_position(39.79, -104.99)
}

// ============================================================================
// Geofence
// ============================================================================

#[test]
fn nothing_outside_the_geofence_alerts() {
    let rules = default_rules();
    let candidates = [
        AircraftReport::new("a35e89"),
        AircraftReport::new("ae1234").with_military(true),
        AircraftReport::new("abc123").with_emergency("general"),
        AircraftReport::new("abc124").with_flight("CAP11"),
        AircraftReport::new("abc125").with_transponder_type("adsb_icao"),
    ];
    for report in candidates {
        let report = report.with_position(41.0, -104.99);
        let verdict = classify(&report, STATION, &rules).unwrap();
        assert_eq!(
            verdict.no_match_reason(),
            Some(NoMatchReason::OutOfRange),
            "{report:?}"
        );
    }
}

#[test]
fn no_position_never_alerts_and_has_no_fix() {
    let rules = default_rules();
    let report = AircraftReport::new("a35e89").with_emergency("general");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(verdict.no_match_reason(), Some(NoMatchReason::MissingPosition));
    assert!(verdict.fix.is_none());
}

#[test]
fn fix_reports_distance_and_octant() {
    let rules = default_rules();
    let verdict = classify(&close("a35e89"), STATION, &rules).unwrap();
    let fix = verdict.fix.unwrap();
    assert!((fix.distance_miles - 3.45).abs() < 0.05, "{}", fix.distance_miles);
    assert_eq!(fix.bearing, CompassOctant::North);
}

// ============================================================================
// Rule ordering
// ============================================================================

#[test]
fn watchlist_wins_over_everything_inside_range() {
    let rules = default_rules();
    let report = close("A35E89")
        .with_flight("UAL1")
        .with_emergency("general")
        .with_transponder_type("adsb_icao_nt");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(verdict.reason_label(), "watchlisted-identifier");
}

#[test]
fn emergency_beats_commercial_suppression() {
    let rules = default_rules();
    let report = close("abc123").with_flight("SWA2290 ").with_emergency("minfuel");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(
        verdict.decision,
        Decision::Alert(AlertReason::Emergency {
            status: "minfuel".to_string()
        })
    );
}

#[test]
fn explicit_none_is_not_an_emergency() {
    let rules = default_rules();
    let report = close("abc123").with_flight("SWA2290").with_emergency("none");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(verdict.no_match_reason(), Some(NoMatchReason::Commercial));
}

#[test]
fn commercial_military_aircraft_is_suppressed() {
    let rules = default_rules();
    let report = close("ae0001").with_flight("FDX12").with_military(true);
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(verdict.no_match_reason(), Some(NoMatchReason::Commercial));
}

#[test]
fn disabled_military_check_falls_to_transponder_rule() {
    let mut config = AlertConfig::default();
    config.alerting.include_military_check = false;
    let rules = RuleSet::from_config(&config).unwrap();

    let report = close("ae1234").with_transponder_type("adsb_icao_nt");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(
        verdict.no_match_reason(),
        Some(NoMatchReason::TransponderTypeMismatch)
    );
}

#[test]
fn non_icao_military_address_alerts() {
    let rules = default_rules();
    let report = close("~adf7c8").with_transponder_type("adsb_other");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(verdict.decision, Decision::Alert(AlertReason::Military));
}

#[test]
fn general_aviation_alerts_on_transponder_type() {
    let rules = default_rules();
    let report = close("a12345")
        .with_flight("N12345")
        .with_transponder_type("mlat");
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(
        verdict.decision,
        Decision::Alert(AlertReason::TransponderTypeMatch {
            transponder_type: "mlat".to_string()
        })
    );
}

// ============================================================================
// Errors and purity
// ============================================================================

#[test]
fn malformed_address_is_rejected_not_ignored() {
    let rules = default_rules();
    let report = close("g00d").with_transponder_type("adsb_icao");
    assert_eq!(
        classify(&report, STATION, &rules),
        Err(ClassificationError::InvalidHex {
            hex: "g00d".to_string()
        })
    );
}

#[test]
fn malformed_address_outside_range_is_just_out_of_range() {
    let rules = default_rules();
    let report = AircraftReport::new("g00d").with_position(45.0, -104.99);
    let verdict = classify(&report, STATION, &rules).unwrap();
    assert_eq!(verdict.no_match_reason(), Some(NoMatchReason::OutOfRange));
}

#[test]
fn classification_is_deterministic() {
    let rules = default_rules();
    let report = close("abc123")
        .with_flight("CAP123")
        .with_ground_speed(101.0);
    let first = classify(&report, STATION, &rules).unwrap();
    for _ in 0..5 {
        assert_eq!(classify(&report, STATION, &rules).unwrap(), first);
    }
}

#[test]
fn distance_is_symmetric() {
    let a = GeoPoint::new(39.74, -104.99);
    let b = GeoPoint::new(40.01, -105.27);
    let d1 = geometry::distance(a, b);
    let d2 = geometry::distance(b, a);
    assert!((d1 - d2).abs() < 1e-9);
}
