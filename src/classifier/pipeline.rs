//! Ordered decision chain: one report in, one verdict out.
//!
//! The geofence runs first and is absolute: nothing outside the configured
//! radius alerts, whatever else it matches. Inside the radius the enabled
//! [`Rule`]s run in chain order and the first one that decides wins.

use super::rules::{is_emergency, ClassificationError, Rule, RuleSet};
use crate::geometry;
use crate::types::{AircraftReport, AlertReason, Decision, Fix, GeoPoint, NoMatchReason, Verdict};

/// Classify one report against the rule set.
///
/// Pure: the same report, station and rules always give the same verdict.
/// The only error is a malformed address reaching the military check.
pub fn classify(
    report: &AircraftReport,
    station: GeoPoint,
    rules: &RuleSet,
) -> Result<Verdict, ClassificationError> {
    let Some(position) = report.position else {
        return Ok(Verdict::no_match(NoMatchReason::MissingPosition, None));
    };

    let fix = Fix {
        distance_miles: geometry::distance(station, position),
        bearing: geometry::bearing(station, position),
    };

    if fix.distance_miles > rules.range_miles() {
        return Ok(Verdict::no_match(NoMatchReason::OutOfRange, Some(fix)));
    }

    for rule in rules.chain() {
        if let Some(decision) = evaluate(*rule, report, rules)? {
            return Ok(Verdict {
                decision,
                fix: Some(fix),
            });
        }
    }

    // The chain always ends with the transponder rule, which always decides.
    Ok(Verdict::no_match(
        NoMatchReason::TransponderTypeMismatch,
        Some(fix),
    ))
}

/// Run one rule. `None` means "no opinion, continue down the chain".
fn evaluate(
    rule: Rule,
    report: &AircraftReport,
    rules: &RuleSet,
) -> Result<Option<Decision>, ClassificationError> {
    let decision = match rule {
        Rule::IdentifierWatchlist => rules.watchlisted_identifier(&report.hex).map(|label| {
            Decision::Alert(AlertReason::WatchlistedIdentifier {
                label: label.to_string(),
            })
        }),
        Rule::CallsignWatchlist => report
            .callsign()
            .and_then(|flight| rules.watchlisted_callsign(flight))
            .map(|(prefix, category)| {
                Decision::Alert(AlertReason::WatchlistedCallsign {
                    prefix: prefix.to_string(),
                    category: category.to_string(),
                })
            }),
        Rule::Emergency => is_emergency(report).then(|| {
            Decision::Alert(AlertReason::Emergency {
                status: report.emergency_status().to_string(),
            })
        }),
        Rule::CommercialSuppression => rules
            .is_commercial(report.callsign())
            .then_some(Decision::NoMatch(NoMatchReason::Commercial)),
        Rule::Military => rules
            .is_military(report)?
            .then_some(Decision::Alert(AlertReason::Military)),
        Rule::TransponderType => {
            let kind = report.transponder_type.as_deref();
            Some(if rules.matches_transponder_type(kind) {
                Decision::Alert(AlertReason::TransponderTypeMatch {
                    transponder_type: kind.unwrap_or_default().to_string(),
                })
            } else {
                Decision::NoMatch(NoMatchReason::TransponderTypeMismatch)
            })
        }
    };
    Ok(decision)
}
