//! Per-report decide → throttle → render → dispatch → record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classifier::{classify, ClassificationError, RuleSet};
use crate::config::{AlertConfig, ConfigError, RecordPolicy};
use crate::notify::{AlertMessage, DispatchOutcome, Dispatcher};
use crate::registry::RegistryLookup;
use crate::throttle::AlertThrottle;
use crate::types::{AircraftReport, AlertReason, Decision, GeoPoint, NoMatchReason};

/// What happened to one report.
#[derive(Debug)]
pub enum ReportOutcome {
    /// Classified as not worth alerting.
    Skipped(NoMatchReason),
    /// Would alert, but the aircraft is inside its cooldown.
    Throttled {
        reason: AlertReason,
        last_fired: Option<DateTime<Utc>>,
    },
    /// Handed to the dispatcher; `outcome` says whether anything delivered.
    Dispatched {
        reason: AlertReason,
        outcome: DispatchOutcome,
    },
    /// Could not be classified.
    Rejected(ClassificationError),
}

/// Counts for one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleStats {
    pub seen: usize,
    pub skipped: usize,
    /// Reports whose verdict was an alert, throttled or not.
    pub alerted: usize,
    pub throttled: usize,
    pub delivered: usize,
    pub undelivered: usize,
    pub rejected: usize,
}

impl CycleStats {
    fn record(&mut self, outcome: &ReportOutcome) {
        self.seen += 1;
        match outcome {
            ReportOutcome::Skipped(_) => self.skipped += 1,
            ReportOutcome::Throttled { .. } => {
                self.alerted += 1;
                self.throttled += 1;
            }
            ReportOutcome::Dispatched { outcome, .. } => {
                self.alerted += 1;
                if outcome.delivered() {
                    self.delivered += 1;
                } else {
                    self.undelivered += 1;
                }
            }
            ReportOutcome::Rejected(_) => self.rejected += 1,
        }
    }
}

impl std::ops::AddAssign for CycleStats {
    fn add_assign(&mut self, other: Self) {
        self.seen += other.seen;
        self.skipped += other.skipped;
        self.alerted += other.alerted;
        self.throttled += other.throttled;
        self.delivered += other.delivered;
        self.undelivered += other.undelivered;
        self.rejected += other.rejected;
    }
}

/// Owns everything one cycle needs: rules, cooldown state, channels and registry.
pub struct AlertEngine {
    station: GeoPoint,
    rules: RuleSet,
    throttle: AlertThrottle,
    dispatcher: Dispatcher,
    registry: Box<dyn RegistryLookup>,
    record_policy: RecordPolicy,
}

impl AlertEngine {
    pub fn new(
        station: GeoPoint,
        rules: RuleSet,
        throttle: AlertThrottle,
        dispatcher: Dispatcher,
        record_policy: RecordPolicy,
    ) -> Self {
        Self {
            station,
            rules,
            throttle,
            dispatcher,
            registry: Box::new(()),
            record_policy,
        }
    }

    /// Build rules and throttle from config around an existing dispatcher.
    pub fn from_config(config: &AlertConfig, dispatcher: Dispatcher) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.station.location(),
            RuleSet::from_config(config)?,
            AlertThrottle::new(config.alerting.cooldown_seconds),
            dispatcher,
            config.alerting.record_on,
        ))
    }

    pub fn with_registry(mut self, registry: Box<dyn RegistryLookup>) -> Self {
        self.registry = registry;
        self
    }

    pub fn replace_registry(&mut self, registry: Box<dyn RegistryLookup>) {
        self.registry = registry;
    }

    pub fn throttle(&self) -> &AlertThrottle {
        &self.throttle
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run one report through the whole path. Side effects (dispatch,
    /// throttle record) happen at most once, after classification.
    pub async fn process_report(&mut self, report: &AircraftReport, now: DateTime<Utc>) -> ReportOutcome {
        let verdict = match classify(report, self.station, &self.rules) {
            Ok(v) => v,
            Err(e) => {
                warn!(hex = %report.hex, error = %e, "Rejected aircraft report");
                return ReportOutcome::Rejected(e);
            }
        };

        let distance_mi = verdict.fix.map(|f| f.distance_miles);
        let (reason, fix) = match (verdict.decision, verdict.fix) {
            (Decision::NoMatch(reason), _) => {
                debug!(hex = %report.hex, reason = %reason, ?distance_mi, "No match");
                return ReportOutcome::Skipped(reason);
            }
            (Decision::Alert(reason), Some(fix)) => (reason, fix),
            // Alerts are only produced inside the geofence, so a fix exists.
            (Decision::Alert(_), None) => return ReportOutcome::Skipped(NoMatchReason::MissingPosition),
        };

        let key = report.key();
        if !self.throttle.should_fire(&key, now) {
            info!(
                hex = %report.hex,
                reason = %reason,
                "Skipping alert, aircraft is inside its cooldown"
            );
            return ReportOutcome::Throttled {
                reason,
                last_fired: self.throttle.last_fired(&key),
            };
        }

        info!(
            hex = %report.hex,
            reason = %reason,
            distance_mi = fix.distance_miles,
            bearing = %fix.bearing,
            "Alerting"
        );

        // An unparseable address leaves the military line as "Unknown".
        let military = match self.rules.is_military(report) {
            Ok(military) => military,
            Err(e) => {
                warn!(hex = %report.hex, error = %e, "Military status unknown");
                false
            }
        };

        let message = AlertMessage::new(report, fix, reason.clone())
            .with_aircraft_type(self.registry.describe(report.stripped_hex()))
            .with_owner(self.rules.watchlisted_identifier(&report.hex).map(str::to_string))
            .with_military(military);

        let outcome = self.dispatcher.dispatch(&message).await;

        match self.record_policy {
            RecordPolicy::Attempt => self.throttle.record(&key, now),
            RecordPolicy::Success if outcome.delivered() => self.throttle.record(&key, now),
            RecordPolicy::Success => {}
        }

        ReportOutcome::Dispatched { reason, outcome }
    }

    /// Process one snapshot in feed order.
    pub async fn run_cycle(&mut self, reports: &[AircraftReport], now: DateTime<Utc>) -> CycleStats {
        let mut stats = CycleStats::default();
        for report in reports {
            let outcome = self.process_report(report, now).await;
            stats.record(&outcome);
        }
        info!(
            seen = stats.seen,
            alerted = stats.alerted,
            throttled = stats.throttled,
            delivered = stats.delivered,
            undelivered = stats.undelivered,
            rejected = stats.rejected,
            "Cycle complete"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{ChannelError, NotificationChannel};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct Recorder {
        succeed: bool,
        calls: Arc<AtomicUsize>,
        bodies: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl NotificationChannel for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut bodies) = self.bodies.lock() {
                bodies.push(message.body());
            }
            if self.succeed {
                Ok(())
            } else {
                Err(ChannelError::Unsupported("down".to_string()))
            }
        }
    }

    struct FixedRegistry;

    impl RegistryLookup for FixedRegistry {
        fn describe(&self, hex: &str) -> Option<String> {
            (hex == "a35e89").then(|| "Gulfstream G650".to_string())
        }
    }

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn engine(
        succeed: bool,
        policy: RecordPolicy,
    ) -> (AlertEngine, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let mut config = AlertConfig::default();
        config.station.latitude = 40.0;
        config.station.longitude = -105.0;
        config.alerting.record_on = policy;
        let calls = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = Dispatcher::new(vec![Box::new(Recorder {
            succeed,
            calls: Arc::clone(&calls),
            bodies: Arc::clone(&bodies),
        })]);
        let engine = AlertEngine::from_config(&config, dispatcher).unwrap();
        (engine, calls, bodies)
    }

    fn watched() -> AircraftReport {
        AircraftReport::new("a35e89")
            .with_position(40.05, -105.0)
            .with_transponder_type("adsb_icao")
    }

    #[tokio::test]
    async fn alert_then_throttle_then_refire() {
        let (mut engine, calls, _) = engine(true, RecordPolicy::Attempt);

        assert!(matches!(
            engine.process_report(&watched(), t(0)).await,
            ReportOutcome::Dispatched { .. }
        ));
        assert!(matches!(
            engine.process_report(&watched(), t(300)).await,
            ReportOutcome::Throttled { last_fired: Some(_), .. }
        ));
        assert!(matches!(
            engine.process_report(&watched(), t(601)).await,
            ReportOutcome::Dispatched { .. }
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn attempt_policy_records_failures() {
        let (mut engine, calls, _) = engine(false, RecordPolicy::Attempt);
        engine.process_report(&watched(), t(0)).await;
        let second = engine.process_report(&watched(), t(10)).await;
        assert!(matches!(second, ReportOutcome::Throttled { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_policy_retries_after_failure() {
        let (mut engine, calls, _) = engine(false, RecordPolicy::Success);
        engine.process_report(&watched(), t(0)).await;
        engine.process_report(&watched(), t(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(engine.throttle().is_empty());
    }

    #[tokio::test]
    async fn skipped_reports_touch_nothing() {
        let (mut engine, calls, _) = engine(true, RecordPolicy::Attempt);
        let far = AircraftReport::new("a35e89").with_position(45.0, -105.0);
        assert!(matches!(
            engine.process_report(&far, t(0)).await,
            ReportOutcome::Skipped(NoMatchReason::OutOfRange)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(engine.throttle().is_empty());
    }

    #[tokio::test]
    async fn rejected_report_is_isolated() {
        let (mut engine, _, _) = engine(true, RecordPolicy::Attempt);
        let bad = AircraftReport::new("zz99")
            .with_position(40.01, -105.0)
            .with_transponder_type("adsb_icao");
        let stats = engine.run_cycle(&[bad, watched()], t(0)).await;
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.seen, 2);
    }

    #[tokio::test]
    async fn message_carries_registry_and_owner() {
        let (engine, _, bodies) = engine(true, RecordPolicy::Attempt);
        let mut engine = engine.with_registry(Box::new(FixedRegistry));
        engine.process_report(&watched(), t(0)).await;

        let bodies = bodies.lock().unwrap();
        let body = &bodies[0];
        assert!(body.contains("Aircraft hex: A35E89\n"));
        assert!(body.contains("Type: Gulfstream G650\n"));
        assert!(body.contains("Owner: Oprah Winfrey's Gulfstream G650 (N540W)\n"));
        assert!(body.contains("Direction: North\n"));
    }

    #[tokio::test]
    async fn unparseable_address_still_alerts_with_unknown_military() {
        let (mut engine, _, bodies) = engine(true, RecordPolicy::Attempt);
        let report = AircraftReport::new("zz99")
            .with_position(40.01, -105.0)
            .with_flight("CAP11");

        let outcome = engine.process_report(&report, t(0)).await;
        assert!(matches!(outcome, ReportOutcome::Dispatched { .. }), "{outcome:?}");

        let bodies = bodies.lock().unwrap();
        assert!(bodies[0].contains("Military: Unknown\n"));
    }

    #[tokio::test]
    async fn cycle_stats_count_each_path() {
        let (mut engine, _, _) = engine(true, RecordPolicy::Attempt);
        let reports = vec![
            watched(),
            watched(),
            AircraftReport::new("abc123"),
            AircraftReport::new("abc124")
                .with_position(40.01, -105.0)
                .with_flight("UAL9"),
        ];
        let stats = engine.run_cycle(&reports, t(0)).await;
        assert_eq!(
            stats,
            CycleStats {
                seen: 4,
                skipped: 2,
                alerted: 2,
                throttled: 1,
                delivered: 1,
                undelivered: 0,
                rejected: 0,
            }
        );
    }
}
