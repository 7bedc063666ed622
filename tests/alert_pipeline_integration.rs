//! Alert Pipeline Integration Tests
//!
//! Drives the full path from a readsb `aircraft.json` on disk through the
//! engine, dispatcher fallback and throttle, using counting fake channels
//! in place of real network delivery.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use bird_alert::config::{AlertConfig, ChannelKind, RecordPolicy};
use bird_alert::notify::{AlertMessage, ChannelError, Dispatcher, NotificationChannel};
use bird_alert::pipeline::{AlertEngine, FeedSource, PollingLoop, ReadsbFileSource, ReportOutcome};
use bird_alert::registry::{MictronicsRegistry, RegistryLookup};
use bird_alert::throttle::AlertThrottle;
use bird_alert::types::AircraftReport;

// ============================================================================
// Fixtures
// ============================================================================

const FEED: &str = r#"{
  "now": 1718000000.0,
  "messages": 98231,
  "aircraft": [
    {"hex": "a35e89", "type": "adsb_icao", "flight": "N540W   ",
     "lat": 39.79, "lon": -104.99, "gs": 412.7, "emergency": "none"},
    {"hex": "a0b1c2", "type": "adsb_icao", "flight": "UAL1734 ",
     "lat": 39.76, "lon": -104.95, "gs": 250.0},
    {"hex": "ae5f01", "type": "adsb_icao", "flight": "RCH451  ",
     "lat": 39.70, "lon": -105.05, "dbFlags": 1},
    {"hex": "a7c3d1", "type": "mode_s"},
    {"hex": "~2b0001", "type": "tisb_other", "lat": 41.5, "lon": -104.99}
  ]
}"#;

const REGISTRY: &str = r#"{
  "A35E89": {"r": "N540W", "t": "GLF6", "f": "00", "d": "Gulfstream G650"},
  "AE5F01": {"r": "05-5151", "t": "C17", "f": "10", "d": ""}
}"#;

#[derive(Clone, Default)]
struct Log {
    calls: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<(String, String)>>>,
}

struct CountingChannel {
    name: &'static str,
    configured: bool,
    succeed: bool,
    log: Log,
}

#[async_trait]
impl NotificationChannel for CountingChannel {
    fn name(&self) -> &str {
        self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        self.log.calls.fetch_add(1, Ordering::SeqCst);
        self.log
            .bodies
            .lock()
            .unwrap()
            .push((self.name.to_string(), message.body()));
        if self.succeed {
            Ok(())
        } else {
            Err(ChannelError::Unsupported(format!("{} is down", self.name)))
        }
    }
}

fn channel(name: &'static str, configured: bool, succeed: bool, log: &Log) -> Box<dyn NotificationChannel> {
    Box::new(CountingChannel {
        name,
        configured,
        succeed,
        log: log.clone(),
    })
}

fn station_config() -> AlertConfig {
    let mut config = AlertConfig::default();
    config.station.latitude = 39.74;
    config.station.longitude = -104.99;
    config
}

fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_718_000_000 + secs, 0).unwrap()
}

async fn feed_reports() -> Vec<AircraftReport> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aircraft.json");
    std::fs::write(&path, FEED).unwrap();
    ReadsbFileSource::new(&path).poll().await.unwrap()
}

// ============================================================================
// Dispatcher fallback
// ============================================================================

#[tokio::test]
async fn fallback_stops_at_first_working_channel() {
    let (a, b, c) = (Log::default(), Log::default(), Log::default());
    let dispatcher = Dispatcher::new(vec![
        channel("email", true, false, &a),
        channel("telegram", true, true, &b),
        channel("pushover", true, true, &c),
    ]);
    let mut engine = AlertEngine::from_config(&station_config(), dispatcher).unwrap();

    let reports = feed_reports().await;
    let outcome = engine.process_report(&reports[0], t(0)).await;

    let ReportOutcome::Dispatched { outcome, .. } = outcome else {
        panic!("expected a dispatch, got {outcome:?}");
    };
    assert_eq!(outcome.delivered_by(), Some("telegram"));
    assert_eq!(a.calls.load(Ordering::SeqCst), 1);
    assert_eq!(b.calls.load(Ordering::SeqCst), 1);
    assert_eq!(c.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unconfigured_channels_are_skipped_without_io() {
    let (a, b) = (Log::default(), Log::default());
    let dispatcher = Dispatcher::new(vec![
        channel("email", false, true, &a),
        channel("signal", true, true, &b),
    ]);
    let mut engine = AlertEngine::from_config(&station_config(), dispatcher).unwrap();

    let reports = feed_reports().await;
    let outcome = engine.process_report(&reports[0], t(0)).await;

    let ReportOutcome::Dispatched { outcome, .. } = outcome else {
        panic!("expected a dispatch");
    };
    assert_eq!(outcome.results.len(), 2);
    assert!(!outcome.results[0].success);
    assert_eq!(outcome.delivered_by(), Some("signal"));
    assert_eq!(a.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unconfigured_real_channels_fail_cleanly() {
    let mut config = AlertConfig::default();
    config.notifications.order = vec![ChannelKind::Telegram, ChannelKind::Ifttt];
    let dispatcher = Dispatcher::from_config(&config.notifications).unwrap();

    let report = AircraftReport::new("a35e89").with_position(0.0, 0.0);
    let message = AlertMessage::new(
        &report,
        bird_alert::types::Fix {
            distance_miles: 0.0,
            bearing: bird_alert::geometry::CompassOctant::North,
        },
        bird_alert::types::AlertReason::Military,
    );
    let outcome = dispatcher.dispatch(&message).await;
    assert!(!outcome.delivered());
    assert_eq!(outcome.results.len(), 2);
}

// ============================================================================
// Full cycle
// ============================================================================

#[tokio::test]
async fn full_cycle_over_a_feed_snapshot() {
    let log = Log::default();
    let dispatcher = Dispatcher::new(vec![channel("telegram", true, true, &log)]);
    let registry = MictronicsRegistry::from_json_str(REGISTRY).unwrap();
    let mut engine = AlertEngine::from_config(&station_config(), dispatcher)
        .unwrap()
        .with_registry(Box::new(registry));

    let reports = feed_reports().await;
    assert_eq!(reports.len(), 5);

    let stats = engine.run_cycle(&reports, t(0)).await;
    // a35e89 watchlisted, ae5f01 military; UAL suppressed, two without usable position.
    assert_eq!(stats.seen, 5);
    assert_eq!(stats.alerted, 2);
    assert_eq!(stats.delivered, 2);
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.rejected, 0);

    let bodies = log.bodies.lock().unwrap();
    let watchlisted = &bodies[0].1;
    assert!(watchlisted.contains("Type: Gulfstream G650\n"));
    assert!(watchlisted.contains("Callsign: N540W\n"));
    assert!(watchlisted.contains("Ground Speed: 412.7 knots\n"));
    assert!(watchlisted.ends_with("Reason: watchlisted-identifier"));

    let military = &bodies[1].1;
    assert!(military.contains("Aircraft hex: AE5F01\n"));
    assert!(military.contains("Type: C17\n"));
    assert!(military.contains("Military: Yes\n"));
    assert!(military.contains("Direction: South-West\n"));
}

// ============================================================================
// Throttle timeline
// ============================================================================

#[test]
fn throttle_timeline() {
    let mut throttle = AlertThrottle::new(600);
    assert!(throttle.should_fire("a35e89", t(0)));
    throttle.record("a35e89", t(0));
    assert!(!throttle.should_fire("a35e89", t(599)));
    assert!(!throttle.should_fire("a35e89", t(600)));
    assert!(throttle.should_fire("a35e89", t(601)));
}

#[tokio::test]
async fn repeated_snapshots_alert_once_per_cooldown() {
    let log = Log::default();
    let dispatcher = Dispatcher::new(vec![channel("telegram", true, true, &log)]);
    let mut engine = AlertEngine::from_config(&station_config(), dispatcher).unwrap();
    let reports = feed_reports().await;

    engine.run_cycle(&reports, t(0)).await;
    let second = engine.run_cycle(&reports, t(5)).await;
    assert_eq!(second.throttled, 2);
    assert_eq!(second.delivered, 0);

    let third = engine.run_cycle(&reports, t(601)).await;
    assert_eq!(third.delivered, 2);
    assert_eq!(log.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn success_policy_retries_until_delivered() {
    let mut config = station_config();
    config.alerting.record_on = RecordPolicy::Success;
    let log = Log::default();
    let dispatcher = Dispatcher::new(vec![channel("telegram", true, false, &log)]);
    let mut engine = AlertEngine::from_config(&config, dispatcher).unwrap();
    let reports = feed_reports().await;

    let first = engine.run_cycle(&reports[..1], t(0)).await;
    let second = engine.run_cycle(&reports[..1], t(5)).await;
    assert_eq!(first.undelivered, 1);
    assert_eq!(second.undelivered, 1);
    assert_eq!(second.throttled, 0);
}

// ============================================================================
// Polling loop over a file
// ============================================================================

#[tokio::test]
async fn polling_loop_reads_the_feed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aircraft.json");
    std::fs::write(&path, FEED).unwrap();

    let log = Log::default();
    let dispatcher = Dispatcher::new(vec![channel("telegram", true, true, &log)]);
    let engine = AlertEngine::from_config(&station_config(), dispatcher).unwrap();

    let mut source = ReadsbFileSource::new(&path);
    let stats = PollingLoop::new(engine, Duration::ZERO, CancellationToken::new())
        .with_max_cycles(2)
        .run(&mut source)
        .await;

    assert_eq!(stats.cycles, 2);
    assert_eq!(stats.totals.delivered, 2);
    assert_eq!(stats.totals.throttled, 2);
}

#[test]
fn registry_lookup_is_case_insensitive() {
    let registry = MictronicsRegistry::from_json_str(REGISTRY).unwrap();
    assert_eq!(registry.describe("a35e89").as_deref(), Some("Gulfstream G650"));
    assert_eq!(registry.describe("ffffff"), None);
}
