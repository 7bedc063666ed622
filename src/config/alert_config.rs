//! Alert Configuration - station, rule set, feed and channel settings as TOML
//!
//! Each struct implements `Default` with the values the watcher ships with,
//! so an empty file (or no file at all) yields a working rule set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults::{
    ALERT_SUBJECT, DEFAULT_AIRCRAFT_JSON_PATH, DEFAULT_CALLSIGN_WATCHLIST,
    DEFAULT_CARRIER_PREFIXES, DEFAULT_COOLDOWN_SECS, DEFAULT_HEX_WATCHLIST,
    DEFAULT_MILITARY_RANGES, DEFAULT_NOTIFY_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_RANGE_MILES, DEFAULT_REGISTRY_PATH, DEFAULT_REGISTRY_REFRESH_SECS,
    DEFAULT_REGISTRY_URL, DEFAULT_SMTP_PORT, DEFAULT_TRANSPONDER_TYPES, MAX_ICAO_ADDRESS,
    TELEGRAM_API_BASE,
};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "BIRD_ALERT_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "bird_alert.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `AlertConfig::load()` which searches:
/// 1. an explicit path (CLI `--config`)
/// 2. `$BIRD_ALERT_CONFIG`
/// 3. `./bird_alert.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Receiver location (centre of the geofence)
    #[serde(default)]
    pub station: StationConfig,

    /// Geofence, cooldown and rule toggles
    #[serde(default)]
    pub alerting: AlertingConfig,

    /// Airframes and callsigns that always alert
    #[serde(default)]
    pub watchlist: WatchlistConfig,

    /// Airline suppression
    #[serde(default)]
    pub commercial: CommercialConfig,

    /// Military address blocks
    #[serde(default)]
    pub military: MilitaryConfig,

    /// Aircraft feed location and polling cadence
    #[serde(default)]
    pub feed: FeedConfig,

    /// Aircraft registry (type descriptions)
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Ordered delivery channels
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl AlertConfig {
    /// Load configuration using the standard search order.
    ///
    /// A file that exists but fails to parse or validate is an error; only a
    /// missing file falls through to the next candidate.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. CLI flag
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), station = %config.station.name, "Loaded config from --config");
            return Ok(config);
        }

        // 2. Env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                let config = Self::load_from_file(&p)?;
                info!(path = %p.display(), station = %config.station.name, "Loaded config from {}", CONFIG_ENV_VAR);
                return Ok(config);
            }
            warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
        }

        // 3. ./bird_alert.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!(station = %config.station.name, "Loaded config from ./{}", LOCAL_CONFIG_FILE);
            return Ok(config);
        }

        // 4. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged as warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate values for internal consistency.
    ///
    /// Hard errors prevent startup; soft findings are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({0:?}): {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({0:?}): {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation failed:\n{}", format_errors(.0))]
    Validation(Vec<String>),
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Station
// ============================================================================

/// Receiver location. Defaults to (0, 0), which validation flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Free-form name used in logs
    #[serde(default = "default_station_name")]
    pub name: String,

    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: f64,

    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: f64,
}

fn default_station_name() -> String {
    "home".to_string()
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            name: default_station_name(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl StationConfig {
    pub const fn location(&self) -> crate::types::GeoPoint {
        crate::types::GeoPoint::new(self.latitude, self.longitude)
    }

    /// False while the location is still the (0, 0) default.
    pub fn is_set(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}

// ============================================================================
// Alerting
// ============================================================================

/// When the throttle stamps an identifier after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Stamp after every dispatch attempt, delivered or not. Rate-limits
    /// attempts so a failing channel cannot cause an alert storm.
    #[default]
    Attempt,
    /// Stamp only when some channel delivered the alert.
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Geofence radius (statute miles).
    #[serde(default = "default_range_miles")]
    pub range_miles: f64,

    /// Seconds before the same aircraft may alert again.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,

    /// Alert on the military flag / military address blocks.
    #[serde(default = "default_true")]
    pub include_military_check: bool,

    /// Alert on any declared emergency (overrides commercial suppression).
    #[serde(default = "default_true")]
    pub include_emergency_check: bool,

    /// Suppress airline callsigns.
    #[serde(default = "default_true")]
    pub skip_commercial: bool,

    /// When the throttle records a timestamp.
    #[serde(default)]
    pub record_on: RecordPolicy,

    /// Transponder categories that alert.
    #[serde(default = "default_transponder_types")]
    pub transponder_types: Vec<String>,
}

fn default_range_miles() -> f64 { DEFAULT_RANGE_MILES }
fn default_cooldown_seconds() -> u64 { DEFAULT_COOLDOWN_SECS }
const fn default_true() -> bool { true }
fn default_transponder_types() -> Vec<String> {
    DEFAULT_TRANSPONDER_TYPES.iter().map(|s| (*s).to_string()).collect()
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            range_miles: default_range_miles(),
            cooldown_seconds: default_cooldown_seconds(),
            include_military_check: true,
            include_emergency_check: true,
            skip_commercial: true,
            record_on: RecordPolicy::default(),
            transponder_types: default_transponder_types(),
        }
    }
}

// ============================================================================
// Watchlist
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistConfig {
    /// Hex address → description of the airframe / owner.
    #[serde(default = "default_identifier_watchlist")]
    pub identifiers: BTreeMap<String, String>,

    /// Callsign prefix → category label.
    #[serde(default = "default_callsign_watchlist")]
    pub callsigns: BTreeMap<String, String>,
}

fn default_identifier_watchlist() -> BTreeMap<String, String> {
    DEFAULT_HEX_WATCHLIST
        .iter()
        .map(|(hex, label)| ((*hex).to_string(), (*label).to_string()))
        .collect()
}

fn default_callsign_watchlist() -> BTreeMap<String, String> {
    DEFAULT_CALLSIGN_WATCHLIST
        .iter()
        .map(|(prefix, category)| ((*prefix).to_string(), (*category).to_string()))
        .collect()
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            identifiers: default_identifier_watchlist(),
            callsigns: default_callsign_watchlist(),
        }
    }
}

// ============================================================================
// Commercial
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommercialConfig {
    /// ICAO airline designators, matched case-sensitively as callsign prefixes.
    #[serde(default = "default_carrier_prefixes")]
    pub carrier_prefixes: Vec<String>,
}

fn default_carrier_prefixes() -> Vec<String> {
    DEFAULT_CARRIER_PREFIXES.iter().map(|s| (*s).to_string()).collect()
}

impl Default for CommercialConfig {
    fn default() -> Self {
        Self {
            carrier_prefixes: default_carrier_prefixes(),
        }
    }
}

// ============================================================================
// Military
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilitaryConfig {
    /// Inclusive `[start, end]` hex address pairs.
    #[serde(default = "default_military_ranges")]
    pub ranges: Vec<[String; 2]>,
}

fn default_military_ranges() -> Vec<[String; 2]> {
    DEFAULT_MILITARY_RANGES
        .iter()
        .map(|(start, end)| [(*start).to_string(), (*end).to_string()])
        .collect()
}

impl Default for MilitaryConfig {
    fn default() -> Self {
        Self {
            ranges: default_military_ranges(),
        }
    }
}

impl MilitaryConfig {
    /// Parse the configured pairs into numeric ranges.
    pub fn parse_ranges(&self) -> Result<Vec<(u32, u32)>, Vec<String>> {
        let mut parsed = Vec::with_capacity(self.ranges.len());
        let mut errors = Vec::new();
        for [start, end] in &self.ranges {
            match (u32::from_str_radix(start, 16), u32::from_str_radix(end, 16)) {
                (Ok(s), Ok(e)) if s <= e && e <= MAX_ICAO_ADDRESS => parsed.push((s, e)),
                (Ok(_), Ok(_)) => errors.push(format!(
                    "military.ranges [{start}, {end}] must satisfy start <= end <= ffffff"
                )),
                _ => errors.push(format!(
                    "military.ranges [{start}, {end}] is not a pair of hex addresses"
                )),
            }
        }
        if errors.is_empty() {
            Ok(parsed)
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Feed
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// readsb / dump1090 `aircraft.json`.
    #[serde(default = "default_aircraft_json_path")]
    pub aircraft_json_path: PathBuf,

    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_aircraft_json_path() -> PathBuf { PathBuf::from(DEFAULT_AIRCRAFT_JSON_PATH) }
fn default_poll_interval_secs() -> u64 { DEFAULT_POLL_INTERVAL_SECS }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            aircraft_json_path: default_aircraft_json_path(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Look up type descriptions for alert messages.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Local registry file; a leading `~` expands to the home directory.
    #[serde(default = "default_registry_path")]
    pub path: String,

    /// Download source for refreshes.
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Re-download when the local copy is older than this (seconds).
    /// Zero disables downloads.
    #[serde(default = "default_registry_refresh_secs")]
    pub refresh_interval_secs: u64,
}

fn default_registry_path() -> String { DEFAULT_REGISTRY_PATH.to_string() }
fn default_registry_url() -> String { DEFAULT_REGISTRY_URL.to_string() }
fn default_registry_refresh_secs() -> u64 { DEFAULT_REGISTRY_REFRESH_SECS }

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_registry_path(),
            url: default_registry_url(),
            refresh_interval_secs: default_registry_refresh_secs(),
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Delivery mechanisms, named as they appear in `notifications.order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Telegram,
    Pushover,
    Ifttt,
    Signal,
}

impl ChannelKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Telegram => "telegram",
            Self::Pushover => "pushover",
            Self::Ifttt => "ifttt",
            Self::Signal => "signal",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Channels in priority order; the first success wins.
    #[serde(default = "default_channel_order")]
    pub order: Vec<ChannelKind>,

    /// Per-channel request timeout (seconds).
    #[serde(default = "default_notify_timeout_secs")]
    pub timeout_secs: u64,

    /// Subject / title for channels that support one.
    #[serde(default = "default_subject")]
    pub subject: String,

    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub pushover: PushoverConfig,
    #[serde(default)]
    pub ifttt: IftttConfig,
    #[serde(default)]
    pub signal: SignalConfig,
}

fn default_channel_order() -> Vec<ChannelKind> {
    vec![
        ChannelKind::Email,
        ChannelKind::Telegram,
        ChannelKind::Pushover,
        ChannelKind::Ifttt,
        ChannelKind::Signal,
    ]
}
fn default_notify_timeout_secs() -> u64 { DEFAULT_NOTIFY_TIMEOUT_SECS }
fn default_subject() -> String { ALERT_SUBJECT.to_string() }

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            order: default_channel_order(),
            timeout_secs: default_notify_timeout_secs(),
            subject: default_subject(),
            email: EmailConfig::default(),
            telegram: TelegramConfig::default(),
            pushover: PushoverConfig::default(),
            ifttt: IftttConfig::default(),
            signal: SignalConfig::default(),
        }
    }
}

impl NotificationConfig {
    /// Channel names listed more than once in `order`.
    pub fn duplicate_channels(&self) -> Vec<ChannelKind> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for kind in &self.order {
            if !seen.insert(*kind) && !dups.contains(kind) {
                dups.push(*kind);
            }
        }
        dups
    }

    /// Whether the named channel has the fields it needs to attempt delivery.
    pub fn has_credentials(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Email => self.email.is_configured(),
            ChannelKind::Telegram => self.telegram.is_configured(),
            ChannelKind::Pushover => self.pushover.is_configured(),
            ChannelKind::Ifttt => self.ifttt.is_configured(),
            ChannelKind::Signal => self.signal.is_configured(),
        }
    }
}

/// SMTP with STARTTLS. Mail is sent from and to `address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub app_password: String,
}

const fn default_smtp_port() -> u16 { DEFAULT_SMTP_PORT }

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: DEFAULT_SMTP_PORT,
            address: String::new(),
            app_password: String::new(),
        }
    }
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        !self.smtp_server.is_empty() && !self.address.is_empty() && !self.app_password.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    /// Bot API base, overridable for a self-hosted Bot API server.
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

fn default_telegram_api_base() -> String { TELEGRAM_API_BASE.to_string() }

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api_base(),
        }
    }
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushoverConfig {
    #[serde(default)]
    pub user_key: String,
    #[serde(default)]
    pub app_token: String,
}

impl PushoverConfig {
    pub fn is_configured(&self) -> bool {
        !self.user_key.is_empty() && !self.app_token.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IftttConfig {
    #[serde(default)]
    pub webhook_event: String,
    #[serde(default)]
    pub webhook_key: String,
}

impl IftttConfig {
    pub fn is_configured(&self) -> bool {
        !self.webhook_event.is_empty() && !self.webhook_key.is_empty()
    }
}

/// signal-cli REST API (`POST {api_url}/v2/send`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl SignalConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.phone_number.is_empty() && !self.recipients.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AlertConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: AlertConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config.alerting.range_miles, 20.0);
        assert_eq!(config.alerting.cooldown_seconds, 600);
        assert!(config.alerting.include_military_check);
        assert!(config.alerting.skip_commercial);
        assert_eq!(config.alerting.record_on, RecordPolicy::Attempt);
        assert_eq!(config.feed.poll_interval_secs, 5);
        assert_eq!(config.notifications.order.len(), 5);
        assert_eq!(config.notifications.order[0], ChannelKind::Email);
        assert!(config.watchlist.callsigns.contains_key("CAP"));
        assert!(config.commercial.carrier_prefixes.iter().any(|p| p == "UAL"));
        assert_eq!(config.military.ranges.len(), DEFAULT_MILITARY_RANGES.len());
        assert!(!config.alerting.transponder_types.iter().any(|t| t == "adsb_icao_nt"));
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[station]
name = "Boulder"
latitude = 40.0
longitude = -105.0

[alerting]
range_miles = 35.5
skip_commercial = false
record_on = "success"

[notifications]
order = ["telegram", "email"]

[notifications.telegram]
bot_token = "123:abc"
chat_id = "42"
"#;
        let config = AlertConfig::from_toml_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.station.name, "Boulder");
        assert_eq!(config.alerting.range_miles, 35.5);
        assert!(!config.alerting.skip_commercial);
        assert_eq!(config.alerting.record_on, RecordPolicy::Success);
        assert_eq!(
            config.notifications.order,
            vec![ChannelKind::Telegram, ChannelKind::Email]
        );
        assert_eq!(config.notifications.telegram.chat_id, "42");
        // Non-overridden values retain defaults
        assert_eq!(config.alerting.cooldown_seconds, 600);
        assert_eq!(config.notifications.telegram.api_base, TELEGRAM_API_BASE);
        assert_eq!(config.notifications.email.smtp_port, 587);
    }

    #[test]
    fn test_unknown_channel_is_parse_error() {
        let toml_str = r#"
[notifications]
order = ["email", "carrier_pigeon"]
"#;
        let result = AlertConfig::from_toml_str(toml_str);
        assert!(matches!(result, Err(ConfigError::Parse(..))));
    }

    #[test]
    fn test_validation_catches_bad_range() {
        let mut config = AlertConfig::default();
        config.alerting.range_miles = -1.0;
        let result = config.validate();
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("range_miles")));
        } else {
            panic!("negative range must fail validation");
        }
    }

    #[test]
    fn test_validation_catches_bad_military_range() {
        let mut config = AlertConfig::default();
        config.military.ranges.push(["zzzzzz".to_string(), "ffffff".to_string()]);
        config.military.ranges.push(["00ff00".to_string(), "00f000".to_string()]);
        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("bad military ranges must fail validation");
        };
        assert_eq!(errors.iter().filter(|e| e.contains("military.ranges")).count(), 2);
    }

    #[test]
    fn test_military_ranges_parse() {
        let ranges = MilitaryConfig::default().parse_ranges().expect("defaults parse");
        assert_eq!(ranges[0], (0x00AD_F7C8, 0x00AF_FFFF));
    }

    #[test]
    fn test_duplicate_channels_detected() {
        let mut config = NotificationConfig::default();
        config.order.push(ChannelKind::Email);
        config.order.push(ChannelKind::Email);
        assert_eq!(config.duplicate_channels(), vec![ChannelKind::Email]);
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = AlertConfig::default();
        let toml_str = original.to_toml().expect("serialization should work");
        let roundtripped: AlertConfig = toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original.alerting.range_miles, roundtripped.alerting.range_miles);
        assert_eq!(original.watchlist.identifiers, roundtripped.watchlist.identifiers);
        assert_eq!(original.military.ranges, roundtripped.military.ranges);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bird_alert.toml");
        std::fs::write(&path, "[alerting]\ncooldown_seconds = 120\n").expect("write");
        let config = AlertConfig::load(Some(&path)).expect("load");
        assert_eq!(config.alerting.cooldown_seconds, 120);
    }

    #[test]
    fn test_station_unset_until_located() {
        let mut config = AlertConfig::default();
        assert!(!config.station.is_set());
        config.station.latitude = 51.5;
        assert!(config.station.is_set());

        let located = AlertConfig::from_toml_str("[station]\nlatitude = 0.0\nlongitude = -0.12\n")
            .expect("parse");
        assert!(located.station.is_set());
    }

    #[test]
    fn test_load_missing_explicit_file_errors() {
        let result = AlertConfig::load(Some(Path::new("/nonexistent/bird_alert.toml")));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }
}
