//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::AlertConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Tables whose keys are user data (hex addresses, callsign prefixes).
const FREE_FORM_TABLES: &[&str] = &["watchlist.identifiers", "watchlist.callsigns"];

/// Returns the complete set of valid dotted key paths for AlertConfig.
///
/// Maintained by hand to match the struct hierarchy in alert_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [station]
        "station",
        "station.name",
        "station.latitude",
        "station.longitude",
        // [alerting]
        "alerting",
        "alerting.range_miles",
        "alerting.cooldown_seconds",
        "alerting.include_military_check",
        "alerting.include_emergency_check",
        "alerting.skip_commercial",
        "alerting.record_on",
        "alerting.transponder_types",
        // [watchlist]
        "watchlist",
        "watchlist.identifiers",
        "watchlist.callsigns",
        // [commercial]
        "commercial",
        "commercial.carrier_prefixes",
        // [military]
        "military",
        "military.ranges",
        // [feed]
        "feed",
        "feed.aircraft_json_path",
        "feed.poll_interval_secs",
        // [registry]
        "registry",
        "registry.enabled",
        "registry.path",
        "registry.url",
        "registry.refresh_interval_secs",
        // [notifications]
        "notifications",
        "notifications.order",
        "notifications.timeout_secs",
        "notifications.subject",
        "notifications.email",
        "notifications.email.smtp_server",
        "notifications.email.smtp_port",
        "notifications.email.address",
        "notifications.email.app_password",
        "notifications.telegram",
        "notifications.telegram.bot_token",
        "notifications.telegram.chat_id",
        "notifications.telegram.api_base",
        "notifications.pushover",
        "notifications.pushover.user_key",
        "notifications.pushover.app_token",
        "notifications.ifttt",
        "notifications.ifttt.webhook_event",
        "notifications.ifttt.webhook_key",
        "notifications.signal",
        "notifications.signal.api_url",
        "notifications.signal.phone_number",
        "notifications.signal.recipients",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Children of free-form tables are not listed.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() && !FREE_FORM_TABLES.contains(&path.as_str()) {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so suggestions are stable.
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new(); // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed AlertConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent startup; warnings are suspicious but not fatal.
pub fn validate_ranges(config: &AlertConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let station = &config.station;
    if !station.latitude.is_finite() || !(-90.0..=90.0).contains(&station.latitude) {
        errors.push(format!(
            "station.latitude = {} is outside [-90, 90]",
            station.latitude
        ));
    }
    if !station.longitude.is_finite() || !(-180.0..=180.0).contains(&station.longitude) {
        errors.push(format!(
            "station.longitude = {} is outside [-180, 180]",
            station.longitude
        ));
    }
    if !station.is_set() {
        warnings.push(ValidationWarning {
            field: "station".to_string(),
            message: "station location is (0, 0); set station.latitude and station.longitude"
                .to_string(),
            suggestion: None,
        });
    }

    let range = config.alerting.range_miles;
    if !range.is_finite() || range <= 0.0 {
        errors.push(format!("alerting.range_miles = {range} must be a positive number"));
    }

    if config.feed.poll_interval_secs == 0 {
        errors.push("feed.poll_interval_secs must be > 0".to_string());
    }

    if config.notifications.timeout_secs == 0 {
        errors.push("notifications.timeout_secs must be > 0".to_string());
    }

    if let Err(range_errors) = config.military.parse_ranges() {
        errors.extend(range_errors);
    }

    for hex in config.watchlist.identifiers.keys() {
        if u32::from_str_radix(crate::types::strip_address_marker(hex), 16).is_err() {
            warnings.push(ValidationWarning {
                field: format!("watchlist.identifiers.{hex}"),
                message: format!("watchlist identifier '{hex}' is not a hex address"),
                suggestion: None,
            });
        }
    }

    for kind in config.notifications.duplicate_channels() {
        errors.push(format!("notifications.order lists '{kind}' more than once"));
    }

    if config.notifications.order.is_empty() {
        warnings.push(ValidationWarning {
            field: "notifications.order".to_string(),
            message: "notifications.order is empty; alerts will only be logged".to_string(),
            suggestion: None,
        });
    } else if !config
        .notifications
        .order
        .iter()
        .any(|kind| config.notifications.has_credentials(*kind))
    {
        warnings.push(ValidationWarning {
            field: "notifications".to_string(),
            message: "no notification channel has credentials configured".to_string(),
            suggestion: None,
        });
    }

    if config.alerting.transponder_types.is_empty() {
        warnings.push(ValidationWarning {
            field: "alerting.transponder_types".to_string(),
            message: "alerting.transponder_types is empty; only watchlist, emergency and military rules can alert"
                .to_string(),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
