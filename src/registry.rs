//! Aircraft registry lookup backed by the Mictronics `aircrafts.json` database.
//!
//! The database maps upper-case ICAO addresses to `{r, t, f, d}` entries
//! (registration, type code, flags, description). A [`RegistryRefresher`]
//! keeps the local copy current by re-downloading it when it goes stale.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::types::strip_address_marker;

/// Registry loading / download errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry I/O error ({0:?}): {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Registry parse error ({0:?}): {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Registry server returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Cannot expand '~': no home directory")]
    NoHomeDir,
}

/// Resolves an address to a human-readable aircraft type.
pub trait RegistryLookup: Send + Sync {
    /// Description for the address, falling back to the type code.
    fn describe(&self, hex: &str) -> Option<String>;
}

/// No registry: every lookup misses.
impl RegistryLookup for () {
    fn describe(&self, _hex: &str) -> Option<String> {
        None
    }
}

/// One database row. Every field may be missing or empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryEntry {
    #[serde(default, rename = "r")]
    pub registration: Option<String>,
    #[serde(default, rename = "t")]
    pub type_code: Option<String>,
    #[serde(default, rename = "f")]
    pub flags: Option<String>,
    #[serde(default, rename = "d")]
    pub description: Option<String>,
}

impl RegistryEntry {
    fn describe(&self) -> Option<String> {
        non_empty(self.description.as_deref())
            .or_else(|| non_empty(self.type_code.as_deref()))
            .map(str::to_string)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// In-memory copy of the Mictronics database.
#[derive(Debug, Clone, Default)]
pub struct MictronicsRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl MictronicsRegistry {
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, RegistryEntry> = serde_json::from_str(contents)?;
        let entries = raw
            .into_iter()
            .map(|(hex, entry)| (hex.to_ascii_uppercase(), entry))
            .collect();
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| RegistryError::Io(path.to_path_buf(), e))?;
        Self::from_json_str(&contents).map_err(|e| RegistryError::Parse(path.to_path_buf(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, hex: &str) -> Option<&RegistryEntry> {
        self.entries
            .get(&strip_address_marker(hex).to_ascii_uppercase())
    }
}

impl RegistryLookup for MictronicsRegistry {
    fn describe(&self, hex: &str) -> Option<String> {
        self.entry(hex).and_then(RegistryEntry::describe)
    }
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf, RegistryError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };
    let dirs = directories::BaseDirs::new().ok_or(RegistryError::NoHomeDir)?;
    let home = dirs.home_dir();
    let rest = rest.trim_start_matches('/');
    Ok(if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    })
}

/// True when `path` is missing or was last modified more than `max_age` before `now`.
pub fn is_stale(path: &Path, max_age: Duration, now: SystemTime) -> bool {
    let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
        return true;
    };
    now.duration_since(modified)
        .map(|age| age > max_age)
        .unwrap_or(false)
}

/// Keeps the local database fresh and reloads it after each download.
pub struct RegistryRefresher {
    path: PathBuf,
    url: String,
    max_age: Duration,
    http: reqwest::Client,
    last_attempt: Option<Instant>,
}

impl RegistryRefresher {
    pub fn new(config: &RegistryConfig, http: reqwest::Client) -> Result<Self, RegistryError> {
        Ok(Self {
            path: expand_home(&config.path)?,
            url: config.url.clone(),
            max_age: Duration::from_secs(config.refresh_interval_secs),
            http,
            last_attempt: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `refresh_interval_secs = 0` keeps the local copy as-is.
    pub fn downloads_disabled(&self) -> bool {
        self.max_age.is_zero()
    }

    /// Load whatever copy is on disk right now.
    pub fn load_local(&self) -> Result<MictronicsRegistry, RegistryError> {
        MictronicsRegistry::load(&self.path)
    }

    /// Download and reload when the local copy is stale.
    ///
    /// Returns the new registry when a download happened. Failed downloads are
    /// not retried until another `max_age` has passed. A zero `max_age` never
    /// downloads.
    pub async fn refresh_if_stale(&mut self) -> Result<Option<MictronicsRegistry>, RegistryError> {
        if self.downloads_disabled() {
            return Ok(None);
        }
        if !is_stale(&self.path, self.max_age, SystemTime::now()) {
            debug!(path = ?self.path, "Registry is fresh");
            return Ok(None);
        }
        if self
            .last_attempt
            .is_some_and(|last| last.elapsed() <= self.max_age)
        {
            return Ok(None);
        }
        self.last_attempt = Some(Instant::now());

        info!(url = %self.url, path = ?self.path, "Downloading aircraft registry");
        self.download().await?;
        let registry = self.load_local()?;
        info!(entries = registry.len(), "Aircraft registry loaded");
        Ok(Some(registry))
    }

    async fn download(&self) -> Result<(), RegistryError> {
        let response = self.http.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(RegistryError::Status(response.status()));
        }
        let bytes = response.bytes().await?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RegistryError::Io(parent.to_path_buf(), e))?;
            }
        }

        // Write beside the target then rename so readers never see a partial file.
        let tmp = self.path.with_extension("json.part");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| RegistryError::Io(tmp.clone(), e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RegistryError::Io(self.path.clone(), e))?;
        Ok(())
    }
}

/// Load the registry once at startup, logging rather than failing.
pub fn load_or_empty(path: &Path) -> MictronicsRegistry {
    match MictronicsRegistry::load(path) {
        Ok(registry) => {
            info!(entries = registry.len(), path = ?path, "Aircraft registry loaded");
            registry
        }
        Err(e) => {
            warn!("Aircraft registry unavailable: {}", e);
            MictronicsRegistry::default()
        }
    }
}
