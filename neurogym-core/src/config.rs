//! Configuration for the training engine, loadable from `neurogym.toml`.
//!
//! All values have serde defaults so a partial (or missing) file still yields
//! a complete configuration. Resolved once at startup and treated as
//! immutable afterwards; sessions copy what they need at creation time.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Presentation and deadline timings.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Record-store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl TrainConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::Config`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::TrainError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether training features are enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// Presentation delays and side-call deadlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Scene/sound memorization window in milliseconds.
    #[serde(default = "default_memorize_ms")]
    pub memorize_ms: u64,
    /// Per-item flash duration for sequence/Simon presentation.
    #[serde(default = "default_flash_ms")]
    pub flash_ms_per_item: u64,
    /// Hard deadline for any AI coach call, in milliseconds.
    /// Bounds user-visible latency on the result screen.
    #[serde(default = "default_ai_deadline_ms")]
    pub ai_deadline_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            memorize_ms: 3000,
            flash_ms_per_item: 800,
            ai_deadline_ms: 10_000,
        }
    }
}

/// Record-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Use WAL mode for concurrent reads.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Whether persistence is configured at all. When false, completed
    /// sessions skip the insert entirely (feature degrades silently).
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "neurogym.db".to_string(),
            wal_mode: true,
            enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_db_path() -> String { "neurogym.db".to_string() }
fn default_memorize_ms() -> u64 { 3000 }
fn default_flash_ms() -> u64 { 800 }
fn default_ai_deadline_ms() -> u64 { 10_000 }
