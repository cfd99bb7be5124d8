//! User settings for PupilTools
//!
//! Manages preferences: rate endpoints, notification timings, simulated
//! latencies and password defaults. Every field has a default so partial
//! settings files load cleanly.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::paths::PupilPaths;
use crate::error::PupilError;
use crate::services::validation::{MAX_GENERATED_LENGTH, MIN_GENERATED_LENGTH};

/// Live exchange-rate endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSettings {
    /// Rate-table endpoint; the base currency code is appended to this prefix
    #[serde(default = "default_primary_base_url")]
    pub primary_base_url: String,

    /// Pair-conversion endpoint; `from`, `to` and `amount` are sent as query parameters
    #[serde(default = "default_secondary_url")]
    pub secondary_url: String,

    /// Optional per-request timeout; the HTTP client default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Skip both live tiers and answer from the fallback table
    #[serde(default)]
    pub offline: bool,
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            primary_base_url: default_primary_base_url(),
            secondary_url: default_secondary_url(),
            request_timeout_secs: None,
            offline: false,
        }
    }
}

impl RateSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Toast lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Time a toast stays fully visible
    #[serde(default = "default_visible_ms")]
    pub visible_ms: u64,

    /// Exit animation time after the visible phase
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            visible_ms: default_visible_ms(),
            exit_ms: default_exit_ms(),
        }
    }
}

impl NotificationSettings {
    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }

    /// Total lifetime of a toast
    pub fn lifetime(&self) -> Duration {
        self.visible() + self.exit()
    }
}

/// Artificial processing delays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySettings {
    #[serde(default = "default_true")]
    pub simulate: bool,

    #[serde(default = "default_emi_ms")]
    pub emi_ms: u64,

    #[serde(default = "default_pdf_ms")]
    pub pdf_ms: u64,

    #[serde(default = "default_auth_ms")]
    pub auth_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            simulate: true,
            emi_ms: default_emi_ms(),
            pdf_ms: default_pdf_ms(),
            auth_ms: default_auth_ms(),
        }
    }
}

impl LatencySettings {
    /// No artificial delays at all
    pub fn disabled() -> Self {
        Self {
            simulate: false,
            ..Self::default()
        }
    }

    fn delay(&self, ms: u64) -> Duration {
        if self.simulate {
            Duration::from_millis(ms)
        } else {
            Duration::ZERO
        }
    }

    pub fn emi(&self) -> Duration {
        self.delay(self.emi_ms)
    }

    pub fn pdf(&self) -> Duration {
        self.delay(self.pdf_ms)
    }

    pub fn auth(&self) -> Duration {
        self.delay(self.auth_ms)
    }
}

/// Password generator defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSettings {
    #[serde(default = "default_password_length")]
    pub default_length: usize,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            default_length: default_password_length(),
        }
    }
}

/// User settings for PupilTools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol used for EMI amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub rates: RateSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub latency: LatencySettings,

    #[serde(default)]
    pub password: PasswordSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_primary_base_url() -> String {
    "https://api.exchangerate.host/latest?base=".to_string()
}

fn default_secondary_url() -> String {
    "https://api.exchangerate.host/convert".to_string()
}

fn default_visible_ms() -> u64 {
    3000
}

fn default_exit_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_emi_ms() -> u64 {
    1000
}

fn default_pdf_ms() -> u64 {
    1500
}

fn default_auth_ms() -> u64 {
    2000
}

fn default_password_length() -> usize {
    12
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency_symbol(),
            rates: RateSettings::default(),
            notifications: NotificationSettings::default(),
            latency: LatencySettings::default(),
            password: PasswordSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &PupilPaths) -> Result<Self, PupilError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PupilError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PupilError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.check()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values the command-line rules would refuse
    pub fn check(&self) -> Result<(), PupilError> {
        let length = self.password.default_length;
        if !(MIN_GENERATED_LENGTH..=MAX_GENERATED_LENGTH).contains(&length) {
            return Err(PupilError::Config(format!(
                "password.default_length must be between {} and {} (got {})",
                MIN_GENERATED_LENGTH, MAX_GENERATED_LENGTH, length
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PupilPaths) -> Result<(), PupilError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PupilError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            PupilError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.notifications.lifetime(), Duration::from_millis(3300));
        assert_eq!(settings.latency.emi(), Duration::from_millis(1000));
        assert_eq!(settings.password.default_length, 12);
        assert!(!settings.rates.offline);
        assert_eq!(settings.rates.request_timeout(), None);
    }

    #[test]
    fn test_disabled_latency_is_zero() {
        let latency = LatencySettings::disabled();
        assert_eq!(latency.emi(), Duration::ZERO);
        assert_eq!(latency.pdf(), Duration::ZERO);
        assert_eq!(latency.auth(), Duration::ZERO);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PupilPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.rates.offline = true;
        settings.currency_symbol = "$".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PupilPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"rates": {"offline": true}}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.rates.offline);
        assert_eq!(loaded.rates.secondary_url, default_secondary_url());
        assert_eq!(loaded.notifications.visible_ms, 3000);
    }

    #[test]
    fn test_out_of_range_password_length_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PupilPaths::with_base_dir(temp_dir.path().to_path_buf());

        for length in [0, 3, 65, 10_000] {
            let contents = format!(r#"{{"password": {{"default_length": {}}}}}"#, length);
            std::fs::write(paths.settings_file(), contents).unwrap();
            assert!(
                matches!(Settings::load_or_create(&paths), Err(PupilError::Config(_))),
                "length {length}"
            );
        }

        std::fs::write(paths.settings_file(), r#"{"password": {"default_length": 4}}"#).unwrap();
        assert_eq!(
            Settings::load_or_create(&paths).unwrap().password.default_length,
            4
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PupilPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(PupilError::Config(_))
        ));
    }
}
