use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::Config;

/// Timeouts offered for the screen lock, shortest first.
pub const SCREEN_LOCK_TIMEOUTS: &[Duration] = &[
    Duration::from_secs(0),
    Duration::from_secs(60),
    Duration::from_secs(5 * 60),
    Duration::from_secs(15 * 60),
    Duration::from_secs(30 * 60),
    Duration::from_secs(60 * 60),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    ReadReceipts,
    TypingIndicators,
    ScreenSecurity,
    ScreenLock,
    SystemCallLog,
}

impl PreferenceKey {
    pub const ALL: &[PreferenceKey] = &[
        PreferenceKey::ReadReceipts,
        PreferenceKey::TypingIndicators,
        PreferenceKey::ScreenSecurity,
        PreferenceKey::ScreenLock,
        PreferenceKey::SystemCallLog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PreferenceKey::ReadReceipts => "read_receipts",
            PreferenceKey::TypingIndicators => "typing_indicators",
            PreferenceKey::ScreenSecurity => "screen_security",
            PreferenceKey::ScreenLock => "screen_lock",
            PreferenceKey::SystemCallLog => "system_call_log",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreferenceKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        PreferenceKey::ALL
            .iter()
            .copied()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| ConfigError::UnknownPreference(s.to_string()))
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    15 * 60
}

/// The `[privacy]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyConfig {
    #[serde(default = "default_true")]
    pub read_receipts: bool,
    #[serde(default = "default_true")]
    pub typing_indicators: bool,
    #[serde(default)]
    pub screen_security: bool,
    #[serde(default)]
    pub screen_lock: bool,
    #[serde(default = "default_timeout_secs")]
    pub screen_lock_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub system_call_log: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            read_receipts: true,
            typing_indicators: true,
            screen_security: false,
            screen_lock: false,
            screen_lock_timeout_secs: default_timeout_secs(),
            system_call_log: true,
        }
    }
}

impl PrivacyConfig {
    pub fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::ReadReceipts => self.read_receipts,
            PreferenceKey::TypingIndicators => self.typing_indicators,
            PreferenceKey::ScreenSecurity => self.screen_security,
            PreferenceKey::ScreenLock => self.screen_lock,
            PreferenceKey::SystemCallLog => self.system_call_log,
        }
    }

    pub fn set(&mut self, key: PreferenceKey, value: bool) {
        let slot = match key {
            PreferenceKey::ReadReceipts => &mut self.read_receipts,
            PreferenceKey::TypingIndicators => &mut self.typing_indicators,
            PreferenceKey::ScreenSecurity => &mut self.screen_security,
            PreferenceKey::ScreenLock => &mut self.screen_lock,
            PreferenceKey::SystemCallLog => &mut self.system_call_log,
        };
        *slot = value;
    }

    pub fn screen_lock_timeout(&self) -> Duration {
        Duration::from_secs(self.screen_lock_timeout_secs)
    }

    pub fn set_screen_lock_timeout(&mut self, timeout: Duration) -> Result<(), ConfigError> {
        if !SCREEN_LOCK_TIMEOUTS.contains(&timeout) {
            return Err(ConfigError::InvalidTimeout(timeout.as_secs()));
        }
        self.screen_lock_timeout_secs = timeout.as_secs();
        Ok(())
    }
}

/// Injected source of privacy toggles. A value passed to `set` is what `get` returns next.
pub trait PreferenceStore {
    fn get(&self, key: PreferenceKey) -> bool;
    fn set(&mut self, key: PreferenceKey, value: bool) -> Result<()>;
    fn screen_lock_timeout(&self) -> Duration;
    fn set_screen_lock_timeout(&mut self, timeout: Duration) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    privacy: PrivacyConfig,
}

impl MemoryPreferences {
    pub fn new(privacy: PrivacyConfig) -> Self {
        Self { privacy }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: PreferenceKey) -> bool {
        self.privacy.get(key)
    }

    fn set(&mut self, key: PreferenceKey, value: bool) -> Result<()> {
        self.privacy.set(key, value);
        Ok(())
    }

    fn screen_lock_timeout(&self) -> Duration {
        self.privacy.screen_lock_timeout()
    }

    fn set_screen_lock_timeout(&mut self, timeout: Duration) -> Result<()> {
        Ok(self.privacy.set_screen_lock_timeout(timeout)?)
    }
}

/// Preferences persisted in the `[privacy]` table of a config file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    privacy: PrivacyConfig,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let privacy = Config::load_from(&path)?.privacy;
        Ok(Self { path, privacy })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Config::config_path())
    }

    /// Writes `privacy` to disk and adopts it only once the write succeeded.
    fn commit(&mut self, privacy: PrivacyConfig) -> Result<()> {
        let mut config = Config::load_from(&self.path)?;
        config.privacy = privacy.clone();
        config.save_to(&self.path)?;
        tracing::debug!(path = %self.path.display(), "saved privacy preferences");
        self.privacy = privacy;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: PreferenceKey) -> bool {
        self.privacy.get(key)
    }

    fn set(&mut self, key: PreferenceKey, value: bool) -> Result<()> {
        let mut privacy = self.privacy.clone();
        privacy.set(key, value);
        self.commit(privacy)
    }

    fn screen_lock_timeout(&self) -> Duration {
        self.privacy.screen_lock_timeout()
    }

    fn set_screen_lock_timeout(&mut self, timeout: Duration) -> Result<()> {
        let mut privacy = self.privacy.clone();
        privacy.set_screen_lock_timeout(timeout)?;
        self.commit(privacy)
    }
}

/// Human-readable timeout: "None" for zero, otherwise e.g. "5m" or "5 minutes".
pub fn format_timeout(timeout: Duration, short: bool) -> String {
    let secs = timeout.as_secs();
    if secs == 0 {
        return "None".to_string();
    }
    let (value, short_unit, unit) = if secs % 3600 == 0 {
        (secs / 3600, "h", "hour")
    } else if secs % 60 == 0 {
        (secs / 60, "m", "minute")
    } else {
        (secs, "s", "second")
    };
    if short {
        format!("{value}{short_unit}")
    } else if value == 1 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trip() {
        for key in PreferenceKey::ALL {
            assert_eq!(key.name().parse::<PreferenceKey>().unwrap(), *key);
        }
        assert_eq!(
            "read-receipts".parse::<PreferenceKey>().unwrap(),
            PreferenceKey::ReadReceipts
        );
        assert!("phone_number".parse::<PreferenceKey>().is_err());
    }

    #[test]
    fn memory_set_then_get() {
        let mut prefs = MemoryPreferences::default();
        for key in PreferenceKey::ALL {
            for value in [true, false, true] {
                prefs.set(*key, value).unwrap();
                assert_eq!(prefs.get(*key), value, "{key}");
            }
        }
    }

    #[test]
    fn setting_one_key_leaves_others() {
        let mut prefs = MemoryPreferences::default();
        prefs.set(PreferenceKey::ScreenLock, true).unwrap();
        assert!(prefs.get(PreferenceKey::ReadReceipts));
        assert!(!prefs.get(PreferenceKey::ScreenSecurity));
    }

    #[test]
    fn timeout_must_be_offered() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.screen_lock_timeout(), Duration::from_secs(900));
        prefs
            .set_screen_lock_timeout(Duration::from_secs(60))
            .unwrap();
        assert_eq!(prefs.screen_lock_timeout(), Duration::from_secs(60));
        assert!(prefs
            .set_screen_lock_timeout(Duration::from_secs(61))
            .is_err());
        assert_eq!(prefs.screen_lock_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn file_preferences_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.set(PreferenceKey::TypingIndicators, false).unwrap();
        prefs
            .set_screen_lock_timeout(Duration::from_secs(300))
            .unwrap();
        assert!(!prefs.get(PreferenceKey::TypingIndicators));

        let reopened = FilePreferences::open(&path).unwrap();
        assert!(!reopened.get(PreferenceKey::TypingIndicators));
        assert_eq!(reopened.screen_lock_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut prefs = FilePreferences::open(&path).unwrap();

        std::fs::create_dir(&path).unwrap();
        assert!(prefs.set(PreferenceKey::ReadReceipts, false).is_err());
        assert!(prefs.get(PreferenceKey::ReadReceipts));
        assert!(prefs
            .set_screen_lock_timeout(Duration::from_secs(60))
            .is_err());
        assert_eq!(prefs.screen_lock_timeout(), Duration::from_secs(900));
    }

    #[test]
    fn file_preferences_keep_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[appearance]\nmode = \"light\"\n").unwrap();

        let mut prefs = FilePreferences::open(&path).unwrap();
        prefs.set(PreferenceKey::ScreenSecurity, true).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.appearance.mode, msgstyle_core::AppearanceMode::Light);
        assert!(config.privacy.screen_security);
    }

    #[test]
    fn timeout_formatting() {
        assert_eq!(format_timeout(Duration::ZERO, true), "None");
        assert_eq!(format_timeout(Duration::from_secs(300), true), "5m");
        assert_eq!(format_timeout(Duration::from_secs(3600), true), "1h");
        assert_eq!(format_timeout(Duration::from_secs(60), false), "1 minute");
        assert_eq!(format_timeout(Duration::from_secs(1800), false), "30 minutes");
        assert_eq!(format_timeout(Duration::from_secs(45), false), "45 seconds");
    }
}
