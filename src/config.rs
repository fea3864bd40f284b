// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Optional JSON configuration.
//!
//! Every field has a default, so an empty object (or no file at all) is a valid config. CLI flags
//! are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{SelectionConfig, DEFAULT_TICK_COUNT, DEFAULT_TICK_INTERVAL};
use crate::error::ConfigError;
use crate::model::Delimiter;

pub const CONFIG_ENV: &str = "TAGPICK_CONFIG";
pub const MAX_TICK_COUNT: u32 = 10_000;
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub delimiter: Delimiter,
    pub selection: SelectionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionSettings {
    pub tick_interval_ms: u64,
    pub tick_count: u32,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "selection.tick_interval_ms",
                reason: "must be greater than 0".to_owned(),
            });
        }
        if self.selection.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(ConfigError::Invalid {
                field: "selection.tick_interval_ms",
                reason: format!("must be at most {MAX_TICK_INTERVAL_MS}"),
            });
        }
        if self.selection.tick_count > MAX_TICK_COUNT {
            return Err(ConfigError::Invalid {
                field: "selection.tick_count",
                reason: format!("must be at most {MAX_TICK_COUNT}"),
            });
        }
        Ok(())
    }

    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            tick_interval: Duration::from_millis(self.selection.tick_interval_ms),
            tick_count: self.selection.tick_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, SelectionSettings, MAX_TICK_COUNT, MAX_TICK_INTERVAL_MS};
    use crate::error::ConfigError;
    use crate::model::Delimiter;
    use std::env;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let path = env::temp_dir().join(format!(
            "tagpick-{name}-{}-{nanos}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.delimiter, Delimiter::Space);
        assert_eq!(config.selection_config().tick_interval, Duration::from_millis(100));
        assert_eq!(config.selection_config().tick_count, 30);
    }

    #[test]
    fn load_reads_partial_file() {
        let path = write_temp_config(
            "partial",
            r#"{ "delimiter": "comma", "selection": { "tick_count": 12 } }"#,
        );
        let config = AppConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.delimiter, Delimiter::Comma);
        assert_eq!(
            config.selection,
            SelectionSettings {
                tick_interval_ms: 100,
                tick_count: 12
            }
        );
    }

    #[test]
    fn load_rejects_zero_interval() {
        let path = write_temp_config("zero", r#"{ "selection": { "tick_interval_ms": 0 } }"#);
        let err = AppConfig::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "selection.tick_interval_ms"),
            other => panic!("expected Invalid, got: {other:?}"),
        }
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let path = write_temp_config("unknown", r#"{ "colour": "red" }"#);
        let err = AppConfig::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Json { .. }), "got: {err:?}");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load("/definitely/not/here/tagpick.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("tagpick.json"));
    }

    #[test]
    fn validate_caps_tick_interval() {
        let mut config = AppConfig::default();
        config.selection.tick_interval_ms = MAX_TICK_INTERVAL_MS;
        config.selection.tick_count = MAX_TICK_COUNT;
        config.validate().expect("largest accepted values");
        assert_eq!(
            config.selection_config().run_duration(),
            Duration::from_millis(MAX_TICK_INTERVAL_MS * (u64::from(MAX_TICK_COUNT) + 1))
        );

        config.selection.tick_interval_ms = u64::MAX;
        match config.validate().unwrap_err() {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "selection.tick_interval_ms"),
            other => panic!("expected Invalid, got: {other:?}"),
        }
    }

    #[test]
    fn validate_caps_tick_count() {
        let mut config = AppConfig::default();
        config.selection.tick_count = 10_001;
        config.validate().unwrap_err();
    }
}
