// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io;
use std::path::PathBuf;

/// Result alias carrying [`PickerError`].
pub type Result<T> = std::result::Result<T, PickerError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level error surfaced by the binary.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid palette: {0}")]
    Theme(String),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}
