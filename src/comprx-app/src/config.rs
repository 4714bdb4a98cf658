// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Read-only TOML configuration shared by the comprx binaries.
//!
//! A config file may hold several tools' sections; each tool deserializes
//! only its own `[<section_key>]` table.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Environment variable naming a config file to try before the defaults.
pub const CONFIG_ENV_VAR: &str = "COMPRX_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),
}

/// Candidate files in lookup order: `env_path` (if any), `./comprx.toml`,
/// `$XDG_CONFIG_HOME/comprx/comprx.toml`, `/etc/comprx/comprx.toml`.
fn search_paths(env_path: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = env_path.into_iter().collect();
    paths.push(PathBuf::from("comprx.toml"));
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("comprx").join("comprx.toml"));
    }
    paths.push(PathBuf::from("/etc/comprx/comprx.toml"));
    paths
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::ParseError(path.to_path_buf(), err.to_string())
}

/// Parse `path` and deserialize its `key` table.
///
/// `Ok(None)` means the file parsed but has no such table.
fn read_section<T: DeserializeOwned>(path: &Path, key: &str) -> Result<Option<T>, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
    let mut table: toml::Table = toml::from_str(&content).map_err(|e| parse_error(path, e))?;

    match table.remove(key) {
        None => Ok(None),
        Some(section) => section
            .try_into::<T>()
            .map(Some)
            .map_err(|e| parse_error(path, e)),
    }
}

/// A configuration struct stored as one section of `comprx.toml`.
pub trait ConfigFile: Sized + Default + DeserializeOwned {
    /// Section key (e.g. `"comprx"`).
    fn section_key() -> &'static str;

    /// Load the section from `path`; a missing section is an error.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        read_section::<Self>(path, Self::section_key())?.ok_or_else(|| {
            ConfigError::ParseError(
                path.to_path_buf(),
                format!("missing [{}] section", Self::section_key()),
            )
        })
    }

    /// Load from the first default location that exists and has our section.
    ///
    /// Returns `(Default::default(), None)` when nothing matches.
    fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from_candidates(&search_paths(env_path))
    }

    /// Load from the first of `candidates` that exists and has our section.
    fn load_from_candidates(
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in candidates.iter().filter(|p| p.exists()) {
            if let Some(cfg) = read_section::<Self>(path, Self::section_key())? {
                return Ok((cfg, Some(path.clone())));
            }
        }
        Ok((Self::default(), None))
    }
}
