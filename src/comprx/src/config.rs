// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for comprx.
//!
//! Config is loaded from the `[comprx]` section of `comprx.toml`.
//! Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. Path in the `COMPRX_CONFIG` environment variable
//! 3. `./comprx.toml`
//! 4. `~/.config/comprx/comprx.toml`
//! 5. `/etc/comprx/comprx.toml`
//!
//! The file is only read; nothing is ever written back.

use serde::{Deserialize, Serialize};

use comprx_app::ConfigFile;
use comprx_core::frame::ImpairmentParams;
use comprx_core::interferer::DEFAULT_AMPLITUDE;

/// Default name of the impaired-sample dump.
pub const DEFAULT_DEMOD_FILE: &str = "demod.f32";

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RxConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Demodulator selection
    pub modem: ModemConfig,
    /// Impairments and diagnostic output
    pub harness: HarnessConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    ///
    /// `warn` and `error` are raised to `info` at startup so the per-frame
    /// `sync`/`snr_est` lines and the final power ratio are always printed.
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModemConfig {
    /// Registered modem name (e.g. "dummy")
    pub name: String,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            name: "dummy".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Frequency offset (Hz); the positional CLI argument takes precedence
    pub foff_hz: f32,
    /// Path of the impaired-sample dump (f32 I/Q pairs)
    pub demod_file: String,
    /// Peak amplitude of the mirrored interferer
    pub interferer_amplitude: f32,
    /// Renormalize oscillator phasors at each frame boundary
    pub renormalize_phasor: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            foff_hz: 0.0,
            demod_file: DEFAULT_DEMOD_FILE.to_string(),
            interferer_amplitude: DEFAULT_AMPLITUDE,
            renormalize_phasor: true,
        }
    }
}

impl RxConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;

        if self.modem.name.trim().is_empty() {
            return Err("[modem].name must not be empty".to_string());
        }
        if !self.harness.foff_hz.is_finite() {
            return Err("[harness].foff_hz must be finite".to_string());
        }
        if self.harness.demod_file.trim().is_empty() {
            return Err("[harness].demod_file must not be empty".to_string());
        }
        let amp = self.harness.interferer_amplitude;
        if !amp.is_finite() || amp <= 0.0 {
            return Err("[harness].interferer_amplitude must be finite and > 0".to_string());
        }
        Ok(())
    }

    /// Impairment parameters for a run at `foff_hz`.
    pub fn impairments(&self, foff_hz: f32) -> ImpairmentParams {
        ImpairmentParams {
            foff_hz,
            interferer_amplitude: self.harness.interferer_amplitude,
            renormalize_phasor: self.harness.renormalize_phasor,
        }
    }

    /// Generate an example configuration as a TOML string.
    pub fn example_toml() -> String {
        let example = Self {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            modem: ModemConfig::default(),
            harness: HarnessConfig {
                foff_hz: 12.5,
                ..HarnessConfig::default()
            },
        };

        let Ok(section) = toml::Value::try_from(&example) else {
            return String::new();
        };
        let mut root = toml::Table::new();
        root.insert(Self::section_key().to_string(), section);
        toml::to_string_pretty(&root).unwrap_or_default()
    }
}

impl ConfigFile for RxConfig {
    fn section_key() -> &'static str {
        "comprx"
    }
}

fn validate_log_level(level: Option<&str>) -> Result<(), String> {
    if let Some(level) = level {
        match level {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "[general].log_level '{}' is invalid (expected one of: trace, debug, info, warn, error)",
                    level
                ))
            }
        }
    }
    Ok(())
}
