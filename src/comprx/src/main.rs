// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;
mod run;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use comprx_app::{init_logging, ConfigFile};
use comprx_core::{DynResult, DIAGNOSTIC_LEVEL};
use comprx_modem::{normalize_name, register_builtin_modems_on, ModemRegistry};

use config::RxConfig;
use run::{run_harness, RunOptions};

const PKG_DESCRIPTION: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " - complex-valued receive harness (raw s16 I/Q on stdin, s16 decoded samples on stdout)"
);

#[derive(Debug, Parser)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Frequency offset applied to the capture (Hz)
    #[arg(value_name = "FOFF_HZ", allow_negative_numbers = true)]
    foff_hz: Option<f32>,
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// List registered modems and exit
    #[arg(long = "list-modems")]
    list_modems: bool,
    /// Modem to demodulate with (e.g. dummy)
    #[arg(short = 'm', long = "modem")]
    modem: Option<String>,
    /// Where to write the impaired demod input (f32 I/Q pairs)
    #[arg(short = 'o', long = "demod-file", value_name = "FILE")]
    demod_file: Option<PathBuf>,
}

fn resolve_options(cli: &Cli, cfg: &RxConfig, registry: &ModemRegistry) -> DynResult<RunOptions> {
    let modem = normalize_name(cli.modem.as_deref().unwrap_or(&cfg.modem.name));
    if !registry.is_modem_registered(&modem) {
        return Err(format!(
            "Unknown modem: {} (available: {})",
            modem,
            registry.registered_modems().join(", ")
        )
        .into());
    }

    let foff_hz = cli.foff_hz.unwrap_or(cfg.harness.foff_hz);
    if !foff_hz.is_finite() {
        return Err(format!("Frequency offset must be finite (got {})", foff_hz).into());
    }

    let demod_file = cli
        .demod_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.harness.demod_file));

    Ok(RunOptions {
        modem,
        demod_file,
        params: cfg.impairments(foff_hz),
    })
}

fn main() -> DynResult<()> {
    let mut registry = ModemRegistry::new();
    register_builtin_modems_on(&mut registry);

    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", RxConfig::example_toml());
        return Ok(());
    }

    if cli.list_modems {
        for name in registry.registered_modems() {
            println!("{}", name);
        }
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = RxConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        RxConfig::load_from_default_paths()?
    };
    cfg.validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    init_logging(cfg.general.log_level.as_deref(), DIAGNOSTIC_LEVEL);

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let opts = resolve_options(&cli, &cfg, &registry)?;
    if let Some(foff_hz) = cli.foff_hz {
        info!("foff_hz: {:.6}", foff_hz);
    }

    let mut input = io::stdin().lock();
    let mut output = BufWriter::new(io::stdout().lock());
    run_harness(&registry, &opts, &mut input, &mut output)?;
    Ok(())
}
