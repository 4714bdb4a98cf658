// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! One harness run: open the modem and the diagnostic file, drive the frame
//! loop over the given streams, report the power ratio.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use tracing::{event, info};

use comprx_core::frame::ImpairmentParams;
use comprx_core::{DynResult, FrameController, RunSummary, DIAGNOSTIC_LEVEL};
use comprx_modem::ModemRegistry;

/// Everything a run needs after config and CLI have been merged.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub modem: String,
    pub demod_file: PathBuf,
    pub params: ImpairmentParams,
}

pub fn run_harness<R, W>(
    registry: &ModemRegistry,
    opts: &RunOptions,
    input: &mut R,
    output: &mut W,
) -> DynResult<RunSummary>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let modem = registry
        .open(&opts.modem)
        .map_err(|e| format!("Failed to open modem '{}': {}", opts.modem, e))?;

    let file = File::create(&opts.demod_file).map_err(|e| {
        format!(
            "Failed to create demod file '{}': {}",
            opts.demod_file.display(),
            e
        )
    })?;

    info!(
        "Starting comprx (modem: {}, nin: {}, demod file: {})",
        modem.name(),
        modem.nin(),
        opts.demod_file.display()
    );

    let controller = FrameController::new(modem, BufWriter::new(file), opts.params);
    let summary = controller.run(input, output)?;
    output.flush()?;

    info!(
        "Processed {} frames ({} samples in, {} samples out)",
        summary.frames, summary.samples_in, summary.samples_out
    );
    event!(
        DIAGNOSTIC_LEVEL,
        "Demod/Interferer power ratio: {:3.2} dB",
        summary.ratio_db()
    );
    Ok(summary)
}
