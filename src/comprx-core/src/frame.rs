// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Frame-synchronous receive loop.
//!
//! Each iteration reads `nin` complex samples (as interleaved `i16`), applies
//! the impairment chain, logs the impaired frame to the diagnostic sink,
//! hands it to the modem and writes the decoded block out. `nin` for the next
//! iteration is whatever the modem asks for after the current call.
//!
//! Impairment chain, per frame:
//! 1. coherent frequency shift by `foff_hz` (phase continuous across frames)
//! 2. `Re{}` of every sample
//! 3. add the mirrored interferer tone, then `Re{}` again
//!
//! The per-frame `sync`/`snr_est` line is emitted at [`DIAGNOSTIC_LEVEL`].
//!
//! Steps 2 and 3 only leave the wanted signal intact if both the transmit
//! side and the modem handle complex signals correctly.

use std::io::{self, Read, Write};

use thiserror::Error;
use tracing::{debug, event, Level};

use crate::interferer::{Interferer, DEFAULT_AMPLITUDE};
use crate::modem::{Modem, ModemStats};
use crate::phasor::{renormalize, UNIT};
use crate::power::PowerMeter;
use crate::sample::{
    deinterleave_i16_le, real_part, write_f32_le, write_i16_le, Sample, RAW_BYTES_PER_SAMPLE,
};
use crate::shift::freq_shift_coh;

/// Level of the per-frame and end-of-run diagnostic lines. The binary never
/// filters below it.
pub const DIAGNOSTIC_LEVEL: Level = Level::INFO;

#[derive(Debug, Error)]
pub enum RxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("modem requested nin={nin}, outside 1..={max}")]
    NinOutOfRange { nin: usize, max: usize },
}

/// Impairments applied on top of the captured signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpairmentParams {
    /// Carrier shift in Hz.
    pub foff_hz: f32,
    /// Peak amplitude of the mirrored interferer tone.
    pub interferer_amplitude: f32,
    /// Renormalize both phasors at every frame boundary.
    pub renormalize_phasor: bool,
}

impl Default for ImpairmentParams {
    fn default() -> Self {
        Self {
            foff_hz: 0.0,
            interferer_amplitude: DEFAULT_AMPLITUDE,
            renormalize_phasor: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    AwaitingInput,
    Processing,
    Drained,
}

/// Result of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame index.
    pub index: u64,
    /// Complex samples consumed.
    pub nin: usize,
    /// Decoded samples written.
    pub nout: usize,
    /// Length the modem asked for next.
    pub next_nin: usize,
    pub stats: ModemStats,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Processed(FrameReport),
    Drained,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// Complex samples consumed from the input.
    pub samples_in: u64,
    /// Decoded samples written to the output.
    pub samples_out: u64,
    pub power: PowerMeter,
}

impl RunSummary {
    /// Demod input power over interferer power, in dB.
    pub fn ratio_db(&self) -> f64 {
        self.power.ratio_db()
    }
}

/// Owns the modem and the diagnostic sink for the lifetime of a run.
///
/// Both are released when the controller is dropped, whichever way the run
/// ends.
pub struct FrameController<M: Modem, D: Write> {
    modem: M,
    diag: D,
    params: ImpairmentParams,
    fs_hz: f32,
    max_nin: usize,
    nin: usize,
    state: FrameState,
    shift_phase: Sample,
    interferer: Interferer,
    power: PowerMeter,
    raw: Vec<u8>,
    frame: Vec<Sample>,
    speech: Vec<i16>,
    frames: u64,
    samples_in: u64,
    samples_out: u64,
}

impl<M: Modem, D: Write> FrameController<M, D> {
    /// Size all buffers from the modem's advertised maxima.
    pub fn new(modem: M, diag: D, params: ImpairmentParams) -> Self {
        let max_nin = modem.max_modem_samples();
        let max_out = modem.max_speech_samples();
        let fs_hz = modem.sample_rate() as f32;
        let nin = modem.nin();
        let interferer = Interferer::new(modem.tx_centre_hz(), fs_hz, params.interferer_amplitude);

        debug!(
            "{} modem: fs={} Hz, tx_centre={} Hz, nin={}, max_nin={}, max_out={}",
            modem.name(),
            fs_hz,
            modem.tx_centre_hz(),
            nin,
            max_nin,
            max_out
        );

        Self {
            modem,
            diag,
            params,
            fs_hz,
            max_nin,
            nin,
            state: FrameState::AwaitingInput,
            shift_phase: UNIT,
            interferer,
            power: PowerMeter::new(),
            raw: vec![0u8; max_nin * RAW_BYTES_PER_SAMPLE],
            frame: vec![Sample::new(0.0, 0.0); max_nin],
            speech: vec![0i16; max_out],
            frames: 0,
            samples_in: 0,
            samples_out: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Samples the next iteration will read.
    pub fn nin(&self) -> usize {
        self.nin
    }

    pub fn power(&self) -> &PowerMeter {
        &self.power
    }

    pub fn modem(&self) -> &M {
        &self.modem
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            samples_in: self.samples_in,
            samples_out: self.samples_out,
            power: self.power,
        }
    }

    /// Run one iteration of the loop.
    ///
    /// A short read on `input` drains the controller; further calls keep
    /// returning [`FrameOutcome::Drained`].
    pub fn process_frame<R, W>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<FrameOutcome, RxError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        if self.state == FrameState::Drained {
            return Ok(FrameOutcome::Drained);
        }

        let nin = self.nin;
        if nin == 0 || nin > self.max_nin {
            return Err(RxError::NinOutOfRange {
                nin,
                max: self.max_nin,
            });
        }

        self.state = FrameState::AwaitingInput;
        let raw = &mut self.raw[..nin * RAW_BYTES_PER_SAMPLE];
        match input.read_exact(raw) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input drained after {} frames (wanted {} samples)", self.frames, nin);
                self.state = FrameState::Drained;
                return Ok(FrameOutcome::Drained);
            }
            Err(e) => return Err(e.into()),
        }

        self.state = FrameState::Processing;
        let frame = &mut self.frame[..nin];
        deinterleave_i16_le(raw, frame);

        freq_shift_coh(frame, self.params.foff_hz, self.fs_hz, &mut self.shift_phase);
        for s in frame.iter_mut() {
            *s = real_part(*s);
        }

        for s in frame.iter_mut() {
            let (a, a_power) = self.interferer.next_with_power();
            self.power.add_interferer_power(a_power);
            self.power.add_signal(*s);
            *s = real_part(*s + a);
        }

        if self.params.renormalize_phasor {
            renormalize(&mut self.shift_phase);
            self.interferer.renormalize();
        }

        write_f32_le(&mut self.diag, frame)?;

        let nout = self
            .modem
            .demod_complex(&mut self.speech, frame)
            .min(self.speech.len());
        let next_nin = self.modem.nin();
        write_i16_le(output, &self.speech[..nout])?;

        let stats = self.modem.stats();
        event!(
            DIAGNOSTIC_LEVEL,
            "sync: {}  snr_est: {:.6}",
            u8::from(stats.sync),
            stats.snr_est
        );

        let report = FrameReport {
            index: self.frames,
            nin,
            nout,
            next_nin,
            stats,
        };
        self.frames += 1;
        self.samples_in += nin as u64;
        self.samples_out += nout as u64;
        self.nin = next_nin;
        self.state = FrameState::AwaitingInput;
        Ok(FrameOutcome::Processed(report))
    }

    /// Drive the loop until the input drains, then flush and release the
    /// diagnostic sink and the modem.
    pub fn run<R, W>(mut self, input: &mut R, output: &mut W) -> Result<RunSummary, RxError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        while let FrameOutcome::Processed(_) = self.process_frame(input, output)? {}
        self.finish()
    }

    /// Flush the diagnostic sink and release everything the controller owns.
    pub fn finish(mut self) -> Result<RunSummary, RxError> {
        self.diag.flush()?;
        Ok(self.summary())
    }
}
