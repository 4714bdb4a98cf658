// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Dummy modem for development and testing.
//!
//! Presents the frame geometry of a 700D-style OFDM modem (8 kHz, 1.5 kHz
//! carrier, 1280-sample frames) but never acquires sync. The real part of each
//! input sample is copied to the output, saturated to `i16`, so the decoded
//! stream can be inspected alongside the diagnostic file.

use comprx_core::{Modem, ModemStats, Sample};

const SAMPLE_RATE: u32 = 8_000;
const TX_CENTRE_HZ: f32 = 1_500.0;
/// OFDM symbol: 144 samples plus a 16-sample cyclic prefix.
const SYMBOL_SAMPLES: usize = 144 + 16;
/// Eight symbols per modem frame.
const SAMPLES_PER_FRAME: usize = 8 * SYMBOL_SAMPLES;
/// Timing tracking may stretch a frame by a quarter symbol.
const MAX_SAMPLES_PER_FRAME: usize = SAMPLES_PER_FRAME + SYMBOL_SAMPLES / 4;

pub struct DummyModem {
    nin: usize,
    frames: u64,
}

impl DummyModem {
    pub fn new() -> Self {
        Self {
            nin: SAMPLES_PER_FRAME,
            frames: 0,
        }
    }

    /// Frames demodulated so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for DummyModem {
    fn default() -> Self {
        Self::new()
    }
}

impl Modem for DummyModem {
    fn name(&self) -> &str {
        "dummy"
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn tx_centre_hz(&self) -> f32 {
        TX_CENTRE_HZ
    }

    fn max_modem_samples(&self) -> usize {
        MAX_SAMPLES_PER_FRAME
    }

    fn max_speech_samples(&self) -> usize {
        MAX_SAMPLES_PER_FRAME
    }

    fn nin(&self) -> usize {
        self.nin
    }

    fn demod_complex(&mut self, speech_out: &mut [i16], demod_in: &[Sample]) -> usize {
        let n = demod_in.len().min(speech_out.len());
        for (out, s) in speech_out.iter_mut().zip(demod_in.iter()) {
            // `as` saturates out-of-range floats and maps NaN to 0.
            *out = s.re as i16;
        }
        self.frames += 1;
        n
    }

    fn stats(&self) -> ModemStats {
        ModemStats {
            sync: false,
            snr_est: 0.0,
        }
    }
}
