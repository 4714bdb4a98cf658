// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Synthetic carrier mirrored to the negative side of baseband.
//!
//! A wanted OFDM signal centred at `+fc` is unaffected by a tone at `-fc`
//! only if every downstream stage treats the signal as complex. A stage that
//! drops the imaginary part folds the tone back on top of `+fc`.

use crate::phasor::{renormalize, rotation_step, UNIT};
use crate::sample::{power, Sample};

/// Default interferer amplitude, large enough to dominate a 16-bit capture.
pub const DEFAULT_AMPLITUDE: f32 = 1.0e4;

#[derive(Debug, Clone)]
pub struct Interferer {
    amplitude: f32,
    phase: Sample,
    step: Sample,
}

impl Interferer {
    /// Tone at `-centre_hz` for a stream sampled at `fs_hz`.
    pub fn new(centre_hz: f32, fs_hz: f32, amplitude: f32) -> Self {
        Self {
            amplitude,
            phase: UNIT,
            step: rotation_step(centre_hz, fs_hz).conj(),
        }
    }

    /// Per-sample rotation (conjugate of the forward carrier rotation).
    pub fn step(&self) -> Sample {
        self.step
    }

    /// Current phasor state.
    pub fn phase(&self) -> Sample {
        self.phase
    }

    /// Produce the next interferer sample and advance the phasor.
    pub fn next_sample(&mut self) -> Sample {
        let out = self.phase.scale(self.amplitude);
        self.phase *= self.step;
        out
    }

    /// Next sample together with its squared magnitude.
    pub fn next_with_power(&mut self) -> (Sample, f32) {
        let s = self.next_sample();
        (s, power(s))
    }

    pub fn renormalize(&mut self) {
        renormalize(&mut self.phase);
    }
}
