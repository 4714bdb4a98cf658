// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use crate::sample::{power, Sample};

/// Running power totals for the signal path and the interferer path.
///
/// Totals only grow; there is no reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerMeter {
    signal: f64,
    interferer: f64,
}

impl PowerMeter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_signal(&mut self, s: Sample) {
        self.signal += f64::from(power(s));
    }

    /// Add an already squared interferer magnitude.
    #[inline]
    pub fn add_interferer_power(&mut self, p: f32) {
        self.interferer += f64::from(p);
    }

    pub fn signal(&self) -> f64 {
        self.signal
    }

    pub fn interferer(&self) -> f64 {
        self.interferer
    }

    /// `10·log10(signal / interferer)`.
    ///
    /// Zero signal power gives `-inf`; zero on both paths gives NaN.
    pub fn ratio_db(&self) -> f64 {
        10.0 * (self.signal / self.interferer).log10()
    }
}
