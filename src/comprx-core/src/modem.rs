// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Contract of the coherent demodulator driven by the harness.
//!
//! Opening a modem is the job of a registry (see the `comprx-modem` crate);
//! closing it is `Drop`.

use crate::sample::Sample;

/// Snapshot of modem receive statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModemStats {
    /// Frame synchronization acquired.
    pub sync: bool,
    /// Estimated SNR in dB.
    pub snr_est: f32,
}

/// Frame-asynchronous demodulator taking complex input.
pub trait Modem {
    /// Short human-readable name (e.g. "dummy").
    fn name(&self) -> &str;

    /// Modem sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Centre frequency of the transmitted signal in Hz.
    fn tx_centre_hz(&self) -> f32;

    /// Largest number of complex samples `nin()` will ever ask for.
    fn max_modem_samples(&self) -> usize;

    /// Largest number of samples one `demod_complex` call writes.
    fn max_speech_samples(&self) -> usize;

    /// Number of complex samples required by the next `demod_complex` call.
    /// Must be queried after every call; it changes as the modem tracks timing.
    fn nin(&self) -> usize;

    /// Demodulate exactly `nin()` samples from `demod_in`, writing decoded
    /// output into `speech_out`. Returns the number of samples written.
    fn demod_complex(&mut self, speech_out: &mut [i16], demod_in: &[Sample]) -> usize;

    fn stats(&self) -> ModemStats;
}

impl<M: Modem + ?Sized> Modem for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    fn tx_centre_hz(&self) -> f32 {
        (**self).tx_centre_hz()
    }

    fn max_modem_samples(&self) -> usize {
        (**self).max_modem_samples()
    }

    fn max_speech_samples(&self) -> usize {
        (**self).max_speech_samples()
    }

    fn nin(&self) -> usize {
        (**self).nin()
    }

    fn demod_complex(&mut self, speech_out: &mut [i16], demod_in: &[Sample]) -> usize {
        (**self).demod_complex(speech_out, demod_in)
    }

    fn stats(&self) -> ModemStats {
        (**self).stats()
    }
}
