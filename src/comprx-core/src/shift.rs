// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use crate::phasor::rotation_step;
use crate::sample::Sample;

/// Coherent frequency shift of `samples` by `foff_hz`, in place.
///
/// Each sample is multiplied by the current `phase`, then `phase` advances by
/// one rotation step. `phase` carries over between calls so consecutive frames
/// see a continuous carrier. No renormalization happens here; callers that
/// run for long captures use [`crate::phasor::renormalize`] at frame edges.
pub fn freq_shift_coh(samples: &mut [Sample], foff_hz: f32, fs_hz: f32, phase: &mut Sample) {
    let step = rotation_step(foff_hz, fs_hz);
    for s in samples.iter_mut() {
        *s *= *phase;
        *phase *= step;
    }
}
