// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Unit phasor helpers shared by the frequency shifter and the interferer.

use std::f64::consts::TAU;

use crate::sample::Sample;

/// Phasor at zero phase.
pub const UNIT: Sample = Sample::new(1.0, 0.0);

/// Per-sample rotation `(cos θ, sin θ)` with `θ = 2π·freq_hz / fs_hz`.
///
/// The angle is evaluated in `f64` and narrowed once.
pub fn rotation_step(freq_hz: f32, fs_hz: f32) -> Sample {
    let theta = TAU * f64::from(freq_hz) / f64::from(fs_hz);
    Sample::new(theta.cos() as f32, theta.sin() as f32)
}

/// Pull a drifting phasor back onto the unit circle.
///
/// A zero or non-finite magnitude leaves the phasor untouched.
pub fn renormalize(phase: &mut Sample) {
    let mag = phase.norm();
    if mag > 0.0 && mag.is_finite() {
        *phase /= mag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_frequency_is_identity_step() {
        assert_eq!(rotation_step(0.0, 8000.0), UNIT);
    }

    #[test]
    fn step_has_unit_magnitude() {
        for f in [-3000.0, -1.5, 1.0, 50.0, 1500.0, 3999.0] {
            let step = rotation_step(f, 8000.0);
            assert!((step.norm() - 1.0).abs() < 1e-6, "f={} |step|={}", f, step.norm());
        }
    }

    #[test]
    fn quarter_rate_is_quarter_turn() {
        let step = rotation_step(2000.0, 8000.0);
        assert!(step.re.abs() < 1e-6);
        assert!((step.im - 1.0).abs() < 1e-6);
    }

    #[test]
    fn renormalize_restores_unit_magnitude() {
        let mut p = Sample::new(0.6, 0.9);
        renormalize(&mut p);
        assert!((p.norm() - 1.0).abs() < 1e-6);
        assert!((p.arg() - (0.9f32).atan2(0.6)).abs() < 1e-6);
    }

    #[test]
    fn renormalize_leaves_zero_alone() {
        let mut p = Sample::new(0.0, 0.0);
        renormalize(&mut p);
        assert_eq!(p, Sample::new(0.0, 0.0));
    }
}
