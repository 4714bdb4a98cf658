// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Complex sample model and raw stream conversions.
//!
//! Arithmetic (`+`, `*`, `scale`, `conj`) comes from [`num_complex::Complex`];
//! this module adds the projections and byte layouts the harness needs.
//!
//! Raw layouts (all little-endian):
//! - capture input: interleaved `i16` pairs `[re, im, re, im, ...]`
//! - diagnostic sink: interleaved `f32` pairs
//! - decoded output: plain `i16` samples

use std::io::{self, Write};

use num_complex::Complex;

/// One complex baseband sample.
pub type Sample = Complex<f32>;

/// Bytes per complex sample in the capture input (two `i16`).
pub const RAW_BYTES_PER_SAMPLE: usize = 4;

/// Squared magnitude `re² + im²`.
#[inline]
pub fn power(s: Sample) -> f32 {
    s.re * s.re + s.im * s.im
}

/// Keep only the real component.
#[inline]
pub fn real_part(s: Sample) -> Sample {
    Sample::new(s.re, 0.0)
}

/// Deinterleave little-endian `i16` (re, im) pairs into `out`.
///
/// Converts `min(raw.len() / 4, out.len())` samples and returns that count.
pub fn deinterleave_i16_le(raw: &[u8], out: &mut [Sample]) -> usize {
    let mut n = 0;
    for (chunk, slot) in raw.chunks_exact(RAW_BYTES_PER_SAMPLE).zip(out.iter_mut()) {
        let re = i16::from_le_bytes([chunk[0], chunk[1]]);
        let im = i16::from_le_bytes([chunk[2], chunk[3]]);
        *slot = Sample::new(f32::from(re), f32::from(im));
        n += 1;
    }
    n
}

/// Write samples as little-endian `f32` (re, im) pairs.
pub fn write_f32_le<W: Write + ?Sized>(writer: &mut W, samples: &[Sample]) -> io::Result<()> {
    let mut bytes = Vec::with_capacity(samples.len() * 8);
    for s in samples {
        bytes.extend_from_slice(&s.re.to_le_bytes());
        bytes.extend_from_slice(&s.im.to_le_bytes());
    }
    writer.write_all(&bytes)
}

/// Write `i16` samples little-endian.
pub fn write_i16_le<W: Write + ?Sized>(writer: &mut W, samples: &[i16]) -> io::Result<()> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    writer.write_all(&bytes)
}
