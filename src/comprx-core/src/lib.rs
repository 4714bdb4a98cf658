// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

pub mod frame;
pub mod interferer;
pub mod modem;
pub mod phasor;
pub mod power;
pub mod sample;
pub mod shift;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use frame::{
    FrameController, FrameOutcome, FrameReport, FrameState, RunSummary, RxError,
    DIAGNOSTIC_LEVEL,
};
pub use interferer::Interferer;
pub use modem::{Modem, ModemStats};
pub use power::PowerMeter;
pub use sample::Sample;
pub use shift::freq_shift_coh;
