// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Parse a config log level, falling back to INFO if None or invalid.
pub fn parse_level(log_level: Option<&str>) -> Level {
    log_level
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}

/// Configured level, raised to `floor` if the config asks for less output.
pub fn effective_level(log_level: Option<&str>, floor: Level) -> Level {
    parse_level(log_level).max(floor)
}

/// Install the global subscriber.
///
/// Everything goes to stderr (stdout carries the decoded sample stream).
/// Events at `floor` and above always pass, whatever the config says.
/// Colour codes are only emitted when stderr is a terminal, so redirected
/// logs stay plain text.
pub fn init_logging(log_level: Option<&str>, floor: Level) {
    let stderr_is_tty = std::io::stderr().is_terminal();

    FmtSubscriber::builder()
        .with_target(false)
        .with_max_level(effective_level(log_level, floor))
        .with_ansi(stderr_is_tty)
        .with_writer(std::io::stderr)
        .init();
}
