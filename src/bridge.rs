// Copyright 2026 Fanlog Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A bridge forwarding records from the `log` crate to the default logger.
//!
//! Error, warn and info records map to the matching severity; debug and
//! trace records map to verbosity-gated info at levels 1 and 2, so they
//! only appear once [`set_level`][crate::set_level] raises the threshold.
//! The record target is prepended to the message; the rendered call site is
//! that of the bridge, since the `log` facade does not carry one through.

use crate::registry;

struct DefaultForwarder(());

impl log::Log for DefaultForwarder {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        match metadata.level() {
            log::Level::Debug => registry::default().level() >= 1,
            log::Level::Trace => registry::default().level() >= 2,
            _ => true,
        }
    }

    fn log(&self, record: &log::Record) {
        let logger = registry::default();
        let msg = if record.target().is_empty() {
            record.args().to_string()
        } else {
            format!("{}: {}", record.target(), record.args())
        };
        match record.level() {
            log::Level::Error => logger.error(&msg),
            log::Level::Warn => logger.warn(&msg),
            log::Level::Info => logger.info(&msg),
            log::Level::Debug => logger.verbosity(1).info(&msg),
            log::Level::Trace => logger.verbosity(2).info(&msg),
        }
    }

    fn flush(&self) {}
}

/// Sets up the log crate global logger to forward into this facility's
/// default logger.
///
/// This should be called early in the execution of a Rust program, usually
/// next to [`init`][crate::init].
///
/// # Errors
///
/// Returns an error if the log crate global logger has already been set.
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static FORWARDER: DefaultForwarder = DefaultForwarder(());
    log::set_logger(&FORWARDER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Sets up the log crate global logger to forward into this facility's
/// default logger.
///
/// # Panics
///
/// Panics if the log crate global logger has already been set.
pub fn setup_log_crate() {
    try_setup_log_crate()
        .expect("setup_log_crate must be called before the log crate global logger initialized");
}
