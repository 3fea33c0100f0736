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

//! The process-wide default logger and the free-function logging facade.
//!
//! One mutex guards both the default-logger slot and every record write of
//! every [`Logger`] in the process, so output to destinations shared
//! between loggers (stderr in particular) never interleaves mid-line.

use std::fmt;
use std::panic::Location;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::layout::FormatFlags;
use crate::logger::Level;
use crate::logger::Logger;
use crate::logger::Verbose;

static DEFAULT: Mutex<Option<Logger>> = Mutex::new(None);

/// Acquires the process-wide log lock. Also guards the default-logger slot.
pub(crate) fn lock() -> MutexGuard<'static, Option<Logger>> {
    DEFAULT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The current default logger, creating the stderr fallback on first use.
pub(crate) fn default() -> Logger {
    lock().get_or_insert_with(Logger::fallback).clone()
}

/// Installs `logger` as the default iff no initialized default exists yet.
/// The decision and the replacement happen under the process-wide lock.
pub(crate) fn install(logger: &Logger) {
    let mut slot = lock();
    let current = slot.get_or_insert_with(Logger::fallback);
    if !current.is_initialized() {
        *current = logger.clone();
    }
}

/// Restores the pristine stderr fallback. Test isolation only.
#[cfg(test)]
pub(crate) fn reset() {
    *lock() = Some(Logger::fallback());
}

#[cfg(test)]
pub(crate) fn test_guard() -> MutexGuard<'static, ()> {
    static TEST_LOCK: Mutex<()> = Mutex::new(());
    TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Info level logs through the default logger.
#[track_caller]
pub fn info(msg: impl fmt::Display) {
    default().info(msg);
}

/// Acts as [`info`] with an explicit call site.
pub fn info_at(site: &'static Location<'static>, msg: impl fmt::Display) {
    default().info_at(site, msg);
}

/// Newline-appended info level logs through the default logger.
#[track_caller]
pub fn infoln(msg: impl fmt::Display) {
    default().infoln(msg);
}

/// Formatted info level logs through the default logger.
#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    default().infof(args);
}

/// Warn level logs through the default logger.
#[track_caller]
pub fn warn(msg: impl fmt::Display) {
    default().warn(msg);
}

/// Acts as [`warn`] with an explicit call site.
pub fn warn_at(site: &'static Location<'static>, msg: impl fmt::Display) {
    default().warn_at(site, msg);
}

/// Newline-appended warn level logs through the default logger.
#[track_caller]
pub fn warnln(msg: impl fmt::Display) {
    default().warnln(msg);
}

/// Formatted warn level logs through the default logger.
#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    default().warnf(args);
}

/// Error level logs through the default logger.
#[track_caller]
pub fn error(msg: impl fmt::Display) {
    default().error(msg);
}

/// Acts as [`error`] with an explicit call site.
pub fn error_at(site: &'static Location<'static>, msg: impl fmt::Display) {
    default().error_at(site, msg);
}

/// Newline-appended error level logs through the default logger.
#[track_caller]
pub fn errorln(msg: impl fmt::Display) {
    default().errorln(msg);
}

/// Formatted error level logs through the default logger.
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    default().errorf(args);
}

/// Fatal level logs through the default logger. Terminates the process
/// with status 1 after best-effort teardown.
#[track_caller]
pub fn fatal(msg: impl fmt::Display) -> ! {
    default().fatal(msg)
}

/// Acts as [`fatal`] with an explicit call site.
pub fn fatal_at(site: &'static Location<'static>, msg: impl fmt::Display) -> ! {
    default().fatal_at(site, msg)
}

/// Newline-appended fatal level logs through the default logger.
/// Terminates the process.
#[track_caller]
pub fn fatalln(msg: impl fmt::Display) -> ! {
    default().fatalln(msg)
}

/// Formatted fatal level logs through the default logger. Terminates the
/// process.
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default().fatalf(args)
}

/// Sets the verbosity threshold of the default logger.
#[track_caller]
pub fn set_level(level: Level) {
    default().set_level(level);
}

/// Replaces the formatting flags of all four default-logger channels.
pub fn set_flags(flags: FormatFlags) {
    default().set_flags(flags);
}

/// Returns a [`Verbose`] handle bound to the default logger.
pub fn verbosity(level: Level) -> Verbose {
    default().verbosity(level)
}

/// Closes the default logger.
pub fn close() {
    default().close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::testing::InMemory;
    use crate::init;

    #[test]
    fn fallback_default_is_uninitialized() {
        let _guard = test_guard();
        reset();

        let logger = default();
        assert!(!logger.is_initialized());
        // close on the pristine default performs no work and no error
        close();
    }

    #[test]
    fn first_init_becomes_the_default() {
        let _guard = test_guard();
        reset();

        let buf1 = InMemory::new();
        let l1 = init("test1", false, false, buf1.clone());
        l1.set_flags(FormatFlags::none());

        // a second init returns a distinct functional logger but never
        // replaces the installed default
        let buf2 = InMemory::new();
        let l2 = init("test2", false, false, buf2.clone());
        l2.set_flags(FormatFlags::none());

        l1.info("logger #1");
        l2.info("logger #2");
        info("default logger");

        assert_eq!(buf1.lines().len(), 2);
        assert_eq!(buf2.lines().len(), 1);
        assert_eq!(
            buf1.lines(),
            vec!["[INFO]: logger #1", "[INFO]: default logger"]
        );
        assert_eq!(buf2.lines(), vec!["[INFO]: logger #2"]);
    }

    #[test]
    fn facade_shapes_delegate_to_the_default() {
        let _guard = test_guard();
        reset();

        let buffer = InMemory::new();
        init("facade", false, false, buffer.clone());
        set_flags(FormatFlags::none());

        info("i");
        infoln("i");
        infof(format_args!("i"));
        warn("w");
        warnln("w");
        warnf(format_args!("w"));
        error("e");
        errorln("e");
        errorf(format_args!("e"));
        error_at(Location::caller(), "e");

        assert_eq!(
            buffer.lines(),
            vec![
                "[INFO]: i", "[INFO]: i", "[INFO]: i", "[WARN]: w", "[WARN]: w", "[WARN]: w",
                "[ERROR]: e", "[ERROR]: e", "[ERROR]: e", "[ERROR]: e",
            ]
        );
    }

    #[test]
    fn default_verbosity_gate_tracks_the_default_level() {
        let _guard = test_guard();
        reset();

        let buffer = InMemory::new();
        init("verbosity", false, false, buffer.clone());
        set_flags(FormatFlags::none());

        assert!(!verbosity(1).enabled());
        set_level(2);
        assert!(verbosity(2).enabled());
        assert!(!verbosity(3).enabled());

        verbosity(2).info("gated");
        assert_eq!(
            buffer.lines(),
            vec!["[INFO]: Info verbosity set to 2", "[INFO]: gated"]
        );
    }
}
