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

use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::process;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use crate::destination::Destination;
use crate::destination::Stderr;
use crate::destination::Stdout;
use crate::layout;
use crate::layout::FormatFlags;
use crate::registry;
use crate::severity::Severity;

/// The verbosity threshold for verbose info logging. See [`Logger::verbosity`].
pub type Level = i32;

#[derive(Debug)]
struct Inner {
    /// One ordered destination list per severity, indexed by `Severity`.
    channels: [Vec<Arc<dyn Destination>>; Severity::COUNT],
    /// Destinations with the close capability, in insertion order,
    /// deduplicated by identity.
    closers: Vec<Arc<dyn Destination>>,
    flags: Mutex<FormatFlags>,
    level: AtomicI32,
    initialized: bool,
    closed: AtomicBool,
    preamble: Option<&'static str>,
}

/// A logging handle owning four per-severity output channels.
///
/// Multiple loggers can be used simultaneously even when they share
/// destinations: one process-wide lock serializes all record writes, so
/// cross-logger output never interleaves mid-line. Cloning yields another
/// handle to the same logger.
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

/// Initializes logging and should be called early in `main`.
///
/// Logging works before `init` is called, but records only go to stderr,
/// prefixed with a warning that the logger is not yet initiated. The first
/// call installs the produced logger as the process-wide default; every
/// call, first or not, returns a new independent logger writing to
/// `primary`.
///
/// With `system_log` set, three additional destinations bound to the OS
/// system log are attached to the info, warn and error channels. Failure to
/// reach the system log does not abort construction; it is reported once
/// through the new logger's error channel. With `verbose` set, info and
/// warn records are additionally written to stdout. Error and fatal records
/// always go to stderr as well.
///
/// If `primary` is closable, [`Logger::close`] will close it, alongside any
/// system-log destinations.
#[track_caller]
pub fn init(name: &str, verbose: bool, system_log: bool, primary: impl Destination) -> Logger {
    let primary: Arc<dyn Destination> = Arc::new(primary);

    let mut syslog_err = None;
    let (sys_info, sys_warn, sys_error) = if system_log {
        match open_system_log(name) {
            Ok((info, warn, error)) => (Some(info), Some(warn), Some(error)),
            Err(err) => {
                syslog_err = Some(err);
                (None, None, None)
            }
        }
    } else {
        (None, None, None)
    };

    let mut info_targets = vec![primary.clone()];
    let mut warn_targets = vec![primary.clone()];
    let mut error_targets = vec![primary];
    if let Some(target) = sys_info {
        info_targets.push(target);
    }
    if let Some(target) = sys_warn {
        warn_targets.push(target);
    }
    if let Some(target) = sys_error {
        error_targets.push(target);
    }

    error_targets.push(Arc::new(Stderr::default()));
    if verbose {
        let stdout: Arc<dyn Destination> = Arc::new(Stdout::default());
        info_targets.push(stdout.clone());
        warn_targets.push(stdout);
    }

    let mut closers: Vec<Arc<dyn Destination>> = Vec::new();
    for target in info_targets
        .iter()
        .chain(warn_targets.iter())
        .chain(error_targets.iter())
    {
        if target.closable() && !closers.iter().any(|closer| Arc::ptr_eq(closer, target)) {
            closers.push(target.clone());
        }
    }

    let logger = Logger {
        inner: Arc::new(Inner {
            channels: [
                info_targets,
                warn_targets,
                error_targets.clone(),
                error_targets,
            ],
            closers,
            flags: Mutex::new(FormatFlags::default()),
            level: AtomicI32::new(0),
            initialized: true,
            closed: AtomicBool::new(false),
            preamble: None,
        }),
    };

    if let Some(err) = syslog_err {
        logger.errorf(format_args!("system log unavailable: {err:#}"));
    }

    registry::install(&logger);
    logger
}

impl Logger {
    /// The stderr-only logger that serves as the default before [`init`]
    /// runs. Records carry the uninitialized marker and nothing is closable.
    pub(crate) fn fallback() -> Logger {
        let stderr: Arc<dyn Destination> = Arc::new(Stderr::default());
        Logger {
            inner: Arc::new(Inner {
                channels: [
                    vec![stderr.clone()],
                    vec![stderr.clone()],
                    vec![stderr.clone()],
                    vec![stderr],
                ],
                closers: Vec::new(),
                flags: Mutex::new(FormatFlags::default()),
                level: AtomicI32::new(0),
                initialized: false,
                closed: AtomicBool::new(false),
                preamble: Some(layout::INIT_TEXT),
            }),
        }
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.inner.initialized
    }

    /// Routes one record to every destination of the severity's channel.
    ///
    /// Holds the process-wide lock for the whole fan-out, so records from
    /// concurrent callers (and other loggers) never interleave. A failed
    /// write is reported to stderr and the remaining destinations still
    /// receive the record.
    fn output(&self, severity: Severity, site: &'static Location<'static>, msg: &str) {
        let _guard = registry::lock();
        let flags = *self.inner.flags.lock().unwrap_or_else(PoisonError::into_inner);
        let line = layout::render(flags, self.inner.preamble, severity, site, msg);
        for target in &self.inner.channels[severity.index()] {
            if let Err(err) = target.write_record(&line) {
                let _ = writeln!(
                    std::io::stderr(),
                    "[ERROR]: Failed to write log record: {err:#}"
                );
            }
        }
    }

    /// Info level logs.
    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        self.output(Severity::Info, Location::caller(), &msg.to_string());
    }

    /// Acts as [`info`][Logger::info] with an explicit call site, for
    /// wrappers that capture their own caller via `#[track_caller]`.
    pub fn info_at(&self, site: &'static Location<'static>, msg: impl fmt::Display) {
        self.output(Severity::Info, site, &msg.to_string());
    }

    /// Newline-appended info level logs.
    #[track_caller]
    pub fn infoln(&self, msg: impl fmt::Display) {
        self.output(Severity::Info, Location::caller(), &format!("{msg}\n"));
    }

    /// Formatted info level logs: `logger.infof(format_args!(...))`.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.output(Severity::Info, Location::caller(), &args.to_string());
    }

    /// Warn level logs.
    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        self.output(Severity::Warn, Location::caller(), &msg.to_string());
    }

    /// Acts as [`warn`][Logger::warn] with an explicit call site.
    pub fn warn_at(&self, site: &'static Location<'static>, msg: impl fmt::Display) {
        self.output(Severity::Warn, site, &msg.to_string());
    }

    /// Newline-appended warn level logs.
    #[track_caller]
    pub fn warnln(&self, msg: impl fmt::Display) {
        self.output(Severity::Warn, Location::caller(), &format!("{msg}\n"));
    }

    /// Formatted warn level logs.
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.output(Severity::Warn, Location::caller(), &args.to_string());
    }

    /// Error level logs.
    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        self.output(Severity::Error, Location::caller(), &msg.to_string());
    }

    /// Acts as [`error`][Logger::error] with an explicit call site.
    pub fn error_at(&self, site: &'static Location<'static>, msg: impl fmt::Display) {
        self.output(Severity::Error, site, &msg.to_string());
    }

    /// Newline-appended error level logs.
    #[track_caller]
    pub fn errorln(&self, msg: impl fmt::Display) {
        self.output(Severity::Error, Location::caller(), &format!("{msg}\n"));
    }

    /// Formatted error level logs.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.output(Severity::Error, Location::caller(), &args.to_string());
    }

    /// Fatal level logs. Closes the logger's destinations and terminates
    /// the process with status 1; control never returns to the caller.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.output(Severity::Fatal, Location::caller(), &msg.to_string());
        self.terminate()
    }

    /// Acts as [`fatal`][Logger::fatal] with an explicit call site.
    pub fn fatal_at(&self, site: &'static Location<'static>, msg: impl fmt::Display) -> ! {
        self.output(Severity::Fatal, site, &msg.to_string());
        self.terminate()
    }

    /// Newline-appended fatal level logs. Terminates the process.
    #[track_caller]
    pub fn fatalln(&self, msg: impl fmt::Display) -> ! {
        self.output(Severity::Fatal, Location::caller(), &format!("{msg}\n"));
        self.terminate()
    }

    /// Formatted fatal level logs. Terminates the process.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.output(Severity::Fatal, Location::caller(), &args.to_string());
        self.terminate()
    }

    fn terminate(&self) -> ! {
        self.close();
        process::exit(1);
    }

    /// The current verbosity threshold.
    pub fn level(&self) -> Level {
        self.inner.level.load(Ordering::Relaxed)
    }

    /// Sets the verbosity threshold for verbose info logging and announces
    /// the new value with one info record.
    #[track_caller]
    pub fn set_level(&self, level: Level) {
        self.inner.level.store(level, Ordering::Relaxed);
        self.output(
            Severity::Info,
            Location::caller(),
            &format!("Info verbosity set to {level}"),
        );
    }

    /// The formatting flags currently applied to all four channels.
    pub fn flags(&self) -> FormatFlags {
        *self.inner.flags.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the formatting flags of all four channels uniformly.
    pub fn set_flags(&self, flags: FormatFlags) {
        *self.inner.flags.lock().unwrap_or_else(PoisonError::into_inner) = flags;
    }

    /// Returns a [`Verbose`] handle whose enabled flag is decided now, by
    /// comparing the logger's current level against `level`. Later
    /// [`set_level`][Logger::set_level] calls do not affect handles already
    /// created.
    pub fn verbosity(&self, level: Level) -> Verbose {
        Verbose {
            enabled: self.level() >= level,
            logger: self.clone(),
        }
    }

    /// Closes all of the logger's closable destinations in insertion order.
    ///
    /// A failure to close one destination is printed to stderr and the
    /// remainder are still closed; `close` itself never fails. Closing an
    /// uninitialized or already-closed logger does nothing. Logging through
    /// a closed logger is a contract violation and is not guarded.
    pub fn close(&self) {
        let _guard = registry::lock();
        if !self.inner.initialized || self.inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        for closer in &self.inner.closers {
            if let Err(err) = closer.close() {
                let _ = writeln!(
                    std::io::stderr(),
                    "[ERROR]: Failed to close log destination {closer:?}: {err:#}"
                );
            }
        }
    }
}

/// A verbosity gate: info-style logging that is a complete no-op when the
/// owning logger's level was below the requested threshold at creation
/// time. No formatting, locking or writing happens while disabled.
#[derive(Debug, Clone)]
pub struct Verbose {
    enabled: bool,
    logger: Logger,
}

impl Verbose {
    /// Whether records logged through this handle are emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Equivalent to [`Logger::info`] when this handle is enabled.
    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        if self.enabled {
            self.logger
                .output(Severity::Info, Location::caller(), &msg.to_string());
        }
    }

    /// Equivalent to [`Logger::infoln`] when this handle is enabled.
    #[track_caller]
    pub fn infoln(&self, msg: impl fmt::Display) {
        if self.enabled {
            self.logger
                .output(Severity::Info, Location::caller(), &format!("{msg}\n"));
        }
    }

    /// Equivalent to [`Logger::infof`] when this handle is enabled.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            self.logger
                .output(Severity::Info, Location::caller(), &args.to_string());
        }
    }
}

#[cfg(all(feature = "syslog", unix))]
fn open_system_log(
    name: &str,
) -> anyhow::Result<(Arc<dyn Destination>, Arc<dyn Destination>, Arc<dyn Destination>)> {
    let (info, warn, error) = crate::syslog::open(name)?;
    Ok((Arc::new(info), Arc::new(warn), Arc::new(error)))
}

#[cfg(not(all(feature = "syslog", unix)))]
fn open_system_log(
    _name: &str,
) -> anyhow::Result<(Arc<dyn Destination>, Arc<dyn Destination>, Arc<dyn Destination>)> {
    Err(anyhow::anyhow!(
        "system log support is not available in this build"
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::destination::testing::InMemory;

    #[derive(Debug, Default)]
    struct CloseCounter {
        closes: AtomicUsize,
    }

    impl Destination for Arc<CloseCounter> {
        fn write_record(&self, _line: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn closable(&self) -> bool {
            true
        }

        fn close(&self) -> anyhow::Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn records_route_to_the_primary_destination() {
        let _guard = registry::test_guard();
        let buffer = InMemory::new();
        let logger = init("routing", false, false, buffer.clone());
        logger.set_flags(FormatFlags::none());

        logger.info("i");
        logger.warn("w");
        logger.error("e");

        assert_eq!(
            buffer.lines(),
            vec!["[INFO]: i", "[WARN]: w", "[ERROR]: e"]
        );
    }

    #[test]
    fn call_shapes_agree_on_the_record_text() {
        let _guard = registry::test_guard();
        let buffer = InMemory::new();
        let logger = init("shapes", false, false, buffer.clone());
        logger.set_flags(FormatFlags::none());

        logger.info("x=1");
        logger.infoln("x=1");
        logger.infof(format_args!("x={}", 1));
        logger.info_at(Location::caller(), "x=1");

        assert_eq!(buffer.lines(), vec!["[INFO]: x=1"; 4]);
    }

    #[test]
    fn verbosity_is_a_snapshot_of_the_level() {
        let _guard = registry::test_guard();
        let buffer = InMemory::new();
        let logger = init("verbosity", false, false, buffer.clone());
        logger.set_flags(FormatFlags::none());

        let quiet = logger.verbosity(1);
        assert!(!quiet.enabled());
        quiet.info("dropped");
        quiet.infof(format_args!("dropped {}", 1));

        logger.set_level(1);
        let loud = logger.verbosity(1);
        assert!(loud.enabled());
        loud.infoln("kept");

        // the earlier handle does not observe the level change
        quiet.info("still dropped");
        logger.set_level(0);
        loud.info("still kept");

        assert_eq!(
            buffer.lines(),
            vec![
                "[INFO]: Info verbosity set to 1",
                "[INFO]: kept",
                "[INFO]: Info verbosity set to 0",
                "[INFO]: still kept",
            ]
        );
    }

    #[test]
    fn verbose_extends_info_and_warn_channels_with_stdout() {
        let _guard = registry::test_guard();
        let quiet = init("quiet", false, false, InMemory::new());
        let verbose = init("verbose", true, false, InMemory::new());

        // primary only on info/warn; error carries primary plus stderr
        let channels = &quiet.inner.channels;
        assert_eq!(channels[Severity::Info.index()].len(), 1);
        assert_eq!(channels[Severity::Warn.index()].len(), 1);
        assert_eq!(channels[Severity::Error.index()].len(), 2);
        assert_eq!(channels[Severity::Fatal.index()].len(), 2);

        let channels = &verbose.inner.channels;
        assert_eq!(channels[Severity::Info.index()].len(), 2);
        assert_eq!(channels[Severity::Warn.index()].len(), 2);
        assert_eq!(channels[Severity::Error.index()].len(), 2);
        assert_eq!(channels[Severity::Fatal.index()].len(), 2);

        // info and warn share the one stdout destination
        assert!(Arc::ptr_eq(
            &channels[Severity::Info.index()][1],
            &channels[Severity::Warn.index()][1],
        ));
    }

    #[cfg(not(all(feature = "syslog", unix)))]
    #[test]
    fn adapter_failure_is_reported_through_the_error_channel() {
        let _guard = registry::test_guard();
        let buffer = InMemory::new();

        let logger = init("sys", false, true, buffer.clone());
        assert!(logger.is_initialized());

        // construction succeeds; the failure surfaces as one error record
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[ERROR]: "), "line was {:?}", lines[0]);
        assert!(lines[0].contains("system log unavailable"));

        logger.info("still functional");
        assert_eq!(buffer.lines().len(), 2);
    }

    #[test]
    fn closers_are_deduplicated_and_closed_once() {
        let _guard = registry::test_guard();
        let counter = Arc::new(CloseCounter::default());

        // the primary sits on the info, warn, error and fatal channels but
        // must appear in the closer list once
        let logger = init("closers", false, false, counter.clone());
        logger.close();
        assert_eq!(counter.closes.load(Ordering::SeqCst), 1);

        logger.close();
        assert_eq!(counter.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn close_on_the_fallback_is_a_no_op() {
        let logger = Logger::fallback();
        assert!(!logger.is_initialized());
        logger.close();
        logger.close();
    }

    #[test]
    fn independent_loggers_do_not_share_destinations() {
        let _guard = registry::test_guard();
        let buf1 = InMemory::new();
        let buf2 = InMemory::new();
        let l1 = init("one", false, false, buf1.clone());
        let l2 = init("two", false, false, buf2.clone());
        l1.set_flags(FormatFlags::none());
        l2.set_flags(FormatFlags::none());

        l1.info("first");
        l2.info("second");

        assert_eq!(buf1.lines(), vec!["[INFO]: first"]);
        assert_eq!(buf2.lines(), vec!["[INFO]: second"]);
    }

    #[test]
    fn flags_apply_to_every_channel_uniformly() {
        let _guard = registry::test_guard();
        let buffer = InMemory::new();
        let logger = init("flags", false, false, buffer.clone());
        logger.set_flags(FormatFlags::none());

        logger.info("a");
        logger.error("b");
        logger.set_flags(FormatFlags::default());
        logger.warn("c");

        let lines = buffer.lines();
        assert_eq!(lines[0], "[INFO]: a");
        assert_eq!(lines[1], "[ERROR]: b");
        assert!(lines[2].starts_with("[WARN]: 2"));
        assert!(lines[2].ends_with(" c") || lines[2].ends_with(": c"));
    }
}
