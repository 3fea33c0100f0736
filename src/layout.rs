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

//! Formatting of log records into text lines.
//!
//! Output format with the default flags:
//!
//! ```text
//! [INFO]: 2026/08/23 14:03:07.182093 server.rs:41: listener ready
//! [WARN]: 2026/08/23 14:03:09.004311 server.rs:77: slow handshake
//! ```

use std::fmt::Write;
use std::panic::Location;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::severity::Severity;

/// How the time of day is rendered in the record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    Off,
    Seconds,
    Microseconds,
}

/// How the call site is rendered in the record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStyle {
    Off,
    /// File name and line, e.g. `server.rs:41`.
    Short,
    /// Full path and line.
    Long,
}

/// Formatting flags applied uniformly to all four channels of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatFlags {
    pub date: bool,
    pub time: TimeStyle,
    pub source: SourceStyle,
    pub utc: bool,
}

impl Default for FormatFlags {
    fn default() -> Self {
        Self {
            date: true,
            time: TimeStyle::Microseconds,
            source: SourceStyle::Short,
            utc: false,
        }
    }
}

impl FormatFlags {
    /// Flags that render the bare severity label and message only.
    pub fn none() -> Self {
        Self {
            date: false,
            time: TimeStyle::Off,
            source: SourceStyle::Off,
            utc: false,
        }
    }
}

/// The marker emitted ahead of every record logged before the default
/// logger has been initialized.
pub(crate) const INIT_TEXT: &str = "[ERROR]: Logging before logger initiated!\n";

/// Renders one record into a newline-terminated line.
pub(crate) fn render(
    flags: FormatFlags,
    preamble: Option<&'static str>,
    severity: Severity,
    site: &'static Location<'static>,
    msg: &str,
) -> String {
    let mut text = String::with_capacity(64 + msg.len());
    if let Some(preamble) = preamble {
        text.push_str(preamble);
    }
    text.push_str(severity.label());

    if flags.date || flags.time != TimeStyle::Off {
        let now = if flags.utc {
            Zoned::now().with_time_zone(TimeZone::UTC)
        } else {
            Zoned::now()
        };
        // SAFETY: write to a string always succeeds
        if flags.date {
            write!(&mut text, "{} ", now.strftime("%Y/%m/%d")).unwrap();
        }
        match flags.time {
            TimeStyle::Off => {}
            TimeStyle::Seconds => write!(&mut text, "{} ", now.strftime("%H:%M:%S")).unwrap(),
            TimeStyle::Microseconds => {
                write!(&mut text, "{} ", now.strftime("%H:%M:%S.%6f")).unwrap()
            }
        }
    }

    match flags.source {
        SourceStyle::Off => {}
        SourceStyle::Short => {
            let file = site.file().rsplit(['/', '\\']).next().unwrap_or_default();
            write!(&mut text, "{}:{}: ", file, site.line()).unwrap();
        }
        SourceStyle::Long => {
            write!(&mut text, "{}:{}: ", site.file(), site.line()).unwrap();
        }
    }

    text.push_str(msg);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
