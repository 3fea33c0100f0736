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

/// The severity of a log record, ordered by ascending criticality.
///
/// Each severity routes to its own output channel and carries a fixed
/// label used as the line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info = 0,
    Warn = 1,
    Error = 2,
    Fatal = 3,
}

impl Severity {
    pub(crate) const COUNT: usize = 4;

    /// The line prefix for records of this severity.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "[INFO]: ",
            Severity::Warn => "[WARN]: ",
            Severity::Error => "[ERROR]: ",
            Severity::Fatal => "[FATAL]: ",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}
