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

//! Fanlog is a leveled logging facility that fans each record out to
//! multiple destinations: a caller-supplied primary sink, the OS system
//! log, and the process standard streams, with per-severity routing and a
//! process-wide default logger.
//!
//! # Overview
//!
//! [`init`] wires a [`Logger`] from a source name, a verbose flag, a
//! system-log flag and a primary destination. The first call installs its
//! logger as the default used by the free functions ([`info`], [`warn`],
//! [`error`], [`fatal`] and friends); every call returns an independent
//! logger. Before any `init`, the free functions still work and write to
//! stderr with a warning marker.
//!
//! # Examples
//!
//! ```no_run
//! use fanlog::destination::FileDestination;
//!
//! let file = FileDestination::append("app.log").expect("open log file");
//! let logger = fanlog::init("app", false, true, file);
//!
//! fanlog::info("ready"); // through the default logger
//! logger.warnf(format_args!("latency {}ms", 12));
//!
//! logger.set_level(1);
//! logger.verbosity(1).info("only when verbose enough");
//!
//! logger.close();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod destination;
pub mod layout;

#[cfg(feature = "bridge")]
pub mod bridge;
#[cfg(all(feature = "syslog", unix))]
pub mod syslog;

mod logger;
mod registry;
mod severity;

pub use destination::Destination;
pub use layout::FormatFlags;
pub use layout::SourceStyle;
pub use layout::TimeStyle;
pub use logger::Level;
pub use logger::Logger;
pub use logger::Verbose;
pub use logger::init;
pub use registry::close;
pub use registry::error;
pub use registry::error_at;
pub use registry::errorf;
pub use registry::errorln;
pub use registry::fatal;
pub use registry::fatal_at;
pub use registry::fatalf;
pub use registry::fatalln;
pub use registry::info;
pub use registry::info_at;
pub use registry::infof;
pub use registry::infoln;
pub use registry::set_flags;
pub use registry::set_level;
pub use registry::verbosity;
pub use registry::warn;
pub use registry::warn_at;
pub use registry::warnf;
pub use registry::warnln;
pub use severity::Severity;
