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

//! Output sinks that formatted log records fan out to.

use std::fmt;

mod file;
mod stdio;
pub mod testing;

pub use self::file::FileDestination;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;

/// A sink capable of receiving formatted text lines.
///
/// Writing is the required capability. Destinations that own a releasable
/// resource additionally report `closable() == true`; a logger resolves
/// that capability once at construction time into its closer list.
pub trait Destination: fmt::Debug + Send + Sync + 'static {
    /// Writes one formatted record.
    ///
    /// Every call is synchronous; implementations must leave the sink
    /// flushed before returning.
    fn write_record(&self, line: &str) -> anyhow::Result<()>;

    /// Flushes any buffered records, best effort.
    fn flush(&self) {}

    /// Whether this destination owns a resource that [`close`][Self::close]
    /// must release.
    fn closable(&self) -> bool {
        false
    }

    /// Releases the underlying resource.
    fn close(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
