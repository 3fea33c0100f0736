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

//! Destinations for assertions in tests: an in-memory capture buffer and a
//! null sink.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::destination::Destination;

/// A destination that captures records in a shared in-memory buffer.
///
/// Cloning yields another handle to the same buffer, so a test can keep one
/// clone and hand the other to [`init`][crate::init].
///
/// # Examples
///
/// ```
/// use fanlog::destination::testing::InMemory;
///
/// let buffer = InMemory::new();
/// let logger = fanlog::init("test", false, false, buffer.clone());
/// logger.info("captured");
/// assert_eq!(buffer.lines().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemory {
    buffer: Arc<Mutex<String>>,
}

impl InMemory {
    /// Creates a new empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The captured records, one per line.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Destination for InMemory {
    fn write_record(&self, line: &str) -> anyhow::Result<()> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(line);
        Ok(())
    }
}

/// A destination that drops every record.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Discard {}

impl Destination for Discard {
    fn write_record(&self, _line: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
