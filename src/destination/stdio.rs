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

use std::io::Write;

use crate::destination::Destination;

/// A destination that writes log records to stdout.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Stdout {}

impl Destination for Stdout {
    fn write_record(&self, line: &str) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// A destination that writes log records to stderr.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Stderr {}

impl Destination for Stderr {
    fn write_record(&self, line: &str) -> anyhow::Result<()> {
        let mut out = std::io::stderr().lock();
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
