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

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;

use anyhow::Context;

use crate::destination::Destination;

/// A closable destination backed by a file.
///
/// The owning logger releases the file when it is closed; writing a record
/// after that reports an error on the dispatch path.
#[derive(Debug)]
pub struct FileDestination {
    file: Mutex<Option<File>>,
}

impl FileDestination {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        File::create(path).map(Self::from_file)
    }

    /// Opens the file at `path` for appending, creating it if absent.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map(Self::from_file)
    }

    fn from_file(file: File) -> Self {
        Self {
            file: Mutex::new(Some(file)),
        }
    }
}

impl Destination for FileDestination {
    fn write_record(&self, line: &str) -> anyhow::Result<()> {
        let mut slot = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let file = slot.as_mut().context("file destination already closed")?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn flush(&self) {
        let mut slot = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = slot.as_mut() {
            let _ = file.flush();
        }
    }

    fn closable(&self) -> bool {
        true
    }

    fn close(&self) -> anyhow::Result<()> {
        let file = self.file.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(file) = file {
            file.sync_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let dest = FileDestination::create(&path).unwrap();
        assert!(dest.closable());
        dest.write_record("[INFO]: one\n").unwrap();
        dest.write_record("[INFO]: two\n").unwrap();
        dest.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[INFO]: one\n[INFO]: two\n");
    }

    #[test]
    fn close_is_idempotent_and_write_after_close_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = FileDestination::create(dir.path().join("app.log")).unwrap();

        dest.close().unwrap();
        dest.close().unwrap();
        assert!(dest.write_record("[INFO]: late\n").is_err());
        // flush is best effort and tolerates a released handle
        dest.flush();
    }

    #[test]
    fn flush_leaves_written_records_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let dest = FileDestination::create(&path).unwrap();
        dest.write_record("[INFO]: flushed\n").unwrap();
        dest.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[INFO]: flushed\n");
    }

    #[test]
    fn append_keeps_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "[INFO]: old\n").unwrap();

        let dest = FileDestination::append(&path).unwrap();
        dest.write_record("[INFO]: new\n").unwrap();
        dest.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[INFO]: old\n[INFO]: new\n");
    }
}
