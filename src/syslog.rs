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

//! Destinations bound to the local OS system log.
//!
//! [`open`] produces one destination per system-log priority used by this
//! facility: the info channel maps to NOTICE, the warn channel to WARNING
//! and the error channel to ERR, all under the USER facility. Messages are
//! sent over the local syslog socket in RFC 3164 form, tagged with the
//! source name and pid.

use std::sync::Mutex;
use std::sync::PoisonError;

use fasyslog::sender::SyslogSender;
use jiff::Zoned;

use crate::destination::Destination;

const SYSLOG_PATH: &str = "/dev/log";

const FACILITY_USER: u8 = 1;
const SEVERITY_ERR: u8 = 3;
const SEVERITY_WARNING: u8 = 4;
const SEVERITY_NOTICE: u8 = 5;

/// A closable destination that forwards records to the system log at a
/// fixed priority.
#[derive(Debug)]
pub struct SyslogDestination {
    sender: Mutex<Option<SyslogSender>>,
    tag: String,
    priority: u8,
}

impl SyslogDestination {
    fn connect(name: &str, severity: u8) -> std::io::Result<Self> {
        let sender = fasyslog::sender::unix(SYSLOG_PATH)?;
        Ok(Self {
            sender: Mutex::new(Some(sender)),
            tag: format!("{name}[{}]", std::process::id()),
            priority: (FACILITY_USER << 3) | severity,
        })
    }
}

impl Destination for SyslogDestination {
    fn write_record(&self, line: &str) -> anyhow::Result<()> {
        let timestamp = Zoned::now().strftime("%b %e %H:%M:%S");
        let message = format!(
            "<{}>{} {}: {}",
            self.priority,
            timestamp,
            self.tag,
            line.trim_end()
        );

        let mut slot = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            Some(sender) => {
                sender.send_formatted(message.as_bytes())?;
                sender.flush()?;
                Ok(())
            }
            None => Err(anyhow::anyhow!("system log destination already closed")),
        }
    }

    fn flush(&self) {
        let mut slot = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sender) = slot.as_mut() {
            let _ = sender.flush();
        }
    }

    fn closable(&self) -> bool {
        true
    }

    fn close(&self) -> anyhow::Result<()> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut sender) = sender {
            sender.flush()?;
        }
        Ok(())
    }
}

/// Opens the three system-log destinations for a logger: info, warn and
/// error priority, in that order.
///
/// Failure to reach the syslog socket is reported to the caller; logger
/// construction tolerates it by omitting these destinations.
pub fn open(
    name: &str,
) -> anyhow::Result<(SyslogDestination, SyslogDestination, SyslogDestination)> {
    let info = SyslogDestination::connect(name, SEVERITY_NOTICE)?;
    let warn = SyslogDestination::connect(name, SEVERITY_WARNING)?;
    let error = SyslogDestination::connect(name, SEVERITY_ERR)?;
    Ok((info, warn, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_encode_the_user_facility() {
        assert_eq!((FACILITY_USER << 3) | SEVERITY_NOTICE, 13);
        assert_eq!((FACILITY_USER << 3) | SEVERITY_WARNING, 12);
        assert_eq!((FACILITY_USER << 3) | SEVERITY_ERR, 11);
    }
}
