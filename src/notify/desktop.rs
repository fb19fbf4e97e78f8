//! Desktop popup sink
//!
//! Shells out to the platform notifier: `terminal-notifier` on macOS,
//! `notify-send` elsewhere. The platform choice happens once here, not at
//! the dispatch site.

use crate::error::{Result, WatchError};
use crate::notify::NotifySink;
use std::process::Command;

pub struct DesktopSink {
    title: String,
    sound: bool,
}

impl DesktopSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), sound: false }
    }

    pub fn with_sound(mut self) -> Self {
        self.sound = true;
        self
    }

    fn command(&self, message: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("terminal-notifier");
            cmd.args(["-title", &self.title, "-message", message]);
            if self.sound {
                cmd.args(["-sound", "default"]);
            }
            cmd
        } else {
            let mut cmd = Command::new("notify-send");
            cmd.arg(&self.title).arg(message);
            cmd
        }
    }
}

impl NotifySink for DesktopSink {
    fn name(&self) -> &str {
        "desktop"
    }

    fn deliver(&self, message: &str) -> Result<()> {
        let status = self.command(message).status().map_err(|e| WatchError::Delivery {
            sink: self.name().to_string(),
            reason: e.to_string(),
        })?;
        if !status.success() {
            return Err(WatchError::Delivery {
                sink: self.name().to_string(),
                reason: format!("notifier exited with {}", status),
            });
        }
        Ok(())
    }
}
