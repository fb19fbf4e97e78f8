//! Audio alert sink
//!
//! Plays a one-second sine beep through sox's `play`. Only useful where
//! sox is installed (the macOS desktop sink carries its own sound).

use crate::error::{Result, WatchError};
use crate::notify::NotifySink;
use std::process::Command;

pub struct AudioSink;

impl NotifySink for AudioSink {
    fn name(&self) -> &str {
        "audio"
    }

    fn deliver(&self, _message: &str) -> Result<()> {
        let status = Command::new("play")
            .args(["--no-show-progress", "--null", "-t", "alsa", "--channels", "1", "synth", "1", "sine", "330"])
            .status()
            .map_err(|e| WatchError::Delivery { sink: self.name().to_string(), reason: e.to_string() })?;
        if !status.success() {
            return Err(WatchError::Delivery {
                sink: self.name().to_string(),
                reason: format!("play exited with {}", status),
            });
        }
        Ok(())
    }
}
