//! Notification dispatch
//!
//! A change set is rendered once into a human-readable summary and fanned
//! out to every configured sink. Sinks are independent delivery channels
//! behind a single capability; a failing sink is logged and never blocks
//! the others, and delivery failures never reach the polling loop.

pub mod audio;
pub mod desktop;
pub mod telegram;

pub use audio::AudioSink;
pub use desktop::DesktopSink;
pub use telegram::TelegramSink;

use crate::diff::ChangeEntry;
use crate::error::Result;
use log::{info, warn};

/// A delivery channel for one rendered text message
pub trait NotifySink {
    fn name(&self) -> &str;
    fn deliver(&self, message: &str) -> Result<()>;
}

/// Render a change set as `"course: grade"` entries, comma separated,
/// in change-set order. Empty change set renders as the empty string.
pub fn create_message(changes: &[ChangeEntry]) -> String {
    changes
        .iter()
        .map(|entry| format!("{}: {}", entry.course, entry.grade))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fan-out over the sinks assembled at startup
#[derive(Default)]
pub struct Dispatcher {
    sinks: Vec<Box<dyn NotifySink>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn NotifySink>) {
        self.sinks.push(sink);
    }

    /// Render the change set and deliver it through every sink.
    /// An empty change set delivers nothing.
    pub fn dispatch(&self, changes: &[ChangeEntry]) {
        let message = create_message(changes);
        if message.is_empty() {
            return;
        }
        self.broadcast(&message);
    }

    /// Deliver a raw message through every sink. Each delivery is
    /// isolated: a sink error is logged and the remaining sinks still
    /// receive the message.
    pub fn broadcast(&self, message: &str) {
        for sink in &self.sinks {
            match sink.deliver(message) {
                Ok(()) => info!("delivered through sink '{}'", sink.name()),
                Err(err) => warn!("{}", err),
            }
        }
    }
}
