//! # golestan-watch
//!
//! Watches a Golestan-style university portal for newly published course
//! grades by driving a browser session, re-reading the results table on a
//! fixed interval, diffing successive snapshots and notifying through
//! configurable sinks (desktop popup, audio beep, Telegram bot).
//!
//! The portal exposes no API; everything is read from its rendered,
//! deeply nested frame-based HTML.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use golestan_watch::{
//!     CdpSession, Credentials, Dispatcher, PollConfig, PortalLayout, SessionOptions,
//!     ShutdownFlag, Watcher,
//! };
//! use golestan_watch::notify::DesktopSink;
//! use std::time::Duration;
//!
//! # fn main() -> golestan_watch::Result<()> {
//! let layout = PortalLayout::default();
//! let config = PollConfig {
//!     term_index: 5,
//!     login_url: golestan_watch::portal::DEFAULT_LOGIN_URL.to_string(),
//!     poll_interval: Duration::from_secs(180),
//!     telegram: None,
//! };
//! let credentials = Credentials { username: "student".into(), password: "secret".into() };
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.push(Box::new(DesktopSink::new("Golestan Grade Checker").with_sound()));
//!
//! let mut session = CdpSession::launch(SessionOptions::new().headless(true))?;
//! let shutdown = ShutdownFlag::new();
//! let mut watcher = Watcher::new(&mut session, &layout, &dispatcher, &config, shutdown);
//! watcher.run(&credentials)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: the locator-based driver capability and its CDP implementation
//! - [`navigation`]: nested-frame traversal to the grades region
//! - [`snapshot`]: results-table extraction
//! - [`diff`]: change detection between successive snapshots
//! - [`notify`]: notification sinks and fan-out dispatch
//! - [`watcher`]: the polling loop tying it all together
//! - [`portal`]: portal layout constants
//! - [`config`]: credentials and polling configuration
//! - [`error`]: error types and result aliases

pub mod browser;
pub mod config;
pub mod diff;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod portal;
pub mod snapshot;
pub mod watcher;

pub use browser::{CdpSession, PortalDriver, SessionOptions};
pub use config::{Credentials, FileConfig, Overrides, PollConfig, TelegramConfig};
pub use diff::{diff_snapshots, ChangeEntry, ChangeSet};
pub use error::{Result, WatchError};
pub use navigation::NavigationContext;
pub use notify::{create_message, Dispatcher, NotifySink};
pub use portal::PortalLayout;
pub use snapshot::{extract_snapshot, GradeSnapshot};
pub use watcher::{CycleOutcome, ShutdownFlag, Watcher};
