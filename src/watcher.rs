//! Polling loop
//!
//! Owns the end-to-end cycle: login, initial navigation to the configured
//! term's grades frame, then the repeating {extract, diff, notify,
//! keep-alive, wait} sequence. Navigation and extraction failures are
//! fatal to the run (an external supervisor restarts the process);
//! delivery failures never reach here.

use crate::browser::PortalDriver;
use crate::config::{Credentials, PollConfig};
use crate::diff::{diff_snapshots, ChangeSet};
use crate::error::Result;
use crate::navigation::NavigationContext;
use crate::notify::Dispatcher;
use crate::portal::PortalLayout;
use crate::snapshot::{extract_snapshot, GradeSnapshot};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Granularity at which sleeps observe the shutdown flag
const PAUSE_STEP: Duration = Duration::from_millis(250);

/// Cooperative cancellation handle. Cloneable; triggering any clone stops
/// the watcher at the next pause.
#[derive(Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of one poll cycle: the snapshot that becomes the new history,
/// and whatever changed relative to the previous one
pub struct CycleOutcome {
    pub snapshot: GradeSnapshot,
    pub changes: ChangeSet,
}

/// Drives the session through login, navigation and the polling cycle.
/// The browser session and the dispatcher are owned by the caller for
/// the process lifetime and borrowed here.
pub struct Watcher<'a> {
    driver: &'a mut dyn PortalDriver,
    layout: &'a PortalLayout,
    dispatcher: &'a Dispatcher,
    config: &'a PollConfig,
    shutdown: ShutdownFlag,
}

impl<'a> Watcher<'a> {
    pub fn new(
        driver: &'a mut dyn PortalDriver,
        layout: &'a PortalLayout,
        dispatcher: &'a Dispatcher,
        config: &'a PollConfig,
        shutdown: ShutdownFlag,
    ) -> Self {
        Self { driver, layout, dispatcher, config, shutdown }
    }

    /// Submit credentials to the login page
    pub fn login(&mut self, credentials: &Credentials) -> Result<()> {
        info!("logging in to {}", self.config.login_url);
        self.driver.open(&self.config.login_url)?;
        self.driver.fill(&self.layout.username_field, &credentials.username)?;
        self.driver.fill(&self.layout.password_field, &credentials.password)?;
        self.driver.submit(&self.layout.password_field)
    }

    /// Navigate from the portal main page to the student information
    /// landing region
    pub fn open_student_info(&mut self) -> Result<()> {
        self.driver.reset_focus()?;
        NavigationContext::new(&mut *self.driver, self.layout).enter_main_frame(self.layout.landing_faci)?;
        self.pause(self.layout.landing_settle);
        // The menu entry needs a second click; the first only focuses it.
        self.driver.click(&self.layout.student_info_button)?;
        self.pause(self.layout.landing_click_gap);
        self.driver.click(&self.layout.student_info_button)
    }

    /// Select the configured term row in the term status table
    pub fn select_term(&mut self) -> Result<()> {
        self.driver.reset_focus()?;
        NavigationContext::new(&mut *self.driver, self.layout).enter_main_frame(self.layout.info_faci)?;
        self.driver.click(&self.layout.term_row(self.config.term_index))
    }

    /// Place focus inside the grades frame of the current term
    pub fn enter_grades(&mut self) -> Result<()> {
        self.driver.reset_focus()?;
        NavigationContext::new(&mut *self.driver, self.layout).enter_grades_frame(self.layout.info_faci)?;
        self.pause(self.layout.grades_settle);
        Ok(())
    }

    /// One poll cycle against explicit previous state: extract the
    /// current snapshot, diff it against `previous`, and dispatch a
    /// summary when anything changed. The first cycle (no previous
    /// snapshot) only seeds history and never notifies.
    pub fn cycle(&mut self, previous: Option<&GradeSnapshot>) -> Result<CycleOutcome> {
        let snapshot = extract_snapshot(&*self.driver, self.layout)?;
        let changes = match previous {
            Some(prev) if *prev != snapshot => diff_snapshots(prev, &snapshot),
            _ => ChangeSet::new(),
        };
        if !changes.is_empty() {
            info!("you have new grades!");
            self.dispatcher.dispatch(&changes);
        }
        Ok(CycleOutcome { snapshot, changes })
    }

    /// Keep-alive round trip: visit the previous term and come back, so
    /// the portal does not expire the session from inactivity. Retried
    /// once after re-entering the grades frame; a second failure is
    /// fatal. First-term students have no previous-term control, so this
    /// fails for them — a known gap, not silently handled.
    pub fn keep_alive(&mut self) -> Result<()> {
        if let Err(err) = self.keep_alive_round_trip() {
            warn!("keep-alive round trip failed ({}), retrying once", err);
            self.enter_grades()?;
            self.keep_alive_round_trip()?;
        }
        Ok(())
    }

    fn keep_alive_round_trip(&mut self) -> Result<()> {
        self.driver.click(&self.layout.prev_term_button)?;
        self.pause(self.layout.keep_alive_settle);
        self.enter_grades()?;
        self.driver.click(&self.layout.next_term_button)?;
        self.pause(self.layout.keep_alive_settle);
        Ok(())
    }

    /// Run until shutdown is triggered or a navigation/extraction error
    /// surfaces. No natural terminal state otherwise.
    pub fn run(&mut self, credentials: &Credentials) -> Result<()> {
        self.login(credentials)?;
        if !self.pause(self.layout.login_settle) {
            return Ok(());
        }
        self.open_student_info()?;
        if !self.pause(self.layout.page_settle) {
            return Ok(());
        }
        self.select_term()?;
        if !self.pause(self.layout.page_settle) {
            return Ok(());
        }
        self.enter_grades()?;

        let mut previous: Option<GradeSnapshot> = None;
        loop {
            let outcome = self.cycle(previous.as_ref())?;
            // Replace, never merge: only the immediately preceding
            // snapshot is ever diffed against.
            previous = Some(outcome.snapshot);

            if !self.pause(self.config.poll_interval) {
                info!("shutdown requested, stopping watcher");
                return Ok(());
            }
            self.keep_alive()?;
        }
    }

    /// Sleep in small steps so shutdown is observed promptly. Returns
    /// false when shutdown was triggered during the pause.
    fn pause(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.shutdown.is_triggered() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(PAUSE_STEP.min(deadline - now));
        }
    }
}
