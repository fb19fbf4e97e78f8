//! Scripted in-memory driver used by the unit tests
//!
//! Documents are keyed by frame path plus locator, so tests exercise the
//! same frame-focus discipline the real portal requires. Waits resolve
//! immediately (present or timeout) to keep the tests fast.

use crate::browser::PortalDriver;
use crate::error::{Result, WatchError};
use crate::portal::PortalLayout;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

type FramePath = Vec<String>;

fn path(chain: &[&str]) -> FramePath {
    chain.iter().map(|s| s.to_string()).collect()
}

#[derive(Default)]
pub struct FakeDriver {
    pub opened: Vec<String>,
    pub clicks: Vec<String>,
    pub fills: Vec<(String, String)>,
    pub submits: Vec<String>,
    frames: HashSet<FramePath>,
    attributes: HashMap<(FramePath, String, String), Option<String>>,
    texts: HashMap<(FramePath, String), String>,
    counts: HashMap<(FramePath, String), usize>,
    clickable: HashSet<(FramePath, String)>,
    fillable: HashSet<(FramePath, String)>,
    focus: FramePath,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reachable frame chain (all prefixes become reachable too)
    pub fn add_frame_chain(&mut self, chain: &[&str]) {
        let full = path(chain);
        for depth in 1..=full.len() {
            self.frames.insert(full[..depth].to_vec());
        }
    }

    pub fn set_attribute(&mut self, chain: &[&str], locator: &str, name: &str, value: Option<&str>) {
        self.attributes
            .insert((path(chain), locator.to_string(), name.to_string()), value.map(str::to_string));
    }

    pub fn set_text(&mut self, chain: &[&str], locator: &str, text: &str) {
        self.texts.insert((path(chain), locator.to_string()), text.to_string());
    }

    pub fn set_count(&mut self, chain: &[&str], locator: &str, count: usize) {
        self.counts.insert((path(chain), locator.to_string()), count);
    }

    pub fn allow_click(&mut self, chain: &[&str], locator: &str) {
        self.clickable.insert((path(chain), locator.to_string()));
    }

    pub fn forbid_click(&mut self, chain: &[&str], locator: &str) {
        self.clickable.remove(&(path(chain), locator.to_string()));
    }

    pub fn allow_fill(&mut self, chain: &[&str], locator: &str) {
        self.fillable.insert((path(chain), locator.to_string()));
    }

    /// Script one row of the results table at the given frame chain
    pub fn set_grade_row(
        &mut self,
        chain: &[&str],
        layout: &PortalLayout,
        row: usize,
        course: &str,
        grade: &str,
    ) {
        self.set_attribute(chain, &layout.course_title_cell(row), "title", Some(course));
        self.set_text(chain, &layout.grade_value_cell(row), grade);
    }

    /// Script a complete results table with the given rows
    pub fn set_grades_table(&mut self, chain: &[&str], layout: &PortalLayout, rows: &[(&str, &str)]) {
        self.set_count(chain, &layout.grades_table(), 1);
        self.set_count(chain, &layout.grade_rows(), rows.len());
        for (index, (course, grade)) in rows.iter().enumerate() {
            self.set_grade_row(chain, layout, index + 1, course, grade);
        }
    }

    fn key(&self, locator: &str) -> (FramePath, String) {
        (self.focus.clone(), locator.to_string())
    }
}

impl PortalDriver for FakeDriver {
    fn open(&mut self, url: &str) -> Result<()> {
        self.focus.clear();
        self.opened.push(url.to_string());
        Ok(())
    }

    fn reset_focus(&mut self) -> Result<()> {
        self.focus.clear();
        Ok(())
    }

    fn enter_frame(&mut self, frame: &str) -> Result<()> {
        let mut chain = self.focus.clone();
        chain.push(frame.to_string());
        if !self.frames.contains(&chain) {
            return Err(WatchError::ElementNotFound(frame.to_string()));
        }
        self.focus = chain;
        Ok(())
    }

    fn wait_for_frame(&mut self, frame: &str, timeout: Duration) -> Result<()> {
        let mut chain = self.focus.clone();
        chain.push(frame.to_string());
        if !self.frames.contains(&chain) {
            return Err(WatchError::NavigationTimeout {
                region: frame.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        self.focus = chain;
        Ok(())
    }

    fn click(&mut self, locator: &str) -> Result<()> {
        if !self.clickable.contains(&self.key(locator)) {
            return Err(WatchError::ElementNotFound(locator.to_string()));
        }
        self.clicks.push(locator.to_string());
        Ok(())
    }

    fn fill(&mut self, locator: &str, text: &str) -> Result<()> {
        if !self.fillable.contains(&self.key(locator)) {
            return Err(WatchError::ElementNotFound(locator.to_string()));
        }
        self.fills.push((locator.to_string(), text.to_string()));
        Ok(())
    }

    fn submit(&mut self, locator: &str) -> Result<()> {
        if !self.fillable.contains(&self.key(locator)) {
            return Err(WatchError::ElementNotFound(locator.to_string()));
        }
        self.submits.push(locator.to_string());
        Ok(())
    }

    fn attribute(&self, locator: &str, name: &str) -> Result<Option<String>> {
        self.attributes
            .get(&(self.focus.clone(), locator.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| WatchError::ElementNotFound(locator.to_string()))
    }

    fn text(&self, locator: &str) -> Result<String> {
        self.texts
            .get(&self.key(locator))
            .cloned()
            .ok_or_else(|| WatchError::ElementNotFound(locator.to_string()))
    }

    fn count(&self, locator: &str) -> Result<usize> {
        Ok(self.counts.get(&self.key(locator)).copied().unwrap_or(0))
    }
}
