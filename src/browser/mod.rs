//! Browser automation capability
//!
//! The watcher core never talks to a browser directly. It goes through
//! [`PortalDriver`], a locator-based capability: every operation takes an
//! XPath resolved against the current frame focus, so there are no
//! element handles (and no handle lifetimes) crossing the seam.
//!
//! [`CdpSession`] is the production implementation over a Chrome DevTools
//! Protocol session. Tests use the scripted fake in [`fake`].

pub mod cdp;

#[cfg(test)]
pub(crate) mod fake;

pub use cdp::{CdpSession, SessionOptions};

use crate::error::Result;
use std::time::Duration;

/// Driver capability the watcher consumes.
///
/// Frame focus is a stack: [`PortalDriver::enter_frame`] pushes one level,
/// [`PortalDriver::reset_focus`] returns to the top-level document. All
/// locators are XPath expressions evaluated relative to the currently
/// focused frame's document.
pub trait PortalDriver {
    /// Navigate the session to a URL and wait for the load to finish
    fn open(&mut self, url: &str) -> Result<()>;

    /// Return focus to the top-level document
    fn reset_focus(&mut self) -> Result<()>;

    /// Descend into the frame matched by `frame`, relative to the current
    /// focus. Fails with `ElementNotFound` if it matches nothing.
    fn enter_frame(&mut self, frame: &str) -> Result<()>;

    /// Wait (bounded) for the frame matched by `frame` to become
    /// available, then descend into it. Fails with `NavigationTimeout`
    /// if it never appears.
    fn wait_for_frame(&mut self, frame: &str, timeout: Duration) -> Result<()>;

    /// Click the first element matched by `locator`
    fn click(&mut self, locator: &str) -> Result<()>;

    /// Type `text` into the first element matched by `locator`
    fn fill(&mut self, locator: &str, text: &str) -> Result<()>;

    /// Submit the form owning the element matched by `locator`
    /// (the ENTER-in-field equivalent)
    fn submit(&mut self, locator: &str) -> Result<()>;

    /// Read an attribute of the first matched element. `Ok(None)` means
    /// the element exists but carries no such attribute.
    fn attribute(&self, locator: &str, name: &str) -> Result<Option<String>>;

    /// Read the text content of the first matched element
    fn text(&self, locator: &str) -> Result<String>;

    /// Number of elements matched by `locator` in the focused document
    fn count(&self, locator: &str) -> Result<usize>;
}
