//! Chrome DevTools Protocol implementation of [`PortalDriver`]
//!
//! CDP has no Selenium-style frame switching, but the portal's framesets
//! are all same-origin, so frame focus is implemented as a JS bridge: the
//! driver keeps a stack of frame XPaths and every operation evaluates a
//! small script that walks `contentDocument` links down that stack before
//! resolving the target locator. Re-resolving the whole chain on each
//! operation also makes stale-element failures impossible.

use crate::browser::PortalDriver;
use crate::error::{Result, WatchError};
use headless_chrome::{Browser, Tab};
use serde_json::Value;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Polling step for bounded frame waits
const POLL_STEP: Duration = Duration::from_millis(250);

const RESOLVER_FNS: &str = r#"
function __first(doc, xp) {
    return doc.evaluate(xp, doc, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
}
function __focusedDoc(frames) {
    var doc = document;
    for (var i = 0; i < frames.length; i++) {
        var f = __first(doc, frames[i]);
        if (!f) { return null; }
        doc = f.contentDocument || (f.contentWindow && f.contentWindow.document);
        if (!doc) { return null; }
    }
    return doc;
}
"#;

/// Options for launching the Chrome instance
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Chrome binary path, autodetected when absent
    pub chrome_path: Option<PathBuf>,
    pub sandbox: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { headless: true, window_width: 1280, window_height: 1024, chrome_path: None, sandbox: true }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

/// Browser session driving the portal over CDP
pub struct CdpSession {
    /// Keeps the Chrome process alive for the session lifetime
    _browser: Browser,
    tab: Arc<Tab>,
    /// Frame focus, outermost first. Empty means top-level document.
    frames: Vec<String>,
}

impl CdpSession {
    /// Launch a Chrome instance with the given options
    pub fn launch(options: SessionOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // The watcher idles for minutes between cycles; the default
        // 30 second idle timeout would tear the session down under us.
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| WatchError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| WatchError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { _browser: browser, tab, frames: Vec::new() })
    }

    fn eval(&self, script: &str) -> Result<Value> {
        let object = self
            .tab
            .evaluate(script, false)
            .map_err(|e| WatchError::Session(e.to_string()))?;
        Ok(object.value.unwrap_or(Value::Null))
    }

    fn frames_json(&self) -> Result<String> {
        serde_json::to_string(&self.frames).map_err(|e| WatchError::Session(e.to_string()))
    }

    /// Script resolving the focused document and the target element,
    /// then running `body` with `el` in scope
    fn element_script(&self, locator: &str, body: &str) -> Result<String> {
        let frames = self.frames_json()?;
        let xp = serde_json::to_string(locator).map_err(|e| WatchError::Session(e.to_string()))?;
        Ok(format!(
            "(function() {{\n{fns}\nvar doc = __focusedDoc({frames});\nif (!doc) {{ return null; }}\nvar el = __first(doc, {xp});\nif (!el) {{ return null; }}\n{body}\n}})()",
            fns = RESOLVER_FNS,
            frames = frames,
            xp = xp,
            body = body,
        ))
    }

    /// Whether the current focus chain extended by `frame` resolves to a
    /// reachable document
    fn frame_chain_present(&self, frame: &str) -> Result<bool> {
        let mut chain = self.frames.clone();
        chain.push(frame.to_string());
        let chain_json = serde_json::to_string(&chain).map_err(|e| WatchError::Session(e.to_string()))?;
        let script = format!(
            "(function() {{\n{fns}\nreturn __focusedDoc({chain}) !== null;\n}})()",
            fns = RESOLVER_FNS,
            chain = chain_json,
        );
        Ok(self.eval(&script)?.as_bool().unwrap_or(false))
    }

    fn run_on_element(&self, locator: &str, body: &str) -> Result<Value> {
        let script = self.element_script(locator, body)?;
        let value = self.eval(&script)?;
        if value.is_null() {
            return Err(WatchError::ElementNotFound(locator.to_string()));
        }
        Ok(value)
    }
}

impl PortalDriver for CdpSession {
    fn open(&mut self, url: &str) -> Result<()> {
        self.frames.clear();
        self.tab
            .navigate_to(url)
            .map_err(|e| WatchError::Session(format!("failed to navigate to {}: {}", url, e)))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| WatchError::Session(format!("navigation did not settle: {}", e)))?;
        Ok(())
    }

    fn reset_focus(&mut self) -> Result<()> {
        self.frames.clear();
        Ok(())
    }

    fn enter_frame(&mut self, frame: &str) -> Result<()> {
        if !self.frame_chain_present(frame)? {
            return Err(WatchError::ElementNotFound(frame.to_string()));
        }
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn wait_for_frame(&mut self, frame: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.frame_chain_present(frame)? {
                self.frames.push(frame.to_string());
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(WatchError::NavigationTimeout {
                    region: frame.to_string(),
                    seconds: timeout.as_secs(),
                });
            }
            std::thread::sleep(POLL_STEP);
        }
    }

    fn click(&mut self, locator: &str) -> Result<()> {
        self.run_on_element(locator, "el.click();\nreturn true;")?;
        Ok(())
    }

    fn fill(&mut self, locator: &str, text: &str) -> Result<()> {
        let text_json = serde_json::to_string(text).map_err(|e| WatchError::Session(e.to_string()))?;
        let body = format!(
            "el.focus();\nel.value = {text};\nel.dispatchEvent(new Event('input', {{ bubbles: true }}));\nel.dispatchEvent(new Event('change', {{ bubbles: true }}));\nreturn true;",
            text = text_json,
        );
        self.run_on_element(locator, &body)?;
        Ok(())
    }

    fn submit(&mut self, locator: &str) -> Result<()> {
        let body = "if (el.form) { el.form.submit(); } else { el.dispatchEvent(new KeyboardEvent('keydown', { key: 'Enter', bubbles: true })); }\nreturn true;";
        self.run_on_element(locator, body)?;
        Ok(())
    }

    fn attribute(&self, locator: &str, name: &str) -> Result<Option<String>> {
        let name_json = serde_json::to_string(name).map_err(|e| WatchError::Session(e.to_string()))?;
        // JSON-encode in the page so a missing attribute (null) stays
        // distinguishable from a missing element (bare null result).
        let body = format!("return JSON.stringify(el.getAttribute({}));", name_json);
        let value = self.run_on_element(locator, &body)?;
        match value {
            Value::String(encoded) => serde_json::from_str(&encoded)
                .map_err(|e| WatchError::Session(format!("bad attribute payload: {}", e))),
            other => Err(WatchError::Session(format!("unexpected attribute result: {}", other))),
        }
    }

    fn text(&self, locator: &str) -> Result<String> {
        let value = self.run_on_element(locator, "return el.textContent || '';")?;
        match value {
            Value::String(text) => Ok(text),
            other => Err(WatchError::Session(format!("unexpected text result: {}", other))),
        }
    }

    fn count(&self, locator: &str) -> Result<usize> {
        let frames = self.frames_json()?;
        let xp = serde_json::to_string(locator).map_err(|e| WatchError::Session(e.to_string()))?;
        let script = format!(
            "(function() {{\n{fns}\nvar doc = __focusedDoc({frames});\nif (!doc) {{ return -1; }}\nreturn doc.evaluate({xp}, doc, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength;\n}})()",
            fns = RESOLVER_FNS,
            frames = frames,
            xp = xp,
        );
        match self.eval(&script)?.as_i64() {
            Some(n) if n >= 0 => Ok(n as usize),
            Some(_) => Err(WatchError::Session("focused frame is no longer present".to_string())),
            None => Err(WatchError::Session("unexpected count result".to_string())),
        }
    }
}
