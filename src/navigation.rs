//! Nested-frame traversal
//!
//! The portal renders each UI region inside a frame identified by a
//! numeric Faci id, with the usable content a fixed two-level descent
//! below it. [`NavigationContext`] encodes that traversal as a small
//! state machine: Unfocused → AtMainFrame → AtGradesFrame.
//!
//! Both entry points are relative descents, so the caller must reset the
//! driver focus to the top-level document before invoking them. A failed
//! wait leaves the focus undefined; reset and retry, or abort.

use crate::browser::PortalDriver;
use crate::error::Result;
use crate::portal::PortalLayout;

/// Positions the driver focus inside a portal region
pub struct NavigationContext<'a> {
    driver: &'a mut dyn PortalDriver,
    layout: &'a PortalLayout,
}

impl<'a> NavigationContext<'a> {
    pub fn new(driver: &'a mut dyn PortalDriver, layout: &'a PortalLayout) -> Self {
        Self { driver, layout }
    }

    /// Wait (bounded by the layout's frame wait) for the region's outer
    /// frame to appear, then descend the fixed two-level path to its
    /// content frame.
    pub fn enter_main_frame(&mut self, faci_id: u8) -> Result<()> {
        self.driver
            .wait_for_frame(&self.layout.faci_frame(faci_id), self.layout.frame_wait)?;
        self.driver.enter_frame(&self.layout.mid_frame)?;
        self.driver.enter_frame(&self.layout.content_frame)?;
        Ok(())
    }

    /// [`Self::enter_main_frame`], then one further descent into the
    /// embedded form iframe holding the grades table.
    pub fn enter_grades_frame(&mut self, faci_id: u8) -> Result<()> {
        self.enter_main_frame(faci_id)?;
        self.driver.enter_frame(&self.layout.grades_iframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeDriver;
    use crate::error::WatchError;

    fn layout() -> PortalLayout {
        PortalLayout::default()
    }

    fn driver_with_region(layout: &PortalLayout, faci_id: u8) -> FakeDriver {
        let mut driver = FakeDriver::new();
        let faci = layout.faci_frame(faci_id);
        driver.add_frame_chain(&[faci.as_str(), layout.mid_frame.as_str(), layout.content_frame.as_str()]);
        driver
    }

    #[test]
    fn test_enter_main_frame_descends_fixed_path() {
        let layout = layout();
        let mut driver = driver_with_region(&layout, 2);

        let result = NavigationContext::new(&mut driver, &layout).enter_main_frame(2);
        assert!(result.is_ok());
    }

    #[test]
    fn test_enter_main_frame_times_out_when_faci_missing() {
        let layout = layout();
        let mut driver = FakeDriver::new();

        let err = NavigationContext::new(&mut driver, &layout)
            .enter_main_frame(2)
            .unwrap_err();
        match err {
            WatchError::NavigationTimeout { region, seconds } => {
                assert!(region.contains("Faci2"));
                assert_eq!(seconds, layout.frame_wait.as_secs());
            }
            other => panic!("expected NavigationTimeout, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_grades_frame_descends_into_iframe() {
        let layout = layout();
        let mut driver = FakeDriver::new();
        let faci = layout.faci_frame(3);
        driver.add_frame_chain(&[
            faci.as_str(),
            layout.mid_frame.as_str(),
            layout.content_frame.as_str(),
            layout.grades_iframe.as_str(),
        ]);

        let result = NavigationContext::new(&mut driver, &layout).enter_grades_frame(3);
        assert!(result.is_ok());
    }

    #[test]
    fn test_enter_grades_frame_fails_when_iframe_missing() {
        let layout = layout();
        // Main frame path present, iframe absent
        let mut driver = driver_with_region(&layout, 3);

        let err = NavigationContext::new(&mut driver, &layout)
            .enter_grades_frame(3)
            .unwrap_err();
        assert!(matches!(err, WatchError::ElementNotFound(_)));
    }

    #[test]
    fn test_idempotent_after_reset() {
        let layout = layout();
        let mut driver = driver_with_region(&layout, 2);

        NavigationContext::new(&mut driver, &layout).enter_main_frame(2).unwrap();
        driver.reset_focus().unwrap();
        let second = NavigationContext::new(&mut driver, &layout).enter_main_frame(2);
        assert!(second.is_ok());
    }
}
