//! Portal layout description
//!
//! Every portal-specific constant lives here: frame ids, the fixed
//! frameset descent path, table ids, column positions, button locators
//! and settle delays. Navigation and extraction take a [`PortalLayout`]
//! as an injected value, so none of the control flow carries magic
//! literals and tests can run against a fake document shape.

use std::time::Duration;

/// Default login entry point (University of Tehran CAS). Override with
/// `--login-url` or the config file for a different deployment.
pub const DEFAULT_LOGIN_URL: &str = "https://auth4.ut.ac.ir:8443/cas/login?service=https://ems1.ut.ac.ir/forms/casauthenticateuser/casmu.aspx?ut=1%26CSURL=https://auth4.ut.ac.ir:8443/cas/logout?service$https://ems.ut.ac.ir/";

/// Fixed document shape of the portal.
///
/// The portal renders everything inside nested framesets. Each major UI
/// region sits in a frame whose element id is `Faci<N>`, and the usable
/// content is always two fixed descents below it. These paths are a
/// property of the portal's markup, not something discovered at runtime.
#[derive(Debug, Clone)]
pub struct PortalLayout {
    /// Element id prefix of the per-region outer frames (`Faci2`, `Faci3`, ...)
    pub faci_frame_prefix: String,
    /// First fixed descent below a Faci frame
    pub mid_frame: String,
    /// Second fixed descent, lands on the region content
    pub content_frame: String,
    /// Embedded form iframe holding the grades table
    pub grades_iframe: String,

    /// Login field locators. `usename-field` is the portal's own typo,
    /// carried verbatim.
    pub username_field: String,
    pub password_field: String,

    /// Menu entry opening the student information landing region
    pub student_info_button: String,
    /// Previous / next term controls used for the keep-alive round trip
    pub prev_term_button: String,
    pub next_term_button: String,

    /// Faci id of the landing region reached right after login
    pub landing_faci: u8,
    /// Faci id of the student information region (terms + grades)
    pub info_faci: u8,

    /// Term status table id and results table id
    pub term_table_id: String,
    pub grades_table_id: String,
    /// Marker class of data rows in both tables
    pub data_row_class: String,
    /// 1-based column of the cell carrying the course title attribute
    pub course_title_column: usize,
    /// 1-based column of the cell wrapping the grade text
    pub grade_column: usize,
    /// Element nested in the grade cell whose text is the grade
    pub grade_value_element: String,

    /// Upper bound for a Faci frame to become available
    pub frame_wait: Duration,
    /// Settle delay after submitting credentials
    pub login_settle: Duration,
    /// Settle delay after entering the landing region
    pub landing_settle: Duration,
    /// Gap between the two clicks the landing menu entry needs
    pub landing_click_gap: Duration,
    /// Settle delay after the landing navigation and after term selection
    pub page_settle: Duration,
    /// Short settle after entering the grades frame
    pub grades_settle: Duration,
    /// Settle delay after each keep-alive click
    pub keep_alive_settle: Duration,
}

impl Default for PortalLayout {
    fn default() -> Self {
        Self {
            faci_frame_prefix: "Faci".to_string(),
            mid_frame: "/html/frameset/frameset/frame[2]".to_string(),
            content_frame: "/html/frameset/frame[3]".to_string(),
            grades_iframe: r#".//iframe[@id="FrameNewForm"]"#.to_string(),
            username_field: r#"//input[@id="usename-field"]"#.to_string(),
            password_field: r#"//input[@id="password"]"#.to_string(),
            student_info_button: "//*[text()='اطلاعات جامع دانشجو']".to_string(),
            prev_term_button: r#".//img[@title="ترم قبلي"]"#.to_string(),
            next_term_button: r#".//img[@title="ترم بعدي"]"#.to_string(),
            landing_faci: 2,
            info_faci: 3,
            term_table_id: "T01".to_string(),
            grades_table_id: "T02".to_string(),
            data_row_class: "TableDataRow".to_string(),
            course_title_column: 6,
            grade_column: 9,
            grade_value_element: "nobr[1]".to_string(),
            frame_wait: Duration::from_secs(50),
            login_settle: Duration::from_secs(20),
            landing_settle: Duration::from_secs(5),
            landing_click_gap: Duration::from_secs(1),
            page_settle: Duration::from_secs(7),
            grades_settle: Duration::from_millis(500),
            keep_alive_settle: Duration::from_secs(5),
        }
    }
}

impl PortalLayout {
    /// Locator of the outer frame of a region by its Faci id
    pub fn faci_frame(&self, faci_id: u8) -> String {
        format!(r#"//*[@id="{}{}"]"#, self.faci_frame_prefix, faci_id)
    }

    /// Locator of the clickable cell selecting the given term (1-based)
    pub fn term_row(&self, term_index: usize) -> String {
        format!(
            r#".//table[@id="{}"]//tr[@class="{}"][{}]/td[1]"#,
            self.term_table_id, self.data_row_class, term_index
        )
    }

    /// Locator of the results table itself, used as a presence check
    pub fn grades_table(&self) -> String {
        format!(r#".//table[@id="{}"]"#, self.grades_table_id)
    }

    /// Locator matching every data row of the results table
    pub fn grade_rows(&self) -> String {
        format!(
            r#".//table[@id="{}"]//tbody//tr[@class="{}"]"#,
            self.grades_table_id, self.data_row_class
        )
    }

    /// Cell carrying the course display title of the given row (1-based)
    pub fn course_title_cell(&self, row: usize) -> String {
        format!("({})[{}]/td[{}]", self.grade_rows(), row, self.course_title_column)
    }

    /// Element whose text is the grade of the given row (1-based)
    pub fn grade_value_cell(&self, row: usize) -> String {
        format!(
            "({})[{}]/td[{}]/{}",
            self.grade_rows(),
            row,
            self.grade_column,
            self.grade_value_element
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faci_frame_locator() {
        let layout = PortalLayout::default();
        assert_eq!(layout.faci_frame(3), r#"//*[@id="Faci3"]"#);
    }

    #[test]
    fn test_term_row_is_one_based() {
        let layout = PortalLayout::default();
        let locator = layout.term_row(5);
        assert!(locator.contains(r#"tr[@class="TableDataRow"][5]"#));
        assert!(locator.contains("T01"));
    }

    #[test]
    fn test_grade_cell_locators_use_configured_columns() {
        let layout = PortalLayout::default();
        assert!(layout.course_title_cell(2).ends_with("[2]/td[6]"));
        assert!(layout.grade_value_cell(2).ends_with("[2]/td[9]/nobr[1]"));
    }

    #[test]
    fn test_grade_rows_scoped_to_results_table() {
        let layout = PortalLayout::default();
        assert!(layout.grade_rows().contains("T02"));
        assert!(!layout.grade_rows().contains("T01"));
    }
}
