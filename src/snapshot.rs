//! Grade snapshot extraction
//!
//! Reads the rendered results table into a [`GradeSnapshot`]. The driver
//! focus must already be inside the grades frame (see
//! [`crate::navigation::NavigationContext::enter_grades_frame`]).

use crate::browser::PortalDriver;
use crate::error::{Result, WatchError};
use crate::portal::PortalLayout;
use indexmap::IndexMap;
use log::info;

/// Course display title → grade, as rendered by the portal.
///
/// Courses whose grade cell is empty are absent, not present with an
/// empty value. No title normalization is performed: two differently
/// rendered titles are two courses. Insertion order is row order, which
/// keeps the diff's discovery order deterministic.
pub type GradeSnapshot = IndexMap<String, String>;

/// Read the results table into a fresh snapshot.
///
/// Each included (course, grade) pair is logged for observability. Rows
/// are read by fixed column positions from the layout; an absent table or
/// a row without a course title is an extraction failure, never guessed
/// around.
pub fn extract_snapshot(driver: &dyn PortalDriver, layout: &PortalLayout) -> Result<GradeSnapshot> {
    if driver.count(&layout.grades_table())? == 0 {
        return Err(WatchError::Extraction(format!(
            "results table '{}' not present in the grades frame",
            layout.grades_table_id
        )));
    }

    let rows = driver.count(&layout.grade_rows())?;
    let mut snapshot = GradeSnapshot::new();

    info!("currently given grades:");
    for row in 1..=rows {
        let course = driver
            .attribute(&layout.course_title_cell(row), "title")?
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| WatchError::Extraction(format!("row {} has no course title", row)))?;
        let grade = driver.text(&layout.grade_value_cell(row))?;
        let grade = grade.trim();
        if grade.is_empty() {
            continue;
        }
        info!("  {}: {}", course, grade);
        snapshot.insert(course, grade.to_string());
    }

    Ok(snapshot)
}
