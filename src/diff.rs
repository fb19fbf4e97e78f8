//! Snapshot diffing
//!
//! Two snapshots are compared as sets of (course, grade) pairs and the
//! change set is their symmetric difference. Pair identity includes the
//! grade value, so a grade changing from A to B contributes two entries:
//! the old pair and the new pair. They are deliberately not merged.

use crate::snapshot::GradeSnapshot;

/// One member of the symmetric difference between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub course: String,
    pub grade: String,
}

/// Change entries in discovery order: pairs only in the previous snapshot
/// first, then pairs only in the current one
pub type ChangeSet = Vec<ChangeEntry>;

/// Symmetric difference of the two snapshots' (course, grade) pairs.
///
/// Grades are never un-published by the portal, so removal-only entries
/// are not expected in practice, but nothing special-cases their absence.
pub fn diff_snapshots(previous: &GradeSnapshot, current: &GradeSnapshot) -> ChangeSet {
    let mut changes = ChangeSet::new();

    for (course, grade) in previous {
        if current.get(course) != Some(grade) {
            changes.push(ChangeEntry { course: course.clone(), grade: grade.clone() });
        }
    }
    for (course, grade) in current {
        if previous.get(course) != Some(grade) {
            changes.push(ChangeEntry { course: course.clone(), grade: grade.clone() });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> GradeSnapshot {
        pairs.iter().map(|(c, g)| (c.to_string(), g.to_string())).collect()
    }

    #[test]
    fn test_diff_against_self_is_empty() {
        let snap = snapshot(&[("Algorithms", "20"), ("Databases", "19")]);
        assert!(diff_snapshots(&snap, &snap).is_empty());
    }

    #[test]
    fn test_new_course_appears_once() {
        let prev = snapshot(&[("Databases", "19")]);
        let cur = snapshot(&[("Databases", "19"), ("Algorithms", "20")]);

        let changes = diff_snapshots(&prev, &cur);
        assert_eq!(changes, vec![ChangeEntry { course: "Algorithms".into(), grade: "20".into() }]);
    }

    #[test]
    fn test_changed_grade_yields_old_and_new_pair() {
        let prev = snapshot(&[("Algorithms", "A")]);
        let cur = snapshot(&[("Algorithms", "B")]);

        let changes = diff_snapshots(&prev, &cur);
        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&ChangeEntry { course: "Algorithms".into(), grade: "A".into() }));
        assert!(changes.contains(&ChangeEntry { course: "Algorithms".into(), grade: "B".into() }));
    }

    #[test]
    fn test_removed_pair_is_still_reported() {
        let prev = snapshot(&[("Algorithms", "20"), ("Databases", "19")]);
        let cur = snapshot(&[("Databases", "19")]);

        let changes = diff_snapshots(&prev, &cur);
        assert_eq!(changes, vec![ChangeEntry { course: "Algorithms".into(), grade: "20".into() }]);
    }

    #[test]
    fn test_previous_side_discovered_first() {
        let prev = snapshot(&[("Algorithms", "A")]);
        let cur = snapshot(&[("Algorithms", "B")]);

        let changes = diff_snapshots(&prev, &cur);
        assert_eq!(changes[0].grade, "A");
        assert_eq!(changes[1].grade, "B");
    }
}
