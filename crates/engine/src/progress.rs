//! Section-based progress aggregation.
//!
//! Completed time is summed from task estimates and mapped onto fixed
//! 30-minute sections toward an 8-hour goal. Each section celebrates exactly
//! once for the lifetime of the stored record.

use std::collections::BTreeSet;

use focusboard_core::Celebration;

/// Seconds per progress section (30 minutes).
pub const SECTION_TIME: u64 = 30 * 60;

/// Number of sections in the daily goal (8 hours).
pub const TOTAL_SECTIONS: usize = 16;

// One message per section, in section order.
const CONGRAT_MESSAGES: [&str; TOTAL_SECTIONS] = [
    "Great start! You're building momentum!",
    "Keep going! Every minute counts!",
    "You're on fire! Don't stop now!",
    "Two hours down! You're making real progress!",
    "Halfway to your first milestone! Keep pushing!",
    "You're in the zone! Maintain this energy!",
    "Three hours! Your dedication is showing!",
    "Keep the momentum! You're unstoppable!",
    "Four hours! You're a productivity machine!",
    "Past the halfway point! Push through!",
    "Five hours! Your consistency is impressive!",
    "Almost there! Don't let up now!",
    "Six hours! You're in elite territory!",
    "Final stretch! Give it everything!",
    "Seven hours! You're almost at the finish line!",
    "Eight hours complete! You're a productivity champion! 🏆",
];

/// A snapshot of aggregate progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// Total estimated seconds across completed tasks
    pub complete_seconds: u64,

    /// Whole sections covered by the completed time (may exceed the goal)
    pub sections_completed: usize,

    /// Highest section index to highlight, clamped to the last section;
    /// `None` until a first section completes
    pub current_section: Option<usize>,

    /// Completed time as a share of the 8-hour goal, capped at 100
    pub percent: f64,
}

/// Recomputes progress from completed time and owns the one-time celebration
/// record.
#[derive(Debug, Default)]
pub struct ProgressAggregator {
    celebrated: BTreeSet<usize>,
}

impl ProgressAggregator {
    /// Restore the aggregator from a persisted section-completion record.
    pub fn from_record(celebrated: BTreeSet<usize>) -> Self {
        Self { celebrated }
    }

    /// The section indices that have already celebrated.
    pub fn record(&self) -> &BTreeSet<usize> {
        &self.celebrated
    }

    /// Recompute aggregate progress for the given completed seconds.
    ///
    /// Returns the report plus a celebration for every section index that
    /// newly became complete. Re-running with unchanged input yields the same
    /// report and no celebrations.
    pub fn recompute(&mut self, complete_seconds: u64) -> (ProgressReport, Vec<Celebration>) {
        let sections_completed = (complete_seconds / SECTION_TIME) as usize;
        let current_section = sections_completed
            .checked_sub(1)
            .map(|s| s.min(TOTAL_SECTIONS - 1));
        let goal = (TOTAL_SECTIONS as u64 * SECTION_TIME) as f64;
        let percent = (complete_seconds as f64 / goal * 100.0).min(100.0);

        // Celebrate every index reached but not yet recorded, never past the
        // goal. A single recompute can cross more than one boundary.
        let mut celebrations = Vec::new();
        for section in 0..sections_completed.min(TOTAL_SECTIONS) {
            if self.celebrated.insert(section) {
                celebrations.push(Celebration {
                    section,
                    label: section_label(section),
                    message: CONGRAT_MESSAGES[section].to_string(),
                });
            }
        }

        (
            ProgressReport {
                complete_seconds,
                sections_completed,
                current_section,
                percent,
            },
            celebrations,
        )
    }

    /// Forget every celebration. Only a full task reset does this.
    pub fn clear(&mut self) {
        self.celebrated.clear();
    }
}

/// Cumulative-time label for a section index: "30 min", "1 h", "1 h 30 min".
fn section_label(section: usize) -> String {
    let minutes = (section + 1) * 30;
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_section_celebrates_with_30_min_label() {
        let mut aggregator = ProgressAggregator::default();
        let (report, celebrations) = aggregator.recompute(1800);

        assert_eq!(report.sections_completed, 1);
        assert_eq!(report.current_section, Some(0));
        assert_eq!(celebrations.len(), 1);
        assert_eq!(celebrations[0].section, 0);
        assert_eq!(celebrations[0].label, "30 min");
    }

    #[test]
    fn sixty_five_minutes_celebrates_sections_zero_and_one_once() {
        let mut aggregator = ProgressAggregator::default();
        let (report, celebrations) = aggregator.recompute(3900);

        assert_eq!(report.sections_completed, 2);
        let fired: Vec<usize> = celebrations.iter().map(|c| c.section).collect();
        assert_eq!(fired, vec![0, 1]);

        let (again, none) = aggregator.recompute(3900);
        assert_eq!(again, report);
        assert!(none.is_empty());
    }

    #[test]
    fn recompute_is_idempotent_below_a_boundary() {
        let mut aggregator = ProgressAggregator::default();
        let (report, celebrations) = aggregator.recompute(1799);
        assert_eq!(report.sections_completed, 0);
        assert_eq!(report.current_section, None);
        assert!(celebrations.is_empty());
    }

    #[test]
    fn progress_beyond_the_goal_clamps() {
        let mut aggregator = ProgressAggregator::default();
        // 10 hours completed against the 8-hour goal.
        let (report, celebrations) = aggregator.recompute(36_000);

        assert_eq!(report.sections_completed, 20);
        assert_eq!(report.current_section, Some(TOTAL_SECTIONS - 1));
        assert_eq!(report.percent, 100.0);
        assert_eq!(celebrations.len(), TOTAL_SECTIONS);
        assert_eq!(celebrations.last().unwrap().section, TOTAL_SECTIONS - 1);

        let (_, none) = aggregator.recompute(72_000);
        assert!(none.is_empty());
    }

    #[test]
    fn restored_record_never_refires() {
        let record: BTreeSet<usize> = [0, 1].into_iter().collect();
        let mut aggregator = ProgressAggregator::from_record(record);
        let (_, celebrations) = aggregator.recompute(3900);
        assert!(celebrations.is_empty());
    }

    #[test]
    fn labels_cover_all_shapes() {
        assert_eq!(section_label(0), "30 min");
        assert_eq!(section_label(1), "1 h");
        assert_eq!(section_label(2), "1 h 30 min");
        assert_eq!(section_label(15), "8 h");
    }
}
