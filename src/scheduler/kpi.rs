//! Fairness metrics (KPIs).
//!
//! Computes load-balance indicators from a finished slot list and the
//! run's final counts.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Counts | History + this run, per eligible member |
//! | Spread | max(count) - min(count) over eligible members |
//! | Same-day repeats | Extra slots a member holds on a day beyond the first |
//! | Unassigned | Slots left without an assignee |

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fairness::LoadCounts;
use crate::models::{MemberId, Slot};

/// Load-balance indicators for one duty type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessReport {
    /// Final count per eligible member.
    pub counts_by_member: HashMap<MemberId, usize>,
    /// Lowest count (`None` with no eligible members).
    pub min_count: Option<usize>,
    /// Highest count (`None` with no eligible members).
    pub max_count: Option<usize>,
    /// Extra same-day slots held by one member, summed over days.
    pub same_day_repeats: usize,
    /// Slots without an assignee.
    pub unassigned_slots: usize,
}

impl FairnessReport {
    /// Computes the report.
    ///
    /// # Arguments
    /// * `slots` - The finished slot list.
    /// * `eligible` - Members the run could assign.
    /// * `counts` - Running counts after the run.
    pub fn calculate(slots: &[Slot], eligible: &[MemberId], counts: &LoadCounts) -> Self {
        let counts_by_member: HashMap<MemberId, usize> = eligible
            .iter()
            .map(|m| (m.clone(), counts.get(m)))
            .collect();

        let mut per_day: HashMap<(NaiveDate, &str), usize> = HashMap::new();
        let mut unassigned_slots = 0;
        for slot in slots {
            match &slot.assignee_id {
                Some(assignee) => *per_day.entry((slot.date, assignee.as_str())).or_insert(0) += 1,
                None => unassigned_slots += 1,
            }
        }
        let same_day_repeats = per_day.values().map(|n| n - 1).sum();

        Self {
            min_count: counts_by_member.values().copied().min(),
            max_count: counts_by_member.values().copied().max(),
            counts_by_member,
            same_day_repeats,
            unassigned_slots,
        }
    }

    /// max - min count; 0 with no eligible members.
    pub fn spread(&self) -> usize {
        match (self.min_count, self.max_count) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_report() {
        let slots = vec![
            Slot::new(d(1), 0).with_assignee("A"),
            Slot::new(d(1), 1).with_assignee("A"),
            Slot::new(d(2), 0).with_assignee("B"),
            Slot::new(d(3), 0),
        ];
        let counts = LoadCounts::new().with_count("A", 2).with_count("B", 1);
        let report = FairnessReport::calculate(&slots, &ids(&["A", "B", "C"]), &counts);

        assert_eq!(report.counts_by_member.get("C"), Some(&0));
        assert_eq!(report.min_count, Some(0));
        assert_eq!(report.max_count, Some(2));
        assert_eq!(report.spread(), 2);
        assert_eq!(report.same_day_repeats, 1);
        assert_eq!(report.unassigned_slots, 1);
    }

    #[test]
    fn test_empty_report() {
        let report = FairnessReport::calculate(&[], &[], &LoadCounts::new());
        assert_eq!(report.min_count, None);
        assert_eq!(report.spread(), 0);
        assert_eq!(report.unassigned_slots, 0);
    }
}
