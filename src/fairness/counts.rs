//! Running assignment counts.

use std::collections::HashMap;

use crate::models::MemberId;

/// Per-member assignment counts for one duty type.
///
/// Seeded from persisted history (all dates, not only the target range)
/// and incremented as a run assigns slots. One instance belongs to one
/// run; it is never shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadCounts {
    counts: HashMap<MemberId, usize>,
}

impl LoadCounts {
    /// Creates empty counts (everyone at zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counts from a history map.
    pub fn from_history(history: HashMap<MemberId, usize>) -> Self {
        Self { counts: history }
    }

    /// Sets the count for a member.
    pub fn with_count(mut self, member_id: impl Into<MemberId>, count: usize) -> Self {
        self.counts.insert(member_id.into(), count);
        self
    }

    /// Current count for a member (0 if unknown).
    #[inline]
    pub fn get(&self, member_id: &str) -> usize {
        self.counts.get(member_id).copied().unwrap_or(0)
    }

    /// Records one more assignment for a member.
    pub fn increment(&mut self, member_id: &str) {
        *self.counts.entry(member_id.to_string()).or_insert(0) += 1;
    }

    /// Lowest count among the given members.
    pub fn min_over(&self, members: &[MemberId]) -> Option<usize> {
        members.iter().map(|m| self.get(m)).min()
    }
}
