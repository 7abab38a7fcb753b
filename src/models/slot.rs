//! Slot model.
//!
//! A slot is one unit of duty work: a calendar day plus a zero-based
//! index within that day. Slots are transient; they exist as the input
//! and output of one generation run and are persisted as
//! [`DutyAssignment`](super::DutyAssignment)s afterwards.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::MemberId;

/// Position of a slot within one duty type: (date, slot index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Calendar day.
    pub date: NaiveDate,
    /// Zero-based index within the day.
    pub slot_index: u32,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(date: NaiveDate, slot_index: u32) -> Self {
        Self { date, slot_index }
    }
}

/// A unit of duty work to be filled by a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Calendar day.
    pub date: NaiveDate,
    /// Zero-based index within the day.
    pub slot_index: u32,
    /// Copied from an existing locked assignment.
    pub locked: bool,
    /// Current assignee, if any.
    pub assignee_id: Option<MemberId>,
    /// Start instant (time-range duties only, UTC).
    pub starts_at: Option<NaiveDateTime>,
    /// End instant (time-range duties only, UTC).
    pub ends_at: Option<NaiveDateTime>,
}

impl Slot {
    /// Creates an unlocked, unassigned slot.
    pub fn new(date: NaiveDate, slot_index: u32) -> Self {
        Self {
            date,
            slot_index,
            locked: false,
            assignee_id: None,
            starts_at: None,
            ends_at: None,
        }
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, member_id: impl Into<MemberId>) -> Self {
        self.assignee_id = Some(member_id.into());
        self
    }

    /// Marks the slot as locked.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Sets the start/end instants.
    pub fn with_bounds(mut self, starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    /// The slot's key.
    #[inline]
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.date, self.slot_index)
    }

    /// Whether a generation run must leave this slot untouched.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.locked && self.assignee_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_requires_assignee() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert!(!Slot::new(date, 0).locked().is_pinned());
        assert!(!Slot::new(date, 0).with_assignee("C").is_pinned());
        assert!(Slot::new(date, 0).with_assignee("C").locked().is_pinned());
    }

    #[test]
    fn test_key_ordering() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(SlotKey::new(d1, 1) < SlotKey::new(d2, 0));
        assert!(SlotKey::new(d1, 0) < SlotKey::new(d1, 1));
    }
}
