//! Manual single-slot assignment.
//!
//! Admins may set or clear the assignee of one slot by hand. Generation
//! never overwrites a locked assignment, and neither does a manual edit
//! that names a different assignee.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ManualAssignError;
use crate::models::{DutyAssignment, DutyKind, DutyType, MemberId};

/// A requested manual assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualAssignment {
    /// Calendar day.
    pub date: NaiveDate,
    /// Slot index (ignored for time-range duties, which use 0).
    #[serde(default)]
    pub slot_index: u32,
    /// New assignee; `None` clears the slot.
    #[serde(default)]
    pub assignee_id: Option<MemberId>,
    /// Start time (time-range duties only).
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// End time (time-range duties only).
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
}

impl ManualAssignment {
    /// Creates a request that clears slot `slot_index` on `date`.
    pub fn new(date: NaiveDate, slot_index: u32) -> Self {
        Self {
            date,
            slot_index,
            assignee_id: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, member_id: impl Into<MemberId>) -> Self {
        self.assignee_id = Some(member_id.into());
        self
    }

    /// Sets the time window.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }
}

/// Validates a manual assignment and returns the record to upsert.
///
/// `existing` is the stored record at the target key, if any; its
/// `locked` and `done` flags carry over unchanged.
///
/// # Errors
/// - [`ManualAssignError::NotMember`] if the assignee is not on the roster
/// - [`ManualAssignError::InvalidTimeRange`] if a time-range duty lacks
///   times or the end is not after the start
/// - [`ManualAssignError::Locked`] if the slot is locked to someone else
pub fn apply_manual_assignment(
    duty_type: &DutyType,
    roster: &[MemberId],
    existing: Option<&DutyAssignment>,
    request: &ManualAssignment,
) -> Result<DutyAssignment, ManualAssignError> {
    if let Some(assignee) = &request.assignee_id {
        if !roster.contains(assignee) {
            return Err(ManualAssignError::NotMember(assignee.clone()));
        }
    }

    let (slot_index, bounds) = match duty_type.kind() {
        DutyKind::DaySlot => (request.slot_index, None),
        DutyKind::TimeRange => match (request.start_time, request.end_time) {
            (Some(start), Some(end)) if end > start => (
                0,
                Some((request.date.and_time(start), request.date.and_time(end))),
            ),
            (Some(start), Some(end)) => {
                return Err(ManualAssignError::InvalidTimeRange(format!(
                    "end {end} is not after start {start}"
                )))
            }
            _ => {
                return Err(ManualAssignError::InvalidTimeRange(
                    "start and end time are required".to_string(),
                ))
            }
        },
    };

    if let Some(record) = existing {
        if let (true, Some(holder)) = (record.locked, &record.assignee_id) {
            if request.assignee_id.as_ref() != Some(holder) {
                return Err(ManualAssignError::Locked {
                    assignee_id: holder.clone(),
                });
            }
        }
    }

    let mut record = existing.cloned().unwrap_or_else(|| {
        DutyAssignment::new(&duty_type.group_id, &duty_type.id, request.date, slot_index)
    });
    record.assignee_id = request.assignee_id.clone();
    record.starts_at = bounds.map(|(start, _)| start);
    record.ends_at = bounds.map(|(_, end)| end);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn roster() -> Vec<MemberId> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn test_creates_day_slot_record() {
        let ty = DutyType::day_slot("T1", "G1");
        let req = ManualAssignment::new(d(2), 1).with_assignee("A");
        let record = apply_manual_assignment(&ty, &roster(), None, &req).unwrap();

        assert_eq!(record.group_id, "G1");
        assert_eq!(record.slot_index, 1);
        assert_eq!(record.assignee_id.as_deref(), Some("A"));
        assert!(record.starts_at.is_none());
        assert!(!record.locked);
    }

    #[test]
    fn test_rejects_non_member() {
        let ty = DutyType::day_slot("T1", "G1");
        let req = ManualAssignment::new(d(2), 0).with_assignee("Z");
        assert_eq!(
            apply_manual_assignment(&ty, &roster(), None, &req).unwrap_err(),
            ManualAssignError::NotMember("Z".into())
        );
    }

    #[test]
    fn test_time_range_forces_slot_zero() {
        let ty = DutyType::time_range("T1", "G1");
        let req = ManualAssignment::new(d(2), 3)
            .with_assignee("B")
            .with_times(t(9), t(11));
        let record = apply_manual_assignment(&ty, &roster(), None, &req).unwrap();

        assert_eq!(record.slot_index, 0);
        assert_eq!(record.starts_at, Some(d(2).and_time(t(9))));
        assert_eq!(record.ends_at, Some(d(2).and_time(t(11))));
    }

    #[test]
    fn test_time_range_validation() {
        let ty = DutyType::time_range("T1", "G1");
        let missing = ManualAssignment::new(d(2), 0).with_assignee("A");
        assert!(matches!(
            apply_manual_assignment(&ty, &roster(), None, &missing),
            Err(ManualAssignError::InvalidTimeRange(_))
        ));

        let inverted = missing.clone().with_times(t(11), t(9));
        assert!(matches!(
            apply_manual_assignment(&ty, &roster(), None, &inverted),
            Err(ManualAssignError::InvalidTimeRange(_))
        ));
    }

    #[test]
    fn test_locked_slot_protected() {
        let ty = DutyType::day_slot("T1", "G1");
        let existing = DutyAssignment::new("G1", "T1", d(3), 0)
            .with_assignee("A")
            .locked();

        let swap = ManualAssignment::new(d(3), 0).with_assignee("B");
        assert_eq!(
            apply_manual_assignment(&ty, &roster(), Some(&existing), &swap).unwrap_err(),
            ManualAssignError::Locked {
                assignee_id: "A".into()
            }
        );

        let clear = ManualAssignment::new(d(3), 0);
        assert!(apply_manual_assignment(&ty, &roster(), Some(&existing), &clear).is_err());

        // Re-asserting the same holder is fine and keeps the lock
        let same = ManualAssignment::new(d(3), 0).with_assignee("A");
        let record = apply_manual_assignment(&ty, &roster(), Some(&existing), &same).unwrap();
        assert!(record.locked);
    }

    #[test]
    fn test_unlocked_slot_reassigned() {
        let ty = DutyType::day_slot("T1", "G1");
        let existing = DutyAssignment::new("G1", "T1", d(3), 0)
            .with_assignee("A")
            .done();
        let req = ManualAssignment::new(d(3), 0).with_assignee("B");
        let record = apply_manual_assignment(&ty, &roster(), Some(&existing), &req).unwrap();

        assert_eq!(record.assignee_id.as_deref(), Some("B"));
        assert!(record.done);
    }
}
