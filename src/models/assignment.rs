//! Persisted assignment model.
//!
//! A [`DutyAssignment`] is the stored outcome for one slot, keyed by
//! (group, duty type, date, slot index). [`AssignmentBook`] is an
//! in-memory keyed store with the same upsert semantics the persistence
//! layer is expected to provide.
//!
//! # Upsert Semantics
//! On conflict only the assignee and the time bounds are updated. The
//! `locked` and `done` flags are owned by manual edits and are never
//! changed by a generation run.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{DateRange, MemberId, Slot, SlotKey};

/// The persisted record of who (if anyone) holds a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    /// Owning group identifier.
    pub group_id: String,
    /// Duty type identifier.
    pub duty_type_id: String,
    /// Calendar day.
    pub date: NaiveDate,
    /// Zero-based index within the day.
    pub slot_index: u32,
    /// Assignee (`None` = unassigned).
    pub assignee_id: Option<MemberId>,
    /// Locked assignments are never overwritten by generation.
    pub locked: bool,
    /// The duty has been carried out.
    pub done: bool,
    /// Start instant (time-range duties only).
    pub starts_at: Option<NaiveDateTime>,
    /// End instant (time-range duties only).
    pub ends_at: Option<NaiveDateTime>,
}

impl DutyAssignment {
    /// Creates an unassigned, unlocked record.
    pub fn new(
        group_id: impl Into<String>,
        duty_type_id: impl Into<String>,
        date: NaiveDate,
        slot_index: u32,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            duty_type_id: duty_type_id.into(),
            date,
            slot_index,
            assignee_id: None,
            locked: false,
            done: false,
            starts_at: None,
            ends_at: None,
        }
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, member_id: impl Into<MemberId>) -> Self {
        self.assignee_id = Some(member_id.into());
        self
    }

    /// Marks the record as locked.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Marks the record as done.
    pub fn done(mut self) -> Self {
        self.done = true;
        self
    }

    /// The slot key of this record.
    #[inline]
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.date, self.slot_index)
    }
}

type BookKey = (String, String, SlotKey);

/// In-memory assignment store keyed by (group, duty type, date, slot index).
///
/// At most one record exists per key.
#[derive(Debug, Clone, Default)]
pub struct AssignmentBook {
    records: BTreeMap<BookKey, DutyAssignment>,
}

impl AssignmentBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stores a record, replacing any record at the same key.
    pub fn insert(&mut self, assignment: DutyAssignment) {
        let key = (
            assignment.group_id.clone(),
            assignment.duty_type_id.clone(),
            assignment.key(),
        );
        self.records.insert(key, assignment);
    }

    /// Looks up the record at a key.
    pub fn get(&self, group_id: &str, duty_type_id: &str, key: SlotKey) -> Option<&DutyAssignment> {
        self.records
            .get(&(group_id.to_string(), duty_type_id.to_string(), key))
    }

    /// Upserts a generated slot.
    ///
    /// Creates the record if missing; otherwise updates only the assignee
    /// and time bounds. Returns `true` if the record was created or its
    /// assignee changed.
    pub fn upsert_slot(&mut self, group_id: &str, duty_type_id: &str, slot: &Slot) -> bool {
        let key = (group_id.to_string(), duty_type_id.to_string(), slot.key());
        match self.records.get_mut(&key) {
            Some(existing) => {
                let changed = existing.assignee_id != slot.assignee_id;
                existing.assignee_id = slot.assignee_id.clone();
                existing.starts_at = slot.starts_at;
                existing.ends_at = slot.ends_at;
                changed
            }
            None => {
                let mut record =
                    DutyAssignment::new(group_id, duty_type_id, slot.date, slot.slot_index);
                record.assignee_id = slot.assignee_id.clone();
                record.starts_at = slot.starts_at;
                record.ends_at = slot.ends_at;
                self.records.insert(key, record);
                true
            }
        }
    }

    /// Records of one duty type whose date falls within `range`, in key order.
    pub fn in_range(&self, group_id: &str, duty_type_id: &str, range: DateRange) -> Vec<DutyAssignment> {
        self.for_type(group_id, duty_type_id)
            .filter(|a| range.contains(a.date))
            .cloned()
            .collect()
    }

    /// Per-member assignment counts for one duty type, over all dates.
    pub fn history_counts(&self, group_id: &str, duty_type_id: &str) -> HashMap<MemberId, usize> {
        let mut counts = HashMap::new();
        for assignee in self
            .for_type(group_id, duty_type_id)
            .filter_map(|a| a.assignee_id.as_ref())
        {
            *counts.entry(assignee.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn for_type<'a>(
        &'a self,
        group_id: &'a str,
        duty_type_id: &'a str,
    ) -> impl Iterator<Item = &'a DutyAssignment> + 'a {
        self.records
            .values()
            .filter(move |a| a.group_id == group_id && a.duty_type_id == duty_type_id)
    }
}
