//! Greedy fair assignment of members to slots.
//!
//! # Algorithm
//!
//! For each slot in (date, slot index) order:
//! 1. A locked slot that already has an assignee is left untouched. Its
//!    assignee still counts as "on duty that day" for step 3.
//! 2. If the fairness queue is exhausted, refill it with the members at
//!    the current minimum running count.
//! 3. Take the first queued member not already on duty that day. When
//!    every queued member is, take the front member anyway.
//! 4. Assign, bump the member's running count, and note them for the day.
//!
//! Step 3 only applies when same-day avoidance is enabled.
//!
//! # Complexity
//! O(s * m) where s=slots, m=eligible members.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rand::Rng;

use crate::fairness::{FairnessQueue, LoadCounts};
use crate::models::{MemberId, Slot};

/// Greedy, fairness-ordered slot filler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use duty_roster::fairness::{seeded_rng, LoadCounts};
/// use duty_roster::models::Slot;
/// use duty_roster::scheduler::AssignmentEngine;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let slots = vec![Slot::new(day, 0), Slot::new(day, 1)];
/// let members = vec!["A".to_string(), "B".to_string()];
/// let mut counts = LoadCounts::new();
///
/// let filled = AssignmentEngine::new().assign(slots, &members, &mut counts, &mut seeded_rng(1));
/// assert_ne!(filled[0].assignee_id, filled[1].assignee_id);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    avoid_consecutive: bool,
}

impl AssignmentEngine {
    /// Creates an engine with same-day avoidance enabled.
    pub fn new() -> Self {
        Self {
            avoid_consecutive: true,
        }
    }

    /// Enables or disables same-day avoidance.
    pub fn with_avoid_consecutive(mut self, avoid: bool) -> Self {
        self.avoid_consecutive = avoid;
        self
    }

    /// Fills `slots` from `members`, updating `counts` in place.
    ///
    /// `slots` must be in (date, slot index) order. With no members the
    /// slots are returned unchanged.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        mut slots: Vec<Slot>,
        members: &[MemberId],
        counts: &mut LoadCounts,
        rng: &mut R,
    ) -> Vec<Slot> {
        if members.is_empty() {
            return slots;
        }

        let mut queue = FairnessQueue::build(members, counts, rng);
        let mut on_duty: HashMap<NaiveDate, HashSet<MemberId>> = HashMap::new();

        for slot in &mut slots {
            if slot.is_pinned() {
                if let Some(assignee) = &slot.assignee_id {
                    on_duty
                        .entry(slot.date)
                        .or_default()
                        .insert(assignee.clone());
                }
                continue;
            }

            if queue.is_empty() {
                queue = FairnessQueue::refill(members, counts, rng);
            }

            let today = on_duty.entry(slot.date).or_default();
            let avoid = self.avoid_consecutive;
            let Some(chosen) = queue.take_preferred(|m| avoid && today.contains(m)) else {
                continue;
            };

            counts.increment(&chosen);
            today.insert(chosen.clone());
            slot.assignee_id = Some(chosen);
        }

        slots
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
