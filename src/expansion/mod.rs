//! Rule expansion: recurrence rules → concrete slots.
//!
//! # Algorithm
//!
//! 1. For each active rule, intersect its own date range with the target
//!    range (rules that do not intersect are skipped).
//! 2. Walk every day of the intersection, keeping days whose weekday the
//!    rule names (or every day if it names none).
//! 3. Emit the rule's slots for each kept day: `slots_per_day` numbered
//!    slots for day-slot duties, a single bounded slot for time-range duties.
//! 4. Overlay lock/assignee state from existing assignments at the same key.
//!
//! Same-day avoidance is requested when any rule that contributed a slot
//! asks for it; rules outside the range or skipped do not count.
//!
//! # Overlap
//! When two rules produce the same (date, slot index) key the first rule
//! in authoring order wins; later duplicates are dropped. Output is
//! ordered by date, then slot index.
//!
//! # Skipped Rules
//! A rule with an inverted own date range, or a time-range rule without a
//! valid (start < end) time window, is skipped with a warning. The run
//! continues with the remaining rules.

mod eligibility;

pub use eligibility::resolve_eligible;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{DateRange, DutyAssignment, DutyKind, DutyRule, DutyType, Slot, SlotKey};

/// Result of expanding one duty type.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Slots in (date, slot index) order.
    pub slots: Vec<Slot>,
    /// IDs of active rules skipped as unusable.
    pub skipped_rules: Vec<String>,
    /// Whether any rule that contributed a slot asks to avoid same-day
    /// repeats.
    pub avoid_consecutive: bool,
}

/// Expands a duty type's rules into slots within `range`.
///
/// `existing` holds persisted assignments for this duty type; records
/// outside `range` or not matching a generated key are ignored.
pub fn expand_slots(duty_type: &DutyType, range: DateRange, existing: &[DutyAssignment]) -> Expansion {
    let kind = duty_type.kind();
    let mut slots: BTreeMap<SlotKey, Slot> = BTreeMap::new();
    let mut skipped_rules = Vec::new();
    let mut avoid_consecutive = false;

    for rule in duty_type.active_rules() {
        if let Some(reason) = unusable_reason(rule, kind) {
            warn!(
                duty_type_id = %duty_type.id,
                rule_id = %rule.id,
                reason,
                "skipping duty rule"
            );
            skipped_rules.push(rule.id.clone());
            continue;
        }

        let Some(window) = rule.date_range().intersect(&range) else {
            debug!(rule_id = %rule.id, "rule does not overlap target range");
            continue;
        };

        for date in window.days().filter(|d| rule.applies_on(*d)) {
            for slot_index in 0..rule.slots_for(kind) {
                if let Entry::Vacant(entry) = slots.entry(SlotKey::new(date, slot_index)) {
                    entry.insert(new_slot(rule, kind, date, slot_index));
                    avoid_consecutive |= rule.avoid_consecutive;
                }
            }
        }
    }

    let existing: HashMap<SlotKey, &DutyAssignment> = existing
        .iter()
        .filter(|a| a.duty_type_id == duty_type.id)
        .map(|a| (a.key(), a))
        .collect();

    let slots = slots
        .into_values()
        .map(|mut slot| {
            if let Some(record) = existing.get(&slot.key()) {
                slot.locked = record.locked;
                slot.assignee_id = record.assignee_id.clone();
            }
            slot
        })
        .collect();

    Expansion {
        slots,
        skipped_rules,
        avoid_consecutive,
    }
}

fn unusable_reason(rule: &DutyRule, kind: DutyKind) -> Option<&'static str> {
    if rule.date_range().is_empty() {
        return Some("end date before start date");
    }
    if kind == DutyKind::TimeRange {
        match (rule.start_time, rule.end_time) {
            (Some(start), Some(end)) if end > start => {}
            (Some(_), Some(_)) => return Some("end time not after start time"),
            _ => return Some("missing start or end time"),
        }
    }
    None
}

fn new_slot(rule: &DutyRule, kind: DutyKind, date: NaiveDate, slot_index: u32) -> Slot {
    let slot = Slot::new(date, slot_index);
    match (kind, rule.bounds_on(date)) {
        (DutyKind::TimeRange, Some((start, end))) => slot.with_bounds(start, end),
        _ => slot,
    }
}
