//! Duty recurrence rule model.
//!
//! A rule says on which days a duty recurs, how many slots each day
//! carries, and which members may take them.
//!
//! # Eligibility
//! An empty include list means "every group member". Exclusions always
//! win over inclusions, also across different rules of the same type.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::calendar::weekday_number;
use super::{DateRange, DutyKind, MemberId};

/// A recurrence rule belonging to one duty type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyRule {
    /// Unique rule identifier.
    pub id: String,
    /// First day the rule applies (inclusive).
    pub start_date: NaiveDate,
    /// Last day the rule applies (inclusive).
    pub end_date: NaiveDate,
    /// Weekdays the rule applies on (0 = Sunday .. 6 = Saturday).
    /// Empty = every day.
    #[serde(default)]
    pub weekdays: Vec<u8>,
    /// Slots generated per kept day (day-slot types only).
    #[serde(default = "default_slots_per_day")]
    pub slots_per_day: u32,
    /// Wall-clock start (time-range types only).
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Wall-clock end (time-range types only).
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Members eligible under this rule. Empty = all members.
    #[serde(default)]
    pub include_member_ids: Vec<MemberId>,
    /// Members never eligible under this duty type.
    #[serde(default)]
    pub exclude_member_ids: Vec<MemberId>,
    /// Avoid giving one member two slots on the same day.
    #[serde(default = "default_avoid_consecutive")]
    pub avoid_consecutive: bool,
    /// Disabled rules take no part in generation.
    #[serde(default)]
    pub disabled: bool,
}

fn default_slots_per_day() -> u32 {
    1
}

fn default_avoid_consecutive() -> bool {
    true
}

impl DutyRule {
    /// Creates a rule covering [start_date, end_date] on every day, one slot per day.
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            start_date,
            end_date,
            weekdays: Vec::new(),
            slots_per_day: default_slots_per_day(),
            start_time: None,
            end_time: None,
            include_member_ids: Vec::new(),
            exclude_member_ids: Vec::new(),
            avoid_consecutive: default_avoid_consecutive(),
            disabled: false,
        }
    }

    /// Restricts the rule to the given weekdays.
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.weekdays = weekdays.into_iter().collect();
        self
    }

    /// Sets the number of slots per day.
    pub fn with_slots_per_day(mut self, slots: u32) -> Self {
        self.slots_per_day = slots;
        self
    }

    /// Sets the wall-clock start and end times.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Adds members to the include list.
    pub fn include<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MemberId>,
    {
        self.include_member_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Adds members to the exclude list.
    pub fn exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MemberId>,
    {
        self.exclude_member_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the same-day repeat avoidance flag.
    pub fn with_avoid_consecutive(mut self, avoid: bool) -> Self {
        self.avoid_consecutive = avoid;
        self
    }

    /// Marks the rule as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// The rule's own date range.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Whether the rule applies on the given day of the week.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.weekdays.is_empty() || self.weekdays.contains(&weekday_number(date))
    }

    /// Slots generated per kept day for a duty of the given kind.
    pub fn slots_for(&self, kind: DutyKind) -> u32 {
        match kind {
            DutyKind::DaySlot => self.slots_per_day,
            DutyKind::TimeRange => 1,
        }
    }

    /// Start and end instants on `date`, if both times are set.
    pub fn bounds_on(&self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((date.and_time(start), date.and_time(end))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_applies_on_weekdays() {
        let rule = DutyRule::new("R1", d(1), d(31)).with_weekdays([1, 3]);
        assert!(rule.applies_on(d(1))); // Monday
        assert!(!rule.applies_on(d(2))); // Tuesday
        assert!(rule.applies_on(d(3))); // Wednesday
    }

    #[test]
    fn test_empty_weekdays_means_every_day() {
        let rule = DutyRule::new("R1", d(1), d(31));
        assert!(d(1).iter_days().take(7).all(|day| rule.applies_on(day)));
    }

    #[test]
    fn test_time_range_has_single_slot() {
        let rule = DutyRule::new("R1", d(1), d(2)).with_slots_per_day(3);
        assert_eq!(rule.slots_for(DutyKind::DaySlot), 3);
        assert_eq!(rule.slots_for(DutyKind::TimeRange), 1);
    }

    #[test]
    fn test_bounds_on() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ten = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        let rule = DutyRule::new("R1", d(1), d(2)).with_times(nine, ten);

        let (start, end) = rule.bounds_on(d(2)).unwrap();
        assert_eq!(start, d(2).and_time(nine));
        assert_eq!(end, d(2).and_time(ten));

        assert!(DutyRule::new("R2", d(1), d(2)).bounds_on(d(1)).is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let rule: DutyRule = serde_json::from_str(
            r#"{"id":"R1","start_date":"2024-01-01","end_date":"2024-01-05"}"#,
        )
        .unwrap();
        assert_eq!(rule.slots_per_day, 1);
        assert!(rule.avoid_consecutive);
        assert!(rule.weekdays.is_empty());
        assert!(!rule.disabled);
    }
}
