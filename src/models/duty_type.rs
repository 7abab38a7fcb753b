//! Duty type model.
//!
//! A duty type is a named category of recurring obligation within a
//! group ("Lab cleaning", "Lunch supervision"). It owns the recurrence
//! rules that generate its slots.

use serde::{Deserialize, Serialize};

use super::DutyRule;

/// How slots of a duty type are shaped.
///
/// Fixed at creation: changing the kind would invalidate the time fields
/// of existing rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyKind {
    /// Numbered slots per day (slot 0, slot 1, ...).
    #[default]
    DaySlot,
    /// One slot per day bounded by a wall-clock start and end time.
    TimeRange,
}

/// Who may see a duty type's assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Visible outside the group.
    Public,
    /// Visible to group members only.
    #[default]
    MembersOnly,
}

/// A category of recurring duty and its rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyType {
    /// Unique duty type identifier.
    pub id: String,
    /// Owning group identifier.
    pub group_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Display color (e.g. "#3b82f6").
    #[serde(default)]
    pub color: String,
    /// Visibility of generated assignments.
    #[serde(default)]
    pub visibility: Visibility,
    kind: DutyKind,
    /// Recurrence rules, in authoring order.
    #[serde(default)]
    pub rules: Vec<DutyRule>,
}

impl DutyType {
    /// Creates a duty type with no rules.
    pub fn new(id: impl Into<String>, group_id: impl Into<String>, kind: DutyKind) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            name: String::new(),
            color: String::new(),
            visibility: Visibility::default(),
            kind,
            rules: Vec::new(),
        }
    }

    /// Creates a day-slot duty type.
    pub fn day_slot(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self::new(id, group_id, DutyKind::DaySlot)
    }

    /// Creates a time-range duty type.
    pub fn time_range(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self::new(id, group_id, DutyKind::TimeRange)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Adds a rule.
    pub fn with_rule(mut self, rule: DutyRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The slot shape of this duty type.
    #[inline]
    pub fn kind(&self) -> DutyKind {
        self.kind
    }

    /// Rules that take part in generation (not disabled).
    pub fn active_rules(&self) -> impl Iterator<Item = &DutyRule> {
        self.rules.iter().filter(|r| !r.disabled)
    }
}
