//! Duty domain models.
//!
//! Provides the core data types for recurring duty obligations and
//! their assignment to group members.
//!
//! # Domain Mappings
//!
//! | duty-roster | Lab | Household | School |
//! |-------------|-----|-----------|--------|
//! | DutyType | Lab cleaning | Dishes | Hall supervision |
//! | DutyRule | Weekdays in term | Every evening | Mon/Wed lunch |
//! | Slot | 2024-01-03 #0 | Tonight | Wed 12:00-13:00 |
//! | Member | Researcher | Flatmate | Staff |

mod assignment;
mod calendar;
mod duty_type;
mod rule;
mod slot;

pub use assignment::{AssignmentBook, DutyAssignment};
pub use calendar::DateRange;
pub use duty_type::{DutyKind, DutyType, Visibility};
pub use rule::DutyRule;
pub use slot::{Slot, SlotKey};

/// Opaque member identifier supplied by the group roster.
pub type MemberId = String;
