//! Input validation for duty generation.
//!
//! Checks a duty type and target range before any slot is expanded.
//! Detects:
//! - Inverted or oversized target ranges
//! - Time-range rules without start/end times
//! - Weekday numbers outside 0..=6
//! - Day-slot rules with zero slots per day
//!
//! Disabled rules are not checked. Rules with a zero-length time window or
//! an inverted own date range are *not* errors; the expander skips them.

use crate::config::GeneratorConfig;
use crate::models::{DateRange, DutyKind, DutyType};
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Target range ends before it starts.
    InvalidRange,
    /// Target range is longer than the configured maximum.
    RangeTooLarge,
    /// A time-range rule lacks a start or end time.
    MissingRuleTime,
    /// A weekday number is outside 0..=6.
    InvalidWeekday,
    /// A day-slot rule generates no slots per day.
    ZeroSlots,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a duty type and target range for generation.
///
/// Checks:
/// 1. `range.to` is not before `range.from`
/// 2. The range spans at most `config.max_range_days` days
/// 3. Active time-range rules have both times set
/// 4. Active rules only name weekdays 0..=6
/// 5. Active day-slot rules have `slots_per_day >= 1`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_generation(
    duty_type: &DutyType,
    range: DateRange,
    config: &GeneratorConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    if range.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRange,
            format!("Range end {} is before start {}", range.to, range.from),
        ));
    } else if range.len_days() > i64::from(config.max_range_days) {
        errors.push(ValidationError::new(
            ValidationErrorKind::RangeTooLarge,
            format!(
                "Range {}..{} spans {} days (max {})",
                range.from,
                range.to,
                range.len_days(),
                config.max_range_days
            ),
        ));
    }

    for rule in duty_type.active_rules() {
        if duty_type.kind() == DutyKind::TimeRange
            && (rule.start_time.is_none() || rule.end_time.is_none())
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRuleTime,
                format!("Rule '{}' needs both start and end time", rule.id),
            ));
        }

        if let Some(bad) = rule.weekdays.iter().find(|&&w| w > 6) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeekday,
                format!("Rule '{}' names weekday {bad}", rule.id),
            ));
        }

        if duty_type.kind() == DutyKind::DaySlot && rule.slots_per_day == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroSlots,
                format!("Rule '{}' has zero slots per day", rule.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DutyRule;
    use chrono::{NaiveDate, NaiveTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn week() -> DateRange {
        DateRange::new(d(1), d(7))
    }

    #[test]
    fn test_valid_input() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(5)).with_weekdays([1, 2, 3, 4, 5]));
        assert!(validate_generation(&ty, week(), &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn test_inverted_range() {
        let ty = DutyType::day_slot("T1", "G1");
        let errors =
            validate_generation(&ty, DateRange::new(d(5), d(1)), &GeneratorConfig::default())
                .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidRange));
    }

    #[test]
    fn test_range_too_large() {
        let ty = DutyType::day_slot("T1", "G1");
        let config = GeneratorConfig::default().with_max_range_days(3);
        let errors = validate_generation(&ty, week(), &config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::RangeTooLarge);
    }

    #[test]
    fn test_time_range_rule_missing_times() {
        let ty = DutyType::time_range("T1", "G1").with_rule(DutyRule::new("R1", d(1), d(5)));
        let errors = validate_generation(&ty, week(), &GeneratorConfig::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingRuleTime));
    }

    #[test]
    fn test_time_range_rule_with_times() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let ty = DutyType::time_range("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(5)).with_times(nine, noon));
        assert!(validate_generation(&ty, week(), &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn test_disabled_rule_not_checked() {
        let ty = DutyType::time_range("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(5)).with_weekdays([9]).disabled());
        assert!(validate_generation(&ty, week(), &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn test_repeated_rule_id_allowed() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(5)))
            .with_rule(DutyRule::new("R1", d(1), d(5)).disabled());
        assert!(validate_generation(&ty, week(), &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(5)).with_weekdays([7]))
            .with_rule(DutyRule::new("R2", d(1), d(5)).with_slots_per_day(0));

        let errors = validate_generation(&ty, week(), &GeneratorConfig::default()).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&ValidationErrorKind::InvalidWeekday));
        assert!(kinds.contains(&ValidationErrorKind::ZeroSlots));
    }
}
