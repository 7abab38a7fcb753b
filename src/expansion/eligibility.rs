//! Eligible-member resolution.
//!
//! # Precedence
//! Include lists of all active rules are unioned; if every one of them is
//! empty, the whole roster is included. Exclude lists are unioned too and
//! always win. The result is intersected with the live roster, so members
//! named by a rule but no longer in the group are dropped.

use std::collections::BTreeSet;

use crate::models::{DutyType, MemberId};

/// Resolves the members eligible for a duty type.
///
/// Returns member IDs in ascending order without duplicates.
pub fn resolve_eligible(duty_type: &DutyType, roster: &[MemberId]) -> Vec<MemberId> {
    let mut include: BTreeSet<&str> = BTreeSet::new();
    let mut exclude: BTreeSet<&str> = BTreeSet::new();

    for rule in duty_type.active_rules() {
        include.extend(rule.include_member_ids.iter().map(String::as_str));
        exclude.extend(rule.exclude_member_ids.iter().map(String::as_str));
    }

    roster
        .iter()
        .map(String::as_str)
        .filter(|id| include.is_empty() || include.contains(id))
        .filter(|id| !exclude.contains(id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DutyRule;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn roster(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_include_means_everyone() {
        let ty = DutyType::day_slot("T1", "G1").with_rule(DutyRule::new("R1", d(1), d(2)));
        assert_eq!(resolve_eligible(&ty, &roster(&["C", "A", "B"])), roster(&["A", "B", "C"]));
    }

    #[test]
    fn test_include_union_across_rules() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(2)).include(["A"]))
            .with_rule(DutyRule::new("R2", d(1), d(2)).include(["B"]))
            .with_rule(DutyRule::new("R3", d(1), d(2)));
        assert_eq!(resolve_eligible(&ty, &roster(&["A", "B", "C"])), roster(&["A", "B"]));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(2)).include(["A", "B"]))
            .with_rule(DutyRule::new("R2", d(1), d(2)).exclude(["B"]));
        assert_eq!(resolve_eligible(&ty, &roster(&["A", "B", "C"])), roster(&["A"]));
    }

    #[test]
    fn test_intersects_with_roster() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(2)).include(["A", "GONE"]));
        assert_eq!(resolve_eligible(&ty, &roster(&["A", "B"])), roster(&["A"]));
    }

    #[test]
    fn test_disabled_rule_ignored() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(2)))
            .with_rule(DutyRule::new("R2", d(1), d(2)).exclude(["A"]).disabled());
        assert_eq!(resolve_eligible(&ty, &roster(&["A", "B"])), roster(&["A", "B"]));
    }

    #[test]
    fn test_everyone_excluded() {
        let ty = DutyType::day_slot("T1", "G1")
            .with_rule(DutyRule::new("R1", d(1), d(2)).exclude(["A", "B"]));
        assert!(resolve_eligible(&ty, &roster(&["A", "B"])).is_empty());
    }
}
