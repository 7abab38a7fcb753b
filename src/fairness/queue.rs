//! Fairness queue construction.
//!
//! # Algorithm
//!
//! Build:
//! 1. Canonicalise the member list (sort, dedup) so the result depends only
//!    on the member set.
//! 2. Bucket members by their current count.
//! 3. Visit buckets in ascending count order, shuffling each bucket with
//!    the run's seeded RNG.
//! 4. Concatenate the buckets into one queue.
//!
//! Refill (queue exhausted mid-run): keep only members at the current
//! minimum count, shuffle them, and use that as the new queue.
//!
//! Members with different counts are never reordered against the
//! lower-count member; equally loaded members get no fixed bias.

use std::collections::{BTreeMap, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use super::LoadCounts;
use crate::models::MemberId;

/// Ordered queue of members to consult, least loaded first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FairnessQueue {
    queue: VecDeque<MemberId>,
}

impl FairnessQueue {
    /// Builds the initial queue over all members.
    pub fn build<R: Rng + ?Sized>(members: &[MemberId], counts: &LoadCounts, rng: &mut R) -> Self {
        let mut buckets: BTreeMap<usize, Vec<MemberId>> = BTreeMap::new();
        for member in canonical(members) {
            buckets.entry(counts.get(&member)).or_default().push(member);
        }

        let mut queue = VecDeque::with_capacity(members.len());
        for (_, mut bucket) in buckets {
            bucket.shuffle(rng);
            queue.extend(bucket);
        }
        Self { queue }
    }

    /// Builds a queue of only the least-loaded members.
    pub fn refill<R: Rng + ?Sized>(members: &[MemberId], counts: &LoadCounts, rng: &mut R) -> Self {
        let members = canonical(members);
        let Some(min) = counts.min_over(&members) else {
            return Self::default();
        };

        let mut least: Vec<MemberId> = members
            .into_iter()
            .filter(|m| counts.get(m) == min)
            .collect();
        least.shuffle(rng);
        Self {
            queue: least.into(),
        }
    }

    /// Whether the queue is exhausted.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates queued members front to back.
    pub fn iter(&self) -> impl Iterator<Item = &MemberId> {
        self.queue.iter()
    }

    /// Removes and returns the first member not rejected by `avoid`.
    ///
    /// Falls back to the front member when every queued member is
    /// rejected. Returns `None` only when the queue is empty.
    pub fn take_preferred(&mut self, avoid: impl Fn(&str) -> bool) -> Option<MemberId> {
        let pos = self
            .queue
            .iter()
            .position(|m| !avoid(m.as_str()))
            .unwrap_or(0);
        self.queue.remove(pos)
    }
}

fn canonical(members: &[MemberId]) -> Vec<MemberId> {
    let mut members = members.to_vec();
    members.sort();
    members.dedup();
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn ids(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lower_counts_first() {
        let counts = LoadCounts::new()
            .with_count("A", 0)
            .with_count("B", 0)
            .with_count("C", 2)
            .with_count("D", 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let queue = FairnessQueue::build(&ids(&["C", "D", "B", "A"]), &counts, &mut rng);

        let order: Vec<_> = queue.iter().cloned().collect();
        assert_eq!(order.len(), 4);
        let mut head = order[..2].to_vec();
        head.sort();
        assert_eq!(head, ids(&["A", "B"]));
        assert_eq!(order[2], "D");
        assert_eq!(order[3], "C");
    }

    #[test]
    fn test_same_seed_same_order() {
        let members = ids(&["A", "B", "C", "D", "E", "F"]);
        let counts = LoadCounts::new();

        let q1 = FairnessQueue::build(&members, &counts, &mut SmallRng::seed_from_u64(42));
        let q2 = FairnessQueue::build(&members, &counts, &mut SmallRng::seed_from_u64(42));
        assert_eq!(q1, q2);

        // Input order does not matter
        let mut reversed = members.clone();
        reversed.reverse();
        let q3 = FairnessQueue::build(&reversed, &counts, &mut SmallRng::seed_from_u64(42));
        assert_eq!(q1, q3);
    }

    #[test]
    fn test_shuffle_is_not_fixed() {
        let members: Vec<MemberId> = (0..8).map(|i| format!("M{i}")).collect();
        let counts = LoadCounts::new();
        let firsts: std::collections::HashSet<_> = (0..32)
            .map(|seed| {
                let q = FairnessQueue::build(&members, &counts, &mut SmallRng::seed_from_u64(seed));
                let first = q.iter().next().cloned();
                first
            })
            .collect();
        assert!(firsts.len() > 1);
    }

    #[test]
    fn test_refill_only_least_loaded() {
        let counts = LoadCounts::new()
            .with_count("A", 3)
            .with_count("B", 2)
            .with_count("C", 2);
        let mut rng = SmallRng::seed_from_u64(7);
        let queue = FairnessQueue::refill(&ids(&["A", "B", "C"]), &counts, &mut rng);

        let mut members: Vec<_> = queue.iter().cloned().collect();
        members.sort();
        assert_eq!(members, ids(&["B", "C"]));
    }

    #[test]
    fn test_refill_empty_members() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(FairnessQueue::refill(&[], &LoadCounts::new(), &mut rng).is_empty());
    }

    #[test]
    fn test_take_preferred() {
        let mut queue = FairnessQueue {
            queue: ids(&["A", "B", "C"]).into(),
        };
        assert_eq!(queue.take_preferred(|m| m == "A").as_deref(), Some("B"));
        // Every candidate rejected → front member anyway
        assert_eq!(queue.take_preferred(|_| true).as_deref(), Some("A"));
        assert_eq!(queue.take_preferred(|_| false).as_deref(), Some("C"));
        assert!(queue.take_preferred(|_| false).is_none());
    }
}
