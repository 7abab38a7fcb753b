//! Duty generation: validation → expansion → fair assignment.
//!
//! One run covers one duty type over one target range. The caller reads
//! a consistent snapshot (rules, roster, existing assignments, history
//! counts), passes it in, and persists the outcome's writable slots.
//!
//! # Concurrency
//!
//! Runs are pure and synchronous. Two overlapping runs for the same duty
//! type may both read the same low count for a member and both pick them;
//! callers needing strict fairness must serialise runs per
//! (group, duty type) themselves.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::expansion::{expand_slots, resolve_eligible};
use crate::fairness::{seeded_rng, LoadCounts};
use crate::models::{AssignmentBook, DateRange, DutyAssignment, DutyType, MemberId, Slot, SlotKey};
use crate::scheduler::{AssignmentEngine, FairnessReport};
use crate::validation::validate_generation;

/// Inputs shared by every duty type in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Group the duty types belong to.
    pub group_id: String,
    /// Target days.
    pub range: DateRange,
    /// Current group members.
    pub roster: Vec<MemberId>,
    /// Shuffle seed. `None` = config default, then the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// Creates a request without a seed.
    pub fn new(group_id: impl Into<String>, range: DateRange, roster: Vec<MemberId>) -> Self {
        Self {
            group_id: group_id.into(),
            range,
            roster,
            seed: None,
        }
    }

    /// Pins the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Persisted state of one duty type, read by the caller before a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyTypeSnapshot {
    /// The duty type with all its rules.
    pub duty_type: DutyType,
    /// Existing assignments in the target range.
    #[serde(default)]
    pub existing: Vec<DutyAssignment>,
    /// Assignment counts per member over all dates.
    #[serde(default)]
    pub history: HashMap<MemberId, usize>,
}

impl DutyTypeSnapshot {
    /// Creates a snapshot with no existing assignments or history.
    pub fn new(duty_type: DutyType) -> Self {
        Self {
            duty_type,
            existing: Vec::new(),
            history: HashMap::new(),
        }
    }

    /// Adds an existing assignment.
    pub fn with_existing(mut self, assignment: DutyAssignment) -> Self {
        self.existing.push(assignment);
        self
    }

    /// Sets the historical count for a member.
    pub fn with_history(mut self, member_id: impl Into<MemberId>, count: usize) -> Self {
        self.history.insert(member_id.into(), count);
        self
    }

    /// Reads a snapshot for `duty_type` out of the records `group_id`
    /// holds in an assignment book.
    pub fn from_book(
        duty_type: DutyType,
        book: &AssignmentBook,
        group_id: &str,
        range: DateRange,
    ) -> Self {
        let existing = book.in_range(group_id, &duty_type.id, range);
        let history = book.history_counts(group_id, &duty_type.id);
        Self {
            duty_type,
            existing,
            history,
        }
    }
}

/// Why a duty type produced no assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// Include/exclude lists and roster left nobody eligible.
    NoEligibleMembers,
    /// No active rule produced a slot in the target range.
    NoSlots,
}

/// Result of one duty type's run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Duty type identifier.
    pub duty_type_id: String,
    /// All generated slots in (date, slot index) order.
    pub slots: Vec<Slot>,
    /// Slots the caller must upsert.
    pub written: usize,
    /// Written slots that are new or changed assignee.
    pub changed: usize,
    /// Seed the run used.
    pub seed: u64,
    /// Set when the duty type was skipped.
    pub skipped: Option<SkipReason>,
    /// Active rules ignored as unusable.
    pub skipped_rules: Vec<String>,
    /// Load balance after the run (absent when skipped).
    pub fairness: Option<FairnessReport>,
}

impl GenerationOutcome {
    /// Slots to persist: all but pinned ones, none if skipped.
    pub fn writable_slots(&self) -> impl Iterator<Item = &Slot> {
        let skipped = self.skipped.is_some();
        self.slots
            .iter()
            .filter(move |s| !skipped && !s.is_pinned())
    }

    /// Upserts the writable slots into a book. Returns the number changed.
    pub fn apply_to(&self, group_id: &str, book: &mut AssignmentBook) -> usize {
        let mut changed = 0;
        for slot in self.writable_slots() {
            if book.upsert_slot(group_id, &self.duty_type_id, slot) {
                changed += 1;
            }
        }
        changed
    }
}

/// Runs duty generation with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct DutyGenerator {
    config: GeneratorConfig,
}

impl DutyGenerator {
    /// Creates a generator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates assignments for one duty type.
    ///
    /// # Errors
    /// [`GenerationError::InvalidInput`] if the range or rules fail
    /// validation. An empty eligible set or slot list is not an error; the
    /// outcome carries a [`SkipReason`] instead.
    #[instrument(skip_all, fields(duty_type_id = %snapshot.duty_type.id))]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        snapshot: &DutyTypeSnapshot,
    ) -> Result<GenerationOutcome, GenerationError> {
        let seed = self.resolve_seed(request.seed);
        self.generate_seeded(request, snapshot, seed)
    }

    /// Generates several duty types with one roster, range and seed.
    ///
    /// Each duty type yields its own result; a failure never stops the
    /// others.
    #[instrument(skip_all, fields(group_id = %request.group_id, types = snapshots.len()))]
    pub fn generate_batch(
        &self,
        request: &GenerationRequest,
        snapshots: &[DutyTypeSnapshot],
    ) -> Vec<(String, Result<GenerationOutcome, GenerationError>)> {
        let seed = self.resolve_seed(request.seed);
        snapshots
            .iter()
            .map(|snapshot| {
                (
                    snapshot.duty_type.id.clone(),
                    self.generate_seeded(request, snapshot, seed),
                )
            })
            .collect()
    }

    /// Generates for one duty type against a book and writes the result back.
    pub fn generate_into(
        &self,
        request: &GenerationRequest,
        duty_type: &DutyType,
        book: &mut AssignmentBook,
    ) -> Result<GenerationOutcome, GenerationError> {
        let snapshot = DutyTypeSnapshot::from_book(
            duty_type.clone(),
            book,
            &request.group_id,
            request.range,
        );
        let outcome = self.generate(request, &snapshot)?;
        outcome.apply_to(&request.group_id, book);
        Ok(outcome)
    }

    fn resolve_seed(&self, requested: Option<u64>) -> u64 {
        requested
            .or(self.config.default_seed)
            .unwrap_or_else(|| Utc::now().timestamp_millis().unsigned_abs())
    }

    fn generate_seeded(
        &self,
        request: &GenerationRequest,
        snapshot: &DutyTypeSnapshot,
        seed: u64,
    ) -> Result<GenerationOutcome, GenerationError> {
        let duty_type = &snapshot.duty_type;
        validate_generation(duty_type, request.range, &self.config).map_err(|errors| {
            GenerationError::InvalidInput {
                duty_type_id: duty_type.id.clone(),
                errors,
            }
        })?;

        let expansion = expand_slots(duty_type, request.range, &snapshot.existing);
        let eligible = resolve_eligible(duty_type, &request.roster);
        debug!(
            slots = expansion.slots.len(),
            eligible = eligible.len(),
            seed,
            "expanded duty type"
        );

        let mut outcome = GenerationOutcome {
            duty_type_id: duty_type.id.clone(),
            slots: Vec::new(),
            written: 0,
            changed: 0,
            seed,
            skipped: None,
            skipped_rules: expansion.skipped_rules,
            fairness: None,
        };

        if eligible.is_empty() || expansion.slots.is_empty() {
            outcome.skipped = Some(if eligible.is_empty() {
                SkipReason::NoEligibleMembers
            } else {
                SkipReason::NoSlots
            });
            outcome.slots = expansion.slots;
            info!(reason = ?outcome.skipped, "duty type skipped");
            return Ok(outcome);
        }

        let mut counts = LoadCounts::from_history(snapshot.history.clone());
        let engine = AssignmentEngine::new().with_avoid_consecutive(expansion.avoid_consecutive);
        let slots = engine.assign(expansion.slots, &eligible, &mut counts, &mut seeded_rng(seed));

        let before: HashMap<SlotKey, &Option<MemberId>> = snapshot
            .existing
            .iter()
            .filter(|a| a.duty_type_id == duty_type.id)
            .map(|a| (a.key(), &a.assignee_id))
            .collect();
        for slot in slots.iter().filter(|s| !s.is_pinned()) {
            outcome.written += 1;
            if before.get(&slot.key()) != Some(&&slot.assignee_id) {
                outcome.changed += 1;
            }
        }

        outcome.fairness = Some(FairnessReport::calculate(&slots, &eligible, &counts));
        outcome.slots = slots;
        info!(
            written = outcome.written,
            changed = outcome.changed,
            "duty type generated"
        );
        Ok(outcome)
    }
}
