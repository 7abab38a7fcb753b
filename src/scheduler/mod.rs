//! Slot assignment and fairness metrics.
//!
//! # Algorithm
//!
//! `AssignmentEngine` walks the expanded slots in order, filling each
//! from a seeded fairness queue while honouring locks and avoiding
//! same-day repeats where an alternative exists. Greedy, not optimal,
//! but keeps the max-min count spread at one for unconstrained runs.
//!
//! # KPI
//!
//! `FairnessReport` summarises the resulting load: per-member counts,
//! spread, same-day repeats and slots left unassigned.

mod engine;
mod kpi;

pub use engine::AssignmentEngine;
pub use kpi::FairnessReport;
