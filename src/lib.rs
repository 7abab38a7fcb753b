//! Duty slot generation and fair assignment.
//!
//! Expands recurring duty rules into concrete calendar slots and assigns
//! group members to them, spreading load fairly across runs while
//! respecting locked manual assignments.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `DutyType`, `DutyRule`, `Slot`,
//!   `DutyAssignment`, `AssignmentBook`, `DateRange`
//! - **`validation`**: Input integrity checks (range, rule times, weekdays)
//! - **`expansion`**: Rule expansion into slots and eligible-member resolution
//! - **`fairness`**: Running counts and the seeded fairness queue
//! - **`scheduler`**: Lock-aware greedy assignment and fairness KPIs
//! - **`generation`**: Per-duty-type and batch runs over caller snapshots
//! - **`manual`**: Manual single-slot assignment with lock protection
//!
//! # Architecture
//!
//! The crate is a pure, synchronous computation. Callers load the rules,
//! roster, existing assignments and history counts, invoke a
//! [`generation::DutyGenerator`], and persist the outcome. No I/O happens
//! here; runs for the same duty type must be serialised by the caller.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use duty_roster::generation::{DutyGenerator, DutyTypeSnapshot, GenerationRequest};
//! use duty_roster::models::{DateRange, DutyRule, DutyType};
//!
//! let mon = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let fri = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let cleaning = DutyType::day_slot("cleaning", "lab")
//!     .with_name("Lab cleaning")
//!     .with_rule(DutyRule::new("weekdays", mon, fri).with_weekdays([1, 2, 3, 4, 5]));
//!
//! let roster = vec!["ana".to_string(), "ben".to_string(), "cho".to_string()];
//! let request = GenerationRequest::new("lab", DateRange::new(mon, fri), roster).with_seed(1);
//!
//! let outcome = DutyGenerator::default()
//!     .generate(&request, &DutyTypeSnapshot::new(cleaning))
//!     .unwrap();
//! assert_eq!(outcome.slots.len(), 5);
//! assert!(outcome.slots.iter().all(|s| s.assignee_id.is_some()));
//! ```

pub mod config;
pub mod error;
pub mod expansion;
pub mod fairness;
pub mod generation;
pub mod logging;
pub mod manual;
pub mod models;
pub mod scheduler;
pub mod validation;
