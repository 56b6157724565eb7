//! Checklist domain model.
//!
//! # Responsibility
//! - Define the status catalog and the rubric row/list shapes shared by
//!   every collaborator.
//!
//! # Invariants
//! - Status order is fixed and cyclic.
//! - Rubric lists are indexed `0..N-1` with no gaps and a fixed length.

pub mod rubric;
pub mod status;
