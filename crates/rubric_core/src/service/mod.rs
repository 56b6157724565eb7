//! Core use-case services.
//!
//! # Responsibility
//! - Provide the status cycling write path and read-side projections.
//! - Keep rendering layers decoupled from store implementations.

pub mod audit;
pub mod checklist_service;
pub mod cycler;
