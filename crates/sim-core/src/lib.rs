//! # sim-core
//!
//! Core types shared across all simdesk crates:
//! - Entity structs for the three persisted aggregates (projects,
//!   simulation-history entries, user preferences)
//! - Status enums with state machine transitions
//! - Value objects parsed from untrusted strings (language tag, theme mode)
//! - Request drafts crossing the input boundary
//! - Search filter/pagination/result value objects
//! - ID prefix constants

pub mod entities;
pub mod enums;
pub mod ids;
pub mod locale;
pub mod requests;
pub mod search;
