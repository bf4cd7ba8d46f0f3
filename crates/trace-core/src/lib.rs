//! # trace-core
//!
//! Core types, review rules, and error types for change-request traceability.
//!
//! This crate provides the foundational types shared by the other crates:
//! - Entity structs for change requests and their field-level diffs
//! - Status enums with the review state machine
//! - Typed old/new value pairs (`DiffValue`) tagged by `DataType`
//! - Review engine rules applied to an in-memory `ChangeRequest`
//! - The pending-request window planner used for cross-group pagination
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod pending;
pub mod review;
pub mod values;
