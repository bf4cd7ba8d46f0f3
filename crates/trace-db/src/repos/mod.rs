//! Repository modules for the change-request workflow.
//!
//! Each module adds methods to `TraceService` via `impl TraceService` blocks.

pub mod change_request;
pub mod diff;
pub mod pending;
pub mod review;
