//! Action handlers, one module per menu entry.
//!
//! Each handler is an `App` method that writes its report to the given
//! writer and returns an error for the session loop to report.

pub mod branch;
pub mod merge;
pub mod pull;
pub mod push;
pub mod remote;
pub mod status;
pub mod sync;
