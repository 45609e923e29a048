//! Collaborators the session loop talks to.
//!
//! - [`git`]: git operations, run through the `git` binary
//! - [`prompt`]: terminal prompts (text, selection, confirmation, pause)
//!
//! Each submodule provides a trait with a real implementation and, under test,
//! a mockall-generated mock.

pub mod git;
pub mod prompt;
