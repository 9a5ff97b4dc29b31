//! IDE feature tests
//!
//! Tests for:
//! - Classification (walker, registry, dedup, cancellation)
//! - Block structure (outlining order, flags, options)
//! - Todo comments (matching, line splitting)
//! - Todo comment coordination (notification suppression)

pub mod tests_block_structure;
pub mod tests_classification;
pub mod tests_coordinator;
pub mod tests_todo_comments;
