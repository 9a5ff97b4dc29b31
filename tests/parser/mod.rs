//! Parser tests
//!
//! Tests for:
//! - Lossless trees
//! - Trivia attachment and structured trivia
//! - Error recovery

pub mod tests_parser;
