//! Shared test helpers.

#![allow(dead_code)]

pub mod analysis_helpers;
pub mod source_fixtures;
