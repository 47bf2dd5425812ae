//! Shared test utilities for armview integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod builders;
pub mod fake_rules_api;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
