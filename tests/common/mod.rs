#![allow(unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: simulation and configuration fixtures
//! - `assertions`: assertion helpers with better failure messages

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_close, assert_error_contains, assert_ok};
pub use fixtures::{
    complex_call, fixed_time, keys, sim_with_instructions, simple_transfer, write_json,
};
