//! Integration tests - whole statements built end to end
//!
//! These tests verify that construction, naming, configuration and
//! serialization work together through the public API.

mod concurrent_build_tests;
mod config_build_tests;
mod end_to_end_tests;
