//! Unit tests - construction-time validation through the public API
//!
//! These tests check that malformed patterns, expressions and clause
//! sequences are rejected when they are built, before any query text exists.

mod construction_error_tests;
