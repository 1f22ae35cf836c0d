//! Integration test crate for the Croft farm.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise the full deposit / distribute / withdraw lifecycle
//! across the workspace crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p croft-integration-tests
//! ```
