//! Integration test suite for flickrtag
//!
//! End-to-end tests that run the `flickrtag` binary against a temporary
//! site. None of them reach the network: sites are either fully cached or
//! have no API key configured.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: Tag replacement and output writing
//! - **scan**: Listing referenced photo ids
//! - **cache_cmd**: Cache inspection
//! - **error_scenarios**: Failures reported to the user

#[path = "../common/mod.rs"]
mod common;

mod cache_cmd;
mod error_scenarios;
mod generate;
mod scan;
