//! Integration test suite for skinpack
//!
//! End-to-end tests driving the registered tasks against temporary projects
//! built with [`skinpack::test_utils::TestProject`], plus tests of the
//! `skinpack` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **extract**: template scanning, placeholders and idempotence
//! - **lint**: rule findings, suppression directives and lint gating
//! - **compile**: import inlining, prefixing, marker stripping, banner and rename
//! - **pipeline**: the full `skin-tasks` composite
//! - **cli**: the command-line interface

mod cli;
mod compile;
mod extract;
mod lint;
mod pipeline;
