// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared test infrastructure for gitpulse.
//!
//! Every test writes its diagnostics to its own file under
//! `target/test-logs/<date>/`. Passing tests print a single line; failing
//! tests print the log path and size so the full output can be inspected
//! without flooding the terminal.

extern crate self as gp_test_utils;

pub mod guard;
pub mod logging;

pub use gp_test_utils_macros::{logged_test, logged_tokio_test};
pub use guard::TestLoggerGuard;
pub use logging::{create_unique_test_log, TestLogError, TestLogger};
