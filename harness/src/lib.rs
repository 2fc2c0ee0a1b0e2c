//! Chinese zodiac conformance harness.
//!
//! This crate drives an external target program across a range of years and
//! compares its stdout against a pure oracle for the sexagenary cycle, one
//! subprocess invocation per year under a wall-clock timeout. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (the zodiac oracle, output
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (process execution, configuration
//!   files). Isolated to keep the suite loop thin.
//!
//! [`run`] coordinates core logic with I/O to implement the suite.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
