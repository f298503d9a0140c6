//! Assessment report CLI support library.
//!
//! Exit codes, logging setup and payload formatting shared by the `ar-core`
//! binary and its tests.

pub mod exit_codes;
pub mod logging;
pub mod output;
