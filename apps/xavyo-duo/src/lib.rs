//! xavyo-duo library
//!
//! Exposes the CLI modules for integration testing.
//! The binary entry point is in main.rs.

pub mod args;
pub mod error;
pub mod logging;
pub mod run;
