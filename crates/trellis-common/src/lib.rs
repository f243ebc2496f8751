//! Common utilities for Trellis.
//!
//! This crate provides shared infrastructure used by all Trellis components:
//! - **Warning System** - colored terminal output for recoverable oddities in input

pub mod warning;
