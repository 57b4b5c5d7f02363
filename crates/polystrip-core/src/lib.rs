//! Polystrip Core
//!
//! Shared utilities for the polystrip crates: logging setup, profiling
//! scopes and the math types the pipeline is written against.

pub mod logging;
pub mod math;
pub mod profiling;
