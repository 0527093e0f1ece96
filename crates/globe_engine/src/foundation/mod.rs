//! Foundation module - core utilities and types
//!
//! Provides the math types used throughout the engine.

pub mod math;
