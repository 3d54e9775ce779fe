//! Common utilities for the slidebox layout engine.
//!
//! This crate provides shared infrastructure used by the engine and its tools:
//! - **Warning Reporter** - deduplicated, colored terminal warnings
//! - **Units** - px / pt / EMU conversions for slide renderers

pub mod units;
pub mod warning;
