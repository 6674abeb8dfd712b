//! Data ingestion layer for letter statistics.
//!
//! Reads input files one character at a time, aggregates single-letter and
//! doubled-letter counts and runs the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use stats_core as core;
