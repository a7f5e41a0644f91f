//! BOTTOM GAUGE: composite market-bottom score
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod scoring;
pub mod data;
pub mod llm;
pub mod server;
