//! Test Module
//!
//! Integration-level test suite for the QueryLens pipeline.
//!
//! ## Test Categories
//! - `brain_tests`: classifier behavior through the analyzer
//! - `reader_tests`: chunked ingestion and malformed-line recovery
//! - `pipeline_tests`: accumulation, sampling determinism, invariants
//! - `report_tests`: summary math and the output writers
//! - `integration_tests`: full reader → aggregator → reporter passes

pub mod report_tests;
