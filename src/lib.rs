//! WHOQOL-BREF Analysis - Scoring and statistics for quality-of-life surveys
//!
//! This crate turns raw WHOQOL-BREF answers into 0-100 domain scores and runs
//! descriptive statistics, inferential tests and reliability analysis on them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
