//! Common types and utilities for the revelio resolver.
//!
//! This crate provides values shared across revelio crates:
//! - Resolver limits and thresholds

// Centralized limits and thresholds
pub mod limits;
