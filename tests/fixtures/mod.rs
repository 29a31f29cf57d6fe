//! Test fixtures for fieldops-core.
//!
//! Provides realistic test data including:
//! - Real Las Vegas / Henderson locations (from OpenStreetMap) as route stops
//! - A builder for inbox candidates

#![allow(dead_code)]

pub mod candidates;
pub mod las_vegas_locations;

pub use candidates::*;
pub use las_vegas_locations::*;
