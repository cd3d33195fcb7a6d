//! COVID-19 Dashboard
//!
//! Fetches public COVID-19 datasets and renders them as charts and tables on a
//! single-page dashboard. Every page load runs one forward pass:
//! fetch → shape → aggregate → render → compose.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod stats;

pub use error::{DashboardError, Result};
