//! Estatefolio Core - Portfolio financial analytics and compliance engine.
//!
//! This crate contains the derived-metrics logic for a property investment
//! portfolio: ROI/CAGR/IRR/payback/yield calculations, goal progress tracking,
//! SLA freshness evaluation, and portfolio-level aggregation. It is
//! database-agnostic and transport-agnostic: data access goes through
//! repository traits implemented by the surrounding storage layer.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod metrics;
pub mod portfolio;
pub mod properties;
pub mod sla;

// Re-export common types from the domain and portfolio modules
pub use metrics::*;
pub use portfolio::*;
pub use properties::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
