//! Metrics module - pure financial calculations and the metrics service.

pub mod metrics_calculator;
mod metrics_model;
mod metrics_service;

pub use metrics_calculator::*;
pub use metrics_model::*;
pub use metrics_service::*;

#[cfg(test)]
mod metrics_service_tests;
