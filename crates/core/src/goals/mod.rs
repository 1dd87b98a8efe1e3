//! Goals module - goal models and the progress tracker.

mod goals_model;
mod goals_service;

pub use goals_model::*;
pub use goals_service::*;
