//! SLA module - update-freshness policies and the compliance evaluator.

mod sla_evaluator;
mod sla_model;
mod sla_traits;

pub use sla_evaluator::*;
pub use sla_model::*;
pub use sla_traits::*;
