//! Property domain - models, history containers, and the data-provider seam.

mod construction_model;
mod ledger_model;
mod properties_model;
mod properties_traits;
mod valuation_model;

pub use construction_model::*;
pub use ledger_model::*;
pub use properties_model::*;
pub use properties_traits::*;
pub use valuation_model::*;

#[cfg(test)]
mod properties_tests;
