//! Property domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a property. Properties are never hard-deleted; a sold
/// or abandoned property is soft-closed via `Closed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    UnderConstruction,
    Rental,
    Closed,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::UnderConstruction => "under_construction",
            PropertyStatus::Rental => "rental",
            PropertyStatus::Closed => "closed",
        }
    }
}

/// Domain model for a single property as seen by the analytics engine.
///
/// `purchase_price` is immutable once set and must be positive; the write
/// boundary enforces this, the engine re-validates when building histories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub current_estimate: Option<Decimal>,
    pub status: PropertyStatus,
    pub construction_progress: Option<Decimal>,
    pub expected_adr: Option<Decimal>,
    pub expected_occupancy: Option<Decimal>,
    pub region: Option<String>,
    pub created_at: NaiveDate,
}

impl Property {
    pub fn is_closed(&self) -> bool {
        self.status == PropertyStatus::Closed
    }
}
