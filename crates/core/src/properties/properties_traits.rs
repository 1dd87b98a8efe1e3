use crate::errors::Result;
use crate::properties::{CashEvent, ConstructionSnapshot, Property, ValuationPoint};
use async_trait::async_trait;

/// Data-provider seam for the analytics engine.
///
/// The storage layer implements this trait; the engine itself performs no
/// I/O beyond these calls and stays pure and synchronous past them. All
/// returned histories must already be ordered by date ascending.
#[async_trait]
pub trait PropertyRepositoryTrait: Send + Sync {
    async fn get_property(&self, property_id: &str) -> Result<Property>;

    /// All properties belonging to an owner, closed ones included.
    async fn list_properties(&self, owner_id: &str) -> Result<Vec<Property>>;

    async fn get_valuations(&self, property_id: &str) -> Result<Vec<ValuationPoint>>;

    async fn get_cash_events(&self, property_id: &str) -> Result<Vec<CashEvent>>;

    async fn get_construction_snapshots(
        &self,
        property_id: &str,
    ) -> Result<Vec<ConstructionSnapshot>>;
}
