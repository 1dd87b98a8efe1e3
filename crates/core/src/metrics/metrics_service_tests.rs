//! Unit tests for the metrics service.

use super::*;
use crate::errors::{Error, Result};
use crate::properties::{
    CashEvent, ConstructionSnapshot, Property, PropertyRepositoryTrait, PropertyStatus,
    ValuationPoint,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rental_property(id: &str, purchase_price: Decimal, current_estimate: Option<Decimal>) -> Property {
    Property {
        id: id.to_string(),
        owner_id: "owner-1".to_string(),
        purchase_price,
        purchase_date: date(2023, 1, 1),
        current_estimate,
        status: PropertyStatus::Rental,
        construction_progress: None,
        expected_adr: Some(dec!(150)),
        expected_occupancy: Some(dec!(55)),
        region: None,
        created_at: date(2023, 1, 1),
    }
}

struct MockPropertyRepository {
    properties: Vec<Property>,
    valuations: HashMap<String, Vec<ValuationPoint>>,
}

impl MockPropertyRepository {
    fn new(properties: Vec<Property>) -> Self {
        Self {
            properties,
            valuations: HashMap::new(),
        }
    }

    fn with_valuation(mut self, property_id: &str, date: NaiveDate, value: Decimal) -> Self {
        self.valuations
            .entry(property_id.to_string())
            .or_default()
            .push(ValuationPoint::new(date, value));
        self
    }
}

#[async_trait]
impl PropertyRepositoryTrait for MockPropertyRepository {
    async fn get_property(&self, property_id: &str) -> Result<Property> {
        self.properties
            .iter()
            .find(|p| p.id == property_id)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Property {} not found", property_id)))
    }

    async fn list_properties(&self, owner_id: &str) -> Result<Vec<Property>> {
        Ok(self
            .properties
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_valuations(&self, property_id: &str) -> Result<Vec<ValuationPoint>> {
        Ok(self.valuations.get(property_id).cloned().unwrap_or_default())
    }

    async fn get_cash_events(&self, _property_id: &str) -> Result<Vec<CashEvent>> {
        Ok(Vec::new())
    }

    async fn get_construction_snapshots(
        &self,
        _property_id: &str,
    ) -> Result<Vec<ConstructionSnapshot>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn metrics_rounded_at_service_boundary() {
    // A third of growth produces repeating decimals; the service rounds them
    // to two places.
    let repository = MockPropertyRepository::new(vec![rental_property(
        "a",
        dec!(300000),
        Some(dec!(400000)),
    )])
    .with_valuation("a", date(2024, 1, 1), dec!(400000));
    let service = MetricsService::new(Arc::new(repository));

    let metrics = service.get_property_metrics("a").await.unwrap();

    assert_eq!(metrics.roi, Some(dec!(33.33)));
    assert_eq!(metrics.value_growth_percent, Some(dec!(33.33)));
    assert_eq!(metrics.value_growth, Some(dec!(100000)));
    // 150 ADR x 365 x 55% occupancy = 30,112.50 against the 400,000 basis.
    assert_eq!(metrics.yield_percent, Some(dec!(7.53)));
    assert_eq!(metrics.forecast_annual_income, Some(dec!(30112.50)));
}

#[tokio::test]
async fn stale_row_estimate_loses_to_history() {
    // The denormalized row disagrees with the valuation history; the service
    // logs the mismatch and the history wins for every metric.
    let repository = MockPropertyRepository::new(vec![rental_property(
        "a",
        dec!(300000),
        Some(dec!(999000)),
    )])
    .with_valuation("a", date(2024, 1, 1), dec!(400000));
    let service = MetricsService::new(Arc::new(repository));

    let metrics = service.get_property_metrics("a").await.unwrap();

    assert_eq!(metrics.roi, Some(dec!(33.33)));
    assert_eq!(metrics.value_growth, Some(dec!(100000)));
    assert_eq!(metrics.yield_percent, Some(dec!(7.53)));
}

#[tokio::test]
async fn unknown_property_surfaces_repository_error() {
    let repository = MockPropertyRepository::new(vec![]);
    let service = MetricsService::new(Arc::new(repository));

    let result = service.get_property_metrics("missing").await;
    assert!(matches!(result, Err(Error::Repository(_))));
}
