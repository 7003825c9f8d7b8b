use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use parkside_core::VehicleCategory;

/// Hourly car rate, in monetary units per hour
pub const CAR_RATE_PER_HOUR: f64 = 1.5;

/// Hourly bike rate, in monetary units per hour
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;

/// Hourly rates per vehicle category, loaded once at startup and
/// immutable afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tariff {
    /// Rate lookup table; a category missing here cannot be priced
    pub rates: HashMap<VehicleCategory, f64>,
}

impl Default for Tariff {
    fn default() -> Self {
        Self::new(CAR_RATE_PER_HOUR, BIKE_RATE_PER_HOUR)
    }
}

impl Tariff {
    /// Build a tariff covering every category the facility accepts.
    /// Adding a category means extending the enum and this table.
    pub fn new(car_rate_per_hour: f64, bike_rate_per_hour: f64) -> Self {
        let mut rates = HashMap::new();
        rates.insert(VehicleCategory::Car, car_rate_per_hour);
        rates.insert(VehicleCategory::Bike, bike_rate_per_hour);
        Self { rates }
    }

    /// Hourly rate for a category; None when no rate is configured
    pub fn hourly_rate(&self, category: VehicleCategory) -> Option<f64> {
        self.rates.get(&category).copied()
    }
}
