use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle categories accepted by the facility
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleCategory {
    Car,
    Bike,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCategory::Car => write!(f, "CAR"),
            VehicleCategory::Bike => write!(f, "BIKE"),
        }
    }
}

/// A single numbered spot in the lot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParkingSpot {
    pub id: u32,
    pub category: VehicleCategory,
    pub available: bool,
}
