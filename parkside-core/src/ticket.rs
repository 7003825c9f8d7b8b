use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vehicle::{ParkingSpot, VehicleCategory};

/// Record of one parked vehicle's stay, from entry to exit.
///
/// A ticket is opened when the vehicle enters (no exit time, no price).
/// The session layer stamps the exit time, the fare engine sets the price;
/// entry time, category and registration never change after opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub vehicle_registration: String,
    pub spot_id: u32,
    pub category: VehicleCategory,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub price: Option<f64>,
}

impl Ticket {
    /// Open a ticket for a vehicle entering at `entry_time` on the given spot
    pub fn open(vehicle_registration: String, spot: &ParkingSpot, entry_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_registration,
            spot_id: spot.id,
            category: spot.category,
            entry_time,
            exit_time: None,
            price: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.exit_time.is_some()
    }
}
