use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use parkside_core::{ParkingSpot, SpotRepository, VehicleCategory};

/// In-memory spot allocator over a fixed lot layout
pub struct InMemorySpotStore {
    spots: RwLock<Vec<ParkingSpot>>,
}

impl InMemorySpotStore {
    pub fn new(spots: Vec<ParkingSpot>) -> Self {
        Self {
            spots: RwLock::new(spots),
        }
    }

    /// Seed a lot with car spots first, then bike spots, ids ascending from 1
    pub fn with_layout(car_spots: u32, bike_spots: u32) -> Self {
        let mut spots = Vec::with_capacity((car_spots + bike_spots) as usize);
        let mut id = 1;
        for _ in 0..car_spots {
            spots.push(ParkingSpot {
                id,
                category: VehicleCategory::Car,
                available: true,
            });
            id += 1;
        }
        for _ in 0..bike_spots {
            spots.push(ParkingSpot {
                id,
                category: VehicleCategory::Bike,
                available: true,
            });
            id += 1;
        }
        Self::new(spots)
    }
}

#[async_trait]
impl SpotRepository for InMemorySpotStore {
    async fn next_available_spot(
        &self,
        category: VehicleCategory,
    ) -> Result<Option<ParkingSpot>, Box<dyn std::error::Error + Send + Sync>> {
        let spots = self.spots.read().await;
        Ok(spots
            .iter()
            .find(|s| s.category == category && s.available)
            .copied())
    }

    async fn update_spot(
        &self,
        spot: &ParkingSpot,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut spots = self.spots.write().await;
        match spots.iter_mut().find(|s| s.id == spot.id) {
            Some(stored) => {
                debug!("Spot {} available: {}", spot.id, spot.available);
                *stored = *spot;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
