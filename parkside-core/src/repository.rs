use async_trait::async_trait;

use crate::ticket::Ticket;
use crate::vehicle::{ParkingSpot, VehicleCategory};

/// Repository trait for ticket storage and lookup
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly opened ticket
    async fn save_ticket(
        &self,
        ticket: &Ticket,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Most recent ticket without an exit time for a registration
    async fn open_ticket(
        &self,
        registration: &str,
    ) -> Result<Option<Ticket>, Box<dyn std::error::Error + Send + Sync>>;

    /// Overwrite a stored ticket; false when the ticket is unknown
    async fn update_ticket(
        &self,
        ticket: &Ticket,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Number of completed (priced) sessions for a registration.
    /// Callers turn `count >= 1` into the recurring-user discount flag.
    async fn completed_session_count(
        &self,
        registration: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for spot availability
#[async_trait]
pub trait SpotRepository: Send + Sync {
    /// Next free spot of the category, if any
    async fn next_available_spot(
        &self,
        category: VehicleCategory,
    ) -> Result<Option<ParkingSpot>, Box<dyn std::error::Error + Send + Sync>>;

    /// Persist a spot's availability; false when the spot is unknown
    async fn update_spot(
        &self,
        spot: &ParkingSpot,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
