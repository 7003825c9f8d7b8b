pub mod repository;
pub mod ticket;
pub mod vehicle;

pub use repository::{SessionRepository, SpotRepository};
pub use ticket::Ticket;
pub use vehicle::{ParkingSpot, VehicleCategory};
