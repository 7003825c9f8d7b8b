use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use parkside_core::{ParkingSpot, SessionRepository, SpotRepository, Ticket, VehicleCategory};
use parkside_tariff::{FareEngine, FareError};

/// Session lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no {0} spot available, the lot may be full")]
    LotFull(VehicleCategory),

    #[error("no open ticket found for registration {0}")]
    TicketNotFound(String),

    #[error("the session store rejected the update")]
    UpdateRejected,

    #[error("fare calculation failed: {0}")]
    Fare(#[from] FareError),

    #[error("store failure: {0}")]
    Store(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Orchestrates vehicle entry and exit against the spot and ticket stores.
///
/// Discount eligibility is derived here, at the store boundary: a
/// registration with at least one completed session is a recurring user.
/// The fare engine itself only ever sees the resulting boolean.
pub struct SessionManager {
    spots: Arc<dyn SpotRepository>,
    sessions: Arc<dyn SessionRepository>,
    fare_engine: FareEngine,
}

impl SessionManager {
    pub fn new(
        spots: Arc<dyn SpotRepository>,
        sessions: Arc<dyn SessionRepository>,
        fare_engine: FareEngine,
    ) -> Self {
        Self {
            spots,
            sessions,
            fare_engine,
        }
    }

    /// Assign a spot to an incoming vehicle and open its ticket
    pub async fn register_entry(
        &self,
        registration: &str,
        category: VehicleCategory,
    ) -> Result<Ticket, SessionError> {
        let mut spot = self
            .spots
            .next_available_spot(category)
            .await?
            .ok_or(SessionError::LotFull(category))?;

        spot.available = false;
        if !self.spots.update_spot(&spot).await? {
            return Err(SessionError::UpdateRejected);
        }

        let ticket = Ticket::open(registration.to_string(), &spot, Utc::now());
        self.sessions.save_ticket(&ticket).await?;

        if self.sessions.completed_session_count(registration).await? >= 1 {
            info!(
                "Welcome back {}, a 5% recurring-user discount applies at exit",
                registration
            );
        }
        info!("Vehicle {} assigned to spot {}", registration, spot.id);

        Ok(ticket)
    }

    /// Close the open ticket for a registration, price it and free the spot.
    ///
    /// On a fare error the stored ticket stays open, so the exit can be
    /// retried once the record is corrected.
    pub async fn register_exit(&self, registration: &str) -> Result<Ticket, SessionError> {
        let mut ticket = self
            .sessions
            .open_ticket(registration)
            .await?
            .ok_or_else(|| SessionError::TicketNotFound(registration.to_string()))?;

        ticket.exit_time = Some(Utc::now());

        let discount = self.sessions.completed_session_count(registration).await? >= 1;
        let fare = self
            .fare_engine
            .calculate_fare_with_discount(&mut ticket, discount)?;

        if !self.sessions.update_ticket(&ticket).await? {
            return Err(SessionError::UpdateRejected);
        }

        let spot = ParkingSpot {
            id: ticket.spot_id,
            category: ticket.category,
            available: true,
        };
        if !self.spots.update_spot(&spot).await? {
            warn!("Spot {} is unknown to the spot store", spot.id);
        }

        info!(
            "Vehicle {} leaves spot {}, fare {:.2}",
            registration, ticket.spot_id, fare
        );
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use parkside_store::{InMemorySessionStore, InMemorySpotStore};

    fn manager_with_layout(
        car_spots: u32,
        bike_spots: u32,
    ) -> (
        SessionManager,
        Arc<InMemorySessionStore>,
        Arc<InMemorySpotStore>,
    ) {
        let spots = Arc::new(InMemorySpotStore::with_layout(car_spots, bike_spots));
        let sessions = Arc::new(InMemorySessionStore::new());
        let manager = SessionManager::new(spots.clone(), sessions.clone(), FareEngine::default());
        (manager, sessions, spots)
    }

    async fn backdate_entry(sessions: &InMemorySessionStore, registration: &str, minutes: i64) {
        let mut ticket = sessions
            .open_ticket(registration)
            .await
            .unwrap()
            .expect("no open ticket to backdate");
        ticket.entry_time = Utc::now() - Duration::minutes(minutes);
        assert!(sessions.update_ticket(&ticket).await.unwrap());
    }

    #[tokio::test]
    async fn test_entry_assigns_first_free_spot() {
        let (manager, sessions, spots) = manager_with_layout(3, 2);

        let ticket = manager
            .register_entry("ABCDEF", VehicleCategory::Car)
            .await
            .unwrap();

        assert_eq!(ticket.spot_id, 1);
        assert!(sessions.open_ticket("ABCDEF").await.unwrap().is_some());

        // Spot 1 is now occupied, the next car goes to spot 2
        let next = spots
            .next_available_spot(VehicleCategory::Car)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_entry_when_lot_is_full() {
        let (manager, _sessions, _spots) = manager_with_layout(1, 0);

        manager
            .register_entry("ABCDEF", VehicleCategory::Car)
            .await
            .unwrap();
        let err = manager
            .register_entry("GHIJKL", VehicleCategory::Car)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::LotFull(VehicleCategory::Car)));

        let err = manager
            .register_entry("MNOPQR", VehicleCategory::Bike)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::LotFull(VehicleCategory::Bike)));
    }

    #[tokio::test]
    async fn test_exit_within_grace_frees_the_spot() {
        let (manager, _sessions, spots) = manager_with_layout(1, 0);

        manager
            .register_entry("ABCDEF", VehicleCategory::Car)
            .await
            .unwrap();
        let closed = manager.register_exit("ABCDEF").await.unwrap();

        assert_eq!(closed.price, Some(0.0));
        assert!(closed.is_closed());

        let spot = spots
            .next_available_spot(VehicleCategory::Car)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spot.id, 1);
    }

    #[tokio::test]
    async fn test_exit_prices_a_full_stay() {
        let (manager, sessions, _spots) = manager_with_layout(1, 0);

        manager
            .register_entry("ABCDEF", VehicleCategory::Car)
            .await
            .unwrap();
        backdate_entry(&sessions, "ABCDEF", 120).await;

        let closed = manager.register_exit("ABCDEF").await.unwrap();
        let fare = closed.price.unwrap();

        // Two hours at the car rate, first visit so no discount
        assert!((fare - 3.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_recurring_user_gets_discount() {
        let (manager, sessions, _spots) = manager_with_layout(1, 0);

        // A completed stay from last week makes the registration recurring
        let spot = ParkingSpot {
            id: 1,
            category: VehicleCategory::Car,
            available: false,
        };
        let week_ago = Utc::now() - Duration::days(7);
        let mut prior = Ticket::open("ABCDEF".to_string(), &spot, week_ago);
        prior.exit_time = Some(week_ago + Duration::hours(1));
        prior.price = Some(1.5);
        sessions.save_ticket(&prior).await.unwrap();

        manager
            .register_entry("ABCDEF", VehicleCategory::Car)
            .await
            .unwrap();
        backdate_entry(&sessions, "ABCDEF", 60).await;

        let closed = manager.register_exit("ABCDEF").await.unwrap();
        let fare = closed.price.unwrap();

        assert!((fare - 1.5 * 0.95).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_exit_without_open_ticket() {
        let (manager, _sessions, _spots) = manager_with_layout(1, 0);

        let err = manager.register_exit("ABCDEF").await.unwrap_err();

        assert!(matches!(err, SessionError::TicketNotFound(_)));
        assert!(err.to_string().contains("ABCDEF"));
    }

    /// Session store double whose updates always fail
    struct RejectingSessionStore;

    #[async_trait]
    impl SessionRepository for RejectingSessionStore {
        async fn save_ticket(
            &self,
            _ticket: &Ticket,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }

        async fn open_ticket(
            &self,
            registration: &str,
        ) -> Result<Option<Ticket>, Box<dyn std::error::Error + Send + Sync>> {
            let spot = ParkingSpot {
                id: 1,
                category: VehicleCategory::Car,
                available: false,
            };
            let entry = Utc::now() - Duration::hours(1);
            Ok(Some(Ticket::open(registration.to_string(), &spot, entry)))
        }

        async fn update_ticket(
            &self,
            _ticket: &Ticket,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            Ok(false)
        }

        async fn completed_session_count(
            &self,
            _registration: &str,
        ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
            Ok(2)
        }
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_spot_occupied() {
        let spots = Arc::new(InMemorySpotStore::with_layout(1, 0));
        let mut spot = spots
            .next_available_spot(VehicleCategory::Car)
            .await
            .unwrap()
            .unwrap();
        spot.available = false;
        spots.update_spot(&spot).await.unwrap();

        let manager = SessionManager::new(
            spots.clone(),
            Arc::new(RejectingSessionStore),
            FareEngine::default(),
        );

        let err = manager.register_exit("ABCDEF").await.unwrap_err();

        assert!(matches!(err, SessionError::UpdateRejected));
        assert!(spots
            .next_available_spot(VehicleCategory::Car)
            .await
            .unwrap()
            .is_none());
    }
}
