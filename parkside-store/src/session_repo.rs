use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use parkside_core::{SessionRepository, Ticket};

/// In-memory ticket store. A database-backed store would slot in behind
/// the same trait.
#[derive(Default)]
pub struct InMemorySessionStore {
    tickets: RwLock<Vec<Ticket>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn save_ticket(
        &self,
        ticket: &Ticket,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        debug!(
            "Saving ticket {} for {}",
            ticket.id, ticket.vehicle_registration
        );
        self.tickets.write().await.push(ticket.clone());
        Ok(())
    }

    async fn open_ticket(
        &self,
        registration: &str,
    ) -> Result<Option<Ticket>, Box<dyn std::error::Error + Send + Sync>> {
        let tickets = self.tickets.read().await;
        Ok(tickets
            .iter()
            .rev()
            .find(|t| t.vehicle_registration == registration && t.exit_time.is_none())
            .cloned())
    }

    async fn update_ticket(
        &self,
        ticket: &Ticket,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut tickets = self.tickets.write().await;
        match tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(stored) => {
                *stored = ticket.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn completed_session_count(
        &self,
        registration: &str,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let tickets = self.tickets.read().await;
        Ok(tickets
            .iter()
            .filter(|t| t.vehicle_registration == registration && t.price.is_some())
            .count() as u64)
    }
}
