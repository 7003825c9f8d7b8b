use chrono::{DateTime, Utc};

use parkside_core::{Ticket, VehicleCategory};

use crate::rates::Tariff;

/// Stays at or under this duration are free
pub const GRACE_PERIOD_HOURS: f64 = 0.5;

/// Fare multiplier for recurring users (5% off)
pub const RECURRING_USER_DISCOUNT: f64 = 0.95;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Fare computation errors
#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("exit time is missing or precedes entry time {entry_time}: {exit_time:?}")]
    InvalidDuration {
        entry_time: DateTime<Utc>,
        exit_time: Option<DateTime<Utc>>,
    },

    #[error("no hourly rate configured for vehicle category {0}")]
    UnknownCategory(VehicleCategory),
}

/// Prices completed stays against a fixed tariff.
///
/// The engine is stateless: it reads the tariff table and touches nothing
/// but the single ticket passed in, so independent tickets can be priced
/// concurrently without synchronization.
pub struct FareEngine {
    tariff: Tariff,
}

impl FareEngine {
    pub fn new(tariff: Tariff) -> Self {
        Self { tariff }
    }

    /// Price a completed stay with no loyalty discount
    pub fn calculate_fare(&self, ticket: &mut Ticket) -> Result<f64, FareError> {
        self.calculate_fare_with_discount(ticket, false)
    }

    /// Price a completed stay and record the result on the ticket.
    ///
    /// Duration is the exact fractional-hour span between entry and exit;
    /// no rounding happens anywhere in the chain. Stays within the grace
    /// period are free regardless of category or discount. Otherwise the
    /// category's hourly rate applies, reduced by 5% for recurring users.
    pub fn calculate_fare_with_discount(
        &self,
        ticket: &mut Ticket,
        discount: bool,
    ) -> Result<f64, FareError> {
        let exit_time = match ticket.exit_time {
            Some(t) if t >= ticket.entry_time => t,
            _ => {
                return Err(FareError::InvalidDuration {
                    entry_time: ticket.entry_time,
                    exit_time: ticket.exit_time,
                })
            }
        };

        let duration_hours =
            (exit_time - ticket.entry_time).num_milliseconds() as f64 / MILLIS_PER_HOUR;

        // Grace rule wins over rate and discount
        if duration_hours <= GRACE_PERIOD_HOURS {
            ticket.price = Some(0.0);
            return Ok(0.0);
        }

        let rate = self
            .tariff
            .hourly_rate(ticket.category)
            .ok_or(FareError::UnknownCategory(ticket.category))?;

        let base = duration_hours * rate;
        let price = if discount {
            base * RECURRING_USER_DISCOUNT
        } else {
            base
        };

        ticket.price = Some(price);
        Ok(price)
    }
}

impl Default for FareEngine {
    fn default() -> Self {
        Self::new(Tariff::default())
    }
}
