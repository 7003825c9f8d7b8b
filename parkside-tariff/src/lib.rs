pub mod fare;
pub mod rates;

pub use fare::{FareEngine, FareError};
pub use rates::Tariff;
