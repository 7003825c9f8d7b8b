use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub tariff: TariffSettings,
    #[serde(default)]
    pub lot: LotSettings,
}

/// Hourly rates, in monetary units per hour
#[derive(Debug, Deserialize, Clone)]
pub struct TariffSettings {
    #[serde(default = "default_car_rate")]
    pub car_rate_per_hour: f64,
    #[serde(default = "default_bike_rate")]
    pub bike_rate_per_hour: f64,
}

fn default_car_rate() -> f64 {
    1.5
}

fn default_bike_rate() -> f64 {
    1.0
}

impl Default for TariffSettings {
    fn default() -> Self {
        Self {
            car_rate_per_hour: default_car_rate(),
            bike_rate_per_hour: default_bike_rate(),
        }
    }
}

/// Number of spots per vehicle category
#[derive(Debug, Deserialize, Clone)]
pub struct LotSettings {
    #[serde(default = "default_car_spots")]
    pub car_spots: u32,
    #[serde(default = "default_bike_spots")]
    pub bike_spots: u32,
}

fn default_car_spots() -> u32 {
    3
}

fn default_bike_spots() -> u32 {
    2
}

impl Default for LotSettings {
    fn default() -> Self {
        Self {
            car_spots: default_car_spots(),
            bike_spots: default_bike_spots(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of PARKSIDE)
            // Eg.. `PARKSIDE__LOT__CAR_SPOTS=10` would set the car spot count
            .add_source(config::Environment::with_prefix("PARKSIDE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
