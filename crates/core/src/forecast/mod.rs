//! Forecast seeding from the last known actual.

pub mod seed;

pub use seed::{ActualPoint, ForecastSeeder};
