pub mod market_prices;
pub mod openweathermap;
pub mod prediction;

pub use market_prices::MarketPriceClient;
pub use openweathermap::OpenWeatherMapClient;
pub use prediction::PredictionClient;

use crate::error::Result;
use crate::models::{Crop, GrowingCondition, MarketPrice, WeatherReading};
use async_trait::async_trait;

/// Remote crop prediction. One call per recommendation, never retried.
#[async_trait]
pub trait PredictionSource: Send + Sync {
    async fn predict(&self, condition: &GrowingCondition) -> Result<Crop>;
}

/// Recent market arrivals for a crop.
#[async_trait]
pub trait MarketPriceSource: Send + Sync {
    async fn fetch_prices(&self, crop: &Crop) -> Result<Vec<MarketPrice>>;
}

/// Current conditions used to pre-fill the extended form.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current(&self) -> Result<WeatherReading>;
}
