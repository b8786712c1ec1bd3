use crate::config::Config;
use crate::datasources::{OpenWeatherMapClient, WeatherProvider};
use crate::models::WeatherReading;

pub fn weather_provider(config: &Config) -> Option<Box<dyn WeatherProvider>> {
    let provider = config.active_weather().map(|c| {
        tracing::info!("OpenWeatherMap configured for form pre-fill");
        Box::new(OpenWeatherMapClient::new(c.clone())) as Box<dyn WeatherProvider>
    });

    if provider.is_none() {
        tracing::info!("OpenWeatherMap not configured - form pre-fills 30°C / 0 mm");
    }

    provider
}

/// Current conditions for the extended form, or the 30°C / 0 mm defaults
/// when no provider is configured or the lookup fails.
pub async fn bootstrap(provider: Option<&dyn WeatherProvider>) -> WeatherReading {
    let Some(provider) = provider else {
        return WeatherReading::defaults();
    };

    match provider.fetch_current().await {
        Ok(reading) => {
            tracing::debug!(
                source = reading.source.as_str(),
                temperature_c = reading.temperature_c,
                rainfall_mm = reading.rainfall_mm,
                "Weather pre-fill loaded"
            );
            reading
        }
        Err(e) => {
            tracing::warn!("Failed to fetch current weather: {}", e);
            WeatherReading::defaults()
        }
    }
}
