use super::WeatherProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::{CropwiseError, Result};
use crate::models::{WeatherOrigin, WeatherReading};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current weather response
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn current_url(&self) -> String {
        format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, self.config.latitude, self.config.longitude, self.config.api_key
        )
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let response =
            self.client.get(self.current_url()).send().await.map_err(|e| {
                CropwiseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn convert_response(&self, response: OwmCurrentResponse) -> WeatherReading {
        let timestamp = DateTime::from_timestamp(response.dt, 0).unwrap_or_else(Utc::now);

        WeatherReading {
            timestamp,
            source: WeatherOrigin::OpenWeatherMap,
            temperature_c: response.main.temp,
            rainfall_mm: response.rain.map(|r| r.one_hour).unwrap_or(0.0),
            location: (!response.name.is_empty()).then_some(response.name),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    async fn fetch_current(&self) -> Result<WeatherReading> {
        let response =
            self.client.get(self.current_url()).send().await.map_err(|e| {
                CropwiseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropwiseError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            CropwiseError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(self.convert_response(owm_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            latitude: 28.61,
            longitude: 77.21,
            enabled: true,
        }
    }

    #[test]
    fn current_url_uses_metric_units() {
        let client = OpenWeatherMapClient::new(sample_config());
        let url = client.current_url();
        assert!(url.starts_with("https://api.openweathermap.org/data/2.5/weather?"));
        assert!(url.contains("lat=28.61"));
        assert!(url.contains("lon=77.21"));
        assert!(url.contains("units=metric"));
    }

    #[test]
    fn convert_with_rain() {
        let client = OpenWeatherMapClient::new(sample_config());
        let body = r#"{"dt": 1718000000, "main": {"temp": 33.4}, "rain": {"1h": 2.5}, "name": "New Delhi"}"#;
        let parsed: OwmCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = client.convert_response(parsed);

        assert_eq!(reading.source, WeatherOrigin::OpenWeatherMap);
        assert!((reading.temperature_c - 33.4).abs() < 0.001);
        assert!((reading.rainfall_mm - 2.5).abs() < 0.001);
        assert_eq!(reading.location.as_deref(), Some("New Delhi"));
    }

    #[test]
    fn convert_without_rain_is_zero() {
        let client = OpenWeatherMapClient::new(sample_config());
        let body = r#"{"dt": 1718000000, "main": {"temp": 21.0}}"#;
        let parsed: OwmCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = client.convert_response(parsed);

        assert_eq!(reading.rainfall_mm, 0.0);
        assert!(reading.location.is_none());
    }
}
