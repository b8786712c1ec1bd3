use super::PredictionSource;
use crate::config::PredictionConfig;
use crate::error::{CropwiseError, Result};
use crate::models::{Crop, GrowingCondition, Season, Soil};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub struct PredictionClient {
    client: reqwest::Client,
    config: PredictionConfig,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    soil: &'a str,
    season: &'a str,
    rainfall: f64,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    crop: String,
}

impl PredictionClient {
    pub fn new(config: PredictionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a representative request and report whether a crop came back.
    pub async fn test_connection(&self) -> Result<bool> {
        let probe = GrowingCondition::new(Soil::Loamy, Season::Summer).with_weather(30.0, 0.0);
        Ok(self.predict(&probe).await.is_ok())
    }

    fn build_request(condition: &GrowingCondition) -> Result<PredictRequest<'static>> {
        match (condition.temperature_c, condition.rainfall_mm) {
            (Some(temperature), Some(rainfall)) => Ok(PredictRequest {
                soil: condition.soil.as_str(),
                season: condition.season.as_str(),
                rainfall,
                temperature,
            }),
            _ => Err(CropwiseError::InvalidInput(
                "prediction needs temperature and rainfall".into(),
            )),
        }
    }

    fn parse_response(body: &str) -> Result<Crop> {
        let parsed: PredictResponse = serde_json::from_str(body).map_err(|e| {
            CropwiseError::DataSourceUnavailable(format!(
                "Failed to parse prediction response: {}",
                e
            ))
        })?;

        if parsed.crop.trim().is_empty() {
            return Err(CropwiseError::DataSourceUnavailable(
                "Prediction service returned an empty crop".into(),
            ));
        }

        Ok(Crop::from_name(&parsed.crop))
    }
}

#[async_trait]
impl PredictionSource for PredictionClient {
    async fn predict(&self, condition: &GrowingCondition) -> Result<Crop> {
        let payload = Self::build_request(condition)?;

        let response = self
            .client
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CropwiseError::DataSourceUnavailable(format!("Prediction: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropwiseError::DataSourceUnavailable(format!(
                "Prediction service returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let crop = Self::parse_response(&body)?;
        tracing::debug!(crop = %crop, "Prediction service answered");
        Ok(crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_payload_shape() {
        let condition = GrowingCondition::new(Soil::Clay, Season::Monsoon).with_weather(28.5, 210.0);
        let payload = PredictionClient::build_request(&condition).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["soil"], "Clay");
        assert_eq!(json["season"], "Monsoon");
        assert_eq!(json["rainfall"], 210.0);
        assert_eq!(json["temperature"], 28.5);
    }

    #[test]
    fn request_requires_weather() {
        let condition = GrowingCondition::new(Soil::Clay, Season::Monsoon);
        assert!(PredictionClient::build_request(&condition).is_err());
    }

    #[test]
    fn parse_known_and_unlisted_crops() {
        assert_eq!(
            PredictionClient::parse_response(r#"{"crop": "Rice"}"#).unwrap(),
            Crop::Rice
        );
        assert_eq!(
            PredictionClient::parse_response(r#"{"crop": "Groundnut"}"#).unwrap(),
            Crop::Unlisted("Groundnut".into())
        );
    }

    #[test]
    fn parse_rejects_malformed_bodies() {
        for body in [r#"{"error": "bad soil"}"#, "<html>", r#"{"crop": "  "}"#] {
            assert!(matches!(
                PredictionClient::parse_response(body),
                Err(CropwiseError::DataSourceUnavailable(_))
            ));
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        let client = PredictionClient::new(PredictionConfig {
            url: "http://127.0.0.1:9/predict".into(),
            enabled: true,
        });
        let condition = GrowingCondition::new(Soil::Clay, Season::Monsoon).with_weather(30.0, 200.0);

        let result = client.predict(&condition).await;
        assert!(matches!(result, Err(CropwiseError::DataSourceUnavailable(_))));
    }
}
