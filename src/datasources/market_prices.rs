use super::MarketPriceSource;
use crate::config::{MarketPriceConfig, DEFAULT_PRICE_LIMIT};
use crate::error::{CropwiseError, Result};
use crate::models::{Crop, MarketPrice, PriceValue};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

/// Commodity price client for the data.gov.in resource API.
pub struct MarketPriceClient {
    client: reqwest::Client,
    config: MarketPriceConfig,
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    records: Vec<PriceRecord>,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(default)]
    arrival_date: String,
    #[serde(default)]
    market: String,
    #[serde(default)]
    modal_price: Option<PriceValue>,
}

impl MarketPriceClient {
    pub fn new(config: MarketPriceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request_url(&self, commodity: &str) -> Result<Url> {
        let endpoint = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.resource_id
        );
        let limit = self.row_limit().to_string();

        Url::parse_with_params(
            &endpoint,
            &[
                ("api-key", self.config.api_key.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("filters[commodity]", commodity),
            ],
        )
        .map_err(|e| CropwiseError::Config(format!("Invalid market price URL: {}", e)))
    }

    /// Configured row count, never more than the display allows.
    fn row_limit(&self) -> usize {
        self.config.limit.min(DEFAULT_PRICE_LIMIT)
    }

    fn convert_response(&self, response: PriceResponse) -> Vec<MarketPrice> {
        response
            .records
            .into_iter()
            .take(self.row_limit())
            .map(|r| MarketPrice {
                arrival_date: r.arrival_date,
                market: r.market,
                modal_price: r.modal_price.map(|p| p.to_string()).unwrap_or_default(),
            })
            .collect()
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.request_url(Crop::Maize.as_str())?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CropwiseError::DataSourceUnavailable(format!("Market prices: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl MarketPriceSource for MarketPriceClient {
    async fn fetch_prices(&self, crop: &Crop) -> Result<Vec<MarketPrice>> {
        let url = self.request_url(crop.as_str())?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CropwiseError::DataSourceUnavailable(format!("Market prices: {}", e)))?;

        if !response.status().is_success() {
            return Err(CropwiseError::DataSourceUnavailable(format!(
                "Market price API returned {}",
                response.status()
            )));
        }

        let parsed: PriceResponse = response.json().await.map_err(|e| {
            CropwiseError::DataSourceUnavailable(format!(
                "Failed to parse market price response: {}",
                e
            ))
        })?;

        let prices = self.convert_response(parsed);
        tracing::debug!(crop = %crop, rows = prices.len(), "Fetched market prices");
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MARKET_BASE_URL, DEFAULT_MARKET_RESOURCE_ID};

    fn sample_config() -> MarketPriceConfig {
        MarketPriceConfig {
            api_key: "test_key".to_string(),
            resource_id: DEFAULT_MARKET_RESOURCE_ID.to_string(),
            base_url: format!("{}/", DEFAULT_MARKET_BASE_URL),
            limit: 5,
            enabled: true,
        }
    }

    #[test]
    fn request_url_carries_filters() {
        let client = MarketPriceClient::new(sample_config());
        let url = client.request_url("Tomato").unwrap();

        assert_eq!(
            url.path(),
            "/resource/9ef84268-d588-465a-a308-a864a43d0070"
        );
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("api-key".into(), "test_key".into())));
        assert!(pairs.contains(&("format".into(), "json".into())));
        assert!(pairs.contains(&("limit".into(), "5".into())));
        assert!(pairs.contains(&("filters[commodity]".into(), "Tomato".into())));
    }

    #[test]
    fn request_url_encodes_unlisted_names() {
        let client = MarketPriceClient::new(sample_config());
        let url = client.request_url("Green Gram").unwrap();
        let commodity = url
            .query_pairs()
            .find(|(k, _)| k == "filters[commodity]")
            .map(|(_, v)| v.into_owned());
        assert_eq!(commodity.as_deref(), Some("Green Gram"));
    }

    #[test]
    fn convert_response_caps_rows() {
        let client = MarketPriceClient::new(MarketPriceConfig {
            limit: 2,
            ..sample_config()
        });
        let body = r#"{"records": [
            {"arrival_date": "01/04/2024", "market": "Pune", "modal_price": "2100"},
            {"arrival_date": "02/04/2024", "market": "Nashik", "modal_price": 1950},
            {"arrival_date": "03/04/2024", "market": "Azadpur", "modal_price": "2300"}
        ]}"#;
        let parsed: PriceResponse = serde_json::from_str(body).unwrap();
        let prices = client.convert_response(parsed);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].market, "Pune");
        assert_eq!(prices[1].modal_price, "1950");
    }

    #[test]
    fn configured_limit_above_display_cap_is_clamped() {
        let client = MarketPriceClient::new(MarketPriceConfig {
            limit: 8,
            ..sample_config()
        });
        let records: Vec<String> = (1..=8)
            .map(|i| {
                format!(
                    r#"{{"arrival_date": "0{}/04/2024", "market": "Mandi {}", "modal_price": "2000"}}"#,
                    i, i
                )
            })
            .collect();
        let body = format!(r#"{{"records": [{}]}}"#, records.join(","));
        let parsed: PriceResponse = serde_json::from_str(&body).unwrap();

        let prices = client.convert_response(parsed);
        assert_eq!(prices.len(), DEFAULT_PRICE_LIMIT);
        assert_eq!(prices[4].market, "Mandi 5");

        let limit = client
            .request_url("Rice")
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "limit")
            .map(|(_, v)| v.into_owned());
        assert_eq!(limit.as_deref(), Some("5"));
    }

    #[test]
    fn missing_records_is_empty() {
        let client = MarketPriceClient::new(sample_config());
        let parsed: PriceResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(client.convert_response(parsed).is_empty());
    }
}
