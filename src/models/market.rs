use serde::Deserialize;

/// One market arrival row from the commodity price API.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPrice {
    pub arrival_date: String,
    pub market: String,
    pub modal_price: String,
}

impl MarketPrice {
    pub fn format_row(&self) -> String {
        format!(
            "{} - {}: ₹{}/quintal",
            self.arrival_date, self.market, self.modal_price
        )
    }
}

/// The API publishes prices as strings but some mirrors send numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceValue::Text(s) => write!(f, "{}", s),
            PriceValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Lines appended below a rendered recommendation.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketAppendix {
    Prices(Vec<MarketPrice>),
    NoData { crop: String },
    FetchFailed,
}

impl MarketAppendix {
    pub fn lines(&self) -> Vec<String> {
        match self {
            MarketAppendix::Prices(prices) => {
                let mut lines = vec![String::new(), "Latest Real Market Prices:".to_string()];
                lines.extend(prices.iter().map(MarketPrice::format_row));
                lines
            }
            MarketAppendix::NoData { crop } => vec![
                String::new(),
                format!("No real-time price data available for {}.", crop),
            ],
            MarketAppendix::FetchFailed => vec![
                String::new(),
                "⚠ Could not fetch real prices. Check API key or network.".to_string(),
            ],
        }
    }
}
