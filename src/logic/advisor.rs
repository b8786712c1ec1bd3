use super::rules::Resolver;
use super::surface::DisplaySurface;
use crate::config::{Config, Variant};
use crate::datasources::{
    MarketPriceClient, MarketPriceSource, PredictionClient, PredictionSource,
};
use crate::error::{CropwiseError, Result};
use crate::models::{
    Crop, FormInput, GrowingCondition, MarketAppendix, Recommendation, RecommendationSource,
    RenderInstruction, Season, Soil,
};

pub const MISSING_SELECTION: &str = "Please select both soil and season.";
pub const NON_NUMERIC_WEATHER: &str = "Please enter numeric temperature and rainfall.";

/// Runs one recommendation cycle per user action: validate, ask the
/// prediction service, fall back to the rule table, render, then append
/// market prices.
pub struct Advisor {
    variant: Variant,
    resolver: Resolver,
    prediction: Option<Box<dyn PredictionSource>>,
    market_prices: Option<Box<dyn MarketPriceSource>>,
}

impl Advisor {
    pub fn new(config: &Config) -> Self {
        let prediction = config.active_prediction().map(|c| {
            tracing::info!(url = %c.url, "Prediction service configured");
            Box::new(PredictionClient::new(c.clone())) as Box<dyn PredictionSource>
        });

        if config.mode == Variant::Extended && prediction.is_none() {
            tracing::info!("Prediction service not configured - using the rule table only");
        }

        let market_prices = config.active_market_prices().map(|c| {
            tracing::info!("Market price API configured");
            Box::new(MarketPriceClient::new(c.clone())) as Box<dyn MarketPriceSource>
        });

        if config.mode == Variant::Simple && market_prices.is_none() {
            tracing::info!("Market price API not configured - price rows will be skipped");
        }

        Self::with_sources(config.mode, prediction, market_prices)
    }

    pub fn with_sources(
        variant: Variant,
        prediction: Option<Box<dyn PredictionSource>>,
        market_prices: Option<Box<dyn MarketPriceSource>>,
    ) -> Self {
        Self {
            variant,
            resolver: Resolver::new(),
            prediction,
            market_prices,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn validate(&self, form: &FormInput) -> Result<GrowingCondition> {
        if form.soil.trim().is_empty() || form.season.trim().is_empty() {
            return Err(CropwiseError::InvalidInput(MISSING_SELECTION.into()));
        }

        let soil = Soil::from_str(&form.soil).ok_or_else(|| {
            CropwiseError::InvalidInput(format!("Unknown soil type: {}", form.soil.trim()))
        })?;
        let season = Season::from_str(&form.season).ok_or_else(|| {
            CropwiseError::InvalidInput(format!("Unknown season: {}", form.season.trim()))
        })?;

        let condition = GrowingCondition::new(soil, season);
        if self.variant == Variant::Simple {
            return Ok(condition);
        }

        match (parse_number(&form.temperature), parse_number(&form.rainfall)) {
            (Some(temperature), Some(rainfall)) => Ok(condition.with_weather(temperature, rainfall)),
            _ => Err(CropwiseError::InvalidInput(NON_NUMERIC_WEATHER.into())),
        }
    }

    pub async fn recommend(&self, form: &FormInput) -> RenderInstruction {
        let condition = match self.validate(form) {
            Ok(c) => c,
            Err(CropwiseError::InvalidInput(message)) => {
                tracing::debug!("Rejected form input: {}", message);
                return RenderInstruction::invalid(message);
            }
            Err(e) => return RenderInstruction::invalid(e.to_string()),
        };

        let recommendation = match self.remote_recommendation(&condition).await {
            Some(r) => r,
            None => self.resolver.resolve(&condition),
        };

        tracing::info!(
            crop = %recommendation.crop,
            source = %recommendation.source,
            "Recommendation resolved"
        );

        RenderInstruction::result(recommendation)
    }

    async fn remote_recommendation(&self, condition: &GrowingCondition) -> Option<Recommendation> {
        if self.variant != Variant::Extended {
            return None;
        }
        let source = self.prediction.as_ref()?;

        match source.predict(condition).await {
            Ok(crop) => {
                if !crop.is_listed() {
                    tracing::info!(crop = %crop, "Prediction service returned a crop without assets");
                }
                Some(Recommendation::new(crop, RecommendationSource::Remote))
            }
            Err(e) => {
                tracing::warn!("Prediction failed, using rule table: {}", e);
                None
            }
        }
    }

    /// Market price rows for the simple form. `None` when there is nothing to
    /// append because no price source applies.
    pub async fn enrich(&self, crop: &Crop) -> Option<MarketAppendix> {
        if self.variant != Variant::Simple {
            return None;
        }
        let source = self.market_prices.as_ref()?;

        let appendix = match source.fetch_prices(crop).await {
            Ok(prices) if prices.is_empty() => MarketAppendix::NoData {
                crop: crop.to_string(),
            },
            Ok(prices) => MarketAppendix::Prices(prices),
            Err(e) => {
                tracing::warn!("Failed to fetch market prices: {}", e);
                MarketAppendix::FetchFailed
            }
        };

        Some(appendix)
    }

    /// One full cycle against a display surface. Enrichment starts only after
    /// the primary render and chart redraw have been issued.
    pub async fn run_cycle<S>(&self, form: &FormInput, surface: &mut S)
    where
        S: DisplaySurface + Send,
    {
        let instruction = self.recommend(form).await;
        surface.render(&instruction);

        let Some(crop) = instruction.crop().cloned() else {
            return;
        };
        surface.draw_trend(&crop);

        if let Some(appendix) = self.enrich(&crop).await {
            surface.append(&appendix);
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
