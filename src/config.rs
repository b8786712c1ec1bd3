use crate::error::{CropwiseError, Result};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MARKET_BASE_URL: &str = "https://api.data.gov.in/resource";
pub const DEFAULT_MARKET_RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";
pub const DEFAULT_PRICE_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Variant,
    #[serde(default)]
    pub prediction: Option<PredictionConfig>,
    #[serde(default)]
    pub market_prices: Option<MarketPriceConfig>,
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
}

/// Which form the advisor presents.
///
/// `Simple` asks for soil and season, explains its pick and appends market
/// prices. `Extended` also takes temperature and rainfall and consults the
/// prediction service first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Simple,
    Extended,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Simple => "simple",
            Variant::Extended => "extended",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionConfig {
    /// Full endpoint, e.g. `http://127.0.0.1:5000/predict`
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct MarketPriceConfig {
    pub api_key: String,
    #[serde(default = "default_market_resource_id")]
    pub resource_id: String,
    #[serde(default = "default_market_base_url")]
    pub base_url: String,
    #[serde(default = "default_price_limit")]
    pub limit: usize,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl std::fmt::Debug for MarketPriceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketPriceConfig")
            .field("api_key", &"[REDACTED]")
            .field("resource_id", &self.resource_id)
            .field("base_url", &self.base_url)
            .field("limit", &self.limit)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn default_enabled() -> bool {
    true
}

fn default_market_resource_id() -> String {
    DEFAULT_MARKET_RESOURCE_ID.to_string()
}

fn default_market_base_url() -> String {
    DEFAULT_MARKET_BASE_URL.to_string()
}

fn default_price_limit() -> usize {
    DEFAULT_PRICE_LIMIT
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropwiseError::Config(format!(
                "Config file not found at {:?}. Run `cropwise init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropwiseError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after `${VAR}` substitution.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| CropwiseError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("cropwise").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/cropwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropwiseError::Config("Cannot determine config directory".into()))?
            .join("cropwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Load the config if one exists in a standard location, otherwise run
    /// with defaults (simple variant, no remote sources). An explicit path
    /// must exist.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_some() {
            return Self::load(config_override);
        }

        let found = Self::find_config_path()
            .map(|p| p.exists())
            .unwrap_or(false);
        if found {
            Self::load(None)
        } else {
            tracing::info!("No configuration found - using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Cropwise!");
        println!();

        let variants = [Variant::Simple, Variant::Extended];
        let labels = [
            "simple   - soil + season, rule table, market prices",
            "extended - soil, season, temperature, rainfall, prediction service",
        ];
        let choice = Select::new()
            .with_prompt("Advisor mode")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;
        let mode = variants[choice];

        println!();

        // --- Prediction service (extended only) ---
        let prediction = if mode == Variant::Extended {
            println!("Prediction service (leave URL blank to use the rule table only)");
            let url: String = Input::new()
                .with_prompt("  URL")
                .default("http://127.0.0.1:5000/predict".into())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;
            println!();
            (!url.is_empty()).then_some(PredictionConfig { url, enabled: true })
        } else {
            None
        };

        // --- Market prices (simple only) ---
        let market_prices = if mode == Variant::Simple {
            println!("Market prices from data.gov.in (leave API key blank to skip)");
            println!("  Tip: enter ${{DATA_GOV_IN_API_KEY}} to read the key from the environment");
            let api_key: String = Input::new()
                .with_prompt("  API key")
                .default(String::new())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;
            println!();
            (!api_key.is_empty()).then(|| MarketPriceConfig {
                api_key,
                resource_id: default_market_resource_id(),
                base_url: default_market_base_url(),
                limit: DEFAULT_PRICE_LIMIT,
                enabled: true,
            })
        } else {
            None
        };

        // --- OpenWeatherMap (extended only) ---
        let openweathermap = if mode == Variant::Extended {
            println!("OpenWeatherMap (leave API key blank to pre-fill 30°C / 0 mm)");
            let api_key: String = Input::new()
                .with_prompt("  API key")
                .default(String::new())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

            let owm = if api_key.is_empty() {
                None
            } else {
                let latitude: f64 = Input::new()
                    .with_prompt("  Latitude")
                    .default(28.61)
                    .interact_text()
                    .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

                let longitude: f64 = Input::new()
                    .with_prompt("  Longitude")
                    .default(77.21)
                    .interact_text()
                    .map_err(|e| CropwiseError::Config(format!("Input error: {}", e)))?;

                Some(OpenWeatherMapConfig {
                    api_key,
                    latitude,
                    longitude,
                    enabled: true,
                })
            };
            println!();
            owm
        } else {
            None
        };

        let config = Config {
            mode,
            prediction,
            market_prices,
            openweathermap,
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CropwiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Cropwise Configuration\n# Generated by `cropwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .expect("env var pattern is a valid regex");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("CROPWISE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropwiseError::Config("Cannot determine data directory".into()))?
            .join("cropwise");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("cropwise.log"))
    }

    /// Prediction endpoint, only when the extended form is active.
    pub fn active_prediction(&self) -> Option<&PredictionConfig> {
        self.prediction
            .as_ref()
            .filter(|p| self.mode == Variant::Extended && p.enabled && !p.url.is_empty())
    }

    /// Market price source, only when the simple form is active.
    pub fn active_market_prices(&self) -> Option<&MarketPriceConfig> {
        self.market_prices
            .as_ref()
            .filter(|m| self.mode == Variant::Simple && m.enabled && !m.api_key.is_empty())
    }

    /// Weather bootstrap source, only when the extended form is active.
    pub fn active_weather(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap
            .as_ref()
            .filter(|w| self.mode == Variant::Extended && w.enabled && !w.api_key.is_empty())
    }
}
