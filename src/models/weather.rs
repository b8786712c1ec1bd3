use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE_C: f64 = 30.0;
pub const DEFAULT_RAINFALL_MM: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherOrigin {
    OpenWeatherMap,
    Defaults,
}

impl WeatherOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherOrigin::OpenWeatherMap => "OpenWeatherMap",
            WeatherOrigin::Defaults => "Defaults",
        }
    }
}

/// Current conditions used to pre-fill the temperature and rainfall fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub timestamp: DateTime<Utc>,
    pub source: WeatherOrigin,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub location: Option<String>,
}

impl WeatherReading {
    pub fn defaults() -> Self {
        Self {
            timestamp: Utc::now(),
            source: WeatherOrigin::Defaults,
            temperature_c: DEFAULT_TEMPERATURE_C,
            rainfall_mm: DEFAULT_RAINFALL_MM,
            location: None,
        }
    }

    pub fn temperature_field(&self) -> String {
        format_reading(self.temperature_c)
    }

    pub fn rainfall_field(&self) -> String {
        format_reading(self.rainfall_mm)
    }
}

impl Default for WeatherReading {
    fn default() -> Self {
        Self::defaults()
    }
}

fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
