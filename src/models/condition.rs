use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Soil {
    Loamy,
    Clay,
    Sandy,
    Black,
    Red,
    Alluvial,
}

impl Soil {
    pub fn all() -> &'static [Soil] {
        &[
            Soil::Loamy,
            Soil::Clay,
            Soil::Sandy,
            Soil::Black,
            Soil::Red,
            Soil::Alluvial,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Soil::Loamy => "Loamy",
            Soil::Clay => "Clay",
            Soil::Sandy => "Sandy",
            Soil::Black => "Black",
            Soil::Red => "Red",
            Soil::Alluvial => "Alluvial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "loamy" | "loam" => Some(Soil::Loamy),
            "clay" => Some(Soil::Clay),
            "sandy" | "sand" => Some(Soil::Sandy),
            "black" => Some(Soil::Black),
            "red" => Some(Soil::Red),
            "alluvial" => Some(Soil::Alluvial),
            _ => None,
        }
    }
}

impl std::fmt::Display for Soil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Monsoon,
    Winter,
    Spring,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Summer, Season::Monsoon, Season::Winter, Season::Spring]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "summer" => Some(Season::Summer),
            "monsoon" | "rainy" => Some(Season::Monsoon),
            "winter" => Some(Season::Winter),
            "spring" => Some(Season::Spring),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated input for one recommendation. Temperature is °C, rainfall mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowingCondition {
    pub soil: Soil,
    pub season: Season,
    pub temperature_c: Option<f64>,
    pub rainfall_mm: Option<f64>,
}

impl GrowingCondition {
    pub fn new(soil: Soil, season: Season) -> Self {
        Self {
            soil,
            season,
            temperature_c: None,
            rainfall_mm: None,
        }
    }

    pub fn with_weather(mut self, temperature_c: f64, rainfall_mm: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self.rainfall_mm = Some(rainfall_mm);
        self
    }

    /// Both numeric readings are present, so the guarded rule table applies.
    pub fn is_extended(&self) -> bool {
        self.temperature_c.is_some() && self.rainfall_mm.is_some()
    }
}

/// Raw, user-editable form fields as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub soil: String,
    pub season: String,
    pub temperature: String,
    pub rainfall: String,
}

impl FormInput {
    pub fn new(soil: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            soil: soil.into(),
            season: season.into(),
            ..Default::default()
        }
    }

    pub fn with_weather(
        mut self,
        temperature: impl Into<String>,
        rainfall: impl Into<String>,
    ) -> Self {
        self.temperature = temperature.into();
        self.rainfall = rainfall.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_from_str_valid() {
        assert_eq!(Soil::from_str("Loamy"), Some(Soil::Loamy));
        assert_eq!(Soil::from_str("loam"), Some(Soil::Loamy));
        assert_eq!(Soil::from_str("CLAY"), Some(Soil::Clay));
        assert_eq!(Soil::from_str(" black "), Some(Soil::Black));
    }

    #[test]
    fn soil_from_str_invalid() {
        assert_eq!(Soil::from_str(""), None);
        assert_eq!(Soil::from_str("peat"), None);
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("Monsoon"), Some(Season::Monsoon));
        assert_eq!(Season::from_str("rainy"), Some(Season::Monsoon));
        assert_eq!(Season::from_str("winter"), Some(Season::Winter));
        assert_eq!(Season::from_str(""), None);
        assert_eq!(Season::from_str("autumnal"), None);
    }

    #[test]
    fn display_names_round_trip() {
        for soil in Soil::all() {
            assert_eq!(Soil::from_str(soil.as_str()), Some(*soil));
        }
        for season in Season::all() {
            assert_eq!(Season::from_str(season.as_str()), Some(*season));
        }
    }

    #[test]
    fn extended_requires_both_readings() {
        let simple = GrowingCondition::new(Soil::Clay, Season::Monsoon);
        assert!(!simple.is_extended());

        let mut partial = simple;
        partial.temperature_c = Some(30.0);
        assert!(!partial.is_extended());

        assert!(simple.with_weather(30.0, 200.0).is_extended());
    }
}
