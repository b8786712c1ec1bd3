use super::{CropRule, Guard};
use crate::models::{Crop, Season, Soil};

pub const DEFAULT_REASON: &str =
    "Maize is adaptable and fits your soil and season combination well.";

/// The rule table, highest precedence first. Anything unmatched resolves to Maize.
pub fn default_rules() -> Vec<CropRule> {
    vec![
        CropRule {
            id: "loamy_summer_tomato",
            soil: Soil::Loamy,
            season: Season::Summer,
            guard: Guard::TemperatureAbove(25.0),
            crop: Crop::Tomato,
            reason: "Loamy soil is rich in nutrients and tomatoes thrive in summer heat.",
        },
        CropRule {
            id: "clay_monsoon_rice",
            soil: Soil::Clay,
            season: Season::Monsoon,
            guard: Guard::RainfallAbove(150.0),
            crop: Crop::Rice,
            reason: "Clay retains water, perfect for water-loving rice in the rainy season.",
        },
        CropRule {
            id: "sandy_winter_carrot",
            soil: Soil::Sandy,
            season: Season::Winter,
            guard: Guard::TemperatureBelow(20.0),
            crop: Crop::Carrot,
            reason: "Carrots love the drainage of sandy soil and the cool of winter.",
        },
        CropRule {
            id: "black_monsoon_cotton",
            soil: Soil::Black,
            season: Season::Monsoon,
            guard: Guard::None,
            crop: Crop::Cotton,
            reason: "Black soil holds moisture well, which cotton needs in monsoon.",
        },
    ]
}
