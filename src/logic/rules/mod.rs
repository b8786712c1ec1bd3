pub mod engine;
pub mod table;

pub use engine::Resolver;
pub use table::default_rules;

use crate::models::{Crop, GrowingCondition, Season, Soil};

/// Numeric precondition checked only when temperature and rainfall are known.
/// Bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guard {
    None,
    TemperatureAbove(f64),
    TemperatureBelow(f64),
    RainfallAbove(f64),
}

impl Guard {
    pub fn holds(&self, condition: &GrowingCondition) -> bool {
        match (self, condition.temperature_c, condition.rainfall_mm) {
            (Guard::None, _, _) => true,
            (Guard::TemperatureAbove(limit), Some(t), _) => t > *limit,
            (Guard::TemperatureBelow(limit), Some(t), _) => t < *limit,
            (Guard::RainfallAbove(limit), _, Some(r)) => r > *limit,
            _ => false,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Guard::None => "-".to_string(),
            Guard::TemperatureAbove(limit) => format!("temperature > {}°C", limit),
            Guard::TemperatureBelow(limit) => format!("temperature < {}°C", limit),
            Guard::RainfallAbove(limit) => format!("rainfall > {} mm", limit),
        }
    }
}

/// One row of the ordered rule table.
#[derive(Debug, Clone)]
pub struct CropRule {
    pub id: &'static str,
    pub soil: Soil,
    pub season: Season,
    pub guard: Guard,
    pub crop: Crop,
    pub reason: &'static str,
}

impl CropRule {
    /// The guard is only consulted for extended conditions.
    pub fn matches(&self, condition: &GrowingCondition) -> bool {
        if self.soil != condition.soil || self.season != condition.season {
            return false;
        }
        !condition.is_extended() || self.guard.holds(condition)
    }
}
