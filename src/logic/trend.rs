use crate::models::Crop;

/// Moves within this band (percent) count as flat.
const STABLE_BAND_PCT: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "↑ Rising",
            Trend::Falling => "↓ Falling",
            Trend::Stable => "→ Stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub first: f64,
    pub last: f64,
    pub change_pct: f64,
    pub trend: Trend,
}

impl TrendSummary {
    pub fn from_series(series: &[f64]) -> Option<Self> {
        let first = *series.first()?;
        let last = *series.last()?;
        if first == 0.0 {
            return None;
        }

        let change_pct = (last - first) / first * 100.0;
        let trend = if change_pct > STABLE_BAND_PCT {
            Trend::Rising
        } else if change_pct < -STABLE_BAND_PCT {
            Trend::Falling
        } else {
            Trend::Stable
        };

        Some(Self {
            first,
            last,
            change_pct,
            trend,
        })
    }

    pub fn for_crop(crop: &Crop) -> Option<Self> {
        crop.trend().and_then(|series| Self::from_series(series))
    }

    pub fn price_level(&self) -> &'static str {
        if self.last > 100.0 {
            "high"
        } else if self.last > 50.0 {
            "moderate"
        } else {
            "relatively low"
        }
    }

    /// Short label for the chart title, e.g. `↑ Rising +40.0%`.
    pub fn label(&self) -> String {
        format!("{} {:+.1}%", self.trend, self.change_pct)
    }

    pub fn explain(&self, crop: &Crop) -> String {
        let movement = if self.change_pct > 10.0 {
            format!("increased significantly by {:.1}%", self.change_pct)
        } else if self.change_pct > 0.0 {
            format!("slightly increased by {:.1}%", self.change_pct)
        } else if self.change_pct > -10.0 {
            format!("slightly decreased by {:.1}%", self.change_pct.abs())
        } else {
            format!("decreased significantly by {:.1}%", self.change_pct.abs())
        };

        format!(
            "{} has a {} market price of ₹{:.2} per kg. The price has {} since January.",
            crop,
            self.price_level(),
            self.last,
            movement
        )
    }
}
