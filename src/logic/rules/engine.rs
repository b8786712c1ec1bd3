use super::{default_rules, table::DEFAULT_REASON, CropRule};
use crate::models::{Crop, GrowingCondition, Recommendation, RecommendationSource};

pub struct Resolver {
    rules: Vec<CropRule>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<CropRule>) -> Self {
        Self { rules }
    }

    /// First matching rule wins; Maize when nothing matches.
    ///
    /// Simple conditions (no temperature/rainfall) carry the rule's reason.
    /// Extended conditions apply each rule's numeric guard and carry no reason.
    pub fn resolve(&self, condition: &GrowingCondition) -> Recommendation {
        let matched = self.matching_rule(condition);

        let (crop, reason) = match matched {
            Some(rule) => (rule.crop.clone(), rule.reason),
            None => (Crop::Maize, DEFAULT_REASON),
        };

        tracing::debug!(
            rule = matched.map(|r| r.id).unwrap_or("default"),
            crop = %crop,
            extended = condition.is_extended(),
            "Resolved crop from rule table"
        );

        let recommendation = Recommendation::new(crop, RecommendationSource::RuleTable);
        if condition.is_extended() {
            recommendation
        } else {
            recommendation.with_reason(reason)
        }
    }

    pub fn matching_rule(&self, condition: &GrowingCondition) -> Option<&CropRule> {
        self.rules.iter().find(|rule| rule.matches(condition))
    }

    pub fn list_rules(&self) -> &[CropRule] {
        &self.rules
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::Guard;
    use crate::models::{Season, Soil};

    fn simple(soil: Soil, season: Season) -> GrowingCondition {
        GrowingCondition::new(soil, season)
    }

    fn extended(soil: Soil, season: Season, temp: f64, rain: f64) -> GrowingCondition {
        GrowingCondition::new(soil, season).with_weather(temp, rain)
    }

    #[test]
    fn simple_table_rows() {
        let resolver = Resolver::new();
        let cases = [
            (Soil::Loamy, Season::Summer, Crop::Tomato),
            (Soil::Clay, Season::Monsoon, Crop::Rice),
            (Soil::Sandy, Season::Winter, Crop::Carrot),
            (Soil::Black, Season::Monsoon, Crop::Cotton),
            (Soil::Red, Season::Spring, Crop::Maize),
            (Soil::Loamy, Season::Winter, Crop::Maize),
        ];

        for (soil, season, expected) in cases {
            let rec = resolver.resolve(&simple(soil, season));
            assert_eq!(rec.crop, expected, "{} / {}", soil, season);
            assert_eq!(rec.source, RecommendationSource::RuleTable);
            assert!(rec.reason.is_some());
        }
    }

    #[test]
    fn simple_reasons_match_rows() {
        let resolver = Resolver::new();
        let rice = resolver.resolve(&simple(Soil::Clay, Season::Monsoon));
        assert_eq!(
            rice.reason.as_deref(),
            Some("Clay retains water, perfect for water-loving rice in the rainy season.")
        );

        let maize = resolver.resolve(&simple(Soil::Alluvial, Season::Summer));
        assert_eq!(maize.reason.as_deref(), Some(DEFAULT_REASON));
    }

    #[test]
    fn simple_resolution_is_deterministic() {
        let resolver = Resolver::new();
        for soil in Soil::all() {
            for season in Season::all() {
                let first = resolver.resolve(&simple(*soil, *season));
                let second = resolver.resolve(&simple(*soil, *season));
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn rice_requires_heavy_rainfall() {
        let resolver = Resolver::new();
        let wet = resolver.resolve(&extended(Soil::Clay, Season::Monsoon, 28.0, 200.0));
        assert_eq!(wet.crop, Crop::Rice);

        let dry = resolver.resolve(&extended(Soil::Clay, Season::Monsoon, 28.0, 100.0));
        assert_eq!(dry.crop, Crop::Maize);
    }

    #[test]
    fn tomato_requires_heat() {
        let resolver = Resolver::new();
        let hot = resolver.resolve(&extended(Soil::Loamy, Season::Summer, 30.0, 0.0));
        assert_eq!(hot.crop, Crop::Tomato);

        let mild = resolver.resolve(&extended(Soil::Loamy, Season::Summer, 20.0, 0.0));
        assert_eq!(mild.crop, Crop::Maize);
    }

    #[test]
    fn carrot_requires_cool() {
        let resolver = Resolver::new();
        let cool = resolver.resolve(&extended(Soil::Sandy, Season::Winter, 12.0, 10.0));
        assert_eq!(cool.crop, Crop::Carrot);

        let warm = resolver.resolve(&extended(Soil::Sandy, Season::Winter, 22.0, 10.0));
        assert_eq!(warm.crop, Crop::Maize);
    }

    #[test]
    fn cotton_has_no_numeric_guard() {
        let resolver = Resolver::new();
        for (temp, rain) in [(-5.0, 0.0), (30.0, 0.0), (45.0, 900.0)] {
            let rec = resolver.resolve(&extended(Soil::Black, Season::Monsoon, temp, rain));
            assert_eq!(rec.crop, Crop::Cotton);
        }
    }

    #[test]
    fn guard_bounds_are_exclusive() {
        let resolver = Resolver::new();
        assert_eq!(
            resolver
                .resolve(&extended(Soil::Loamy, Season::Summer, 25.0, 0.0))
                .crop,
            Crop::Maize
        );
        assert_eq!(
            resolver
                .resolve(&extended(Soil::Clay, Season::Monsoon, 30.0, 150.0))
                .crop,
            Crop::Maize
        );
        assert_eq!(
            resolver
                .resolve(&extended(Soil::Sandy, Season::Winter, 20.0, 0.0))
                .crop,
            Crop::Maize
        );
    }

    #[test]
    fn extended_recommendations_carry_no_reason() {
        let resolver = Resolver::new();
        let rec = resolver.resolve(&extended(Soil::Clay, Season::Monsoon, 30.0, 200.0));
        assert!(rec.reason.is_none());

        let fallback = resolver.resolve(&extended(Soil::Red, Season::Winter, 30.0, 200.0));
        assert_eq!(fallback.crop, Crop::Maize);
        assert!(fallback.reason.is_none());
    }

    #[test]
    fn failed_guard_falls_through_to_later_rules() {
        // Two rows share soil and season; the first is guarded out.
        let rules = vec![
            CropRule {
                id: "guarded",
                soil: Soil::Clay,
                season: Season::Monsoon,
                guard: Guard::RainfallAbove(150.0),
                crop: Crop::Rice,
                reason: "wet",
            },
            CropRule {
                id: "unguarded",
                soil: Soil::Clay,
                season: Season::Monsoon,
                guard: Guard::None,
                crop: Crop::Cotton,
                reason: "any",
            },
        ];
        let resolver = Resolver::with_rules(rules);
        let rec = resolver.resolve(&extended(Soil::Clay, Season::Monsoon, 30.0, 100.0));
        assert_eq!(rec.crop, Crop::Cotton);
    }

    #[test]
    fn list_rules_preserves_order() {
        let resolver = Resolver::new();
        let ids: Vec<_> = resolver.list_rules().iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                "loamy_summer_tomato",
                "clay_monsoon_rice",
                "sandy_winter_carrot",
                "black_monsoon_cotton"
            ]
        );
    }
}
