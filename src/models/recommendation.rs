use super::crop::Crop;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationSource {
    Remote,
    RuleTable,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Remote => "Prediction service",
            RecommendationSource::RuleTable => "Rule table",
        }
    }
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub crop: Crop,
    pub reason: Option<String>,
    pub source: RecommendationSource,
}

impl Recommendation {
    pub fn new(crop: Crop, source: RecommendationSource) -> Self {
        Self {
            crop,
            reason: None,
            source,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// What the output region should show after one recommendation cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// Input was rejected before any resolution happened.
    Invalid { message: String },
    Result {
        recommendation: Recommendation,
        image_ref: String,
    },
}

impl RenderInstruction {
    pub fn invalid(message: impl Into<String>) -> Self {
        RenderInstruction::Invalid {
            message: message.into(),
        }
    }

    pub fn result(recommendation: Recommendation) -> Self {
        let image_ref = recommendation.crop.image_ref().to_string();
        RenderInstruction::Result {
            recommendation,
            image_ref,
        }
    }

    pub fn crop(&self) -> Option<&Crop> {
        match self {
            RenderInstruction::Result { recommendation, .. } => Some(&recommendation.crop),
            RenderInstruction::Invalid { .. } => None,
        }
    }

    /// The text block, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            RenderInstruction::Invalid { message } => vec![format!("⚠ {}", message)],
            RenderInstruction::Result {
                recommendation,
                image_ref,
            } => {
                let mut lines = vec![format!("Suggested Crop: {}", recommendation.crop)];
                if let Some(ref reason) = recommendation.reason {
                    lines.push(String::new());
                    lines.push(format!("Reason: {}", reason));
                }
                if !image_ref.is_empty() {
                    lines.push(format!("Image: {}", image_ref));
                }
                lines
            }
        }
    }
}
