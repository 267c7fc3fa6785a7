//! Plain-language conclusions from the target correlation ranking

use std::fmt;

use crate::pipeline::FeatureCorrelation;

/// Lower bound of a high correlation magnitude
pub const HIGH_THRESHOLD: f64 = 0.5;

/// Lower bound of a moderate correlation magnitude
pub const MODERATE_THRESHOLD: f64 = 0.3;

/// Strength bucket of a correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    High,
    Moderate,
    Weak,
}

impl Strength {
    pub fn classify(value: f64) -> Self {
        let magnitude = value.abs();
        if magnitude >= HIGH_THRESHOLD {
            Strength::High
        } else if magnitude >= MODERATE_THRESHOLD {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strength::High => "high",
            Strength::Moderate => "moderate",
            Strength::Weak => "weak",
        };
        write!(f, "{}", label)
    }
}

/// How the target moves as the feature grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    /// Only a strictly positive value counts as increasing
    pub fn classify(value: f64) -> Self {
        if value > 0.0 {
            Direction::Increasing
        } else {
            Direction::Decreasing
        }
    }

    fn comparative(self) -> &'static str {
        match self {
            Direction::Increasing => "higher",
            Direction::Decreasing => "lower",
        }
    }
}

/// One sentence per correlation, in input order
pub fn make_conclusions(correlations: &[FeatureCorrelation], target: &str) -> Vec<String> {
    correlations
        .iter()
        .map(|item| describe(&item.feature, item.correlation, target))
        .collect()
}

/// Sentence for a single feature/correlation pair
pub fn describe(feature: &str, value: f64, target: &str) -> String {
    format!(
        "Feature '{feature}' has a {strength} correlation with {target} ({value:.2}): \
         the larger {feature}, the {direction} the {target} (on average).",
        strength = Strength::classify(value),
        direction = Direction::classify(value).comparative(),
    )
}
