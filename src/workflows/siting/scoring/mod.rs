mod config;
mod rules;

pub use config::{DistanceTier, ScoringRules, ScoringWeights};

use serde::{Deserialize, Serialize};

use super::domain::FeatureBundle;
use crate::error::SitingError;
use rules::{clamp_score, score_features};

/// Stateless scorer applying validated weights and rules to a feature bundle.
///
/// Weights are checked once here; `score` never re-validates and never fails.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights, rules: ScoringRules) -> Result<Self, SitingError> {
        weights.validate()?;
        Ok(Self { weights, rules })
    }

    pub fn with_weights(weights: ScoringWeights) -> Result<Self, SitingError> {
        Self::new(weights, ScoringRules::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn score(&self, features: &FeatureBundle) -> ScoreBreakdown {
        self.score_with_demand_hint(features, None)
    }

    /// Score with a precomputed demand value standing in for the rule-derived demand
    /// sub-score. The hint is clamped like any other sub-score.
    pub fn score_with_demand_hint(
        &self,
        features: &FeatureBundle,
        demand_hint: Option<f64>,
    ) -> ScoreBreakdown {
        let mut sub = score_features(features, &self.rules);
        if let Some(hint) = demand_hint {
            sub.demand = clamp_score(hint);
        }
        let weights = &self.weights;

        let overall = clamp_score(
            weights.accessibility * sub.accessibility
                + weights.demand * sub.demand
                + weights.infrastructure * sub.infrastructure
                + weights.environment * sub.environment,
        );

        ScoreBreakdown {
            accessibility: sub.accessibility,
            demand: sub.demand,
            infrastructure: sub.infrastructure,
            environment: sub.environment,
            overall,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            rules: ScoringRules::default(),
        }
    }
}

/// Four sub-scores plus the weighted overall, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub accessibility: f64,
    pub demand: f64,
    pub infrastructure: f64,
    pub environment: f64,
    pub overall: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::siting::domain::{Distance, FeatureProvenance};
    use approx::assert_relative_eq;

    fn features(transit: Distance) -> FeatureBundle {
        FeatureBundle {
            accessibility_base: 50.0,
            nearest_transit: transit,
            nearest_school: Distance::Measured(800.0),
            nearest_hospital: Distance::Measured(2500.0),
            youth_ratio_pct: 18.0,
            zoning_is_residential: true,
            risk_factors: Vec::new(),
            provenance: FeatureProvenance::Measured,
        }
    }

    #[test]
    fn rejects_weights_that_do_not_sum_to_one() {
        let weights = ScoringWeights {
            accessibility: 0.5,
            demand: 0.3,
            infrastructure: 0.2,
            environment: 0.15,
        };
        match ScoringEngine::with_weights(weights) {
            Err(SitingError::Configuration(message)) => assert!(message.contains("sum to 1.0")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_weights_even_when_sum_is_one() {
        let weights = ScoringWeights {
            accessibility: 1.2,
            demand: -0.2,
            infrastructure: 0.0,
            environment: 0.0,
        };
        assert!(matches!(
            ScoringEngine::with_weights(weights),
            Err(SitingError::Configuration(_))
        ));
    }

    #[test]
    fn computes_each_factor_from_tiers() {
        let engine = ScoringEngine::default();
        let breakdown = engine.score(&features(Distance::Measured(450.0)));

        assert_eq!(breakdown.accessibility, 80.0);
        assert_relative_eq!(breakdown.demand, 40.0 + 27.0 + 20.0);
        assert_eq!(breakdown.infrastructure, 20.0 + 25.0 + 10.0);
        assert_eq!(breakdown.environment, 90.0);
        assert_relative_eq!(
            breakdown.overall,
            0.35 * 80.0 + 0.30 * 87.0 + 0.20 * 55.0 + 0.15 * 90.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn unknown_distances_earn_no_bonus() {
        let engine = ScoringEngine::default();
        let mut bundle = FeatureBundle::unknown();
        bundle.accessibility_base = 50.0;

        let breakdown = engine.score(&bundle);

        assert_eq!(breakdown.accessibility, 50.0);
        assert_eq!(breakdown.demand, 40.0);
        assert_eq!(breakdown.infrastructure, 20.0);
        assert_eq!(breakdown.environment, 60.0);
    }

    #[test]
    fn sub_scores_are_clamped() {
        let engine = ScoringEngine::default();
        let mut bundle = features(Distance::Measured(10.0));
        bundle.accessibility_base = 95.0;
        bundle.youth_ratio_pct = 100.0;
        assert_eq!(engine.score(&bundle).accessibility, 100.0);
        assert_eq!(engine.score(&bundle).demand, 100.0);

        bundle.accessibility_base = -40.0;
        bundle.nearest_transit = Distance::Unknown;
        assert_eq!(engine.score(&bundle).accessibility, 0.0);
    }

    #[test]
    fn scoring_is_bit_identical_across_calls() {
        let engine = ScoringEngine::default();
        let bundle = features(Distance::Measured(720.0));
        let first = engine.score(&bundle);
        let second = engine.score(&bundle);
        assert_eq!(first.overall.to_bits(), second.overall.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn demand_hint_replaces_rule_derived_demand() {
        let engine = ScoringEngine::default();
        let bundle = features(Distance::Measured(450.0));
        let derived = engine.score(&bundle);

        let hinted = engine.score_with_demand_hint(&bundle, Some(30.0));
        assert_eq!(hinted.demand, 30.0);
        assert_eq!(hinted.accessibility, derived.accessibility);
        assert_relative_eq!(
            derived.overall - hinted.overall,
            0.30 * (87.0 - 30.0),
            epsilon = 1e-9
        );

        assert_eq!(engine.score_with_demand_hint(&bundle, Some(180.0)).demand, 100.0);
        assert_eq!(engine.score_with_demand_hint(&bundle, None), derived);
    }
}
