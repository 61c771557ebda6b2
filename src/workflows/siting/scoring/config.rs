use serde::{Deserialize, Serialize};

use crate::error::SitingError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Factor weights for the overall score. Checked once by `ScoringEngine::new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub accessibility: f64,
    pub demand: f64,
    pub infrastructure: f64,
    pub environment: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            accessibility: 0.35,
            demand: 0.30,
            infrastructure: 0.20,
            environment: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.accessibility + self.demand + self.infrastructure + self.environment
    }

    pub(crate) fn validate(&self) -> Result<(), SitingError> {
        let named = [
            ("accessibility", self.accessibility),
            ("demand", self.demand),
            ("infrastructure", self.infrastructure),
            ("environment", self.environment),
        ];
        for (name, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SitingError::Configuration(format!(
                    "{name} weight must be a non-negative finite number, got {weight}"
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SitingError::Configuration(format!(
                "scoring weights must sum to 1.0, got {sum:.6}"
            )));
        }
        Ok(())
    }
}

/// Distance tier: bonus granted when a measured distance is strictly below `below_m`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    pub below_m: f64,
    pub bonus: f64,
}

impl DistanceTier {
    pub const fn new(below_m: f64, bonus: f64) -> Self {
        Self { below_m, bonus }
    }
}

/// Baselines, caps, and distance tiers behind each sub-score.
///
/// Tiers are evaluated in order and the first match wins, so list them from the
/// tightest radius outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub accessibility_transit_tiers: Vec<DistanceTier>,
    pub demand_baseline: f64,
    pub demand_youth_multiplier: f64,
    pub demand_youth_cap: f64,
    pub demand_transit_tiers: Vec<DistanceTier>,
    pub infrastructure_baseline: f64,
    pub school_tiers: Vec<DistanceTier>,
    pub hospital_tiers: Vec<DistanceTier>,
    pub environment_baseline: f64,
    pub residential_zoning_bonus: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            accessibility_transit_tiers: vec![
                DistanceTier::new(500.0, 30.0),
                DistanceTier::new(1000.0, 20.0),
                DistanceTier::new(1500.0, 10.0),
            ],
            demand_baseline: 40.0,
            demand_youth_multiplier: 1.5,
            demand_youth_cap: 40.0,
            demand_transit_tiers: vec![
                DistanceTier::new(500.0, 20.0),
                DistanceTier::new(1000.0, 10.0),
            ],
            infrastructure_baseline: 20.0,
            school_tiers: vec![
                DistanceTier::new(500.0, 40.0),
                DistanceTier::new(1000.0, 25.0),
                DistanceTier::new(2000.0, 10.0),
            ],
            hospital_tiers: vec![
                DistanceTier::new(1000.0, 40.0),
                DistanceTier::new(2000.0, 25.0),
                DistanceTier::new(3000.0, 10.0),
            ],
            environment_baseline: 60.0,
            residential_zoning_bonus: 30.0,
        }
    }
}
