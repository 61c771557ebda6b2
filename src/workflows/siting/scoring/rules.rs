use super::super::domain::{Distance, FeatureBundle};
use super::config::{DistanceTier, ScoringRules};

pub(crate) struct SubScores {
    pub accessibility: f64,
    pub demand: f64,
    pub infrastructure: f64,
    pub environment: f64,
}

pub(crate) fn score_features(features: &FeatureBundle, rules: &ScoringRules) -> SubScores {
    let transit = features.nearest_transit;

    let accessibility = clamp_score(
        finite_or_zero(features.accessibility_base)
            + tier_bonus(transit, &rules.accessibility_transit_tiers),
    );

    let youth_bonus = (finite_or_zero(features.youth_ratio_pct).max(0.0)
        * rules.demand_youth_multiplier)
        .min(rules.demand_youth_cap);
    let demand = clamp_score(
        rules.demand_baseline + youth_bonus + tier_bonus(transit, &rules.demand_transit_tiers),
    );

    let infrastructure = clamp_score(
        rules.infrastructure_baseline
            + tier_bonus(features.nearest_school, &rules.school_tiers)
            + tier_bonus(features.nearest_hospital, &rules.hospital_tiers),
    );

    let zoning_bonus = if features.zoning_is_residential {
        rules.residential_zoning_bonus
    } else {
        0.0
    };
    let environment = clamp_score(rules.environment_baseline + zoning_bonus);

    SubScores {
        accessibility,
        demand,
        infrastructure,
        environment,
    }
}

/// First matching tier wins; `Unknown` earns nothing.
pub(crate) fn tier_bonus(distance: Distance, tiers: &[DistanceTier]) -> f64 {
    let Some(meters) = distance.meters() else {
        return 0.0;
    };
    tiers
        .iter()
        .find(|tier| meters < tier.below_m)
        .map(|tier| tier.bonus)
        .unwrap_or(0.0)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
