use super::super::candidates::Candidate;
use super::super::domain::{FeatureBundle, FeatureProvenance, RiskSeverity};
use super::super::exclusion::{GateVerdict, VetoReason};
use super::super::scoring::ScoreBreakdown;

const TRANSIT_STRENGTH_M: f64 = 500.0;
const TRANSIT_WEAKNESS_M: f64 = 1500.0;
const SCHOOL_STRENGTH_M: f64 = 1000.0;
const HOSPITAL_STRENGTH_M: f64 = 2000.0;
const HOSPITAL_WEAKNESS_M: f64 = 3000.0;
const YOUTH_RATIO_STRENGTH_PCT: f64 = 20.0;
const ACCESSIBILITY_STRENGTH: f64 = 80.0;
const ACCESSIBILITY_WEAKNESS: f64 = 50.0;
const OVERALL_STRENGTH: f64 = 80.0;

/// Strengths and weaknesses in a fixed order. Pure function of its inputs.
pub(crate) fn explain(
    candidate: &Candidate,
    features: &FeatureBundle,
    breakdown: &ScoreBreakdown,
    verdict: &GateVerdict,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    match features.nearest_transit.meters() {
        Some(meters) if meters < TRANSIT_STRENGTH_M => {
            strengths.push(format!("Transit stop within walking distance ({meters:.0} m)"))
        }
        Some(meters) if meters >= TRANSIT_WEAKNESS_M => {
            weaknesses.push(format!("Nearest transit stop is {meters:.0} m away"))
        }
        Some(_) => {}
        None => weaknesses.push("No transit distance data".to_string()),
    }

    match features.nearest_school.meters() {
        Some(meters) if meters < SCHOOL_STRENGTH_M => {
            strengths.push(format!("School nearby ({meters:.0} m)"))
        }
        Some(_) => {}
        None => weaknesses.push("No school distance data".to_string()),
    }

    match features.nearest_hospital.meters() {
        Some(meters) if meters < HOSPITAL_STRENGTH_M => {
            strengths.push(format!("Hospital access ({meters:.0} m)"))
        }
        Some(meters) if meters >= HOSPITAL_WEAKNESS_M => {
            weaknesses.push(format!("Nearest hospital is {meters:.0} m away"))
        }
        Some(_) => {}
        None => weaknesses.push("No hospital distance data".to_string()),
    }

    if features.youth_ratio_pct >= YOUTH_RATIO_STRENGTH_PCT {
        strengths.push(format!(
            "Young household demand ({:.1}% youth population)",
            features.youth_ratio_pct
        ));
    }

    if features.zoning_is_residential {
        strengths.push("Zoned for residential use".to_string());
    } else {
        weaknesses.push("Not zoned for residential use".to_string());
    }

    if breakdown.accessibility >= ACCESSIBILITY_STRENGTH {
        strengths.push(format!(
            "High accessibility score ({:.1})",
            breakdown.accessibility
        ));
    } else if breakdown.accessibility < ACCESSIBILITY_WEAKNESS {
        weaknesses.push(format!(
            "Low accessibility score ({:.1})",
            breakdown.accessibility
        ));
    }

    if breakdown.overall >= OVERALL_STRENGTH {
        strengths.push(format!("Strong overall suitability ({:.1})", breakdown.overall));
    }

    if let Some(reason) = &verdict.reason {
        weaknesses.push(reason.summary());
    }

    let member_vetoed = matches!(verdict.reason, Some(VetoReason::MemberParcelRisk { .. }));
    if let Candidate::Cluster(cluster) = candidate {
        if let Some(level) = cluster
            .risk_level
            .filter(|level| *level >= RiskSeverity::High && !member_vetoed)
        {
            weaknesses.push(format!("Member parcel carries {} risk", level.label()));
        }
    }

    if features.provenance == FeatureProvenance::Simulated {
        weaknesses.push("Distances are simulated estimates, not surveyed values".to_string());
    }

    (strengths, weaknesses)
}
