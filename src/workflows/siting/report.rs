use serde::Serialize;

use super::candidates::{Candidate, ParcelRejection};
use super::ranking::RankedResult;
use super::scoring::ScoreBreakdown;

/// Flattened ranked result handed to report templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResultView {
    pub rank: usize,
    pub candidate_id: String,
    pub kind: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_capacity: Option<u32>,
    pub scores: ScoreBreakdown,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub provenance: &'static str,
    pub nearest_transit: String,
    pub nearest_school: String,
    pub nearest_hospital: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl RankedResult {
    pub fn to_view(&self) -> RankedResultView {
        let coordinates = self.candidate.coordinates();
        let (area_m2, members, estimated_capacity) = match &self.candidate {
            Candidate::Cluster(cluster) => (
                Some(cluster.total_area_m2),
                cluster.members.iter().map(|member| member.0.clone()).collect(),
                cluster.estimated_capacity,
            ),
            Candidate::AlternativeSite(_) | Candidate::Origin(_) => (None, Vec::new(), None),
        };

        RankedResultView {
            rank: self.rank,
            candidate_id: self.candidate.id(),
            kind: self.candidate.kind_label(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            area_m2,
            members,
            estimated_capacity,
            scores: self.breakdown,
            eligible: self.eligible,
            reason: self.veto_reason.map(|reason| reason.summary()),
            provenance: self.features.provenance.label(),
            nearest_transit: self.features.nearest_transit.to_string(),
            nearest_school: self.features.nearest_school.to_string(),
            nearest_hospital: self.features.nearest_hospital.to_string(),
            strengths: self.strengths.clone(),
            weaknesses: self.weaknesses.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionView {
    pub parcel_id: String,
    pub reason: String,
}

impl ParcelRejection {
    pub fn to_view(&self) -> RejectionView {
        RejectionView {
            parcel_id: self.parcel_id.0.clone(),
            reason: self.error.to_string(),
        }
    }
}

/// Serializable bundle for the report layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub results: Vec<RankedResultView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectionView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
    pub simulated: bool,
}

impl SiteReport {
    pub fn from_results(results: &[RankedResult]) -> Self {
        let simulated = results
            .iter()
            .any(|result| matches!(result.candidate, Candidate::AlternativeSite(_)));
        Self {
            results: results.iter().map(RankedResult::to_view).collect(),
            rejected: Vec::new(),
            unresolved: Vec::new(),
            simulated,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
