mod alternatives;
mod clusters;

pub use alternatives::{AlternativeSiteConfig, AlternativeSiteGenerator};
pub use clusters::{
    ClusterConstraints, ClusterRun, ClusterStrategy, PairwiseClusterGenerator, ParcelRejection,
};

use serde::{Deserialize, Serialize};

use super::domain::{Direction, FeatureBundle, ParcelId, RiskSeverity};
use super::geo::Coordinates;

/// One or more parcels treated as a single buildable site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterCandidate {
    pub members: Vec<ParcelId>,
    pub centroid: Coordinates,
    pub total_area_m2: f64,
    /// Sum of member capacity hints, present only when every member carries one.
    pub estimated_capacity: Option<u32>,
    /// Area-weighted mean of member demand hints, present only when every member carries one.
    pub demand_hint: Option<f64>,
    /// Highest risk level recorded on any member.
    pub risk_level: Option<RiskSeverity>,
}

impl ClusterCandidate {
    pub fn id(&self) -> String {
        self.members
            .iter()
            .map(|member| member.0.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// Simulated nearby location proposed in place of an under-performing site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSiteCandidate {
    pub origin_id: String,
    pub direction: Direction,
    pub coordinates: Coordinates,
    /// What-if features derived from the origin; provenance is always `Simulated`.
    pub features: FeatureBundle,
}

impl AlternativeSiteCandidate {
    pub fn id(&self) -> String {
        format!("{}-{}", self.origin_id, self.direction.label())
    }
}

/// Reference site under review, scored as given before any alternatives are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginSite {
    pub id: String,
    pub coordinates: Coordinates,
}

/// Scoreable unit: a generated cluster or alternative, or the origin site under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Candidate {
    Cluster(ClusterCandidate),
    AlternativeSite(AlternativeSiteCandidate),
    Origin(OriginSite),
}

impl Candidate {
    pub fn id(&self) -> String {
        match self {
            Candidate::Cluster(cluster) => cluster.id(),
            Candidate::AlternativeSite(site) => site.id(),
            Candidate::Origin(origin) => origin.id.clone(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        match self {
            Candidate::Cluster(cluster) => cluster.centroid,
            Candidate::AlternativeSite(site) => site.coordinates,
            Candidate::Origin(origin) => origin.coordinates,
        }
    }

    /// Area used for tie-breaking; only clusters have a parcel area.
    pub fn area_m2(&self) -> f64 {
        match self {
            Candidate::Cluster(cluster) => cluster.total_area_m2,
            Candidate::AlternativeSite(_) | Candidate::Origin(_) => 0.0,
        }
    }

    /// Highest risk level recorded on member parcels, fed to the exclusion gate.
    pub fn member_risk(&self) -> Option<RiskSeverity> {
        match self {
            Candidate::Cluster(cluster) => cluster.risk_level,
            Candidate::AlternativeSite(_) | Candidate::Origin(_) => None,
        }
    }

    pub fn demand_hint(&self) -> Option<f64> {
        match self {
            Candidate::Cluster(cluster) => cluster.demand_hint,
            Candidate::AlternativeSite(_) | Candidate::Origin(_) => None,
        }
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            Candidate::Cluster(_) => "cluster",
            Candidate::AlternativeSite(_) => "alternative_site",
            Candidate::Origin(_) => "origin",
        }
    }
}
