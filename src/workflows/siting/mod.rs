//! Candidate-site generation, scoring, exclusion, and ranking.
//!
//! Parcels are merged into clusters by a [`ClusterStrategy`], or a reference site is
//! perturbed by the [`AlternativeSiteGenerator`]. Either way the candidates go through
//! the [`ScoringEngine`] and [`ExclusionGate`] and are ordered by the
//! [`CandidateRanker`]. [`SitingService`] wires those together for hosts.

pub mod candidates;
pub mod domain;
pub mod exclusion;
pub mod geo;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use candidates::{
    AlternativeSiteCandidate, AlternativeSiteConfig, AlternativeSiteGenerator, Candidate,
    ClusterCandidate, ClusterConstraints, ClusterRun, ClusterStrategy, OriginSite,
    PairwiseClusterGenerator, ParcelRejection,
};
pub use domain::{
    Direction, Distance, FeatureBundle, FeatureProvenance, Parcel, ParcelId, RiskCategory,
    RiskFactor, RiskSeverity,
};
pub use exclusion::{ExclusionGate, GateVerdict, VetoReason};
pub use geo::{distance_km, distance_meters, Coordinates};
pub use ranking::{CandidateInput, CandidateRanker, RankedResult, DEFAULT_TOP_N};
pub use report::{RankedResultView, RejectionView, SiteReport};
pub use scoring::{DistanceTier, ScoreBreakdown, ScoringEngine, ScoringRules, ScoringWeights};
pub use service::{
    ClusterAnalysis, FeatureLookup, SiteReview, SitingService, StaticFeatureLookup,
};
