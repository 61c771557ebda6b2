use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::candidates::{
    AlternativeSiteGenerator, Candidate, ClusterCandidate, ClusterConstraints, ClusterStrategy,
    OriginSite, PairwiseClusterGenerator, ParcelRejection,
};
use super::domain::{Direction, FeatureBundle, Parcel};
use super::exclusion::ExclusionGate;
use super::geo::Coordinates;
use super::ranking::{CandidateInput, CandidateRanker, RankedResult};
use super::report::SiteReport;
use super::scoring::{ScoringEngine, ScoringRules};
use crate::config::SitingConfig;
use crate::error::SitingError;

/// Host-side source of per-cluster features (distances, zoning, risk flags).
pub trait FeatureLookup {
    fn features_for(&self, candidate: &ClusterCandidate) -> Option<FeatureBundle>;
}

/// Map-backed lookup keyed by candidate id (`"p1"` or `"p1+p2"`).
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureLookup {
    features: HashMap<String, FeatureBundle>,
}

impl StaticFeatureLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, candidate_id: impl Into<String>, features: FeatureBundle) {
        self.features.insert(candidate_id.into(), features);
    }

    pub fn with(mut self, candidate_id: impl Into<String>, features: FeatureBundle) -> Self {
        self.insert(candidate_id, features);
        self
    }
}

impl FeatureLookup for StaticFeatureLookup {
    fn features_for(&self, candidate: &ClusterCandidate) -> Option<FeatureBundle> {
        self.features.get(&candidate.id()).cloned()
    }
}

/// Result of clustering and ranking a batch of parcels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAnalysis {
    pub ranked: Vec<RankedResult>,
    pub rejected: Vec<ParcelRejection>,
    /// Candidates the lookup had no features for; they are not scored.
    pub unresolved: Vec<String>,
}

impl ClusterAnalysis {
    pub fn report(&self) -> SiteReport {
        let mut report = SiteReport::from_results(&self.ranked);
        report.rejected = self.rejected.iter().map(ParcelRejection::to_view).collect();
        report.unresolved = self.unresolved.clone();
        report
    }
}

/// Origin assessment plus any simulated alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteReview {
    pub origin: RankedResult,
    pub underperforming: bool,
    pub alternatives: Vec<RankedResult>,
}

impl SiteReview {
    pub fn alternatives_simulated(&self) -> bool {
        !self.alternatives.is_empty()
    }

    pub fn report(&self) -> SiteReport {
        SiteReport::from_results(&self.alternatives)
    }
}

/// Facade composing the generators, scoring engine, exclusion gate, and ranker.
pub struct SitingService {
    engine: Arc<ScoringEngine>,
    gate: Arc<ExclusionGate>,
    clusters: Box<dyn ClusterStrategy>,
    constraints: ClusterConstraints,
    alternatives: AlternativeSiteGenerator,
    top_n: usize,
    underperformance_threshold: f64,
}

impl SitingService {
    pub fn new(config: &SitingConfig) -> Result<Self, SitingError> {
        let engine = ScoringEngine::new(config.weights, ScoringRules::default())?;
        Ok(Self {
            engine: Arc::new(engine),
            gate: Arc::new(ExclusionGate::new()),
            clusters: Box::new(PairwiseClusterGenerator::new()),
            constraints: config.clustering.constraints()?,
            alternatives: AlternativeSiteGenerator::new(config.alternatives),
            top_n: config.ranking.top_n,
            underperformance_threshold: config.ranking.underperformance_threshold,
        })
    }

    /// Replace the clustering strategy, e.g. with a k-way search.
    pub fn with_cluster_strategy(mut self, strategy: Box<dyn ClusterStrategy>) -> Self {
        self.clusters = strategy;
        self
    }

    pub fn engine(&self) -> &Arc<ScoringEngine> {
        &self.engine
    }

    pub fn gate(&self) -> &Arc<ExclusionGate> {
        &self.gate
    }

    pub fn analyze_parcels<L>(&self, parcels: &[Parcel], lookup: &L) -> ClusterAnalysis
    where
        L: FeatureLookup + ?Sized,
    {
        let run = self.clusters.generate(parcels, &self.constraints);

        let mut inputs = Vec::with_capacity(run.candidates.len());
        let mut unresolved = Vec::new();
        for cluster in run.candidates {
            match lookup.features_for(&cluster) {
                Some(features) => inputs.push(CandidateInput::cluster(cluster, features)),
                None => unresolved.push(cluster.id()),
            }
        }

        let ranked = CandidateRanker::new(&self.engine, &self.gate).rank(inputs, self.top_n);
        info!(
            parcels = parcels.len(),
            rejected = run.rejected.len(),
            unresolved = unresolved.len(),
            ranked = ranked.len(),
            "parcel analysis complete"
        );

        ClusterAnalysis {
            ranked,
            rejected: run.rejected,
            unresolved,
        }
    }

    /// Score the origin site and, when it is vetoed or scores below the configured
    /// threshold, rank simulated alternatives around it.
    pub fn review_site(
        &self,
        origin_id: &str,
        coordinates: Coordinates,
        features: FeatureBundle,
    ) -> Result<SiteReview, SitingError> {
        coordinates.validate()?;
        let ranker = CandidateRanker::new(&self.engine, &self.gate);

        let origin_candidate = Candidate::Origin(OriginSite {
            id: origin_id.to_string(),
            coordinates,
        });
        let origin = ranker
            .rank(
                vec![CandidateInput {
                    candidate: origin_candidate,
                    features: features.clone(),
                }],
                1,
            )
            .into_iter()
            .next()
            .ok_or_else(|| SitingError::invalid(origin_id, "origin could not be ranked"))?;

        let underperforming =
            !origin.eligible || origin.breakdown.overall < self.underperformance_threshold;
        if !underperforming {
            info!(origin = origin_id, overall = origin.breakdown.overall, "site meets threshold");
            return Ok(SiteReview {
                origin,
                underperforming,
                alternatives: Vec::new(),
            });
        }

        let inputs = self
            .alternatives
            .generate(origin_id, coordinates, &features, &Direction::ordered())?
            .into_iter()
            .map(CandidateInput::from_alternative)
            .collect();
        let alternatives = ranker.rank(inputs, self.top_n);

        info!(
            origin = origin_id,
            overall = origin.breakdown.overall,
            alternatives = alternatives.len(),
            "site under-performs; simulated alternatives proposed"
        );

        Ok(SiteReview {
            origin,
            underperforming,
            alternatives,
        })
    }
}
