mod rationale;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::candidates::{AlternativeSiteCandidate, Candidate, ClusterCandidate};
use super::domain::FeatureBundle;
use super::exclusion::{ExclusionGate, GateVerdict, VetoReason};
use super::scoring::{ScoreBreakdown, ScoringEngine};

pub const DEFAULT_TOP_N: usize = 3;

/// Candidate paired with the features it should be scored on.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateInput {
    pub candidate: Candidate,
    pub features: FeatureBundle,
}

impl CandidateInput {
    pub fn cluster(cluster: ClusterCandidate, features: FeatureBundle) -> Self {
        Self {
            candidate: Candidate::Cluster(cluster),
            features,
        }
    }

    /// Alternative sites carry their own simulated features.
    pub fn from_alternative(site: AlternativeSiteCandidate) -> Self {
        let features = site.features.clone();
        Self {
            candidate: Candidate::AlternativeSite(site),
            features,
        }
    }
}

/// Scored, gated, and explained candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-based position after sorting.
    pub rank: usize,
    pub candidate: Candidate,
    pub features: FeatureBundle,
    pub breakdown: ScoreBreakdown,
    pub eligible: bool,
    pub veto_reason: Option<VetoReason>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Scores, gates, sorts, and truncates candidates from either generator.
pub struct CandidateRanker<'a> {
    engine: &'a ScoringEngine,
    gate: &'a ExclusionGate,
}

struct Scored {
    order: usize,
    input: CandidateInput,
    breakdown: ScoreBreakdown,
    verdict: GateVerdict,
}

impl<'a> CandidateRanker<'a> {
    pub fn new(engine: &'a ScoringEngine, gate: &'a ExclusionGate) -> Self {
        Self { engine, gate }
    }

    /// Eligible first, then overall score descending, then larger area, then input order.
    pub fn rank(&self, candidates: Vec<CandidateInput>, top_n: usize) -> Vec<RankedResult> {
        let total = candidates.len();

        let mut scored: Vec<Scored> = candidates
            .into_iter()
            .enumerate()
            .map(|(order, input)| {
                let breakdown = self
                    .engine
                    .score_with_demand_hint(&input.features, input.candidate.demand_hint());
                let verdict = self.gate.evaluate_with_member_risk(
                    &input.features.risk_factors,
                    input.candidate.member_risk(),
                );
                Scored {
                    order,
                    input,
                    breakdown,
                    verdict,
                }
            })
            .collect();

        scored.sort_by(compare);
        scored.truncate(top_n);

        let eligible = scored.iter().filter(|entry| entry.verdict.passed).count();
        info!(
            candidates = total,
            returned = scored.len(),
            eligible,
            "ranked siting candidates"
        );

        scored
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let (strengths, weaknesses) = rationale::explain(
                    &entry.input.candidate,
                    &entry.input.features,
                    &entry.breakdown,
                    &entry.verdict,
                );
                RankedResult {
                    rank: index + 1,
                    candidate: entry.input.candidate,
                    features: entry.input.features,
                    breakdown: entry.breakdown,
                    eligible: entry.verdict.passed,
                    veto_reason: entry.verdict.reason,
                    strengths,
                    weaknesses,
                }
            })
            .collect()
    }
}

fn compare(a: &Scored, b: &Scored) -> Ordering {
    b.verdict
        .passed
        .cmp(&a.verdict.passed)
        .then_with(|| b.breakdown.overall.total_cmp(&a.breakdown.overall))
        .then_with(|| {
            b.input
                .candidate
                .area_m2()
                .total_cmp(&a.input.candidate.area_m2())
        })
        .then_with(|| a.order.cmp(&b.order))
}
