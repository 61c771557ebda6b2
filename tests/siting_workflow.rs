//! End-to-end siting scenarios driven through the public API: parcel clustering,
//! alternative proposals, the exclusion veto, and deterministic ranking.

mod common {
    use housing_siting::workflows::siting::{
        ClusterConstraints, Coordinates, Distance, FeatureBundle, FeatureProvenance, Parcel,
        ParcelId,
    };

    pub(super) fn parcel(id: &str, latitude: f64, longitude: f64, area_m2: f64) -> Parcel {
        Parcel {
            id: ParcelId::from(id),
            address: format!("{id} Mapo-daero, Mapo-gu"),
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            area_m2,
            demand_hint: None,
            capacity_hint: None,
            risk_level: None,
        }
    }

    pub(super) fn constraints() -> ClusterConstraints {
        ClusterConstraints::new(500.0, 2000.0, 0.5).expect("valid constraints")
    }

    pub(super) fn features(base: f64, transit_m: f64) -> FeatureBundle {
        FeatureBundle {
            accessibility_base: base,
            nearest_transit: Distance::Measured(transit_m),
            nearest_school: Distance::Measured(1200.0),
            nearest_hospital: Distance::Measured(2200.0),
            youth_ratio_pct: 16.0,
            zoning_is_residential: true,
            risk_factors: Vec::new(),
            provenance: FeatureProvenance::Measured,
        }
    }
}

use common::*;
use housing_siting::workflows::siting::{
    distance_km, AlternativeSiteGenerator, CandidateInput, CandidateRanker, ClusterStrategy,
    Coordinates, Direction, Distance, ExclusionGate, FeatureBundle, FeatureProvenance,
    PairwiseClusterGenerator, RiskCategory, RiskFactor, RiskSeverity, ScoringEngine,
    DEFAULT_TOP_N,
};

#[test]
fn two_parcels_yield_one_singleton_and_one_pair() {
    let a = parcel("lot-500", 37.5563, 126.9236, 500.0);
    let b = parcel("lot-450", 37.5590, 126.9236, 450.0);
    let km = distance_km(a.coordinates, b.coordinates).expect("distance");
    assert!((km - 0.3).abs() < 0.01, "parcels were {km} km apart");

    let run = PairwiseClusterGenerator::new().generate(&[a, b], &constraints());

    let singletons: Vec<_> = run
        .candidates
        .iter()
        .filter(|candidate| candidate.is_singleton())
        .collect();
    let pairs: Vec<_> = run
        .candidates
        .iter()
        .filter(|candidate| candidate.members.len() == 2)
        .collect();
    assert_eq!(singletons.len(), 1);
    assert_eq!(singletons[0].id(), "lot-500");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].total_area_m2, 950.0);
}

#[test]
fn alternatives_improve_accessibility_and_truncate_to_three() {
    let engine = ScoringEngine::default();
    let gate = ExclusionGate::new();
    let origin = Coordinates::new(37.4979, 127.0276).expect("valid origin");
    let origin_features = features(50.0, 1800.0);
    let origin_score = engine.score(&origin_features);

    let sites = AlternativeSiteGenerator::default()
        .generate("gangnam-7", origin, &origin_features, &Direction::ordered())
        .expect("alternatives generate");
    assert_eq!(sites.len(), 4);

    let inputs = sites
        .into_iter()
        .map(CandidateInput::from_alternative)
        .collect();
    let results = CandidateRanker::new(&engine, &gate).rank(inputs, DEFAULT_TOP_N);

    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(result.breakdown.accessibility >= origin_score.accessibility);
        assert_eq!(result.features.provenance, FeatureProvenance::Simulated);
    }
}

#[test]
fn critical_risk_vetoes_a_near_perfect_site() {
    let engine = ScoringEngine::default();
    let gate = ExclusionGate::new();
    let site = FeatureBundle {
        accessibility_base: 100.0,
        nearest_transit: Distance::Measured(120.0),
        nearest_school: Distance::Measured(150.0),
        nearest_hospital: Distance::Measured(400.0),
        youth_ratio_pct: 60.0,
        zoning_is_residential: true,
        risk_factors: vec![RiskFactor::new(
            RiskCategory::FuelStation,
            RiskSeverity::Critical,
        )],
        provenance: FeatureProvenance::Measured,
    };
    let run = PairwiseClusterGenerator::new().generate(
        &[parcel("corner-lot", 37.5665, 126.978, 1200.0)],
        &constraints(),
    );
    let cluster = run.candidates.into_iter().next().expect("singleton");

    let results = CandidateRanker::new(&engine, &gate)
        .rank(vec![CandidateInput::cluster(cluster, site)], DEFAULT_TOP_N);

    assert!(results[0].breakdown.overall >= 95.0);
    assert!(!results[0].eligible);
    assert!(results[0].veto_reason.is_some());
    assert!(results[0]
        .weaknesses
        .iter()
        .any(|weakness| weakness.contains("fuel station")));
}

#[test]
fn empty_parcel_list_produces_no_candidates() {
    let run = PairwiseClusterGenerator::new().generate(&[], &constraints());
    assert!(run.candidates.is_empty());
    assert!(run.rejected.is_empty());
}

#[test]
fn ranking_is_deterministic() {
    let engine = ScoringEngine::default();
    let gate = ExclusionGate::new();
    let parcels = vec![
        parcel("a", 37.5, 127.0, 450.0),
        parcel("b", 37.5015, 127.0, 520.0),
        parcel("c", 37.4985, 127.0, 610.0),
        parcel("d", 37.5, 127.0012, 380.0),
    ];
    let run = PairwiseClusterGenerator::new().generate(&parcels, &constraints());
    let inputs: Vec<CandidateInput> = run
        .candidates
        .into_iter()
        .enumerate()
        .map(|(index, cluster)| {
            let transit = if index % 2 == 0 { 600.0 } else { 1200.0 };
            CandidateInput::cluster(cluster, features(55.0, transit))
        })
        .collect();

    let ranker = CandidateRanker::new(&engine, &gate);
    let first = ranker.rank(inputs.clone(), 5);
    let second = ranker.rank(inputs, 5);

    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}
