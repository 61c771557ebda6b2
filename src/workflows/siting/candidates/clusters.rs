use tracing::{debug, warn};

use super::super::domain::{Parcel, ParcelId};
use super::super::geo::{distance_km, midpoint};
use super::ClusterCandidate;
use crate::error::SitingError;

/// Area band and pairing radius a cluster must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConstraints {
    area_min_m2: f64,
    area_max_m2: f64,
    max_pair_distance_km: f64,
}

impl ClusterConstraints {
    pub fn new(
        area_min_m2: f64,
        area_max_m2: f64,
        max_pair_distance_km: f64,
    ) -> Result<Self, SitingError> {
        if !area_min_m2.is_finite() || !area_max_m2.is_finite() || area_min_m2 < 0.0 {
            return Err(SitingError::invalid(
                "area band",
                format!("[{area_min_m2}, {area_max_m2}] must be finite and non-negative"),
            ));
        }
        if area_min_m2 > area_max_m2 {
            return Err(SitingError::invalid(
                "area band",
                format!("minimum {area_min_m2} exceeds maximum {area_max_m2}"),
            ));
        }
        if !max_pair_distance_km.is_finite() || max_pair_distance_km < 0.0 {
            return Err(SitingError::invalid(
                "max pair distance",
                format!("{max_pair_distance_km} km must be a non-negative finite number"),
            ));
        }
        Ok(Self {
            area_min_m2,
            area_max_m2,
            max_pair_distance_km,
        })
    }

    pub fn area_min_m2(&self) -> f64 {
        self.area_min_m2
    }

    pub fn area_max_m2(&self) -> f64 {
        self.area_max_m2
    }

    pub fn max_pair_distance_km(&self) -> f64 {
        self.max_pair_distance_km
    }

    pub fn admits_area(&self, area_m2: f64) -> bool {
        area_m2 >= self.area_min_m2 && area_m2 <= self.area_max_m2
    }
}

/// Parcel dropped from a clustering run together with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelRejection {
    pub parcel_id: ParcelId,
    pub error: SitingError,
}

/// Output of a clustering run: admissible candidates in generation order plus rejected parcels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterRun {
    pub candidates: Vec<ClusterCandidate>,
    pub rejected: Vec<ParcelRejection>,
}

/// Strategy for merging parcels into candidate sites.
///
/// The pairwise generator is the only implementation today; a k-way search with
/// area/distance pruning would slot in behind the same trait.
pub trait ClusterStrategy: Send + Sync {
    fn generate(&self, parcels: &[Parcel], constraints: &ClusterConstraints) -> ClusterRun;
}

/// Enumerates singletons and unordered pairs. Membership is non-exclusive: a parcel can
/// appear in several candidates and the ranker decides between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseClusterGenerator;

impl PairwiseClusterGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ClusterStrategy for PairwiseClusterGenerator {
    fn generate(&self, parcels: &[Parcel], constraints: &ClusterConstraints) -> ClusterRun {
        let mut run = ClusterRun::default();

        let mut valid: Vec<&Parcel> = Vec::with_capacity(parcels.len());
        for parcel in parcels {
            match validate_parcel(parcel) {
                Ok(()) => valid.push(parcel),
                Err(error) => {
                    warn!(parcel = %parcel.id, %error, "parcel rejected from clustering");
                    run.rejected.push(ParcelRejection {
                        parcel_id: parcel.id.clone(),
                        error,
                    });
                }
            }
        }

        for parcel in valid.iter().copied() {
            if constraints.admits_area(parcel.area_m2) {
                run.candidates.push(merge(&[parcel]));
            }
        }

        for (i, first) in valid.iter().enumerate() {
            for second in &valid[i + 1..] {
                let combined = first.area_m2 + second.area_m2;
                if !constraints.admits_area(combined) {
                    continue;
                }
                let km = match distance_km(first.coordinates, second.coordinates) {
                    Ok(km) => km,
                    Err(error) => {
                        warn!(
                            first = %first.id,
                            second = %second.id,
                            %error,
                            "pair skipped: distance unavailable"
                        );
                        continue;
                    }
                };
                if km <= constraints.max_pair_distance_km() {
                    run.candidates.push(merge(&[*first, *second]));
                }
            }
        }

        debug!(
            parcels = parcels.len(),
            rejected = run.rejected.len(),
            candidates = run.candidates.len(),
            "pairwise clustering finished"
        );

        run
    }
}

fn validate_parcel(parcel: &Parcel) -> Result<(), SitingError> {
    if !parcel.area_m2.is_finite() || parcel.area_m2 <= 0.0 {
        return Err(SitingError::invalid(
            format!("parcel {}", parcel.id),
            format!("area {} m2 must be positive", parcel.area_m2),
        ));
    }
    parcel
        .coordinates
        .validate()
        .map_err(|err| match err {
            SitingError::InvalidInput { subject, detail } => SitingError::invalid(
                format!("parcel {}", parcel.id),
                format!("{subject} {detail}"),
            ),
            other => other,
        })
}

fn merge(members: &[&Parcel]) -> ClusterCandidate {
    let coordinates: Vec<_> = members.iter().map(|parcel| parcel.coordinates).collect();
    let centroid = midpoint(&coordinates).unwrap_or_else(|| members[0].coordinates);

    let estimated_capacity = members.iter().try_fold(0u32, |total, parcel| {
        parcel
            .capacity_hint
            .and_then(|capacity| total.checked_add(capacity))
    });

    let total_area_m2: f64 = members.iter().map(|parcel| parcel.area_m2).sum();
    let demand_hint = members
        .iter()
        .try_fold(0.0, |weighted, parcel| {
            parcel
                .demand_hint
                .filter(|hint| hint.is_finite())
                .map(|hint| weighted + hint * parcel.area_m2)
        })
        .map(|weighted| weighted / total_area_m2);

    let risk_level = members.iter().filter_map(|parcel| parcel.risk_level).max();

    ClusterCandidate {
        members: members.iter().map(|parcel| parcel.id.clone()).collect(),
        centroid,
        total_area_m2,
        estimated_capacity,
        demand_hint,
        risk_level,
    }
}
