use crate::config::SitingConfig;
use crate::workflows::siting::candidates::ClusterConstraints;
use crate::workflows::siting::domain::{
    Distance, FeatureBundle, FeatureProvenance, Parcel, ParcelId, RiskCategory, RiskFactor,
    RiskSeverity,
};
use crate::workflows::siting::geo::Coordinates;
use crate::workflows::siting::service::SitingService;

/// Roughly 300 m of latitude.
pub(super) const LAT_300_M: f64 = 0.0027;

pub(super) fn parcel(id: &str, latitude: f64, longitude: f64, area_m2: f64) -> Parcel {
    Parcel {
        id: ParcelId::from(id),
        address: format!("{id} Hangang-daero, Yongsan-gu"),
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

pub(super) fn site_features(transit_m: f64) -> FeatureBundle {
    FeatureBundle {
        accessibility_base: 55.0,
        nearest_transit: Distance::Measured(transit_m),
        nearest_school: Distance::Measured(700.0),
        nearest_hospital: Distance::Measured(1600.0),
        youth_ratio_pct: 21.0,
        zoning_is_residential: true,
        risk_factors: Vec::new(),
        provenance: FeatureProvenance::Measured,
    }
}

pub(super) fn weak_features() -> FeatureBundle {
    FeatureBundle {
        accessibility_base: 50.0,
        nearest_transit: Distance::Measured(1800.0),
        nearest_school: Distance::Measured(2400.0),
        nearest_hospital: Distance::Measured(3600.0),
        youth_ratio_pct: 8.0,
        zoning_is_residential: false,
        risk_factors: Vec::new(),
        provenance: FeatureProvenance::Measured,
    }
}

pub(super) fn critical(category: RiskCategory) -> RiskFactor {
    RiskFactor::new(category, RiskSeverity::Critical)
}

pub(super) fn service() -> SitingService {
    SitingService::new(&SitingConfig::default()).expect("default config builds a service")
}
