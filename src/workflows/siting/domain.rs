use serde::{Deserialize, Serialize};
use std::fmt;

use super::geo::Coordinates;

/// Identifier wrapper for cadastral parcels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParcelId(pub String);

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParcelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Single cadastral land unit supplied by the host. Never mutated during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub address: String,
    pub coordinates: Coordinates,
    pub area_m2: f64,
    /// Precomputed demand sub-score (0-100); replaces the rule-derived demand when present.
    #[serde(default)]
    pub demand_hint: Option<f64>,
    /// Household units the parcel could host, when the building-code layer has computed it.
    #[serde(default)]
    pub capacity_hint: Option<u32>,
    #[serde(default)]
    pub risk_level: Option<RiskSeverity>,
}

/// Distance to the nearest facility of some kind.
///
/// `Unknown` means the upstream lookup had no data; it scores as zero bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "meters")]
pub enum Distance {
    Measured(f64),
    Unknown,
}

impl Distance {
    /// Build a distance from a raw reading. Negative or non-finite readings carry no information.
    pub fn from_meters(meters: f64) -> Self {
        if meters.is_finite() && meters >= 0.0 {
            Self::Measured(meters)
        } else {
            Self::Unknown
        }
    }

    pub fn meters(self) -> Option<f64> {
        match self {
            Self::Measured(meters) if meters.is_finite() && meters >= 0.0 => Some(meters),
            _ => None,
        }
    }

    pub fn is_within(self, limit_m: f64) -> bool {
        self.meters().map(|meters| meters < limit_m).unwrap_or(false)
    }

    /// Shorten a measured distance by `delta_m`, never below zero.
    pub fn reduced_by(self, delta_m: f64) -> Self {
        match self.meters() {
            Some(meters) => Self::Measured((meters - delta_m.max(0.0)).max(0.0)),
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.meters() {
            Some(meters) => write!(f, "{meters:.0} m"),
            None => f.write_str("unknown"),
        }
    }
}

/// Where a feature bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureProvenance {
    #[default]
    Measured,
    /// Derived by the alternative-site generator; distances are illustrative what-if values.
    Simulated,
}

impl FeatureProvenance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Measured => "measured",
            Self::Simulated => "simulated",
        }
    }
}

/// Pre-computed site features consumed by scoring and the exclusion gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBundle {
    pub accessibility_base: f64,
    pub nearest_transit: Distance,
    pub nearest_school: Distance,
    pub nearest_hospital: Distance,
    pub youth_ratio_pct: f64,
    pub zoning_is_residential: bool,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub provenance: FeatureProvenance,
}

impl FeatureBundle {
    /// Bundle with no facility data, used as a neutral starting point by hosts.
    pub fn unknown() -> Self {
        Self {
            accessibility_base: 0.0,
            nearest_transit: Distance::Unknown,
            nearest_school: Distance::Unknown,
            nearest_hospital: Distance::Unknown,
            youth_ratio_pct: 0.0,
            zoning_is_residential: false,
            risk_factors: Vec::new(),
            provenance: FeatureProvenance::Measured,
        }
    }
}

/// Ordered severity attached to a risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Closed set of hazards and legal restrictions reported by the regulation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    FuelStation,
    HazardousMaterials,
    IndustrialFacility,
    FloodZone,
    Landslide,
    NoisePollution,
    ZoningRestriction,
    HeritageProtection,
    DevelopmentMoratorium,
}

impl RiskCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FuelStation => "fuel station",
            Self::HazardousMaterials => "hazardous materials",
            Self::IndustrialFacility => "industrial facility",
            Self::FloodZone => "flood zone",
            Self::Landslide => "landslide",
            Self::NoisePollution => "noise pollution",
            Self::ZoningRestriction => "zoning restriction",
            Self::HeritageProtection => "heritage protection",
            Self::DevelopmentMoratorium => "development moratorium",
        }
    }

    pub const fn is_legal_restriction(self) -> bool {
        matches!(
            self,
            Self::ZoningRestriction | Self::HeritageProtection | Self::DevelopmentMoratorium
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub severity: RiskSeverity,
}

impl RiskFactor {
    pub const fn new(category: RiskCategory, severity: RiskSeverity) -> Self {
        Self { category, severity }
    }
}

/// Cardinal direction used to perturb a reference site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const fn ordered() -> [Self; 4] {
        [Self::North, Self::East, Self::South, Self::West]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Unit step as (latitude sign, longitude sign).
    pub(crate) const fn unit(self) -> (f64, f64) {
        match self {
            Self::North => (1.0, 0.0),
            Self::East => (0.0, 1.0),
            Self::South => (-1.0, 0.0),
            Self::West => (0.0, -1.0),
        }
    }
}
