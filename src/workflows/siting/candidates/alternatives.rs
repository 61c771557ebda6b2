use serde::{Deserialize, Serialize};
use tracing::warn;

use super::super::domain::{Direction, FeatureBundle, FeatureProvenance};
use super::super::geo::Coordinates;
use super::AlternativeSiteCandidate;
use crate::error::SitingError;

/// Perturbation settings for the what-if generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSiteConfig {
    /// North/south step in degrees; east/west is widened so the ground distance matches.
    pub offset_degrees: f64,
    /// Meters shaved off each known facility distance at the shifted site.
    pub improvement_delta_m: f64,
}

impl Default for AlternativeSiteConfig {
    fn default() -> Self {
        Self {
            offset_degrees: 0.01,
            improvement_delta_m: 500.0,
        }
    }
}

/// Proposes nearby sites by shifting the origin along cardinal directions.
///
/// Feature values of the proposals are simulated from the origin's, not looked up, and
/// are tagged [`FeatureProvenance::Simulated`] so report text can say so. Swapping in a
/// real per-coordinate lookup changes the meaning of the output and must be done
/// explicitly by the host.
#[derive(Debug, Clone, Default)]
pub struct AlternativeSiteGenerator {
    config: AlternativeSiteConfig,
}

impl AlternativeSiteGenerator {
    pub fn new(config: AlternativeSiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlternativeSiteConfig {
        &self.config
    }

    pub fn generate(
        &self,
        origin_id: &str,
        origin: Coordinates,
        features: &FeatureBundle,
        directions: &[Direction],
    ) -> Result<Vec<AlternativeSiteCandidate>, SitingError> {
        origin.validate()?;
        let step = self.config.offset_degrees;
        if !step.is_finite() || step <= 0.0 {
            return Err(SitingError::invalid(
                "alternative offset",
                format!("{step} degrees must be positive"),
            ));
        }

        let lng_scale = origin.latitude.to_radians().cos();
        let mut alternatives = Vec::with_capacity(directions.len());

        for &direction in directions {
            let (lat_sign, lng_sign) = direction.unit();
            let delta_lng = if lng_sign == 0.0 {
                0.0
            } else {
                lng_sign * step / lng_scale
            };

            let coordinates = match origin.offset(lat_sign * step, delta_lng) {
                Ok(coordinates) => coordinates,
                Err(error) => {
                    warn!(
                        origin = origin_id,
                        direction = direction.label(),
                        %error,
                        "skipping alternative outside valid coordinates"
                    );
                    continue;
                }
            };

            alternatives.push(AlternativeSiteCandidate {
                origin_id: origin_id.to_string(),
                direction,
                coordinates,
                features: self.simulate(features),
            });
        }

        Ok(alternatives)
    }

    fn simulate(&self, origin: &FeatureBundle) -> FeatureBundle {
        let delta = self.config.improvement_delta_m;
        FeatureBundle {
            nearest_transit: origin.nearest_transit.reduced_by(delta),
            nearest_school: origin.nearest_school.reduced_by(delta),
            nearest_hospital: origin.nearest_hospital.reduced_by(delta),
            provenance: FeatureProvenance::Simulated,
            ..origin.clone()
        }
    }
}
