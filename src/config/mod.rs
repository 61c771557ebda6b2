use std::env;
use std::fmt;

use crate::workflows::siting::{AlternativeSiteConfig, ClusterConstraints, ScoringWeights};

/// Distinguishes runtime behavior for different stages of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the siting engine.
#[derive(Debug, Clone)]
pub struct SitingConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub weights: ScoringWeights,
    pub clustering: ClusteringConfig,
    pub alternatives: AlternativeSiteConfig,
    pub ranking: RankingConfig,
}

impl SitingConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SITING_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("SITING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            accessibility: read_f64("SITING_WEIGHT_ACCESSIBILITY", defaults.accessibility)?,
            demand: read_f64("SITING_WEIGHT_DEMAND", defaults.demand)?,
            infrastructure: read_f64("SITING_WEIGHT_INFRASTRUCTURE", defaults.infrastructure)?,
            environment: read_f64("SITING_WEIGHT_ENVIRONMENT", defaults.environment)?,
        };

        let clustering = ClusteringConfig {
            area_min_m2: read_f64("SITING_AREA_MIN_M2", 500.0)?,
            area_max_m2: read_f64("SITING_AREA_MAX_M2", 2000.0)?,
            max_pair_distance_km: read_f64("SITING_MAX_PAIR_DISTANCE_KM", 0.5)?,
        };

        let alternative_defaults = AlternativeSiteConfig::default();
        let alternatives = AlternativeSiteConfig {
            offset_degrees: read_f64(
                "SITING_ALTERNATIVE_OFFSET_DEG",
                alternative_defaults.offset_degrees,
            )?,
            improvement_delta_m: read_f64(
                "SITING_IMPROVEMENT_DELTA_M",
                alternative_defaults.improvement_delta_m,
            )?,
        };

        let top_n = env::var("SITING_TOP_N")
            .unwrap_or_else(|_| "3".to_string())
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidNumber {
                key: "SITING_TOP_N",
            })?;
        if top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }

        let ranking = RankingConfig {
            top_n,
            underperformance_threshold: read_f64("SITING_UNDERPERFORMANCE_THRESHOLD", 70.0)?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            weights,
            clustering,
            alternatives,
            ranking,
        })
    }
}

impl Default for SitingConfig {
    fn default() -> Self {
        Self {
            environment: AppEnvironment::Development,
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            weights: ScoringWeights::default(),
            clustering: ClusteringConfig::default(),
            alternatives: AlternativeSiteConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

fn read_f64(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

/// Area band and pairing distance applied when merging parcels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringConfig {
    pub area_min_m2: f64,
    pub area_max_m2: f64,
    pub max_pair_distance_km: f64,
}

impl ClusteringConfig {
    pub fn constraints(&self) -> Result<ClusterConstraints, crate::error::SitingError> {
        ClusterConstraints::new(
            self.area_min_m2,
            self.area_max_m2,
            self.max_pair_distance_km,
        )
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            area_min_m2: 500.0,
            area_max_m2: 2000.0,
            max_pair_distance_km: 0.5,
        }
    }
}

/// Truncation and alternative-site trigger settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub top_n: usize,
    /// Sites scoring below this overall value get alternative proposals.
    pub underperformance_threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            underperformance_threshold: 70.0,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
    ZeroTopN,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a finite number")
            }
            ConfigError::ZeroTopN => write!(f, "SITING_TOP_N must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "SITING_ENV",
            "SITING_LOG_LEVEL",
            "SITING_WEIGHT_ACCESSIBILITY",
            "SITING_WEIGHT_DEMAND",
            "SITING_WEIGHT_INFRASTRUCTURE",
            "SITING_WEIGHT_ENVIRONMENT",
            "SITING_AREA_MIN_M2",
            "SITING_AREA_MAX_M2",
            "SITING_MAX_PAIR_DISTANCE_KM",
            "SITING_ALTERNATIVE_OFFSET_DEG",
            "SITING_IMPROVEMENT_DELTA_M",
            "SITING_TOP_N",
            "SITING_UNDERPERFORMANCE_THRESHOLD",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = SitingConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.weights, ScoringWeights::default());
        assert_eq!(config.clustering, ClusteringConfig::default());
        assert_eq!(config.ranking.top_n, 3);
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITING_ENV", "prod");
        env::set_var("SITING_AREA_MIN_M2", "650");
        env::set_var("SITING_TOP_N", "5");
        let config = SitingConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.clustering.area_min_m2, 650.0);
        assert_eq!(config.ranking.top_n, 5);
        reset_env();
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITING_WEIGHT_DEMAND", "lots");
        let err = SitingConfig::load().expect_err("demand weight is not a number");
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "SITING_WEIGHT_DEMAND"
            }
        );
        reset_env();
    }

    #[test]
    fn rejects_zero_top_n() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SITING_TOP_N", "0");
        assert_eq!(SitingConfig::load().unwrap_err(), ConfigError::ZeroTopN);
        reset_env();
    }
}
