use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{RiskCategory, RiskFactor, RiskSeverity};

/// Hard veto applied independently of the numeric score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusionGate;

impl ExclusionGate {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, risk_factors: &[RiskFactor]) -> GateVerdict {
        self.evaluate_with_member_risk(risk_factors, None)
    }

    /// Gate a candidate whose parcels carry their own recorded risk level.
    ///
    /// A Critical member vetoes on its own. A High member counts as a high risk, so it
    /// vetoes when any legal-restriction factor is present.
    pub fn evaluate_with_member_risk(
        &self,
        risk_factors: &[RiskFactor],
        member_risk: Option<RiskSeverity>,
    ) -> GateVerdict {
        if let Some(critical) = risk_factors
            .iter()
            .find(|factor| factor.severity == RiskSeverity::Critical)
        {
            debug!(category = critical.category.label(), "critical risk vetoes site");
            return GateVerdict::vetoed(VetoReason::CriticalRisk {
                category: critical.category,
            });
        }

        if member_risk == Some(RiskSeverity::Critical) {
            debug!("critical member parcel vetoes site");
            return GateVerdict::vetoed(VetoReason::MemberParcelRisk {
                severity: RiskSeverity::Critical,
                restriction: None,
            });
        }

        let high = risk_factors
            .iter()
            .find(|factor| factor.severity == RiskSeverity::High);
        let Some(restriction) = risk_factors
            .iter()
            .find(|factor| factor.category.is_legal_restriction())
        else {
            return GateVerdict::passed();
        };

        if let Some(high) = high {
            debug!(
                risk = high.category.label(),
                restriction = restriction.category.label(),
                "high risk under legal restriction vetoes site"
            );
            return GateVerdict::vetoed(VetoReason::HighRiskUnderLegalRestriction {
                risk: high.category,
                restriction: restriction.category,
            });
        }

        if member_risk == Some(RiskSeverity::High) {
            debug!(
                restriction = restriction.category.label(),
                "high-risk member parcel under legal restriction vetoes site"
            );
            return GateVerdict::vetoed(VetoReason::MemberParcelRisk {
                severity: RiskSeverity::High,
                restriction: Some(restriction.category),
            });
        }

        GateVerdict::passed()
    }
}

/// Outcome of the exclusion gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub passed: bool,
    pub reason: Option<VetoReason>,
}

impl GateVerdict {
    pub fn passed() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    pub fn vetoed(reason: VetoReason) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
        }
    }
}

/// Why a site was vetoed, kept structured for report templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum VetoReason {
    CriticalRisk {
        category: RiskCategory,
    },
    HighRiskUnderLegalRestriction {
        risk: RiskCategory,
        restriction: RiskCategory,
    },
    /// Risk level recorded on a member parcel rather than in the looked-up features.
    MemberParcelRisk {
        severity: RiskSeverity,
        restriction: Option<RiskCategory>,
    },
}

impl VetoReason {
    pub fn summary(&self) -> String {
        match self {
            VetoReason::CriticalRisk { category } => {
                format!("excluded: critical {} risk", category.label())
            }
            VetoReason::HighRiskUnderLegalRestriction { risk, restriction } => format!(
                "excluded: high {} risk combined with {}",
                risk.label(),
                restriction.label()
            ),
            VetoReason::MemberParcelRisk {
                severity,
                restriction: None,
            } => format!("excluded: member parcel carries {} risk", severity.label()),
            VetoReason::MemberParcelRisk {
                severity,
                restriction: Some(restriction),
            } => format!(
                "excluded: member parcel carries {} risk combined with {}",
                severity.label(),
                restriction.label()
            ),
        }
    }
}
