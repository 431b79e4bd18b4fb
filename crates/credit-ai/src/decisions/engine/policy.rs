use serde::{Deserialize, Serialize};

use super::affordability::AffordabilityAssessment;
use super::approval::{ApprovalAssessment, ApprovalSignal, LabelConvention};
use crate::decisions::domain::{
    AffordabilityTier, ApprovalScore, FinalDecision, RiskBand, Severity,
};

// Probability gates for approving into a non-low risk band.
const MEDIUM_RISK_APPROVE_ABOVE: f64 = 0.75;
const HIGH_RISK_APPROVE_ABOVE: f64 = 0.80;

// Probability gates for the simplified matrix's approval rules.
const STRONG_TIER_APPROVE_AT: f64 = 0.7;
const ACCEPTABLE_TIER_APPROVE_AT: f64 = 0.8;

/// Decision, severity, and reason trail produced by one rule table.
///
/// Reasons keep insertion order and are never deduplicated; more than one
/// decline rule may contribute to the same outcome.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleOutcome {
    pub(crate) decision: FinalDecision,
    pub(crate) severity: Severity,
    pub(crate) reasons: Vec<String>,
}

impl RuleOutcome {
    fn approved(reasons: Vec<String>) -> Self {
        Self {
            decision: FinalDecision::Approved,
            severity: Severity::Green,
            reasons,
        }
    }

    fn declined(reasons: Vec<String>) -> Self {
        Self {
            decision: FinalDecision::Declined,
            severity: Severity::Red,
            reasons,
        }
    }

    fn referred(reasons: Vec<String>) -> Self {
        Self {
            decision: FinalDecision::Refer,
            severity: Severity::Amber,
            reasons,
        }
    }
}

/// Rule table for one product family over the shared assessments.
///
/// Both implementations share the decline-first shape: hard declines are
/// evaluated before anything else, and once a decline fires no later rule can
/// upgrade the outcome; only reason accumulation continues.
pub(crate) trait DecisionPolicy {
    fn decide(
        &self,
        approval: &ApprovalAssessment,
        affordability: &AffordabilityAssessment,
        risk_band: Option<RiskBand>,
    ) -> RuleOutcome;
}

/// Mortgage rule table: risk-band-specific thresholds over approval and
/// affordability.
pub(crate) struct RiskWeightedPolicy;

impl DecisionPolicy for RiskWeightedPolicy {
    fn decide(
        &self,
        approval: &ApprovalAssessment,
        affordability: &AffordabilityAssessment,
        risk_band: Option<RiskBand>,
    ) -> RuleOutcome {
        let mut reasons = Vec::new();
        let mut declined = false;

        if !approval.approved_by_model() {
            declined = true;
            reasons.push("Low model approval confidence".to_string());
        }

        if affordability.tier == AffordabilityTier::Fail {
            declined = true;
            reasons.push("Requested loan exceeds model capacity".to_string());
        }

        if declined {
            if risk_band == Some(RiskBand::High) {
                reasons.push("High risk profile".to_string());
            }
            return RuleOutcome::declined(reasons);
        }

        match risk_band {
            Some(RiskBand::Low) => {
                if affordability.tier == AffordabilityTier::Borderline {
                    reasons.push("Borderline affordability with low risk".to_string());
                    RuleOutcome::referred(reasons)
                } else {
                    reasons.push("Low risk and acceptable affordability".to_string());
                    RuleOutcome::approved(reasons)
                }
            }
            Some(RiskBand::Medium) => {
                if affordability.tier == AffordabilityTier::Strong
                    && approval.prob_approved > MEDIUM_RISK_APPROVE_ABOVE
                {
                    reasons.push(
                        "Medium risk but strong affordability and approval confidence".to_string(),
                    );
                    RuleOutcome::approved(reasons)
                } else {
                    reasons.push(
                        "Medium risk profile – manual underwriter review recommended".to_string(),
                    );
                    RuleOutcome::referred(reasons)
                }
            }
            Some(RiskBand::High) => {
                if affordability.tier == AffordabilityTier::Strong
                    && approval.prob_approved > HIGH_RISK_APPROVE_ABOVE
                {
                    reasons.push(
                        "High risk offset by strong affordability and ML approval".to_string(),
                    );
                    RuleOutcome::approved(reasons)
                } else if affordability.tier == AffordabilityTier::Acceptable {
                    reasons.push(
                        "High risk + moderate affordability — refer for underwriting review"
                            .to_string(),
                    );
                    RuleOutcome::referred(reasons)
                } else {
                    reasons.push("High risk with insufficient affordability buffer".to_string());
                    RuleOutcome::declined(reasons)
                }
            }
            None => {
                reasons.push("Unknown risk band – refer for manual review".to_string());
                RuleOutcome::referred(reasons)
            }
        }
    }
}

/// Risk-agnostic rule table for generalized lending products.
///
/// An indeterminate approval signal never fires the decline rule here: the
/// label fallback only engages when both probabilities are zero, so the
/// approval rules below cannot fire either and the flow lands on referral.
/// Unknown input ends in a referral, never an approval.
pub(crate) struct SimplifiedPolicy;

impl DecisionPolicy for SimplifiedPolicy {
    fn decide(
        &self,
        approval: &ApprovalAssessment,
        affordability: &AffordabilityAssessment,
        _risk_band: Option<RiskBand>,
    ) -> RuleOutcome {
        let mut reasons = Vec::new();
        let mut declined = false;

        if approval.signal == ApprovalSignal::Declined {
            declined = true;
            reasons.push("Low approval confidence".to_string());
        }

        if affordability.tier == AffordabilityTier::Fail {
            declined = true;
            reasons.push("Requested loan exceeds estimated capacity".to_string());
        }

        if declined {
            return RuleOutcome::declined(reasons);
        }

        if affordability.tier == AffordabilityTier::Borderline {
            reasons.push("Borderline affordability — refer for manual review".to_string());
            return RuleOutcome::referred(reasons);
        }

        if affordability.tier == AffordabilityTier::Strong
            && approval.prob_approved >= STRONG_TIER_APPROVE_AT
        {
            reasons.push("Strong affordability and approval confidence".to_string());
            return RuleOutcome::approved(reasons);
        }

        if affordability.tier == AffordabilityTier::Acceptable
            && approval.prob_approved >= ACCEPTABLE_TIER_APPROVE_AT
        {
            reasons.push("Acceptable affordability with high approval confidence".to_string());
            return RuleOutcome::approved(reasons);
        }

        reasons.push("Needs underwriter review based on confidence and affordability".to_string());
        RuleOutcome::referred(reasons)
    }
}

/// Minimal outcome for products with no capacity concept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandaloneDecision {
    pub prob_approved: f64,
    pub decision: FinalDecision,
}

/// Resolves approval-only products (current accounts) straight from the
/// approval score: probabilities when any is non-zero, otherwise the
/// word/boolean label convention, otherwise a referral.
pub fn resolve_approval_only(score: &ApprovalScore) -> StandaloneDecision {
    let prob_approved = score.prob_approved.unwrap_or(0.0);
    let prob_declined = score.prob_declined.unwrap_or(0.0);

    let decision = if prob_approved != 0.0 || prob_declined != 0.0 {
        if prob_approved >= prob_declined {
            FinalDecision::Approved
        } else {
            FinalDecision::Declined
        }
    } else {
        match score.label.as_deref() {
            Some(label) => match LabelConvention::WordBoolean.interpret(label) {
                ApprovalSignal::Approved => FinalDecision::Approved,
                ApprovalSignal::Declined => FinalDecision::Declined,
                ApprovalSignal::Indeterminate => FinalDecision::Refer,
            },
            None => FinalDecision::Refer,
        }
    };

    StandaloneDecision {
        prob_approved,
        decision,
    }
}
