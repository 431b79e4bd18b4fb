pub mod affordability;
pub mod approval;
pub mod policy;
pub mod repayment;

use serde::Serialize;

use crate::decisions::domain::{
    ApplicantRequest, FinalDecision, ProductKind, RiskBand, ScoringResponse, Severity,
};
use affordability::AffordabilityAssessment;
use approval::{ApprovalAssessment, LabelConvention};
use policy::{DecisionPolicy, RiskWeightedPolicy, SimplifiedPolicy, StandaloneDecision};
use repayment::RepaymentCurve;

/// Stateless evaluator turning one scoring exchange into one decision.
///
/// Every call is pure and independent; identical inputs produce identical
/// outcomes, reason order included.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Routes the scoring exchange through the product's rule table.
    ///
    /// Returns `None` when the response lacks a section the product
    /// requires; callers render that as "insufficient data", not an error.
    pub fn assess(
        &self,
        request: &ApplicantRequest,
        score: &ScoringResponse,
    ) -> Option<ProductAssessment> {
        match request.product {
            ProductKind::CurrentAccount => self
                .resolve_approval_only(score)
                .map(ProductAssessment::ApprovalOnly),
            _ => self
                .decide(request.product, request.requested_amount, score)
                .map(ProductAssessment::Decision),
        }
    }

    /// Full decision for products carrying a borrowing-capacity estimate.
    ///
    /// The mortgage table additionally requires the risk section; a missing
    /// section yields `None`, while a present-but-unrecognized risk label
    /// flows through to the rule table's referral branch.
    pub fn decide(
        &self,
        product: ProductKind,
        requested_amount: f64,
        score: &ScoringResponse,
    ) -> Option<DecisionOutcome> {
        let (policy, convention) = capacity_policy(product)?;
        let approval_score = score.approval.as_ref()?;
        let capacity = score.loan_amount.as_ref()?.predicted_amount;

        let risk_band = match product {
            ProductKind::Mortgage => score.risk.as_ref()?.band(),
            _ => None,
        };

        let approval = approval::interpret(approval_score, convention);
        let affordability = affordability::classify(requested_amount, capacity);
        let ruled = policy.decide(&approval, &affordability, risk_band);

        Some(DecisionOutcome {
            decision: ruled.decision,
            severity: ruled.severity,
            reasons: ruled.reasons,
            approval,
            affordability,
            requested_amount,
            capacity,
            risk_band,
        })
    }

    /// Approval-only resolution for products without a capacity concept.
    pub fn resolve_approval_only(&self, score: &ScoringResponse) -> Option<StandaloneDecision> {
        score.approval.as_ref().map(policy::resolve_approval_only)
    }

    /// Projected monthly payments over the fixed rate grid.
    pub fn repayment_curve(&self, capacity: f64, term_years: u32) -> RepaymentCurve {
        RepaymentCurve::new(capacity, term_years)
    }
}

fn capacity_policy(
    product: ProductKind,
) -> Option<(&'static dyn DecisionPolicy, LabelConvention)> {
    match product {
        ProductKind::Mortgage => Some((&RiskWeightedPolicy, LabelConvention::NumericCode)),
        ProductKind::CreditCard | ProductKind::Loan => {
            Some((&SimplifiedPolicy, LabelConvention::WordBoolean))
        }
        ProductKind::CurrentAccount => None,
    }
}

/// Either shape the engine can produce, keyed by product family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductAssessment {
    Decision(DecisionOutcome),
    ApprovalOnly(StandaloneDecision),
}

impl ProductAssessment {
    pub fn final_decision(&self) -> FinalDecision {
        match self {
            ProductAssessment::Decision(outcome) => outcome.decision,
            ProductAssessment::ApprovalOnly(standalone) => standalone.decision,
        }
    }
}

/// Full decision snapshot handed to presentation layers verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOutcome {
    pub decision: FinalDecision,
    pub severity: Severity,
    /// Ordered as the rules fired; duplicates are meaningful and kept.
    pub reasons: Vec<String>,
    pub approval: ApprovalAssessment,
    pub affordability: AffordabilityAssessment,
    pub requested_amount: f64,
    pub capacity: f64,
    pub risk_band: Option<RiskBand>,
}

impl DecisionOutcome {
    pub fn high_risk(&self) -> bool {
        self.risk_band == Some(RiskBand::High)
    }
}
