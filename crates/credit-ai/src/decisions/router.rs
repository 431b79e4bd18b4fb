use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AffordabilityTier, AffordabilityVerdict, ApplicantRequest, ConfidenceBand, FinalDecision,
    ProductKind, RiskBand, ScoringResponse, Severity,
};
use super::engine::{DecisionOutcome, ProductAssessment};
use super::prequalify::PrequalOutcome;
use super::service::DecisionService;
use crate::error::AppError;

/// Largest capacity-usage percentage the console renders before clamping.
const CAPACITY_USAGE_DISPLAY_CAP: f64 = 999.0;

/// Router builder exposing HTTP endpoints for decisioning and the policy
/// gate.
pub fn decision_router(service: Arc<DecisionService>) -> Router {
    Router::new()
        .route("/api/v1/decisions", post(decide_handler))
        .route("/api/v1/prequalify", post(prequalify_handler))
        .with_state(service)
}

/// One scoring exchange: the applicant figures plus the parsed model output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecideRequest {
    pub request: ApplicantRequest,
    pub score: ScoringResponse,
}

pub(crate) async fn decide_handler(
    State(service): State<Arc<DecisionService>>,
    Json(payload): Json<DecideRequest>,
) -> Result<Json<AssessmentView>, AppError> {
    let assessment = service.decide(&payload.request, &payload.score)?;
    Ok(Json(AssessmentView::build(
        &payload.request,
        &assessment,
        &service,
    )))
}

pub(crate) async fn prequalify_handler(
    State(service): State<Arc<DecisionService>>,
    Json(request): Json<ApplicantRequest>,
) -> Json<PrequalView> {
    let outcome = service.prequalify(&request);
    Json(PrequalView::from_outcome(&outcome))
}

/// Decision snapshot rendered for the console, one per exchange.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub product: ProductKind,
    pub evaluated_at: DateTime<Utc>,
    pub decision: FinalDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    pub prob_approved: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob_declined: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_band: Option<RiskBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repayment: Vec<RepaymentView>,
}

impl AssessmentView {
    pub fn build(
        request: &ApplicantRequest,
        assessment: &ProductAssessment,
        service: &DecisionService,
    ) -> Self {
        match assessment {
            ProductAssessment::Decision(outcome) => {
                let repayment = service
                    .repayment_curve(outcome.capacity, request.term_years)
                    .points()
                    .map(|point| RepaymentView {
                        rate_label: point.rate_label(),
                        monthly_payment: point.monthly_payment,
                    })
                    .collect();

                Self {
                    product: request.product,
                    evaluated_at: Utc::now(),
                    decision: outcome.decision,
                    severity: Some(outcome.severity),
                    reasons: outcome.reasons.clone(),
                    prob_approved: outcome.approval.prob_approved,
                    prob_declined: Some(outcome.approval.prob_declined),
                    confidence: Some(outcome.approval.confidence),
                    affordability: Some(AffordabilityView::from_outcome(outcome)),
                    risk_band: outcome.risk_band,
                    requested_amount: Some(outcome.requested_amount),
                    capacity: Some(outcome.capacity),
                    repayment,
                }
            }
            ProductAssessment::ApprovalOnly(standalone) => Self {
                product: request.product,
                evaluated_at: Utc::now(),
                decision: standalone.decision,
                severity: None,
                reasons: Vec::new(),
                prob_approved: standalone.prob_approved,
                prob_declined: None,
                confidence: None,
                affordability: None,
                risk_band: None,
                requested_amount: None,
                capacity: None,
                repayment: Vec::new(),
            },
        }
    }
}

/// Affordability figures shaped for display, with the infinite zero-capacity
/// ratio collapsed to absent values.
#[derive(Debug, Clone, Serialize)]
pub struct AffordabilityView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_usage_percent: Option<f64>,
    pub tier: AffordabilityTier,
    pub verdict: AffordabilityVerdict,
}

impl AffordabilityView {
    fn from_outcome(outcome: &DecisionOutcome) -> Self {
        let finite_ratio = outcome
            .affordability
            .ratio
            .is_finite()
            .then_some(outcome.affordability.ratio);

        Self {
            ratio: finite_ratio,
            capacity_usage_percent: finite_ratio
                .map(|ratio| (ratio * 100.0).min(CAPACITY_USAGE_DISPLAY_CAP)),
            tier: outcome.affordability.tier,
            verdict: outcome.affordability.verdict(),
        }
    }
}

/// One repayment chart point with the rate preformatted for the axis.
#[derive(Debug, Clone, Serialize)]
pub struct RepaymentView {
    pub rate_label: String,
    pub monthly_payment: u64,
}

/// Pre-qualification gate result rendered for callers.
#[derive(Debug, Clone, Serialize)]
pub struct PrequalView {
    pub eligible: bool,
    pub policy_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_income: Option<f64>,
    pub income_adjusted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined_score: Option<ScoringResponse>,
}

impl PrequalView {
    pub fn from_outcome(outcome: &PrequalOutcome) -> Self {
        match outcome {
            PrequalOutcome::Eligible {
                effective_income,
                income_adjusted,
            } => Self {
                eligible: true,
                policy_message: outcome.policy_message().to_string(),
                effective_income: Some(*effective_income),
                income_adjusted: *income_adjusted,
                declined_score: None,
            },
            PrequalOutcome::Declined { .. } => Self {
                eligible: false,
                policy_message: outcome.policy_message().to_string(),
                effective_income: None,
                income_adjusted: false,
                declined_score: outcome.declined_score(),
            },
        }
    }
}
