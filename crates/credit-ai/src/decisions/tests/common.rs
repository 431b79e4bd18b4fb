use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::decisions::domain::{
    ApplicantRequest, ApprovalScore, CapacityEstimate, ProductKind, RiskScore, ScoringResponse,
};
use crate::decisions::engine::DecisionEngine;
use crate::decisions::prequalify::PrequalConfig;
use crate::decisions::router::decision_router;
use crate::decisions::service::DecisionService;

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new()
}

pub(super) fn approval(prob_approved: f64, prob_declined: f64) -> ApprovalScore {
    ApprovalScore::from_probabilities(prob_approved, prob_declined)
}

pub(super) fn labeled_approval(label: &str) -> ApprovalScore {
    ApprovalScore {
        label: Some(label.to_string()),
        prob_approved: None,
        prob_declined: None,
    }
}

pub(super) fn risk(label: &str) -> RiskScore {
    let mut class_probabilities = BTreeMap::new();
    if ["Low", "Medium", "High"].contains(&label) {
        class_probabilities.insert(label.to_string(), 0.8);
    }
    RiskScore {
        label: label.to_string(),
        class_probabilities,
    }
}

pub(super) fn mortgage_score(
    prob_approved: f64,
    prob_declined: f64,
    capacity: f64,
    risk_label: &str,
) -> ScoringResponse {
    ScoringResponse {
        approval: Some(approval(prob_approved, prob_declined)),
        loan_amount: Some(CapacityEstimate {
            predicted_amount: capacity,
        }),
        risk: Some(risk(risk_label)),
        policy_message: None,
    }
}

pub(super) fn generalized_score(
    prob_approved: f64,
    prob_declined: f64,
    capacity: f64,
) -> ScoringResponse {
    ScoringResponse {
        approval: Some(approval(prob_approved, prob_declined)),
        loan_amount: Some(CapacityEstimate {
            predicted_amount: capacity,
        }),
        risk: None,
        policy_message: None,
    }
}

pub(super) fn approval_only_score(score: ApprovalScore) -> ScoringResponse {
    ScoringResponse {
        approval: Some(score),
        loan_amount: None,
        risk: None,
        policy_message: None,
    }
}

pub(super) fn mortgage_request(requested_amount: f64) -> ApplicantRequest {
    ApplicantRequest {
        product: ProductKind::Mortgage,
        age: 35,
        annual_income: 65_000.0,
        monthly_debt: 400.0,
        requested_amount,
        term_years: 25,
        property_price: Some(320_000.0),
        deposit_amount: Some(50_000.0),
        avg_monthly_balance: None,
        overdraft_usage: None,
    }
}

pub(super) fn product_request(
    product: ProductKind,
    requested_amount: f64,
    term_years: u32,
) -> ApplicantRequest {
    ApplicantRequest {
        product,
        age: 35,
        annual_income: 65_000.0,
        monthly_debt: 400.0,
        requested_amount,
        term_years,
        property_price: None,
        deposit_amount: None,
        avg_monthly_balance: None,
        overdraft_usage: None,
    }
}

pub(super) fn build_router() -> axum::Router {
    decision_router(Arc::new(DecisionService::new(PrequalConfig::default())))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
