use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Products the remote scoring service can assess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Mortgage,
    CreditCard,
    Loan,
    CurrentAccount,
}

impl ProductKind {
    pub const fn label(self) -> &'static str {
        match self {
            ProductKind::Mortgage => "mortgage",
            ProductKind::CreditCard => "credit_card",
            ProductKind::Loan => "loan",
            ProductKind::CurrentAccount => "current_account",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mortgage" => Some(ProductKind::Mortgage),
            "credit_card" | "credit-card" => Some(ProductKind::CreditCard),
            "loan" => Some(ProductKind::Loan),
            "current_account" | "current-account" => Some(ProductKind::CurrentAccount),
            _ => None,
        }
    }

    /// Whether the product carries a borrowing-capacity concept at all.
    /// Current accounts are approval-only.
    pub const fn has_capacity(self) -> bool {
        !matches!(self, ProductKind::CurrentAccount)
    }
}

/// Applicant figures captured by the console form for one evaluation.
///
/// Amounts and the term are user supplied and may legitimately be zero; the
/// engine never divides by them without the documented guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRequest {
    pub product: ProductKind,
    pub age: u8,
    pub annual_income: f64,
    pub monthly_debt: f64,
    pub requested_amount: f64,
    pub term_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_monthly_balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_usage: Option<f64>,
}

/// Parsed body of a successful scoring exchange.
///
/// Field names mirror the upstream JSON exactly; every section is optional so
/// a sparse payload degrades to "insufficient data" instead of a parse fault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<ApprovalScore>,
    #[serde(
        default,
        rename = "loanAmount",
        skip_serializing_if = "Option::is_none"
    )]
    pub loan_amount: Option<CapacityEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_message: Option<String>,
}

/// Binomial approval head output: class probabilities plus the raw label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApprovalScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_approved: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob_declined: Option<f64>,
}

impl ApprovalScore {
    pub fn from_probabilities(prob_approved: f64, prob_declined: f64) -> Self {
        Self {
            label: None,
            prob_approved: Some(prob_approved),
            prob_declined: Some(prob_declined),
        }
    }
}

/// Regression head output: the model-estimated maximum grantable amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityEstimate {
    pub predicted_amount: f64,
}

/// Risk classification head output, present only for the mortgage product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub label: String,
    #[serde(
        default,
        rename = "classProbabilities",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub class_probabilities: BTreeMap<String, f64>,
}

impl RiskScore {
    pub fn band(&self) -> Option<RiskBand> {
        RiskBand::from_label(&self.label)
    }
}

/// Qualitative risk band supplied by the classification model.
///
/// Matching is exact on the upstream labels; anything else is treated as an
/// unknown band and routed to referral, never to approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(RiskBand::Low),
            "Medium" => Some(RiskBand::Medium),
            "High" => Some(RiskBand::High),
            _ => None,
        }
    }
}

/// Terminal decision presented to the underwriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalDecision {
    Approved,
    Declined,
    Refer,
}

impl FinalDecision {
    pub const fn label(self) -> &'static str {
        match self {
            FinalDecision::Approved => "APPROVED",
            FinalDecision::Declined => "DECLINED",
            FinalDecision::Refer => "REFER",
        }
    }
}

/// Traffic-light severity mirroring the decision for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Amber,
    Red,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Green => "green",
            Severity::Amber => "amber",
            Severity::Red => "red",
        }
    }
}

/// Discretized affordability band derived from the requested/capacity ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AffordabilityTier {
    Strong,
    Acceptable,
    Borderline,
    Fail,
}

impl AffordabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            AffordabilityTier::Strong => "Strong",
            AffordabilityTier::Acceptable => "Acceptable",
            AffordabilityTier::Borderline => "Borderline",
            AffordabilityTier::Fail => "Fail",
        }
    }
}

/// Coarse pass/borderline/fail rollup of the affordability tier, kept for
/// display surfaces that predate the four-way tiering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffordabilityVerdict {
    Pass,
    Borderline,
    Fail,
}

impl AffordabilityVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            AffordabilityVerdict::Pass => "Pass",
            AffordabilityVerdict::Borderline => "Borderline",
            AffordabilityVerdict::Fail => "Fail",
        }
    }
}

/// Qualitative bucket for the raw approval probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    Strong,
    Moderate,
    Weak,
}

impl ConfidenceBand {
    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceBand::Strong => "Strong",
            ConfidenceBand::Moderate => "Moderate",
            ConfidenceBand::Weak => "Weak",
        }
    }
}
