use serde::{Deserialize, Serialize};

use crate::decisions::domain::{ApplicantRequest, ApprovalScore, CapacityEstimate, ScoringResponse};

/// Policy dials applied before any model exchange.
///
/// Defaults mirror the thresholds the upstream scoring backend enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrequalConfig {
    pub max_age_at_term_end: u8,
    pub retirement_age: u8,
    /// Effective income is reduced to this fraction at retirement age.
    pub retirement_income_factor: f64,
    pub max_loan_to_value: f64,
    pub max_debt_to_income: f64,
    pub max_income_multiple: f64,
}

impl Default for PrequalConfig {
    fn default() -> Self {
        Self {
            max_age_at_term_end: 75,
            retirement_age: 60,
            retirement_income_factor: 0.60,
            max_loan_to_value: 0.95,
            max_debt_to_income: 0.40,
            max_income_multiple: 4.5,
        }
    }
}

/// Result of the pre-qualification rules over a raw applicant request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrequalOutcome {
    Eligible {
        effective_income: f64,
        income_adjusted: bool,
    },
    Declined {
        reason: String,
    },
}

impl PrequalOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, PrequalOutcome::Eligible { .. })
    }

    /// Message the scoring backend attaches to an eligible exchange.
    pub fn policy_message(&self) -> &str {
        match self {
            PrequalOutcome::Eligible {
                income_adjusted: true,
                ..
            } => "Income adjusted for retirement",
            PrequalOutcome::Eligible { .. } => "Eligible under policy rules",
            PrequalOutcome::Declined { reason } => reason,
        }
    }

    /// The synthetic scoring response a gate decline stands in for, so a
    /// declined applicant can still flow through the decision engine without
    /// ever reaching the models.
    pub fn declined_score(&self) -> Option<ScoringResponse> {
        match self {
            PrequalOutcome::Eligible { .. } => None,
            PrequalOutcome::Declined { reason } => Some(ScoringResponse {
                approval: Some(ApprovalScore {
                    label: Some("Declined".to_string()),
                    prob_approved: Some(0.0),
                    prob_declined: Some(1.0),
                }),
                loan_amount: Some(CapacityEstimate {
                    predicted_amount: 0.0,
                }),
                risk: None,
                policy_message: Some(reason.clone()),
            }),
        }
    }
}

/// Stateless gate applying the pre-qualification rubric to a request.
#[derive(Debug, Clone)]
pub struct PrequalGate {
    config: PrequalConfig,
}

impl Default for PrequalGate {
    fn default() -> Self {
        Self::new(PrequalConfig::default())
    }
}

impl PrequalGate {
    pub fn new(config: PrequalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrequalConfig {
        &self.config
    }

    /// Applies the rules in order; the first decline wins.
    ///
    /// Loan-to-value is only assessable when a positive property price is
    /// present, so the rule is skipped otherwise rather than declined.
    pub fn evaluate(&self, request: &ApplicantRequest) -> PrequalOutcome {
        let age_at_term_end = u32::from(request.age) + request.term_years;
        if age_at_term_end > u32::from(self.config.max_age_at_term_end) {
            let max_term = u32::from(self.config.max_age_at_term_end)
                .saturating_sub(u32::from(request.age));
            return PrequalOutcome::Declined {
                reason: format!(
                    "Loan term too long for applicant age. Maximum allowed: {max_term} years"
                ),
            };
        }

        let mut effective_income = request.annual_income;
        let mut income_adjusted = false;
        if request.age >= self.config.retirement_age {
            effective_income *= self.config.retirement_income_factor;
            income_adjusted = true;
        }

        if let Some(property_price) = request.property_price.filter(|price| *price > 0.0) {
            let loan_to_value = request.requested_amount / property_price;
            if loan_to_value > self.config.max_loan_to_value {
                return PrequalOutcome::Declined {
                    reason: format!(
                        "Loan-to-value exceeds allowable maximum ({:.0}%)",
                        self.config.max_loan_to_value * 100.0
                    ),
                };
            }
        }

        let monthly_income = effective_income / 12.0;
        let debt_to_income = request.monthly_debt / monthly_income;
        if debt_to_income > self.config.max_debt_to_income {
            return PrequalOutcome::Declined {
                reason: format!(
                    "Debt-to-income ratio too high ({:.0}%)",
                    debt_to_income * 100.0
                ),
            };
        }

        let income_multiple = request.requested_amount / effective_income;
        if income_multiple > self.config.max_income_multiple {
            return PrequalOutcome::Declined {
                reason: format!(
                    "Requested loan exceeds income multiple limit ({}x income)",
                    self.config.max_income_multiple
                ),
            };
        }

        PrequalOutcome::Eligible {
            effective_income,
            income_adjusted,
        }
    }
}
