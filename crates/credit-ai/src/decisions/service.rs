use crate::decisions::domain::{ApplicantRequest, ProductKind, ScoringResponse};
use crate::decisions::engine::repayment::RepaymentCurve;
use crate::decisions::engine::{DecisionEngine, ProductAssessment};
use crate::decisions::prequalify::{PrequalConfig, PrequalGate, PrequalOutcome};

/// Facade composing the pre-qualification gate and the decision engine for
/// transport layers.
///
/// The service holds configuration only; evaluation itself stays pure, so a
/// shared instance is safe under concurrent requests.
pub struct DecisionService {
    engine: DecisionEngine,
    gate: PrequalGate,
}

impl DecisionService {
    pub fn new(config: PrequalConfig) -> Self {
        Self {
            engine: DecisionEngine::new(),
            gate: PrequalGate::new(config),
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Evaluates one scoring exchange, mapping an unusable payload to a typed
    /// error naming the absent sections.
    pub fn decide(
        &self,
        request: &ApplicantRequest,
        score: &ScoringResponse,
    ) -> Result<ProductAssessment, DecisionServiceError> {
        self.engine.assess(request, score).ok_or_else(|| {
            DecisionServiceError::InsufficientData {
                product: request.product.label(),
                missing: missing_sections(request.product, score).join(", "),
            }
        })
    }

    /// Applies the pre-model policy rules to a raw request.
    pub fn prequalify(&self, request: &ApplicantRequest) -> PrequalOutcome {
        self.gate.evaluate(request)
    }

    /// Projects monthly repayments for a capacity figure over the rate grid.
    pub fn repayment_curve(&self, capacity: f64, term_years: u32) -> RepaymentCurve {
        self.engine.repayment_curve(capacity, term_years)
    }
}

impl Default for DecisionService {
    fn default() -> Self {
        Self::new(PrequalConfig::default())
    }
}

fn missing_sections(product: ProductKind, score: &ScoringResponse) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if score.approval.is_none() {
        missing.push("approval");
    }
    if product.has_capacity() && score.loan_amount.is_none() {
        missing.push("loanAmount");
    }
    if product == ProductKind::Mortgage && score.risk.is_none() {
        missing.push("risk");
    }
    missing
}

/// Error raised by the decision service.
#[derive(Debug, thiserror::Error)]
pub enum DecisionServiceError {
    #[error("scoring response for {product} is missing required sections: {missing}")]
    InsufficientData {
        product: &'static str,
        missing: String,
    },
}
