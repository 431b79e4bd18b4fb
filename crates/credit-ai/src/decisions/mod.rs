//! Credit product decisioning: domain records, the pure rule engine, the
//! pre-model policy gate, scenario decks, and the HTTP surface around them.
//!
//! The engine is deliberately free of I/O and shared state. Each evaluation
//! consumes an [`domain::ApplicantRequest`] plus the parsed
//! [`domain::ScoringResponse`] of one remote model exchange and produces an
//! immutable outcome; re-running the same inputs reproduces the same outcome,
//! reason ordering included.

pub mod domain;
pub mod engine;
pub mod prequalify;
pub mod router;
pub mod scenarios;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AffordabilityTier, AffordabilityVerdict, ApplicantRequest, ApprovalScore, CapacityEstimate,
    ConfidenceBand, FinalDecision, ProductKind, RiskBand, RiskScore, ScoringResponse, Severity,
};
pub use engine::affordability::AffordabilityAssessment;
pub use engine::approval::{ApprovalAssessment, ApprovalSignal, LabelConvention};
pub use engine::policy::StandaloneDecision;
pub use engine::repayment::{RepaymentCurve, RepaymentPoint, RATE_GRID};
pub use engine::{DecisionEngine, DecisionOutcome, ProductAssessment};
pub use prequalify::{PrequalConfig, PrequalGate, PrequalOutcome};
pub use router::{decision_router, AssessmentView, DecideRequest, PrequalView};
pub use scenarios::{ScenarioDeck, ScenarioImportError, ScoredScenario};
pub use service::{DecisionService, DecisionServiceError};
