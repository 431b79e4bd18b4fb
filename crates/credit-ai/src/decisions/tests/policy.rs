use super::common::*;
use crate::decisions::domain::{
    AffordabilityTier, FinalDecision, ProductKind, RiskBand, ScoringResponse, Severity,
};
use crate::decisions::engine::policy::resolve_approval_only;
use crate::decisions::engine::{DecisionOutcome, ProductAssessment};

fn decide_mortgage(requested: f64, score: &ScoringResponse) -> DecisionOutcome {
    engine()
        .decide(ProductKind::Mortgage, requested, score)
        .expect("mortgage score is complete")
}

fn decide_loan(requested: f64, score: &ScoringResponse) -> DecisionOutcome {
    engine()
        .decide(ProductKind::Loan, requested, score)
        .expect("loan score is complete")
}

fn reason_strs(outcome: &DecisionOutcome) -> Vec<&str> {
    outcome.reasons.iter().map(String::as_str).collect()
}

#[test]
fn low_risk_with_strong_affordability_approves() {
    let outcome = decide_mortgage(150_000.0, &mortgage_score(0.9, 0.05, 250_000.0, "Low"));

    assert_eq!(outcome.decision, FinalDecision::Approved);
    assert_eq!(outcome.severity, Severity::Green);
    assert_eq!(
        reason_strs(&outcome),
        ["Low risk and acceptable affordability"]
    );
    assert_eq!(outcome.affordability.tier, AffordabilityTier::Strong);
    assert_eq!(outcome.risk_band, Some(RiskBand::Low));
}

#[test]
fn model_decline_is_a_hard_decline() {
    let outcome = decide_mortgage(150_000.0, &mortgage_score(0.4, 0.6, 250_000.0, "Low"));

    assert_eq!(outcome.decision, FinalDecision::Declined);
    assert_eq!(outcome.severity, Severity::Red);
    assert_eq!(reason_strs(&outcome), ["Low model approval confidence"]);
}

#[test]
fn zero_capacity_declines_even_with_model_approval() {
    let outcome = decide_mortgage(100_000.0, &mortgage_score(0.9, 0.05, 0.0, "Low"));

    assert_eq!(outcome.decision, FinalDecision::Declined);
    assert_eq!(outcome.affordability.tier, AffordabilityTier::Fail);
    assert_eq!(reason_strs(&outcome), ["Requested loan exceeds model capacity"]);
}

#[test]
fn both_decline_rules_accumulate_reasons_and_high_risk_is_annotated() {
    let outcome = decide_mortgage(100_000.0, &mortgage_score(0.4, 0.6, 0.0, "High"));

    assert_eq!(outcome.decision, FinalDecision::Declined);
    assert_eq!(outcome.severity, Severity::Red);
    assert_eq!(
        reason_strs(&outcome),
        [
            "Low model approval confidence",
            "Requested loan exceeds model capacity",
            "High risk profile",
        ]
    );
}

#[test]
fn decline_is_sticky_across_later_rules() {
    // Strong affordability and a high probability cannot rescue a model
    // decline; only the reason trail grows.
    let outcome = decide_mortgage(50_000.0, &mortgage_score(0.0, 1.0, 250_000.0, "Low"));
    assert_eq!(outcome.decision, FinalDecision::Declined);
    assert_eq!(reason_strs(&outcome), ["Low model approval confidence"]);
}

#[test]
fn low_risk_borderline_affordability_refers() {
    let outcome = decide_mortgage(275_000.0, &mortgage_score(0.9, 0.05, 250_000.0, "Low"));

    assert_eq!(outcome.decision, FinalDecision::Refer);
    assert_eq!(outcome.severity, Severity::Amber);
    assert_eq!(outcome.affordability.tier, AffordabilityTier::Borderline);
    assert_eq!(
        reason_strs(&outcome),
        ["Borderline affordability with low risk"]
    );
}

#[test]
fn medium_risk_needs_strong_tier_and_confidence() {
    let approved = decide_mortgage(150_000.0, &mortgage_score(0.76, 0.2, 250_000.0, "Medium"));
    assert_eq!(approved.decision, FinalDecision::Approved);
    assert_eq!(
        reason_strs(&approved),
        ["Medium risk but strong affordability and approval confidence"]
    );

    // The probability gate is strict: exactly 0.75 refers.
    let at_gate = decide_mortgage(150_000.0, &mortgage_score(0.75, 0.2, 250_000.0, "Medium"));
    assert_eq!(at_gate.decision, FinalDecision::Refer);

    let acceptable_tier = decide_mortgage(200_000.0, &mortgage_score(0.9, 0.05, 250_000.0, "Medium"));
    assert_eq!(acceptable_tier.decision, FinalDecision::Refer);
    assert_eq!(
        reason_strs(&acceptable_tier),
        ["Medium risk profile – manual underwriter review recommended"]
    );
}

#[test]
fn high_risk_offset_by_strong_affordability_approves() {
    let outcome = decide_mortgage(100_000.0, &mortgage_score(0.85, 0.1, 250_000.0, "High"));

    assert_eq!(outcome.decision, FinalDecision::Approved);
    assert_eq!(outcome.severity, Severity::Green);
    assert_eq!(
        reason_strs(&outcome),
        ["High risk offset by strong affordability and ML approval"]
    );
    assert!(outcome.high_risk());
}

#[test]
fn high_risk_acceptable_affordability_refers() {
    let outcome = decide_mortgage(200_000.0, &mortgage_score(0.85, 0.1, 250_000.0, "High"));

    assert_eq!(outcome.decision, FinalDecision::Refer);
    assert_eq!(
        reason_strs(&outcome),
        ["High risk + moderate affordability — refer for underwriting review"]
    );
}

#[test]
fn high_risk_without_buffer_declines() {
    let outcome = decide_mortgage(275_000.0, &mortgage_score(0.85, 0.1, 250_000.0, "High"));

    assert_eq!(outcome.decision, FinalDecision::Declined);
    assert_eq!(
        reason_strs(&outcome),
        ["High risk with insufficient affordability buffer"]
    );
}

#[test]
fn unknown_risk_band_always_refers() {
    for requested in [50_000.0, 150_000.0, 240_000.0] {
        for (prob_approved, prob_declined) in [(0.95, 0.02), (0.7, 0.2)] {
            let outcome = decide_mortgage(
                requested,
                &mortgage_score(prob_approved, prob_declined, 250_000.0, "Elevated"),
            );
            assert_eq!(outcome.decision, FinalDecision::Refer);
            assert_eq!(outcome.risk_band, None);
            assert_eq!(
                reason_strs(&outcome),
                ["Unknown risk band – refer for manual review"]
            );
        }
    }
}

#[test]
fn mortgage_label_fallback_uses_the_numeric_code() {
    let mut score = mortgage_score(0.0, 0.0, 250_000.0, "Low");
    score.approval = Some(labeled_approval("0"));
    let outcome = decide_mortgage(100_000.0, &score);
    assert_eq!(outcome.decision, FinalDecision::Approved);

    score.approval = Some(labeled_approval("1"));
    let outcome = decide_mortgage(100_000.0, &score);
    assert_eq!(outcome.decision, FinalDecision::Declined);
}

#[test]
fn simplified_model_decline_is_terminal() {
    let outcome = decide_loan(10_000.0, &generalized_score(0.3, 0.7, 20_000.0));

    assert_eq!(outcome.decision, FinalDecision::Declined);
    assert_eq!(outcome.severity, Severity::Red);
    assert_eq!(reason_strs(&outcome), ["Low approval confidence"]);
}

#[test]
fn simplified_capacity_fail_declines_and_reasons_accumulate() {
    let capacity_only = decide_loan(30_000.0, &generalized_score(0.9, 0.05, 20_000.0));
    assert_eq!(capacity_only.decision, FinalDecision::Declined);
    assert_eq!(
        reason_strs(&capacity_only),
        ["Requested loan exceeds estimated capacity"]
    );

    let both = decide_loan(30_000.0, &generalized_score(0.3, 0.7, 20_000.0));
    assert_eq!(
        reason_strs(&both),
        [
            "Low approval confidence",
            "Requested loan exceeds estimated capacity",
        ]
    );
}

#[test]
fn simplified_borderline_refers() {
    let outcome = decide_loan(22_000.0, &generalized_score(0.9, 0.05, 20_000.0));

    assert_eq!(outcome.decision, FinalDecision::Refer);
    assert_eq!(
        reason_strs(&outcome),
        ["Borderline affordability — refer for manual review"]
    );
}

#[test]
fn simplified_strong_tier_approves_at_the_inclusive_gate() {
    let at_gate = decide_loan(10_000.0, &generalized_score(0.7, 0.2, 20_000.0));
    assert_eq!(at_gate.decision, FinalDecision::Approved);
    assert_eq!(
        reason_strs(&at_gate),
        ["Strong affordability and approval confidence"]
    );

    let below_gate = decide_loan(10_000.0, &generalized_score(0.69, 0.2, 20_000.0));
    assert_eq!(below_gate.decision, FinalDecision::Refer);
    assert_eq!(
        reason_strs(&below_gate),
        ["Needs underwriter review based on confidence and affordability"]
    );
}

#[test]
fn simplified_acceptable_tier_needs_high_confidence() {
    let approved = decide_loan(16_000.0, &generalized_score(0.8, 0.1, 20_000.0));
    assert_eq!(approved.decision, FinalDecision::Approved);
    assert_eq!(
        reason_strs(&approved),
        ["Acceptable affordability with high approval confidence"]
    );

    let referred = decide_loan(16_000.0, &generalized_score(0.79, 0.1, 20_000.0));
    assert_eq!(referred.decision, FinalDecision::Refer);
}

#[test]
fn simplified_word_label_fallback_never_approves() {
    // With the fallback engaged both probabilities are zero, so the approval
    // rules cannot fire; an approving label still ends in referral.
    let mut score = generalized_score(0.0, 0.0, 20_000.0);
    score.approval = Some(labeled_approval("approved"));
    let outcome = decide_loan(10_000.0, &score);
    assert_eq!(outcome.decision, FinalDecision::Refer);

    score.approval = Some(labeled_approval("declined"));
    let outcome = decide_loan(10_000.0, &score);
    assert_eq!(outcome.decision, FinalDecision::Declined);
}

#[test]
fn simplified_indeterminate_label_refers_not_declines() {
    let mut score = generalized_score(0.0, 0.0, 20_000.0);
    score.approval = Some(labeled_approval("pending-review"));

    let outcome = decide_loan(10_000.0, &score);
    assert_eq!(outcome.decision, FinalDecision::Refer);
    assert_eq!(
        reason_strs(&outcome),
        ["Needs underwriter review based on confidence and affordability"]
    );
}

#[test]
fn standalone_resolver_prefers_probabilities() {
    let decision = resolve_approval_only(&approval(0.7, 0.3));
    assert_eq!(decision.decision, FinalDecision::Approved);
    assert_eq!(decision.prob_approved, 0.7);

    let decision = resolve_approval_only(&approval(0.3, 0.7));
    assert_eq!(decision.decision, FinalDecision::Declined);

    // Ties resolve in the applicant's favor.
    let decision = resolve_approval_only(&approval(0.5, 0.5));
    assert_eq!(decision.decision, FinalDecision::Approved);
}

#[test]
fn standalone_resolver_falls_back_to_word_labels_then_refers() {
    let decision = resolve_approval_only(&labeled_approval("yes"));
    assert_eq!(decision.decision, FinalDecision::Approved);

    let decision = resolve_approval_only(&labeled_approval("no"));
    assert_eq!(decision.decision, FinalDecision::Declined);

    let decision = resolve_approval_only(&labeled_approval("unscored"));
    assert_eq!(decision.decision, FinalDecision::Refer);

    let decision = resolve_approval_only(&Default::default());
    assert_eq!(decision.decision, FinalDecision::Refer);
}

#[test]
fn engine_requires_the_sections_each_product_needs() {
    let engine = engine();

    let mut without_risk = mortgage_score(0.9, 0.05, 250_000.0, "Low");
    without_risk.risk = None;
    assert!(engine
        .decide(ProductKind::Mortgage, 100_000.0, &without_risk)
        .is_none());

    let mut without_capacity = generalized_score(0.9, 0.05, 20_000.0);
    without_capacity.loan_amount = None;
    assert!(engine
        .decide(ProductKind::Loan, 10_000.0, &without_capacity)
        .is_none());

    assert!(engine
        .assess(
            &product_request(ProductKind::CreditCard, 5_000.0, 3),
            &ScoringResponse::default(),
        )
        .is_none());
}

#[test]
fn engine_routes_current_accounts_to_the_standalone_resolver() {
    let assessment = engine()
        .assess(
            &product_request(ProductKind::CurrentAccount, 0.0, 0),
            &approval_only_score(approval(0.82, 0.18)),
        )
        .expect("approval section present");

    match assessment {
        ProductAssessment::ApprovalOnly(standalone) => {
            assert_eq!(standalone.decision, FinalDecision::Approved);
        }
        other => panic!("expected approval-only assessment, got {other:?}"),
    }
}

#[test]
fn identical_inputs_produce_identical_outcomes() {
    let request = mortgage_request(150_000.0);
    let score = mortgage_score(0.9, 0.05, 250_000.0, "Low");
    let engine = engine();

    let first = engine.assess(&request, &score).expect("complete score");
    let second = engine.assess(&request, &score).expect("complete score");

    assert_eq!(first, second);
}
