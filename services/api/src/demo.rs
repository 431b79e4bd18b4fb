use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use credit_ai::decisions::{
    ApplicantRequest, ApprovalScore, CapacityEstimate, DecisionService, ProductAssessment,
    ProductKind, RiskScore, ScenarioDeck, ScoredScenario, ScoringResponse,
};
use credit_ai::error::AppError;

use crate::infra::default_decision_service;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the repayment projection table for capacity products
    #[arg(long)]
    pub(crate) include_repayment: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Path to a CSV scenario deck
    #[arg(long)]
    pub(crate) deck: PathBuf,
    /// Include the repayment projection table for capacity products
    #[arg(long)]
    pub(crate) include_repayment: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = default_decision_service();

    println!("Credit decision engine demo");
    println!("Pre-qualification gate");

    let over_levered = over_levered_request();
    let gate = service.prequalify(&over_levered);
    println!(
        "- over-levered applicant -> {}",
        if gate.is_eligible() {
            "eligible"
        } else {
            "declined"
        }
    );
    println!("  policy message: {}", gate.policy_message());

    if let Some(synthetic) = gate.declined_score() {
        let assessment = service.decide(&over_levered, &synthetic)?;
        println!(
            "  engine verdict on the synthetic decline: {}",
            assessment.final_decision().label()
        );
    }

    println!("\nScoring exchanges");
    for scenario in demo_scenarios() {
        let assessment = service
            .decide(&scenario.request, &scenario.score)
            .ok();
        render_assessment(&service, &scenario, assessment.as_ref(), args.include_repayment);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let deck = ScenarioDeck::from_path(&args.deck)?;
    let service = default_decision_service();

    println!("Scenario deck: {}", args.deck.display());
    if deck.is_empty() {
        println!("No scenarios found.");
        return Ok(());
    }

    for (scenario, assessment) in deck.assess(service.engine()) {
        render_assessment(&service, &scenario, assessment.as_ref(), args.include_repayment);
    }

    Ok(())
}

fn render_assessment(
    service: &DecisionService,
    scenario: &ScoredScenario,
    assessment: Option<&ProductAssessment>,
    include_repayment: bool,
) {
    println!(
        "- {} [{}]",
        scenario.label,
        scenario.request.product.label()
    );

    match assessment {
        None => println!("  insufficient scoring data; no assessment rendered"),
        Some(ProductAssessment::ApprovalOnly(standalone)) => {
            println!(
                "  decision {} | P(approve) {:.1}%",
                standalone.decision.label(),
                standalone.prob_approved * 100.0
            );
        }
        Some(ProductAssessment::Decision(outcome)) => {
            println!(
                "  decision {} [{}] | P(approve) {:.1}% | confidence {}",
                outcome.decision.label(),
                outcome.severity.label(),
                outcome.approval.prob_approved * 100.0,
                outcome.approval.confidence.label()
            );
            let usage = if outcome.affordability.ratio.is_finite() {
                format!("{:.1}%", outcome.affordability.ratio * 100.0)
            } else {
                "n/a".to_string()
            };
            println!(
                "  affordability {} | capacity usage {} | capacity {:.0}",
                outcome.affordability.tier.label(),
                usage,
                outcome.capacity
            );
            for reason in &outcome.reasons {
                println!("  * {reason}");
            }
            if include_repayment {
                let curve = service.repayment_curve(outcome.capacity, scenario.request.term_years);
                for point in curve.points() {
                    println!(
                        "    {} -> {} / month",
                        point.rate_label(),
                        point.monthly_payment
                    );
                }
            }
        }
    }
}

fn demo_scenarios() -> Vec<ScoredScenario> {
    vec![
        ScoredScenario {
            label: "low risk mortgage".to_string(),
            request: mortgage_request(150_000.0),
            score: mortgage_score(0.9, 0.05, 250_000.0, "Low"),
        },
        ScoredScenario {
            label: "high risk offset by affordability".to_string(),
            request: mortgage_request(100_000.0),
            score: mortgage_score(0.85, 0.1, 250_000.0, "High"),
        },
        ScoredScenario {
            label: "model decline".to_string(),
            request: mortgage_request(150_000.0),
            score: mortgage_score(0.4, 0.6, 250_000.0, "Low"),
        },
        ScoredScenario {
            label: "borderline credit card".to_string(),
            request: ApplicantRequest {
                product: ProductKind::CreditCard,
                age: 41,
                annual_income: 52_000.0,
                monthly_debt: 650.0,
                requested_amount: 11_000.0,
                term_years: 3,
                property_price: None,
                deposit_amount: None,
                avg_monthly_balance: None,
                overdraft_usage: None,
            },
            score: ScoringResponse {
                approval: Some(ApprovalScore::from_probabilities(0.72, 0.28)),
                loan_amount: Some(CapacityEstimate {
                    predicted_amount: 10_000.0,
                }),
                risk: None,
                policy_message: None,
            },
        },
        ScoredScenario {
            label: "current account".to_string(),
            request: ApplicantRequest {
                product: ProductKind::CurrentAccount,
                age: 29,
                annual_income: 32_000.0,
                monthly_debt: 150.0,
                requested_amount: 0.0,
                term_years: 0,
                property_price: None,
                deposit_amount: None,
                avg_monthly_balance: Some(1_200.0),
                overdraft_usage: Some(0.1),
            },
            score: ScoringResponse {
                approval: Some(ApprovalScore::from_probabilities(0.82, 0.18)),
                loan_amount: None,
                risk: None,
                policy_message: None,
            },
        },
    ]
}

fn mortgage_request(requested_amount: f64) -> ApplicantRequest {
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

fn over_levered_request() -> ApplicantRequest {
    let mut request = mortgage_request(250_000.0);
    request.product = ProductKind::Loan;
    request.annual_income = 50_000.0;
    request
}

fn mortgage_score(
    prob_approved: f64,
    prob_declined: f64,
    capacity: f64,
    risk_label: &str,
) -> ScoringResponse {
    ScoringResponse {
        approval: Some(ApprovalScore::from_probabilities(
            prob_approved,
            prob_declined,
        )),
        loan_amount: Some(CapacityEstimate {
            predicted_amount: capacity,
        }),
        risk: Some(RiskScore {
            label: risk_label.to_string(),
            class_probabilities: BTreeMap::new(),
        }),
        policy_message: None,
    }
}
