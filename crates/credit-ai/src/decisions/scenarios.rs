use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::decisions::domain::{
    ApplicantRequest, ApprovalScore, CapacityEstimate, ProductKind, RiskScore, ScoringResponse,
};
use crate::decisions::engine::{DecisionEngine, ProductAssessment};

/// Errors raised while loading a scenario deck.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioImportError {
    #[error("failed to read scenario csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open scenario csv: {0}")]
    Io(#[from] std::io::Error),
    #[error("row {row}: unknown product '{product}'")]
    UnknownProduct { row: usize, product: String },
}

/// One labelled applicant plus the model output recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredScenario {
    pub label: String,
    pub request: ApplicantRequest,
    pub score: ScoringResponse,
}

/// A replayable set of scored scenarios, typically a regression deck or the
/// CLI demo input.
#[derive(Debug, Clone, Default)]
pub struct ScenarioDeck {
    scenarios: Vec<ScoredScenario>,
}

impl ScenarioDeck {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScenarioImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut scenarios = Vec::new();
        for (index, record) in csv_reader.deserialize::<ScenarioRow>().enumerate() {
            let row = record?;
            // Header is line 1; the first data row is line 2.
            scenarios.push(row.into_scenario(index + 2)?);
        }

        Ok(Self { scenarios })
    }

    pub fn scenarios(&self) -> &[ScoredScenario] {
        &self.scenarios
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Runs every scenario through the engine, pairing each label with its
    /// assessment (or `None` where the recorded score was insufficient).
    pub fn assess(
        &self,
        engine: &DecisionEngine,
    ) -> Vec<(ScoredScenario, Option<ProductAssessment>)> {
        self.scenarios
            .iter()
            .map(|scenario| {
                let assessment = engine.assess(&scenario.request, &scenario.score);
                (scenario.clone(), assessment)
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioRow {
    scenario: String,
    product: String,
    age: u8,
    annual_income: f64,
    monthly_debt: f64,
    requested_amount: f64,
    term_years: u32,
    #[serde(default, deserialize_with = "empty_as_none")]
    property_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    prob_approved: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    prob_declined: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    approval_label: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    predicted_amount: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    risk_label: Option<String>,
}

impl ScenarioRow {
    fn into_scenario(self, row: usize) -> Result<ScoredScenario, ScenarioImportError> {
        let product = ProductKind::from_key(&self.product).ok_or_else(|| {
            ScenarioImportError::UnknownProduct {
                row,
                product: self.product.clone(),
            }
        })?;

        let request = ApplicantRequest {
            product,
            age: self.age,
            annual_income: self.annual_income,
            monthly_debt: self.monthly_debt,
            requested_amount: self.requested_amount,
            term_years: self.term_years,
            property_price: self.property_price,
            deposit_amount: None,
            avg_monthly_balance: None,
            overdraft_usage: None,
        };

        let approval = if self.prob_approved.is_some()
            || self.prob_declined.is_some()
            || self.approval_label.is_some()
        {
            Some(ApprovalScore {
                label: self.approval_label,
                prob_approved: self.prob_approved,
                prob_declined: self.prob_declined,
            })
        } else {
            None
        };

        let score = ScoringResponse {
            approval,
            loan_amount: self
                .predicted_amount
                .map(|predicted_amount| CapacityEstimate { predicted_amount }),
            risk: self.risk_label.map(|label| RiskScore {
                label,
                class_probabilities: BTreeMap::new(),
            }),
            policy_message: None,
        };

        Ok(ScoredScenario {
            label: self.scenario,
            request,
            score,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
