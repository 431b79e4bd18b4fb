use serde::{Deserialize, Serialize};

use crate::decisions::domain::{ApprovalScore, ConfidenceBand};

const STRONG_CONFIDENCE_AT: f64 = 0.8;
const MODERATE_CONFIDENCE_AT: f64 = 0.6;

/// How a raw approval label is read when both class probabilities are zero.
///
/// The two scoring backends never agreed on one encoding, so the convention
/// is chosen per call site and must not be unified: flipping a caller from
/// one to the other silently inverts live decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelConvention {
    /// Mortgage path: the binomial head emits the class index, and "0" is the
    /// approved class.
    NumericCode,
    /// Generalized path: word or boolean spellings, matched case
    /// insensitively. Unrecognized spellings produce an indeterminate signal.
    WordBoolean,
}

impl LabelConvention {
    pub(crate) fn interpret(self, label: &str) -> ApprovalSignal {
        match self {
            LabelConvention::NumericCode => {
                if label.trim() == "0" {
                    ApprovalSignal::Approved
                } else {
                    ApprovalSignal::Declined
                }
            }
            LabelConvention::WordBoolean => {
                match label.trim().to_ascii_lowercase().as_str() {
                    "approved" | "1" | "yes" | "true" => ApprovalSignal::Approved,
                    "declined" | "0" | "no" | "false" => ApprovalSignal::Declined,
                    _ => ApprovalSignal::Indeterminate,
                }
            }
        }
    }
}

/// Direction of the model's approval verdict.
///
/// `Indeterminate` marks a label the word/boolean convention could not read.
/// It is never treated as approval; downstream matrices surface it as a
/// referral rather than a hard decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalSignal {
    Approved,
    Declined,
    Indeterminate,
}

/// Interpreted approval output retained alongside the raw probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApprovalAssessment {
    pub signal: ApprovalSignal,
    pub confidence: ConfidenceBand,
    pub prob_approved: f64,
    pub prob_declined: f64,
}

impl ApprovalAssessment {
    pub fn approved_by_model(&self) -> bool {
        matches!(self.signal, ApprovalSignal::Approved)
    }
}

/// Derives the binary approval signal and confidence band from a score.
///
/// Absent probabilities count as zero. The label fallback engages only when
/// both probabilities are exactly zero and a label is present; otherwise the
/// probability comparison alone decides. Confidence is a function of
/// `prob_approved` only, independent of the signal direction.
pub fn interpret(score: &ApprovalScore, convention: LabelConvention) -> ApprovalAssessment {
    let prob_approved = score.prob_approved.unwrap_or(0.0);
    let prob_declined = score.prob_declined.unwrap_or(0.0);

    let mut signal = if prob_approved > prob_declined {
        ApprovalSignal::Approved
    } else {
        ApprovalSignal::Declined
    };

    if prob_approved == 0.0 && prob_declined == 0.0 {
        if let Some(label) = score.label.as_deref() {
            signal = convention.interpret(label);
        }
    }

    let confidence = confidence_band(prob_approved);

    ApprovalAssessment {
        signal,
        confidence,
        prob_approved,
        prob_declined,
    }
}

pub(crate) fn confidence_band(prob_approved: f64) -> ConfidenceBand {
    if prob_approved >= STRONG_CONFIDENCE_AT {
        ConfidenceBand::Strong
    } else if prob_approved >= MODERATE_CONFIDENCE_AT {
        ConfidenceBand::Moderate
    } else {
        ConfidenceBand::Weak
    }
}
