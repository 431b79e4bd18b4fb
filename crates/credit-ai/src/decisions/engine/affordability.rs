use serde::{Deserialize, Serialize};

use crate::decisions::domain::{AffordabilityTier, AffordabilityVerdict};

// Ratio cut points, strict less-than, checked in ascending order.
const STRONG_BELOW: f64 = 0.7;
const ACCEPTABLE_BELOW: f64 = 1.0;
const BORDERLINE_BELOW: f64 = 1.2;

/// Requested amount measured against the model-estimated capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    /// requested / capacity; infinite when capacity is zero.
    pub ratio: f64,
    pub tier: AffordabilityTier,
}

impl AffordabilityAssessment {
    pub fn verdict(&self) -> AffordabilityVerdict {
        match self.tier {
            AffordabilityTier::Fail => AffordabilityVerdict::Fail,
            AffordabilityTier::Borderline => AffordabilityVerdict::Borderline,
            AffordabilityTier::Strong | AffordabilityTier::Acceptable => {
                AffordabilityVerdict::Pass
            }
        }
    }
}

/// Buckets a requested amount against predicted capacity.
///
/// A zero capacity yields an infinite ratio and the Fail tier for every
/// requested amount, including zero. That is deliberate policy: a model that
/// predicts no borrowing capacity means the applicant cannot afford the
/// product, whatever was asked for.
pub fn classify(requested_amount: f64, capacity: f64) -> AffordabilityAssessment {
    let ratio = if capacity > 0.0 {
        requested_amount / capacity
    } else {
        f64::INFINITY
    };

    let tier = if ratio < STRONG_BELOW {
        AffordabilityTier::Strong
    } else if ratio < ACCEPTABLE_BELOW {
        AffordabilityTier::Acceptable
    } else if ratio < BORDERLINE_BELOW {
        AffordabilityTier::Borderline
    } else {
        AffordabilityTier::Fail
    };

    AffordabilityAssessment { ratio, tier }
}
