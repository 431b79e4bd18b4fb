use serde::{Deserialize, Serialize};

/// Annual interest rates the repayment chart is plotted over, ascending.
/// Chart rendering depends on this order; keep it sorted.
pub const RATE_GRID: [f64; 5] = [0.02, 0.03, 0.04, 0.05, 0.06];

const MONTHS_PER_YEAR: u32 = 12;

/// One point on the projected repayment curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepaymentPoint {
    pub annual_rate: f64,
    /// Amortized monthly payment, rounded to the nearest whole currency unit.
    pub monthly_payment: u64,
}

impl RepaymentPoint {
    pub fn rate_label(&self) -> String {
        format!("{:.1}%", self.annual_rate * 100.0)
    }
}

/// Monthly-payment projection for a capacity amount over a fixed rate grid.
///
/// The curve is a value: `points()` can be called any number of times and
/// always replays the same finite, ascending-rate sequence lazily.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepaymentCurve {
    capacity: f64,
    term_months: u32,
}

impl RepaymentCurve {
    pub fn new(capacity: f64, term_years: u32) -> Self {
        Self {
            capacity,
            term_months: term_years.saturating_mul(MONTHS_PER_YEAR),
        }
    }

    /// A zero capacity or a zero term projects nothing.
    pub fn is_empty(&self) -> bool {
        !(self.capacity > 0.0) || self.term_months == 0
    }

    pub fn points(&self) -> impl Iterator<Item = RepaymentPoint> + Clone {
        let yielded = if self.is_empty() { 0 } else { RATE_GRID.len() };
        let capacity = self.capacity;
        let term_months = self.term_months;

        RATE_GRID
            .into_iter()
            .take(yielded)
            .map(move |annual_rate| RepaymentPoint {
                annual_rate,
                monthly_payment: monthly_payment(
                    capacity,
                    annual_rate / MONTHS_PER_YEAR as f64,
                    term_months,
                ),
            })
    }

}

/// Standard amortizing-annuity payment, rounded to a whole currency unit.
///
/// The zero-rate arm degenerates to straight-line repayment. The current
/// grid has no zero rate; the arm keeps the formula total should one ever
/// be added.
pub(crate) fn monthly_payment(capacity: f64, monthly_rate: f64, term_months: u32) -> u64 {
    let periods = term_months as f64;
    let raw = if monthly_rate == 0.0 {
        capacity / periods
    } else {
        capacity * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-periods))
    };
    raw.round() as u64
}
