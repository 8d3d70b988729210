#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const ANNUAL_INCOME: f64 = 9_000_000.;
pub const REPAYMENT_RATIO_CONSERVATIVE: f64 = 0.25;
pub const REPAYMENT_RATIO_NORMAL: f64 = 0.30;
pub const INTEREST_RATE: f64 = 0.01; // annual, as a decimal
pub const REPAYMENT_YEARS: u32 = 35;
pub const DOWN_PAYMENT_RATIO: f64 = 0.0; // full loan

/// The borrower every report is computed for.
///
/// Income is in yen per year. Ratios and the interest rate are decimals
/// (`0.25` is 25 %). The default profile is a high-spending household that
/// only commits a quarter of its income to repayment, compared against the
/// more common 30 %.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BorrowerProfile {
    pub annual_income: f64,
    pub repayment_ratio: f64,
    pub comparison_ratio: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub down_payment_ratio: f64,
}

impl BorrowerProfile {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }
}

impl Default for BorrowerProfile {
    fn default() -> Self {
        Self {
            annual_income: ANNUAL_INCOME,
            repayment_ratio: REPAYMENT_RATIO_CONSERVATIVE,
            comparison_ratio: REPAYMENT_RATIO_NORMAL,
            annual_rate: INTEREST_RATE,
            term_years: REPAYMENT_YEARS,
            down_payment_ratio: DOWN_PAYMENT_RATIO,
        }
    }
}
