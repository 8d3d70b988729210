use crate::loan::loan_from_payment;
use crate::profile::BorrowerProfile;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much a borrower can repay, borrow and spend at one repayment ratio.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Affordability {
    pub repayment_ratio: f64,
    pub annual_capacity: f64,
    pub monthly_capacity: f64,
    pub max_loan: f64,
    pub max_house_price: f64,
    pub down_payment: f64,
}

impl Affordability {
    pub fn assess(profile: &BorrowerProfile, repayment_ratio: f64) -> Self {
        let annual_capacity = repayment_capacity(profile.annual_income, repayment_ratio);
        let monthly_capacity = annual_capacity / 12.;
        let max_loan = loan_from_payment(
            monthly_capacity,
            profile.monthly_rate(),
            profile.term_months(),
        );
        let max_house_price = max_house_price(max_loan, profile.down_payment_ratio);
        debug!(
            "ratio {}: monthly capacity {}, max loan {}, max price {}",
            repayment_ratio, monthly_capacity, max_loan, max_house_price
        );

        Self {
            repayment_ratio,
            annual_capacity,
            monthly_capacity,
            max_loan,
            max_house_price,
            down_payment: max_house_price - max_loan,
        }
    }
}

/// Share of the annual income available for loan repayment.
pub fn repayment_capacity(annual_income: f64, repayment_ratio: f64) -> f64 {
    annual_income * repayment_ratio
}

/// Price reachable when `loan_amount` covers everything but the down
/// payment. With a zero down payment ratio (a full loan) the price is the
/// loan itself.
pub fn max_house_price(loan_amount: f64, down_payment_ratio: f64) -> f64 {
    loan_amount / (1. - down_payment_ratio)
}
