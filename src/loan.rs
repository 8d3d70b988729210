use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanPayment {
    pub pmt_number: u32,
    pub pmt_amount: f64,
    pub pmt_interest_paid: f64,
    pub pmt_principal_paid: f64,
    pub pmt_end_balance: f64,
}

impl LoanPayment {
    pub fn new(
        pmt_number: u32,
        pmt_amount: f64,
        pmt_interest_paid: f64,
        pmt_principal_paid: f64,
        pmt_end_balance: f64,
    ) -> Self {
        Self {
            pmt_number,
            pmt_amount,
            pmt_interest_paid,
            pmt_principal_paid,
            pmt_end_balance,
        }
    }
}

/// Interest and principal repaid over one year of the schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct YearBreakdown {
    pub year: u32,
    pub interest: f64,
    pub principal: f64,
}

impl YearBreakdown {
    pub fn total(&self) -> f64 {
        self.interest + self.principal
    }
}

/// An equal-payment (annuity) loan with monthly payments and monthly
/// compounding. The whole schedule is generated up front.
#[derive(PartialEq, Debug)]
pub struct Loan {
    pub principal: f64,
    pub term_years: u32,
    pub annual_rate: f64, // decimal, i.e. 0.01 for 1 %
    pmt_amount: f64,
    scheduled_pmts: Vec<LoanPayment>,
}

impl Loan {
    pub fn new(principal: f64, term_years: u32, annual_rate: f64) -> Self {
        let monthly_rate = annual_rate / 12.;
        let months = term_years * 12;
        let pmt_amount = payment_from_loan(principal, monthly_rate, months);
        debug!(
            "loan of {} over {} months at {} monthly: payment {}",
            principal, months, monthly_rate, pmt_amount
        );

        Self {
            principal,
            term_years,
            annual_rate,
            pmt_amount,
            scheduled_pmts: add_scheduled_pmts(principal, monthly_rate, months, pmt_amount),
        }
    }

    pub fn get_pmt_amount(&self) -> f64 {
        self.pmt_amount
    }

    pub fn get_pmt_count(&self) -> usize {
        self.scheduled_pmts.len()
    }

    /// Scheduled payments in order; `pmt_number` counts from 1.
    pub fn payments(&self) -> &[LoanPayment] {
        &self.scheduled_pmts
    }

    /// Sums the twelve payments of `year` (1-based). Years past the term
    /// have no payments and yield `None`.
    pub fn year_breakdown(&self, year: u32) -> Option<YearBreakdown> {
        if year == 0 || year > self.term_years {
            return None;
        }
        let first = ((year - 1) * 12) as usize;
        let pmts = self.payments().get(first..first + 12)?;

        Some(pmts.iter().fold(
            YearBreakdown {
                year,
                interest: 0.,
                principal: 0.,
            },
            |mut acc, pmt| {
                acc.interest += pmt.pmt_interest_paid;
                acc.principal += pmt.pmt_principal_paid;
                acc
            },
        ))
    }
}

/// Level monthly payment that retires `principal` in `months` payments:
///
/// `payment = loan × r × (1+r)^n / ((1+r)^n − 1)`
///
/// A zero rate divides zero by zero and returns NaN.
pub fn payment_from_loan(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    let factor = (1. + monthly_rate).powi(months as i32);
    principal * monthly_rate * factor / (factor - 1.)
}

/// Present value of `months` level payments, i.e. the largest loan that
/// `payment` can carry:
///
/// `loan = payment × ((1+r)^n − 1) / (r × (1+r)^n)`
///
/// A zero rate divides zero by zero and returns NaN.
pub fn loan_from_payment(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    let factor = (1. + monthly_rate).powi(months as i32);
    payment * ((factor - 1.) / (monthly_rate * factor))
}

/// Walks the first twelve months of the schedule, splitting each level
/// payment into interest on the remaining balance and principal.
pub fn first_year_breakdown(
    principal: f64,
    pmt_amount: f64,
    monthly_rate: f64,
) -> YearBreakdown {
    let mut remaining = principal;
    let mut breakdown = YearBreakdown {
        year: 1,
        interest: 0.,
        principal: 0.,
    };

    for month in 1..=12 {
        let interest = remaining * monthly_rate;
        let principal_paid = pmt_amount - interest;
        breakdown.interest += interest;
        breakdown.principal += principal_paid;
        remaining -= principal_paid;
        trace!(
            "month {}, interest {}, principal {}, remaining {}",
            month,
            interest,
            principal_paid,
            remaining
        );
    }
    breakdown
}

// the last scheduled payment clears whatever balance is left
fn add_scheduled_pmts(
    principal: f64,
    monthly_rate: f64,
    months: u32,
    pmt_amount: f64,
) -> Vec<LoanPayment> {
    let mut sched_pmt: Vec<LoanPayment> = Vec::with_capacity(months as usize);
    let mut begin_balance = principal;

    for pmt_number in 1..=months {
        let interest = begin_balance * monthly_rate;
        let (pmt_amt, end_balance) =
            if pmt_number == months || pmt_amount >= begin_balance + interest {
                (begin_balance + interest, 0.)
            } else {
                (pmt_amount, begin_balance - (pmt_amount - interest))
            };
        trace!(
            "Pmt # {}, interest {}, end bal {}",
            pmt_number,
            interest,
            end_balance
        );

        sched_pmt.push(LoanPayment::new(
            pmt_number,
            pmt_amt,
            interest,
            pmt_amt - interest,
            end_balance,
        ));

        if end_balance <= 0. {
            break;
        }
        begin_balance = end_balance;
    }
    sched_pmt
}
