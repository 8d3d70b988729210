use crate::affordability::Affordability;
use crate::currency::CurrencyFormatter;
use crate::loan::{first_year_breakdown, Loan, YearBreakdown};
use crate::profile::BorrowerProfile;
use log::debug;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const RULE: &str = "==========================================";

/// Repayment figures for one loan over its full term.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepaymentSimulation {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub annual_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub first_year: YearBreakdown,
    pub final_year: Option<YearBreakdown>,
}

impl RepaymentSimulation {
    pub fn run(profile: &BorrowerProfile, loan_amount: f64) -> Self {
        let monthly_rate = profile.monthly_rate();
        let months = profile.term_months();
        let loan = Loan::new(loan_amount, profile.term_years, profile.annual_rate);
        debug!("simulated {} scheduled payments", loan.get_pmt_count());

        let monthly_payment = loan.get_pmt_amount();
        let total_payment = monthly_payment * months as f64;

        Self {
            loan_amount,
            monthly_payment,
            annual_payment: monthly_payment * 12.,
            total_payment,
            total_interest: total_payment - loan_amount,
            first_year: first_year_breakdown(loan_amount, monthly_payment, monthly_rate),
            final_year: loan.year_breakdown(profile.term_years),
        }
    }
}

/// Everything the console report shows, computed for one profile.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HousingLoanReport {
    pub profile: BorrowerProfile,
    pub conservative: Affordability,
    pub simulation: RepaymentSimulation,
    pub comparison: Affordability,
}

impl HousingLoanReport {
    pub fn new(profile: BorrowerProfile) -> Self {
        let conservative = Affordability::assess(&profile, profile.repayment_ratio);
        let simulation = RepaymentSimulation::run(&profile, conservative.max_loan);
        let comparison = Affordability::assess(&profile, profile.comparison_ratio);

        Self {
            profile,
            conservative,
            simulation,
            comparison,
        }
    }

    /// Extra house price the comparison ratio buys over the conservative one.
    pub fn price_difference(&self) -> f64 {
        self.comparison.max_house_price - self.conservative.max_house_price
    }

    pub fn render(&self, currency: &CurrencyFormatter) -> String {
        ReportView {
            report: self,
            currency,
        }
        .to_string()
    }
}

struct ReportView<'a> {
    report: &'a HousingLoanReport,
    currency: &'a CurrencyFormatter,
}

impl ReportView<'_> {
    fn yen(&self, amount: f64) -> String {
        self.currency.format(amount)
    }

    fn write_breakdown(
        &self,
        f: &mut fmt::Formatter<'_>,
        breakdown: &YearBreakdown,
    ) -> fmt::Result {
        writeln!(f, "利息: {}", self.yen(breakdown.interest))?;
        writeln!(f, "元金: {}", self.yen(breakdown.principal))?;
        writeln!(f, "合計: {}", self.yen(breakdown.total()))
    }
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let profile = &report.profile;
        let conservative = &report.conservative;
        let simulation = &report.simulation;
        let comparison = &report.comparison;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "住宅ローン計算プログラム")?;
        writeln!(
            f,
            "年収{:.0}万円、金遣いが荒い人の場合",
            profile.annual_income / 10_000.
        )?;
        writeln!(f, "【フルローン（頭金なし）】")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        writeln!(f, "【基本情報】")?;
        writeln!(f, "年収: {}", self.yen(profile.annual_income))?;
        writeln!(f, "金遣い: 荒い（生活費が高い）")?;
        writeln!(
            f,
            "→ 返済可能額を保守的に設定（年収の{:.0}%）",
            profile.repayment_ratio * 100.
        )?;

        writeln!(f, "\n【返済可能額の計算】")?;
        writeln!(f, "年収: {}", self.yen(profile.annual_income))?;
        writeln!(
            f,
            "返済比率（金遣いが荒い場合）: {:.1}%",
            conservative.repayment_ratio * 100.
        )?;
        writeln!(f, "年間返済可能額: {}", self.yen(conservative.annual_capacity))?;
        writeln!(f, "月々返済可能額: {}", self.yen(conservative.monthly_capacity))?;

        writeln!(f, "\n【借入可能額の計算】")?;
        writeln!(f, "金利: {:.2}%（年利）", profile.annual_rate * 100.)?;
        writeln!(f, "返済期間: {}年", profile.term_years)?;
        writeln!(f, "最大借入可能額: {}", self.yen(conservative.max_loan))?;

        writeln!(f, "\n【購入可能なマンション価格（フルローン）】")?;
        writeln!(
            f,
            "頭金比率: {:.0}%（フルローン）",
            profile.down_payment_ratio * 100.
        )?;
        writeln!(f, "最大購入可能価格: {}", self.yen(conservative.max_house_price))?;
        writeln!(f, "  - 借入額: {}（全額借入）", self.yen(conservative.max_loan))?;
        writeln!(f, "  - 頭金: {}", self.yen(conservative.down_payment))?;

        writeln!(f, "\n【返済シミュレーション】")?;
        writeln!(f, "借入額: {}", self.yen(simulation.loan_amount))?;
        writeln!(f, "月々返済額: {}", self.yen(simulation.monthly_payment))?;
        writeln!(f, "年間返済額: {}", self.yen(simulation.annual_payment))?;
        writeln!(f, "総返済額: {}", self.yen(simulation.total_payment))?;
        writeln!(f, "支払利息総額: {}", self.yen(simulation.total_interest))?;

        writeln!(f, "\n【返済内訳（初年度）】")?;
        self.write_breakdown(f, &simulation.first_year)?;

        if let Some(final_year) = &simulation.final_year {
            writeln!(f, "\n【返済内訳（最終年度）】")?;
            self.write_breakdown(f, final_year)?;
        }

        writeln!(
            f,
            "\n【参考：通常の返済比率（{:.0}%）の場合】",
            comparison.repayment_ratio * 100.
        )?;
        writeln!(f, "年間返済可能額: {}", self.yen(comparison.annual_capacity))?;
        writeln!(f, "最大購入可能価格: {}", self.yen(comparison.max_house_price))?;
        writeln!(f, "差額: {}", self.yen(report.price_difference()))
    }
}

#[cfg(test)]
mod tests {
    use super::{HousingLoanReport, RepaymentSimulation};
    use crate::currency::CurrencyFormatter;
    use crate::profile::BorrowerProfile;
    use test_log::test;

    #[test]
    fn test_simulation() {
        let profile = BorrowerProfile::default();
        let simulation = RepaymentSimulation::run(&profile, 66_422_068.388_961);

        assert!((simulation.monthly_payment - 187_500.).abs() < 1e-4);
        assert!((simulation.annual_payment - 2_250_000.).abs() < 1e-3);
        assert!((simulation.total_payment - 78_750_000.).abs() < 1e-2);
        assert!((simulation.total_interest - 12_327_931.611_039).abs() < 1e-2);
        assert!((simulation.first_year.total() - simulation.annual_payment).abs() < 1e-6);

        let final_year = simulation.final_year.unwrap();
        assert_eq!(final_year.year, 35);
        assert!(final_year.interest < simulation.first_year.interest);
    }

    #[test]
    fn test_report_figures() {
        let report = HousingLoanReport::new(BorrowerProfile::default());

        assert_eq!(report.conservative.annual_capacity, 2_250_000.);
        assert_eq!(report.conservative.monthly_capacity, 187_500.);
        assert_eq!(report.comparison.annual_capacity, 2_700_000.);
        assert_eq!(report.simulation.loan_amount, report.conservative.max_loan);
        assert!(report.price_difference() > 0.);
    }

    #[test]
    fn test_render_fallback() {
        let report = HousingLoanReport::new(BorrowerProfile::default());
        let text = report.render(&CurrencyFormatter::Fallback);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "住宅ローン計算プログラム");
        assert_eq!(lines[2], "年収900万円、金遣いが荒い人の場合");
        assert_eq!(lines[5], "");
        assert!(text.contains("→ 返済可能額を保守的に設定（年収の25%）\n"));
        assert!(text.contains("返済比率（金遣いが荒い場合）: 25.0%\n"));
        assert!(text.contains("年間返済可能額: ¥2,250,000\n"));
        assert!(text.contains("月々返済可能額: ¥187,500\n"));
        assert!(text.contains("金利: 1.00%（年利）\n"));
        assert!(text.contains("返済期間: 35年\n"));
        assert!(text.contains("最大借入可能額: ¥66,422,068\n"));
        assert!(text.contains("頭金比率: 0%（フルローン）\n"));
        assert!(text.contains("  - 借入額: ¥66,422,068（全額借入）\n"));
        assert!(text.contains("  - 頭金: ¥0\n"));
        assert!(text.contains("月々返済額: ¥187,500\n"));
        assert!(text.contains("総返済額: ¥78,750,000\n"));
        assert!(text.contains("支払利息総額: ¥12,327,932\n"));
        assert!(text.contains("【返済内訳（初年度）】\n利息: ¥656,932\n元金: ¥1,593,068\n合計: ¥2,250,000\n"));
        assert!(text.contains("【返済内訳（最終年度）】\n"));
        assert!(text.contains("【参考：通常の返済比率（30%）の場合】\n"));
        assert!(text.contains("最大購入可能価格: ¥79,706,482\n"));
        assert!(text.ends_with("差額: ¥13,284,414\n"));
    }

    #[test]
    fn test_render_localized() {
        let report = HousingLoanReport::new(BorrowerProfile::default());
        let text = report.render(&CurrencyFormatter::Localized);

        assert!(text.contains("年収: ￥9,000,000\n"));
        assert!(!text.contains('¥'));
    }
}
