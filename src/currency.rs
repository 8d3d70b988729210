//! Yen formatting.
//!
//! A Japanese system locale gets the localized rendering (full-width `￥`).
//! Any other locale, or none at all, falls back to a plain `¥` with
//! thousands grouping. Both render whole yen.

use log::debug;
use sys_locale::get_locale;
use thiserror::Error;

const LOCALIZED_YEN: &str = "￥";
const FALLBACK_YEN: &str = "¥";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("system locale could not be determined")]
    LocaleUndetected,

    #[error("locale {0} has no yen currency conventions")]
    UnsupportedLocale(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CurrencyFormatter {
    Localized,
    Fallback,
}

impl CurrencyFormatter {
    /// Resolves the formatter for the current system locale.
    ///
    /// Whether Japanese currency conventions are available is approximated
    /// by the active locale: only a Japanese locale gets `Localized`, even
    /// on hosts that have Japanese locale data installed.
    pub fn detect() -> Self {
        Self::for_locale(get_locale().as_deref())
    }

    pub fn for_locale(locale: Option<&str>) -> Self {
        match yen_conventions(locale) {
            Ok(()) => CurrencyFormatter::Localized,
            Err(e) => {
                debug!("falling back to manual yen formatting: {}", e);
                CurrencyFormatter::Fallback
            }
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyFormatter::Localized => LOCALIZED_YEN,
            CurrencyFormatter::Fallback => FALLBACK_YEN,
        }
    }

    pub fn format(&self, amount: f64) -> String {
        let symbol = self.symbol();
        if !amount.is_finite() {
            return format!("{}{}", symbol, amount);
        }

        let digits = group_thousands(&format!("{:.0}", amount.abs()));
        match self {
            // the sign follows the symbol and a rounded negative zero keeps it
            CurrencyFormatter::Fallback => {
                let sign = if amount.is_sign_negative() { "-" } else { "" };
                format!("{}{}{}", symbol, sign, digits)
            }
            CurrencyFormatter::Localized => {
                let sign = if amount.is_sign_negative() && digits != "0" {
                    "-"
                } else {
                    ""
                };
                format!("{}{}{}", sign, symbol, digits)
            }
        }
    }
}

/// Formats `amount` for the current system locale, e.g. `¥1,000,000`.
pub fn format_currency(amount: f64) -> String {
    CurrencyFormatter::detect().format(amount)
}

fn yen_conventions(locale: Option<&str>) -> Result<(), CurrencyError> {
    let locale = locale.ok_or(CurrencyError::LocaleUndetected)?;
    let lang = locale
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if lang == "ja" {
        Ok(())
    } else {
        Err(CurrencyError::UnsupportedLocale(locale.to_string()))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{group_thousands, yen_conventions, CurrencyError, CurrencyFormatter};
    use test_log::test;

    #[test]
    fn test_fallback_format() {
        let fallback = CurrencyFormatter::for_locale(None);
        assert_eq!(fallback, CurrencyFormatter::Fallback);
        assert_eq!(fallback.format(1_000_000.), "¥1,000,000");
        assert_eq!(fallback.format(66_422_068.388_961), "¥66,422,068");
        assert_eq!(fallback.format(999.4), "¥999");
        assert_eq!(fallback.format(0.), "¥0");
        assert_eq!(fallback.format(-0.3), "¥-0");
        assert_eq!(fallback.format(-1_234.), "¥-1,234");
        assert_eq!(fallback.format(-1_234_567.8), "¥-1,234,568");
    }

    #[test]
    fn test_localized_format() {
        let localized = CurrencyFormatter::for_locale(Some("ja-JP"));
        assert_eq!(localized, CurrencyFormatter::Localized);
        assert_eq!(localized.format(1_000_000.), "￥1,000,000");
        assert_eq!(localized.format(187_500.), "￥187,500");
        assert_eq!(localized.format(-1_234.), "-￥1,234");
        assert_eq!(localized.format(-0.3), "￥0");
    }

    #[test]
    fn test_locale_resolution() {
        assert_eq!(yen_conventions(Some("ja_JP.UTF-8")), Ok(()));
        assert_eq!(yen_conventions(Some("JA")), Ok(()));
        assert_eq!(yen_conventions(None), Err(CurrencyError::LocaleUndetected));
        assert_eq!(
            yen_conventions(Some("en-US")),
            Err(CurrencyError::UnsupportedLocale("en-US".to_string()))
        );
        assert_eq!(
            CurrencyFormatter::for_locale(Some("C")),
            CurrencyFormatter::Fallback
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_non_finite() {
        let fallback = CurrencyFormatter::Fallback;
        assert_eq!(fallback.format(f64::NAN), "¥NaN");
        assert_eq!(fallback.format(f64::INFINITY), "¥inf");
    }
}
