//! Currency conversion for predicted salaries
//!
//! The model predicts in USD. Display additionally shows INR and, when it
//! would not duplicate one of those two, the local currency of the
//! company's country. Rates are static process-lifetime constants relative
//! to USD; the table is injected into the server state so tests can
//! substitute their own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fallback INR rate when a custom table carries no "IN" entry.
const USD_TO_INR_RATE: f64 = 83.5;

/// Currency of a single country: display symbol, ISO name, USD rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub symbol: String,
    pub name: String,
    /// Units of this currency per 1 USD
    pub rate: f64,
}

impl CurrencyInfo {
    fn new(symbol: &str, name: &str, rate: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            rate,
        }
    }

    fn usd() -> Self {
        Self::new("$", "USD", 1.0)
    }
}

/// One converted amount in the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyLine {
    pub symbol: String,
    pub name: String,
    pub amount: f64,
}

/// A predicted salary rendered in every applicable currency.
///
/// `local` is `None` when the company country's currency is USD or INR,
/// which would duplicate one of the two lines that are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryQuote {
    pub usd: f64,
    pub inr: f64,
    pub local: Option<CurrencyLine>,
}

impl SalaryQuote {
    /// Display lines in panel order: USD, INR, then the local currency.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} (USD)", format_amount("$", self.usd)),
            format!("{} (INR)", format_amount("₹", self.inr)),
        ];

        if let Some(local) = &self.local {
            lines.push(format!(
                "{} ({})",
                format_amount(&local.symbol, local.amount),
                local.name
            ));
        }

        lines
    }
}

/// Country-code → currency lookup table.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    entries: HashMap<String, CurrencyInfo>,
}

impl CurrencyTable {
    /// Build a table from explicit entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, CurrencyInfo)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The built-in table covering the company locations the form offers.
    pub fn builtin() -> Self {
        const EUR: f64 = 0.92;

        let rows: &[(&str, &str, &str, f64)] = &[
            ("US", "$", "USD", 1.0),
            ("GB", "£", "GBP", 0.79),
            ("CA", "C$", "CAD", 1.37),
            ("DE", "€", "EUR", EUR),
            ("IN", "₹", "INR", USD_TO_INR_RATE),
            ("FR", "€", "EUR", EUR),
            ("ES", "€", "EUR", EUR),
            ("AU", "A$", "AUD", 1.50),
            ("BR", "R$", "BRL", 5.40),
            ("NL", "€", "EUR", EUR),
            ("JP", "¥", "JPY", 157.0),
            ("CH", "CHF", "CHF", 0.89),
            ("IT", "€", "EUR", EUR),
            ("PL", "zł", "PLN", 4.05),
            ("PT", "€", "EUR", EUR),
            ("MX", "$", "MXN", 18.0),
            ("DK", "kr", "DKK", 6.90),
            ("GR", "€", "EUR", EUR),
            ("TR", "₺", "TRY", 32.5),
            ("AT", "€", "EUR", EUR),
            ("BE", "€", "EUR", EUR),
            ("IE", "€", "EUR", EUR),
            ("LU", "€", "EUR", EUR),
            ("NG", "₦", "NGN", 1500.0),
            ("PK", "₨", "PKR", 278.0),
            ("RU", "₽", "RUB", 87.0),
            ("SG", "S$", "SGD", 1.35),
            ("UA", "₴", "UAH", 40.0),
            ("AE", "د.إ", "AED", 3.67),
            ("CL", "CLP", "CLP", 930.0),
            ("CO", "$", "COP", 4000.0),
            ("CY", "€", "EUR", EUR),
            ("CZ", "Kč", "CZK", 23.0),
            ("EE", "€", "EUR", EUR),
            ("FI", "€", "EUR", EUR),
            ("GH", "₵", "GHS", 15.0),
            ("HR", "€", "EUR", EUR),
            ("HU", "Ft", "HUF", 360.0),
            ("IR", "﷼", "IRR", 42000.0),
            ("MT", "€", "EUR", EUR),
            ("NZ", "NZ$", "NZD", 1.63),
            ("PH", "₱", "PHP", 58.0),
            // Puerto Rico uses USD
            ("PR", "$", "USD", 1.0),
            ("RO", "lei", "RON", 4.60),
            ("SI", "€", "EUR", EUR),
            ("SK", "€", "EUR", EUR),
            ("TH", "฿", "THB", 36.0),
            ("VN", "₫", "VND", 25400.0),
        ];

        Self::from_entries(
            rows.iter()
                .map(|(code, symbol, name, rate)| {
                    (code.to_string(), CurrencyInfo::new(symbol, name, *rate))
                }),
        )
    }

    /// Number of mapped country codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Country codes present in the table.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Currency for a country code; unmapped codes fall back to USD at 1.0.
    pub fn lookup(&self, country_code: &str) -> CurrencyInfo {
        self.entries
            .get(country_code)
            .cloned()
            .unwrap_or_else(CurrencyInfo::usd)
    }

    /// Convert a USD amount into the local currency of `country_code`.
    pub fn convert(&self, amount_usd: f64, country_code: &str) -> f64 {
        amount_usd * self.lookup(country_code).rate
    }

    /// Rate used for the always-present INR line.
    fn inr_rate(&self) -> f64 {
        self.entries
            .get("IN")
            .map(|c| c.rate)
            .unwrap_or(USD_TO_INR_RATE)
    }

    /// Build the full quote for a predicted USD salary.
    pub fn quote(&self, salary_usd: f64, country_code: &str) -> SalaryQuote {
        let local_info = self.lookup(country_code);

        let local = if local_info.name != "USD" && local_info.name != "INR" {
            Some(CurrencyLine {
                symbol: local_info.symbol.clone(),
                name: local_info.name.clone(),
                amount: salary_usd * local_info.rate,
            })
        } else {
            None
        };

        SalaryQuote {
            usd: salary_usd,
            inr: salary_usd * self.inr_rate(),
            local,
        }
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Format an amount with its currency symbol, thousands separators, and
/// two decimal places, e.g. `$100,000.00`.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        frac_part
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_matches_table_rate_for_all_codes() {
        let table = CurrencyTable::builtin();
        let amount = 50_000.0;

        for code in table.codes().map(str::to_string).collect::<Vec<_>>() {
            let expected = amount * table.lookup(&code).rate;
            assert_eq!(table.convert(amount, &code), expected, "code {}", code);

            // INR line is always present regardless of code
            let quote = table.quote(amount, &code);
            assert!((quote.inr - amount * 83.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_local_line_suppressed_for_usd_and_inr_countries() {
        let table = CurrencyTable::builtin();

        assert!(table.quote(90_000.0, "US").local.is_none());
        assert!(table.quote(90_000.0, "IN").local.is_none());
        // Puerto Rico is USD-denominated as well
        assert!(table.quote(90_000.0, "PR").local.is_none());

        let gb = table.quote(90_000.0, "GB").local.expect("GBP line");
        assert_eq!(gb.name, "GBP");
        assert!((gb.amount - 90_000.0 * 0.79).abs() < 1e-9);
    }

    #[test]
    fn test_unmapped_code_falls_back_to_usd() {
        let table = CurrencyTable::builtin();

        assert_eq!(table.convert(70_000.0, "ZZ"), 70_000.0);
        assert_eq!(table.lookup("ZZ"), CurrencyInfo::usd());
        assert!(table.quote(70_000.0, "ZZ").local.is_none());
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount("$", 100_000.0), "$100,000.00");
        assert_eq!(format_amount("₹", 8_350_000.0), "₹8,350,000.00");
        assert_eq!(format_amount("€", 999.5), "€999.50");
        assert_eq!(format_amount("$", 1_234_567.891), "$1,234,567.89");
        assert_eq!(format_amount("$", 0.0), "$0.00");
    }

    #[test]
    fn test_quote_lines_for_india() {
        // Worked example: Senior Data Scientist in IN at rate 83.5
        let table = CurrencyTable::builtin();
        let quote = table.quote(100_000.0, "IN");
        let lines = quote.lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "$100,000.00 (USD)");
        assert_eq!(lines[1], "₹8,350,000.00 (INR)");
    }

    #[test]
    fn test_quote_with_substituted_table() {
        let table = CurrencyTable::from_entries(vec![
            ("IN".to_string(), CurrencyInfo::new("₹", "INR", 80.0)),
            ("XX".to_string(), CurrencyInfo::new("x", "XXX", 2.0)),
        ]);

        let quote = table.quote(1_000.0, "XX");
        assert_eq!(quote.inr, 80_000.0);
        assert_eq!(quote.local.unwrap().amount, 2_000.0);
    }
}
