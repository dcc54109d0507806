//! Locale-aware display strings for amounts, rates and dates
//!
//! Follows the typographic conventions of the two supported locales:
//! - fr-FR: `3 345 400 000 000 €` (narrow no-break space between groups,
//!   no-break space before the symbol)
//! - en-US: `$3,906,089,040,000` (comma groups, symbol first)

use chrono::{Datelike, NaiveDate};

use crate::config::DebtConfig;
use crate::language::Language;

/// Group separator used by fr-FR
const NARROW_NO_BREAK_SPACE: char = '\u{202F}';

/// Space between a French amount and its currency symbol
const NO_BREAK_SPACE: char = '\u{A0}';

/// Currency an amount is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }
}

/// Formats values for display in either language
///
/// Amounts are passed in the base currency (EUR). When an exchange rate is
/// configured, English amounts are converted to USD before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formatter {
    exchange_rate: Option<f64>,
}

impl Formatter {
    pub fn new(exchange_rate: Option<f64>) -> Self {
        Self { exchange_rate }
    }

    pub fn from_config(config: &DebtConfig) -> Self {
        Self::new(config.exchange_rate)
    }

    /// Currency amounts are shown in for a language
    pub fn currency_for(&self, language: Language) -> Currency {
        match (language, self.exchange_rate) {
            (Language::English, Some(_)) => Currency::Usd,
            _ => Currency::Eur,
        }
    }

    /// Convert a base-currency amount to the display currency of `language`
    pub fn convert(&self, value: f64, language: Language) -> f64 {
        match (language, self.exchange_rate) {
            (Language::English, Some(rate)) => value * rate,
            _ => value,
        }
    }

    /// Whole-unit currency string, e.g. `1 440 €` or `$1,682`
    pub fn currency(&self, value: f64, language: Language) -> String {
        let amount = round_half_up(self.convert(value, language));
        let sign = if amount < 0.0 { "-" } else { "" };
        let digits = group_digits(amount.abs(), group_separator(language));
        let symbol = self.currency_for(language).symbol();

        match language {
            Language::French => format!("{sign}{digits}{NO_BREAK_SPACE}{symbol}"),
            Language::English => format!("{sign}{symbol}{digits}"),
        }
    }

    /// Rounded integer with locale grouping, e.g. `68 520 000` or `68,520,000`
    pub fn integer(&self, value: f64, language: Language) -> String {
        let rounded = round_half_up(value);
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!("{sign}{}", group_digits(rounded.abs(), group_separator(language)))
    }

    /// The configured exchange rate as shown to English readers (`$1.1676`)
    pub fn exchange_rate_label(&self) -> Option<String> {
        self.exchange_rate.map(|rate| {
            let text = format!("{rate:.4}");
            // Intl keeps at least two fraction digits for USD, at most four
            let trimmed = text.trim_end_matches('0');
            let decimals = trimmed.split('.').nth(1).map_or(0, str::len);
            let text = if decimals < 2 { format!("{rate:.2}") } else { trimmed.to_string() };
            format!("{}{text}", Currency::Usd.symbol())
        })
    }

    /// Interest rate readout with two decimals, e.g. `2.95%`
    pub fn percent(rate: f64) -> String {
        format!("{rate:.2}%")
    }

    /// Short numeric date, `31/03/2025` or `3/31/2025`
    pub fn date(date: NaiveDate, language: Language) -> String {
        match language {
            Language::French => date.format("%d/%m/%Y").to_string(),
            Language::English => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        }
    }
}

/// Round to the nearest integer with halves going up (towards +inf)
///
/// Values in (-0.5, 0) give `+0.0`, so they display as `0` without a sign.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn group_separator(language: Language) -> char {
    match language {
        Language::French => NARROW_NO_BREAK_SPACE,
        Language::English => ',',
    }
}

/// Group the digits of a non-negative whole number, at any magnitude
fn group_digits(value: f64, separator: char) -> String {
    let digits = format!("{value:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len_utf8());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
