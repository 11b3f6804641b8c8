//! Brazilian real amounts as rendered on marketplace pages.
//!
//! Amounts look like `R$ 1.234,56`: `.` groups thousands and `,` separates
//! two cent digits. Everything here returns `None` rather than an error; an
//! unreadable amount is simply not an observation.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static BRL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*([0-9.]+,[0-9]{2})").expect("valid regex"));

/// One currency amount observed on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyAmount {
    /// Always positive.
    pub amount: Decimal,
    /// The amount was introduced by a "previous price" marker (`de R$ ...`).
    pub is_previous: bool,
}

impl MoneyAmount {
    #[must_use]
    pub fn current(amount: Decimal) -> Self {
        Self {
            amount,
            is_previous: false,
        }
    }

    #[must_use]
    pub fn previous(amount: Decimal) -> Self {
        Self {
            amount,
            is_previous: true,
        }
    }
}

/// Parse the first `R$ <digits>,<cents>` token in `text`.
///
/// ```
/// use rust_decimal::Decimal;
/// use zuni_extract::money::parse_brl;
///
/// assert_eq!(parse_brl("por R$ 1.299,90 à vista"), Some(Decimal::new(129_990, 2)));
/// assert_eq!(parse_brl("R$ 12"), None);
/// ```
#[must_use]
pub fn parse_brl(text: &str) -> Option<Decimal> {
    let caps = BRL_RE.captures(text)?;
    parse_brl_digits(caps.get(1)?.as_str())
}

/// Parse the numeric part of a BRL token, e.g. `"1.234,56"`.
///
/// Returns `None` for anything that does not parse to a positive amount.
#[must_use]
pub fn parse_brl_digits(raw: &str) -> Option<Decimal> {
    let normalized = raw.replace('.', "").replacen(',', ".", 1);
    positive(Decimal::from_str(&normalized).ok()?)
}

/// Parse a machine-formatted decimal such as a `content="89.90"` attribute
/// or a structured-data price string.
///
/// Accepts plain (`89.90`), scientific (`8.99e1`) and, when no `.` is
/// present, comma-decimal (`89,90`) forms.
#[must_use]
pub fn parse_plain_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .or_else(|| {
            if trimmed.contains('.') {
                None
            } else {
                Decimal::from_str(&trimmed.replacen(',', ".", 1)).ok()
            }
        })?;
    positive(value)
}

fn positive(value: Decimal) -> Option<Decimal> {
    (value > Decimal::ZERO).then(|| value.normalize())
}

#[cfg(test)]
#[path = "money_test.rs"]
mod tests;
