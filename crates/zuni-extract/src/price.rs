//! Deciding which observed amount is the regular price and which, if any,
//! is the discounted one.
//!
//! Every rule here produces a [`PricePair`] whose promo, when present, is
//! strictly below the price. A reading that would put the promo at or
//! above the price is turned into "no promo".

use rust_decimal::Decimal;

use crate::money::MoneyAmount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricePair {
    pub price: Option<Decimal>,
    pub promo_price: Option<Decimal>,
}

impl PricePair {
    #[must_use]
    pub fn regular(price: Decimal) -> Self {
        Self {
            price: Some(price),
            promo_price: None,
        }
    }

    /// `price` with `promo` when the promo is strictly lower, else just `price`.
    #[must_use]
    pub fn discounted(price: Decimal, promo: Decimal) -> Self {
        Self {
            price: Some(price),
            promo_price: (promo < price).then_some(promo),
        }
    }

    /// Both amounts are known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.price.is_some() && self.promo_price.is_some()
    }

    /// Enforce the pair invariants.
    ///
    /// A non-positive price is dropped along with its promo. A promo that is
    /// non-positive or not below the price is dropped. A promo without a
    /// price becomes the price.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let positive = |v: Option<Decimal>| v.filter(|v| *v > Decimal::ZERO);
        match (positive(self.price), positive(self.promo_price)) {
            (Some(price), Some(promo)) => Self::discounted(price, promo),
            (Some(price), None) => Self::regular(price),
            (None, Some(promo)) if self.price.is_none() => Self::regular(promo),
            _ => Self::default(),
        }
    }
}

/// Resolve up to N scanned amounts into a price pair.
///
/// 1. Some amounts marked previous and some unmarked: the largest previous
///    amount is the price and the smallest unmarked one the promo. If that
///    promo is not below the price, the price stands alone.
/// 2. Otherwise, with two or more amounts: the two largest distinct values,
///    larger as price.
/// 3. A single amount is the price.
/// 4. No amounts, no price.
#[must_use]
pub fn disambiguate(amounts: &[MoneyAmount]) -> PricePair {
    let max_previous = amounts
        .iter()
        .filter(|a| a.is_previous)
        .map(|a| a.amount)
        .max();
    let min_current = amounts
        .iter()
        .filter(|a| !a.is_previous)
        .map(|a| a.amount)
        .min();

    if let (Some(price), Some(promo)) = (max_previous, min_current) {
        return PricePair::discounted(price, promo);
    }

    let mut distinct: Vec<Decimal> = amounts.iter().map(|a| a.amount).collect();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    match distinct.as_slice() {
        [] => PricePair::default(),
        [price] => PricePair::regular(*price),
        [price, promo, ..] => PricePair::discounted(*price, *promo),
    }
}

/// Reconcile a marked-up original (crossed-out) price with a current price.
///
/// A lone amount is always the regular price, never a promo by itself.
/// `None` when neither amount was found, or when both were found but the
/// current amount is not below the original; the widgets disagree and the
/// caller should look elsewhere.
#[must_use]
pub fn reconcile_original_and_current(
    original: Option<Decimal>,
    current: Option<Decimal>,
) -> Option<PricePair> {
    match (original, current) {
        (Some(original), Some(current)) if current < original => {
            Some(PricePair::discounted(original, current))
        }
        (Some(amount), None) | (None, Some(amount)) => Some(PricePair::regular(amount)),
        _ => None,
    }
}

/// Structured-data offer: a high/low range wins when `high > low`,
/// otherwise the single `price` field is the regular price.
#[must_use]
pub fn from_offer_range(
    high: Option<Decimal>,
    low: Option<Decimal>,
    single: Option<Decimal>,
) -> PricePair {
    match (high, low) {
        (Some(high), Some(low)) if high > low => PricePair::discounted(high, low),
        _ => PricePair {
            price: single,
            promo_price: None,
        },
    }
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
