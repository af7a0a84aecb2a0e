use serde::Serialize;

use stockwatch_core::{DomainError, DomainResult, ValueObject};

/// Unit price. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// How far below `previous` this price is, as `(1 - new/old) * 100`.
    ///
    /// Negative for a rise. Plain float arithmetic: a cut from 25.00 to 22.50
    /// comes out just under 10. `None` when `previous` is zero, since no drop can be
    /// measured from a free item.
    pub fn drop_percent_from(self, previous: Price) -> Option<f64> {
        if previous.0 <= 0.0 {
            return None;
        }
        Some((1.0 - self.0 / previous.0) * 100.0)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Minimum price drop that flags a discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountPolicy {
    threshold_percent: f64,
}

impl ValueObject for DiscountPolicy {}

impl DiscountPolicy {
    pub const DEFAULT_THRESHOLD_PERCENT: f64 = 10.0;

    pub fn new(threshold_percent: f64) -> DomainResult<Self> {
        let in_range = threshold_percent > 0.0 && threshold_percent <= 100.0;
        if !threshold_percent.is_finite() || !in_range {
            return Err(DomainError::validation(format!(
                "discount threshold must be within (0, 100], got {threshold_percent}"
            )));
        }
        Ok(Self { threshold_percent })
    }

    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    pub fn qualifies(&self, old: Price, new: Price) -> bool {
        new.drop_percent_from(old)
            .is_some_and(|pct| pct >= self.threshold_percent)
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            threshold_percent: Self::DEFAULT_THRESHOLD_PERCENT,
        }
    }
}
