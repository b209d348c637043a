use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Legacy "effectively zero" threshold carried over from balances that were
/// once computed in binary floating point.
pub const LEGACY_TOLERANCE: Decimal = dec!(0.01);

/// Tuning for the settlement reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Users whose balance is within this distance of zero are left out of
    /// the plan. A matching cursor moves on once its remaining amount drops
    /// below it (or reaches zero when the tolerance is zero).
    pub tolerance: Decimal,
}

impl SettlementConfig {
    /// Exact arithmetic: only a zero balance counts as settled.
    pub fn exact() -> Self {
        Self {
            tolerance: Decimal::ZERO,
        }
    }

    /// Use a custom tolerance. Negative values are clamped to zero.
    pub fn with_tolerance(tolerance: Decimal) -> Self {
        Self {
            tolerance: tolerance.max(Decimal::ZERO),
        }
    }

    /// Whether `amount` is close enough to zero to be treated as settled.
    pub fn is_settled(&self, amount: Decimal) -> bool {
        amount.abs() <= self.tolerance
    }

    /// Whether a creditor or debtor with `remaining` left is done during
    /// matching. Strictly below the tolerance, so a leftover of exactly one
    /// tolerance still gets its own transfer.
    pub fn is_exhausted(&self, remaining: Decimal) -> bool {
        if self.tolerance.is_zero() {
            remaining.is_zero()
        } else {
            remaining.abs() < self.tolerance
        }
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: LEGACY_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_legacy_tolerance() {
        let config = SettlementConfig::default();
        assert_eq!(config.tolerance, dec!(0.01));
        assert!(config.is_settled(dec!(0.01)));
        assert!(config.is_settled(dec!(-0.005)));
        assert!(!config.is_settled(dec!(0.011)));
    }

    #[test]
    fn test_exact_only_accepts_zero() {
        let config = SettlementConfig::exact();
        assert!(config.is_settled(Decimal::ZERO));
        assert!(!config.is_settled(dec!(0.000001)));
    }

    #[test]
    fn test_exhausted_is_strictly_below_tolerance() {
        let config = SettlementConfig::default();
        assert!(config.is_exhausted(Decimal::ZERO));
        assert!(config.is_exhausted(dec!(0.009)));
        assert!(!config.is_exhausted(dec!(0.01)));

        let exact = SettlementConfig::exact();
        assert!(exact.is_exhausted(Decimal::ZERO));
        assert!(!exact.is_exhausted(dec!(0.000001)));
    }

    #[test]
    fn test_negative_tolerance_clamped() {
        let config = SettlementConfig::with_tolerance(dec!(-1));
        assert_eq!(config.tolerance, Decimal::ZERO);
    }
}
