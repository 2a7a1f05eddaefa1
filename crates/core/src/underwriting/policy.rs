//! Underwriting policy parameters.

use quoin_shared::config::UnderwritingConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Policy parameters for sizing a DSCR loan.
///
/// The debt rate is a market index rate plus a fixed lender spread. These
/// values track the market over time, so they are carried as configuration
/// rather than literals; the defaults preserve the original policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPolicy {
    /// Market index rate, percent per annum.
    pub index_rate: Decimal,
    /// Lender spread over the index, percent per annum.
    pub spread: Decimal,
    /// Debt-service-coverage target (NOI / annual debt payment).
    pub dscr_target: Decimal,
    /// Amortization horizon in months.
    pub amortization_months: u32,
}

impl DebtPolicy {
    /// Returns the all-in debt rate (index + spread), percent per annum.
    #[must_use]
    pub fn debt_rate(&self) -> Decimal {
        self.index_rate + self.spread
    }
}

impl Default for DebtPolicy {
    fn default() -> Self {
        Self {
            index_rate: Decimal::new(298, 2),  // 2.98%
            spread: Decimal::new(200, 2),      // 2.00%
            dscr_target: Decimal::new(125, 2), // 1.25x
            amortization_months: 120,
        }
    }
}

impl From<&UnderwritingConfig> for DebtPolicy {
    fn from(config: &UnderwritingConfig) -> Self {
        Self {
            index_rate: config.index_rate,
            spread: config.spread,
            dscr_target: config.dscr_target,
            amortization_months: config.amortization_months,
        }
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_debt_rate() {
        let policy = DebtPolicy::default();
        assert_eq!(policy.debt_rate(), dec!(4.98));
    }

    #[test]
    fn test_policy_from_config() {
        let config = UnderwritingConfig::default();
        let policy = DebtPolicy::from(&config);
        assert_eq!(policy, DebtPolicy::default());
    }
}
