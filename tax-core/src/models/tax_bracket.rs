use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal band of a progressive rate schedule.
///
/// `upper_limit` is the highest income taxed at `rate`; `None` marks the
/// open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// A bracket capped at `upper_limit`.
    pub const fn capped(
        upper_limit: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    /// The open-ended top bracket.
    pub const fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate,
        }
    }

    /// Returns `true` when `income` does not exceed this bracket's ceiling.
    pub fn covers(
        &self,
        income: Decimal,
    ) -> bool {
        self.upper_limit.is_none_or(|limit| income <= limit)
    }
}
