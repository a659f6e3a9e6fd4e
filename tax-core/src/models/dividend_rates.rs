use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::rates::BRITISH_COLUMBIA;

/// Gross-up and credit rates for eligible dividends at one level of government.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendRates {
    /// Fraction added on top of the cash dividend when grossing it up.
    pub gross_up: Decimal,
    /// Credit rate applied to the grossed-up amount.
    pub credit: Decimal,
}

impl DividendRates {
    pub const ZERO: Self = Self {
        gross_up: Decimal::ZERO,
        credit: Decimal::ZERO,
    };

    pub const FEDERAL: Self = Self {
        gross_up: dec!(0.38),
        credit: dec!(0.150198),
    };

    pub const BRITISH_COLUMBIA: Self = Self {
        gross_up: dec!(0.12),
        credit: dec!(0.12),
    };

    /// Provincial rates for `jurisdiction`.
    ///
    /// Jurisdictions without configured rates get [`DividendRates::ZERO`],
    /// so their dividends carry no provincial gross-up or credit.
    pub fn for_jurisdiction(jurisdiction: &str) -> Self {
        match jurisdiction {
            BRITISH_COLUMBIA => Self::BRITISH_COLUMBIA,
            other => {
                warn!(jurisdiction = other, "no provincial dividend rates configured, using zero");
                Self::ZERO
            }
        }
    }
}
