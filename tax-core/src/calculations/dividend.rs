//! Eligible-dividend gross-up and tax credit calculation.
//!
//! The cash dividend is grossed up by the federal and provincial gross-up
//! rates together; each level of government then grants a credit on the
//! grossed-up amount. The net dividend is the cash dividend less both credits.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::calculate_dividend_tax;
//!
//! let result = calculate_dividend_tax(dec!(50000), "British Columbia").unwrap();
//!
//! assert_eq!(result.grossed_up_dividend, dec!(75000));
//! assert_eq!(result.federal_tax_credit, dec!(11264.85));
//! assert_eq!(result.provincial_tax_credit, dec!(9000));
//! assert_eq!(result.net_dividend, dec!(29735.15));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TaxCalculationError;
use crate::DividendRates;

/// Result of a dividend gross-up and credit calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendTaxResult {
    pub grossed_up_dividend: Decimal,
    pub federal_tax_credit: Decimal,
    pub provincial_tax_credit: Decimal,
    pub net_dividend: Decimal,
}

impl DividendTaxResult {
    pub fn total_credit(&self) -> Decimal {
        self.federal_tax_credit + self.provincial_tax_credit
    }
}

/// Applies a federal and a provincial set of [`DividendRates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividendTaxCalculator {
    federal: DividendRates,
    provincial: DividendRates,
}

impl DividendTaxCalculator {
    pub fn new(
        federal: DividendRates,
        provincial: DividendRates,
    ) -> Self {
        Self {
            federal,
            provincial,
        }
    }

    /// Calculator using the federal rates and those configured for `jurisdiction`.
    pub fn for_jurisdiction(jurisdiction: &str) -> Self {
        Self::new(
            DividendRates::FEDERAL,
            DividendRates::for_jurisdiction(jurisdiction),
        )
    }

    /// Grosses up `income` and computes both credits.
    ///
    /// # Errors
    ///
    /// - [`TaxCalculationError::InvalidIncome`] for negative income
    /// - [`TaxCalculationError::Overflow`] if the grossed-up amount or a credit
    ///   exceeds the decimal range
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Result<DividendTaxResult, TaxCalculationError> {
        if income < Decimal::ZERO {
            return Err(TaxCalculationError::InvalidIncome(income));
        }
        let overflow = || TaxCalculationError::Overflow(income);

        let factor = Decimal::ONE
            .checked_add(self.federal.gross_up)
            .and_then(|f| f.checked_add(self.provincial.gross_up))
            .ok_or_else(overflow)?;
        let grossed_up_dividend = income.checked_mul(factor).ok_or_else(overflow)?;
        let federal_tax_credit = grossed_up_dividend
            .checked_mul(self.federal.credit)
            .ok_or_else(overflow)?;
        let provincial_tax_credit = grossed_up_dividend
            .checked_mul(self.provincial.credit)
            .ok_or_else(overflow)?;
        let net_dividend = federal_tax_credit
            .checked_add(provincial_tax_credit)
            .and_then(|credits| income.checked_sub(credits))
            .ok_or_else(overflow)?;

        debug!(
            %income,
            %grossed_up_dividend,
            %federal_tax_credit,
            %provincial_tax_credit,
            "dividend credits calculated"
        );

        Ok(DividendTaxResult {
            grossed_up_dividend,
            federal_tax_credit,
            provincial_tax_credit,
            net_dividend,
        })
    }
}

/// Calculates dividend credits for `income` in `jurisdiction`.
pub fn calculate_dividend_tax(
    income: Decimal,
    jurisdiction: &str,
) -> Result<DividendTaxResult, TaxCalculationError> {
    DividendTaxCalculator::for_jurisdiction(jurisdiction).calculate(income)
}
