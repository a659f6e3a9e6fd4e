//! Combined federal and provincial tax on wage income.
//!
//! Both schedules are walked with [`BracketSet::walk`]. By default the
//! provincial walk starts from whatever income the federal walk left over
//! rather than from the gross amount ([`IncomeCarryover::Shared`]); the
//! published comparison figures are produced that way. The
//! [`IncomeCarryover::Independent`] mode walks both schedules from gross
//! income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::calculate_combined_marginal_tax_rate;
//!
//! let result = calculate_combined_marginal_tax_rate(dec!(50000), "British Columbia").unwrap();
//!
//! assert_eq!(result.federal_tax, dec!(7500));
//! // 45654 * 0.0506 + (50000 - 45654) * 0.077
//! assert_eq!(result.provincial_tax, dec!(2644.7344));
//! assert_eq!(result.combined_marginal_tax_rate, dec!(0.202894688));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bracket_table::{BracketSet, BracketTable};
use super::error::TaxCalculationError;

/// Which income the provincial bracket walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeCarryover {
    /// The provincial walk continues from the federal walk's leftover income.
    #[default]
    Shared,
    /// Both walks start from the full income.
    Independent,
}

/// Tax owed on an income, expressed as amounts and as fractions of that income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginalRateResult {
    pub income: Decimal,

    /// Federal plus provincial tax divided by income.
    pub combined_marginal_tax_rate: Decimal,

    /// Federal tax divided by income; an average over the whole walk.
    pub federal_tax_rate: Decimal,

    /// Provincial tax divided by income; an average over the whole walk.
    pub provincial_tax_rate: Decimal,

    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,
}

impl MarginalRateResult {
    pub fn total_tax(&self) -> Decimal {
        self.federal_tax + self.provincial_tax
    }
}

/// Computes combined federal and provincial tax from a [`BracketTable`].
#[derive(Debug, Clone)]
pub struct MarginalTaxCalculator<'a> {
    table: &'a BracketTable,
    carryover: IncomeCarryover,
}

impl<'a> MarginalTaxCalculator<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self {
            table,
            carryover: IncomeCarryover::default(),
        }
    }

    pub fn with_carryover(
        mut self,
        carryover: IncomeCarryover,
    ) -> Self {
        self.carryover = carryover;
        self
    }

    pub fn carryover(&self) -> IncomeCarryover {
        self.carryover
    }

    /// Calculates federal and provincial tax for `income` in `jurisdiction`.
    ///
    /// # Errors
    ///
    /// - [`TaxCalculationError::InvalidIncome`] if income is zero or negative
    /// - [`TaxCalculationError::UnsupportedJurisdiction`] if the jurisdiction
    ///   has no bracket schedule
    /// - [`TaxCalculationError::Overflow`] if a walk leaves the decimal range
    pub fn calculate(
        &self,
        income: Decimal,
        jurisdiction: &str,
    ) -> Result<MarginalRateResult, TaxCalculationError> {
        let provincial = self.table.jurisdiction(jurisdiction)?;
        self.calculate_with(income, provincial)
    }

    /// Same as [`calculate`](Self::calculate) with an already resolved provincial schedule.
    pub fn calculate_with(
        &self,
        income: Decimal,
        provincial: &BracketSet,
    ) -> Result<MarginalRateResult, TaxCalculationError> {
        if income <= Decimal::ZERO {
            return Err(TaxCalculationError::InvalidIncome(income));
        }

        let federal_walk = self.table.federal().walk(income)?;
        let provincial_start = match self.carryover {
            IncomeCarryover::Shared => federal_walk.remaining,
            IncomeCarryover::Independent => income,
        };
        let provincial_walk = provincial.walk(provincial_start)?;

        let federal_tax = federal_walk.tax;
        let provincial_tax = provincial_walk.tax;
        let overflow = || TaxCalculationError::Overflow(income);
        let total_tax = federal_tax.checked_add(provincial_tax).ok_or_else(overflow)?;

        debug!(
            %income,
            %federal_tax,
            %provincial_tax,
            %provincial_start,
            carryover = ?self.carryover,
            "bracket walk complete"
        );

        Ok(MarginalRateResult {
            income,
            combined_marginal_tax_rate: total_tax.checked_div(income).ok_or_else(overflow)?,
            federal_tax_rate: federal_tax.checked_div(income).ok_or_else(overflow)?,
            provincial_tax_rate: provincial_tax.checked_div(income).ok_or_else(overflow)?,
            federal_tax,
            provincial_tax,
        })
    }
}

/// Calculates combined tax with the built-in rate table and shared carryover.
pub fn calculate_combined_marginal_tax_rate(
    income: Decimal,
    jurisdiction: &str,
) -> Result<MarginalRateResult, TaxCalculationError> {
    MarginalTaxCalculator::new(BracketTable::standard()?).calculate(income, jurisdiction)
}
