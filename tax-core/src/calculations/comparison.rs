//! Dividend-versus-wage comparison records.
//!
//! For every income the assembler withholds CPP and EI, then taxes what is
//! left (the taxable income) both as an eligible dividend and as salary:
//!
//! | Field | Derivation |
//! |-------|------------|
//! | taxable income | income - CPP - EI |
//! | dividend take-home | taxable income - federal credit - provincial credit |
//! | wage take-home | income - CPP - EI - federal tax - provincial tax |
//! | any percentage | amount / income × 100 |
//!
//! Each income is handled independently and output order matches input order.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::calculate_tax_comparison;
//!
//! let records = calculate_tax_comparison(&[dec!(50000)], "British Columbia").unwrap();
//! let record = &records[0];
//!
//! assert_eq!(record.taxable_income, dec!(46660));
//! assert_eq!(record.wages.cpp, dec!(2550));
//! assert_eq!(record.wages.take_home, dec!(37273.4456));
//! assert_eq!(record.dividends.take_home, dec!(27748.84198));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use super::bracket_table::{BracketSet, BracketTable};
use super::common::percentage_of;
use super::dividend::DividendTaxCalculator;
use super::error::TaxCalculationError;
use super::marginal::{IncomeCarryover, MarginalTaxCalculator};
use super::payroll::PayrollDeductionEstimator;
use crate::{ComparisonRecord, DividendOutcome, PayrollRates, WageOutcome};

/// Builds [`ComparisonRecord`]s for one jurisdiction.
#[derive(Debug, Clone)]
pub struct ComparisonAssembler<'a> {
    jurisdiction: String,
    provincial: &'a BracketSet,
    marginal: MarginalTaxCalculator<'a>,
    dividends: DividendTaxCalculator,
    payroll: PayrollDeductionEstimator,
}

impl<'a> ComparisonAssembler<'a> {
    /// Creates an assembler for `jurisdiction`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculationError::UnsupportedJurisdiction`] if `table` has
    /// no bracket schedule for the jurisdiction.
    pub fn new(
        table: &'a BracketTable,
        jurisdiction: &str,
    ) -> Result<Self, TaxCalculationError> {
        let provincial = table.jurisdiction(jurisdiction)?;

        Ok(Self {
            jurisdiction: jurisdiction.to_string(),
            provincial,
            marginal: MarginalTaxCalculator::new(table),
            dividends: DividendTaxCalculator::for_jurisdiction(jurisdiction),
            payroll: PayrollDeductionEstimator::new(PayrollRates::STANDARD),
        })
    }

    pub fn with_carryover(
        mut self,
        carryover: IncomeCarryover,
    ) -> Self {
        self.marginal = self.marginal.with_carryover(carryover);
        self
    }

    pub fn with_payroll_rates(
        mut self,
        rates: PayrollRates,
    ) -> Self {
        self.payroll = PayrollDeductionEstimator::new(rates);
        self
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    /// Builds one record per income, preserving order.
    ///
    /// # Errors
    ///
    /// Stops at the first income that [`assemble_one`](Self::assemble_one)
    /// rejects and returns its error.
    pub fn assemble(
        &self,
        incomes: &[Decimal],
    ) -> Result<Vec<ComparisonRecord>, TaxCalculationError> {
        incomes
            .iter()
            .map(|&income| self.assemble_one(income))
            .collect()
    }

    /// Builds the record for a single income.
    ///
    /// # Errors
    ///
    /// - [`TaxCalculationError::InvalidIncome`] if income is zero or negative
    /// - [`TaxCalculationError::Overflow`] if any amount derived from the
    ///   income leaves the decimal range
    pub fn assemble_one(
        &self,
        income: Decimal,
    ) -> Result<ComparisonRecord, TaxCalculationError> {
        if income <= Decimal::ZERO {
            return Err(TaxCalculationError::InvalidIncome(income));
        }
        // Report overflow against the gross income, not the taxable amount.
        let gross = |err: TaxCalculationError| match err {
            TaxCalculationError::Overflow(_) => TaxCalculationError::Overflow(income),
            other => other,
        };
        let overflow = || TaxCalculationError::Overflow(income);

        let deductions = self.payroll.estimate(income)?;
        let taxable_income = income.checked_sub(deductions.total()).ok_or_else(overflow)?;

        let dividend = self.dividends.calculate(taxable_income).map_err(gross)?;
        let wage = self
            .marginal
            .calculate_with(taxable_income, self.provincial)
            .map_err(gross)?;

        let dividend_take_home = taxable_income
            .checked_sub(dividend.total_credit())
            .ok_or_else(overflow)?;
        let wage_take_home = taxable_income
            .checked_sub(wage.total_tax())
            .ok_or_else(overflow)?;

        debug!(
            jurisdiction = %self.jurisdiction,
            %income,
            %taxable_income,
            %dividend_take_home,
            %wage_take_home,
            "comparison assembled"
        );

        Ok(ComparisonRecord {
            income,
            taxable_income,
            dividends: DividendOutcome {
                federal_credit: dividend.federal_tax_credit,
                provincial_credit: dividend.provincial_tax_credit,
                tax_percentage: percentage_of(dividend.total_credit(), income)?,
                take_home: dividend_take_home,
                take_home_percentage: percentage_of(dividend_take_home, income)?,
            },
            wages: WageOutcome {
                cpp: deductions.cpp,
                ei: deductions.ei,
                cpp_percentage: percentage_of(deductions.cpp, income)?,
                ei_percentage: percentage_of(deductions.ei, income)?,
                federal_tax: wage.federal_tax,
                provincial_tax: wage.provincial_tax,
                federal_tax_rate: wage.federal_tax_rate,
                provincial_tax_rate: wage.provincial_tax_rate,
                tax_percentage: percentage_of(wage.total_tax(), income)?,
                take_home: wage_take_home,
                take_home_percentage: percentage_of(wage_take_home, income)?,
            },
        })
    }
}

/// Compares dividend and wage outcomes with the built-in rate table.
pub fn calculate_tax_comparison(
    incomes: &[Decimal],
    jurisdiction: &str,
) -> Result<Vec<ComparisonRecord>, TaxCalculationError> {
    ComparisonAssembler::new(BracketTable::standard()?, jurisdiction)?.assemble(incomes)
}
