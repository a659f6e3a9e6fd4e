//! Dividend-versus-wage tax calculations.
//!
//! Leaf components first: bracket schedules ([`bracket_table`]), the
//! combined federal/provincial walk ([`marginal`]), dividend credits
//! ([`dividend`]) and payroll deductions ([`payroll`]). [`comparison`]
//! composes them into one record per income.

pub mod bracket_table;
pub mod common;
pub mod comparison;
pub mod dividend;
pub mod error;
pub mod marginal;
pub mod payroll;
pub mod rates;

pub use bracket_table::{BracketSet, BracketTable, BracketWalk, lookup_tax_rate};
pub use comparison::{ComparisonAssembler, calculate_tax_comparison};
pub use dividend::{DividendTaxCalculator, DividendTaxResult, calculate_dividend_tax};
pub use error::{BracketSetError, TaxCalculationError};
pub use marginal::{
    IncomeCarryover, MarginalRateResult, MarginalTaxCalculator,
    calculate_combined_marginal_tax_rate,
};
pub use payroll::{PayrollDeductionEstimator, PayrollDeductions, estimate_payroll_deductions};
