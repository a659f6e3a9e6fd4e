//! CPP and EI deductions on wage income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxCalculationError;
use crate::PayrollRates;

/// Payroll deductions withheld from a salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDeductions {
    pub cpp: Decimal,
    pub ei: Decimal,
}

impl PayrollDeductions {
    pub fn total(&self) -> Decimal {
        self.cpp + self.ei
    }
}

/// Flat-rate estimate of CPP and EI. Annual maximums are not applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayrollDeductionEstimator {
    rates: PayrollRates,
}

impl PayrollDeductionEstimator {
    pub fn new(rates: PayrollRates) -> Self {
        Self { rates }
    }

    /// # Errors
    ///
    /// - [`TaxCalculationError::InvalidIncome`] for negative income
    /// - [`TaxCalculationError::Overflow`] if a deduction or their sum exceeds
    ///   the decimal range
    pub fn estimate(
        &self,
        income: Decimal,
    ) -> Result<PayrollDeductions, TaxCalculationError> {
        if income < Decimal::ZERO {
            return Err(TaxCalculationError::InvalidIncome(income));
        }

        let overflow = || TaxCalculationError::Overflow(income);
        let cpp = income.checked_mul(self.rates.cpp_rate).ok_or_else(overflow)?;
        let ei = income.checked_mul(self.rates.ei_rate).ok_or_else(overflow)?;
        cpp.checked_add(ei).ok_or_else(overflow)?;

        Ok(PayrollDeductions { cpp, ei })
    }
}

/// Estimates CPP and EI with [`PayrollRates::STANDARD`].
pub fn estimate_payroll_deductions(
    income: Decimal,
) -> Result<PayrollDeductions, TaxCalculationError> {
    PayrollDeductionEstimator::default().estimate(income)
}
