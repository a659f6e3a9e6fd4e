use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat employee contribution rates for the two statutory payroll deductions.
///
/// There are no annual maximums; both rates apply to every dollar of wages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRates {
    /// Canada Pension Plan contribution rate.
    pub cpp_rate: Decimal,
    /// Employment Insurance premium rate.
    pub ei_rate: Decimal,
}

impl PayrollRates {
    pub const STANDARD: Self = Self {
        cpp_rate: dec!(0.051),
        ei_rate: dec!(0.0158),
    };
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self::STANDARD
    }
}
