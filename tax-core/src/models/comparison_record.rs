use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dividend-versus-wage outcome for a single income amount.
///
/// Built once per income by the comparison assembler and never mutated.
/// Amounts are unrounded; rounding happens when the record is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Gross income the comparison was run for.
    pub income: Decimal,

    /// Income after CPP and EI; both paths are taxed on this amount.
    pub taxable_income: Decimal,

    pub dividends: DividendOutcome,
    pub wages: WageOutcome,
}

/// What the income looks like when paid out as eligible dividends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendOutcome {
    pub federal_credit: Decimal,
    pub provincial_credit: Decimal,

    /// Combined credits as a percentage of gross income.
    pub tax_percentage: Decimal,

    pub take_home: Decimal,
    pub take_home_percentage: Decimal,
}

/// What the income looks like when paid out as salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageOutcome {
    pub cpp: Decimal,
    pub ei: Decimal,
    pub cpp_percentage: Decimal,
    pub ei_percentage: Decimal,

    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,

    /// Federal tax divided by taxable income.
    pub federal_tax_rate: Decimal,

    /// Provincial tax divided by taxable income.
    pub provincial_tax_rate: Decimal,

    /// Federal plus provincial tax as a percentage of gross income.
    pub tax_percentage: Decimal,

    pub take_home: Decimal,
    pub take_home_percentage: Decimal,
}
