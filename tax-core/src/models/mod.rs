mod comparison_record;
mod dividend_rates;
mod payroll_rates;
mod tax_bracket;

pub use comparison_record::{ComparisonRecord, DividendOutcome, WageOutcome};
pub use dividend_rates::DividendRates;
pub use payroll_rates::PayrollRates;
pub use tax_bracket::TaxBracket;
