//! Hard-coded rate schedules.
//!
//! Only British Columbia is configured. Adding a province means adding its
//! bracket schedule here, registering it in [`jurisdiction_brackets`], and
//! giving it an arm in [`DividendRates::for_jurisdiction`].
//!
//! [`DividendRates::for_jurisdiction`]: crate::DividendRates::for_jurisdiction

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::TaxBracket;

pub const BRITISH_COLUMBIA: &str = "British Columbia";

/// Incomes compared when the caller does not supply any.
pub const DEFAULT_INCOMES: [Decimal; 2] = [dec!(50000), dec!(75000)];

pub const FEDERAL_BRACKETS: [TaxBracket; 5] = [
    TaxBracket::capped(dec!(53359), dec!(0.15)),
    TaxBracket::capped(dec!(106717), dec!(0.205)),
    TaxBracket::capped(dec!(165430), dec!(0.26)),
    TaxBracket::capped(dec!(235675), dec!(0.29)),
    TaxBracket::unbounded(dec!(0.33)),
];

pub const BRITISH_COLUMBIA_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::capped(dec!(45654), dec!(0.0506)),
    TaxBracket::capped(dec!(91310), dec!(0.077)),
    TaxBracket::capped(dec!(104835), dec!(0.105)),
    TaxBracket::capped(dec!(127299), dec!(0.1229)),
    TaxBracket::capped(dec!(172602), dec!(0.147)),
    TaxBracket::capped(dec!(240716), dec!(0.168)),
    TaxBracket::unbounded(dec!(0.205)),
];

/// Every configured jurisdiction paired with its bracket schedule.
pub fn jurisdiction_brackets() -> [(&'static str, &'static [TaxBracket]); 1] {
    [(BRITISH_COLUMBIA, &BRITISH_COLUMBIA_BRACKETS)]
}
