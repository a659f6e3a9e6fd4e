//! Progressive bracket schedules and the process-wide rate table.
//!
//! A [`BracketSet`] is an ordered, validated list of [`TaxBracket`]s whose
//! upper limits strictly increase and whose final bracket is open-ended.
//! [`BracketTable`] pairs the federal schedule with one schedule per
//! supported jurisdiction.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::BracketTable;
//!
//! let table = BracketTable::standard().unwrap();
//! let bc = table.jurisdiction("British Columbia").unwrap();
//!
//! assert_eq!(table.federal().lookup_tax_rate(dec!(60000)), Ok(dec!(0.205)));
//! assert_eq!(bc.lookup_tax_rate(dec!(45654)), Ok(dec!(0.0506)));
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::{BracketSetError, TaxCalculationError};
use super::rates::{FEDERAL_BRACKETS, jurisdiction_brackets};
use crate::TaxBracket;

/// Outcome of walking one bracket schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketWalk {
    /// Tax accumulated across the visited brackets.
    pub tax: Decimal,
    /// Income left over when the walk stopped.
    pub remaining: Decimal,
}

/// An ordered bracket schedule for one taxing authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSet {
    brackets: Vec<TaxBracket>,
}

impl BracketSet {
    /// Validates and wraps a bracket schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BracketSetError`] if the schedule is empty, its limits are
    /// not strictly ascending, a rate lies outside `[0, 1]`, or the open-ended
    /// bracket is missing or not last.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketSetError> {
        if brackets.is_empty() {
            return Err(BracketSetError::Empty);
        }

        let last = brackets.len() - 1;
        let mut previous: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketSetError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.upper_limit {
                Some(limit) => {
                    if index == last {
                        return Err(BracketSetError::MissingUnboundedBracket);
                    }
                    if let Some(previous) = previous {
                        if limit <= previous {
                            return Err(BracketSetError::NotAscending {
                                index,
                                limit,
                                previous,
                            });
                        }
                    }
                    previous = Some(limit);
                }
                None if index != last => return Err(BracketSetError::UnboundedNotLast(index)),
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the rate of the first bracket whose upper limit is at least `income`.
    ///
    /// # Errors
    ///
    /// - [`TaxCalculationError::InvalidIncome`] for negative income
    /// - [`TaxCalculationError::NoMatchingBracket`] if no bracket covers the income
    pub fn lookup_tax_rate(
        &self,
        income: Decimal,
    ) -> Result<Decimal, TaxCalculationError> {
        if income < Decimal::ZERO {
            return Err(TaxCalculationError::InvalidIncome(income));
        }

        self.brackets
            .iter()
            .find(|bracket| bracket.covers(income))
            .map(|bracket| bracket.rate)
            .ok_or(TaxCalculationError::NoMatchingBracket(income))
    }

    /// Walks the schedule in ascending order, depleting `income`.
    ///
    /// While the remainder exceeds a bracket's ceiling, the whole ceiling is
    /// taxed at that bracket's rate and subtracted from the remainder. The
    /// first bracket that covers the remainder taxes it in full and ends the
    /// walk without reducing it. This is not a textbook marginal calculation
    /// and the comparison figures depend on it as written.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculationError::Overflow`] if the accumulated tax or the
    /// remainder leaves the decimal range.
    pub fn walk(
        &self,
        income: Decimal,
    ) -> Result<BracketWalk, TaxCalculationError> {
        let overflow = || TaxCalculationError::Overflow(income);
        let mut remaining = income;
        let mut tax = Decimal::ZERO;

        for bracket in &self.brackets {
            match bracket.upper_limit {
                Some(limit) if remaining > limit => {
                    tax = limit
                        .checked_mul(bracket.rate)
                        .and_then(|portion| tax.checked_add(portion))
                        .ok_or_else(overflow)?;
                    remaining = remaining.checked_sub(limit).ok_or_else(overflow)?;
                }
                _ => {
                    tax = remaining
                        .checked_mul(bracket.rate)
                        .and_then(|portion| tax.checked_add(portion))
                        .ok_or_else(overflow)?;
                    break;
                }
            }
        }

        Ok(BracketWalk { tax, remaining })
    }
}

/// Returns the rate of the first bracket in `brackets` covering `income`.
pub fn lookup_tax_rate(
    income: Decimal,
    brackets: &BracketSet,
) -> Result<Decimal, TaxCalculationError> {
    brackets.lookup_tax_rate(income)
}

/// The federal schedule plus one schedule per supported jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    federal: BracketSet,
    jurisdictions: BTreeMap<String, BracketSet>,
}

static STANDARD_TABLE: OnceLock<Result<BracketTable, BracketSetError>> = OnceLock::new();

impl BracketTable {
    pub fn new(federal: BracketSet) -> Self {
        Self {
            federal,
            jurisdictions: BTreeMap::new(),
        }
    }

    /// Adds or replaces the schedule for `name`.
    pub fn with_jurisdiction(
        mut self,
        name: impl Into<String>,
        brackets: BracketSet,
    ) -> Self {
        self.jurisdictions.insert(name.into(), brackets);
        self
    }

    /// The built-in table, validated once on first use.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculationError::InvalidBrackets`] if the hard-coded
    /// schedules violate the bracket invariants.
    pub fn standard() -> Result<&'static BracketTable, TaxCalculationError> {
        STANDARD_TABLE
            .get_or_init(Self::from_rate_schedules)
            .as_ref()
            .map_err(|e| TaxCalculationError::InvalidBrackets(e.clone()))
    }

    fn from_rate_schedules() -> Result<Self, BracketSetError> {
        let mut table = Self::new(BracketSet::new(FEDERAL_BRACKETS.to_vec())?);
        for (name, brackets) in jurisdiction_brackets() {
            table = table.with_jurisdiction(name, BracketSet::new(brackets.to_vec())?);
        }
        Ok(table)
    }

    pub fn federal(&self) -> &BracketSet {
        &self.federal
    }

    /// Looks up the schedule for a jurisdiction by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculationError::UnsupportedJurisdiction`] if no schedule
    /// is configured for `name`.
    pub fn jurisdiction(
        &self,
        name: &str,
    ) -> Result<&BracketSet, TaxCalculationError> {
        self.jurisdictions
            .get(name)
            .ok_or_else(|| TaxCalculationError::UnsupportedJurisdiction(name.to_string()))
    }

    /// Names of every configured jurisdiction, in sorted order.
    pub fn supported_jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.jurisdictions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::rates::{BRITISH_COLUMBIA, BRITISH_COLUMBIA_BRACKETS};

    fn federal() -> BracketSet {
        BracketSet::new(FEDERAL_BRACKETS.to_vec()).unwrap()
    }

    fn british_columbia() -> BracketSet {
        BracketSet::new(BRITISH_COLUMBIA_BRACKETS.to_vec()).unwrap()
    }

    // =========================================================================
    // BracketSet::new tests
    // =========================================================================

    #[test]
    fn new_rejects_empty_schedule() {
        assert_eq!(BracketSet::new(vec![]), Err(BracketSetError::Empty));
    }

    #[test]
    fn new_rejects_descending_limits() {
        let result = BracketSet::new(vec![
            TaxBracket::capped(dec!(100), dec!(0.1)),
            TaxBracket::capped(dec!(50), dec!(0.2)),
            TaxBracket::unbounded(dec!(0.3)),
        ]);

        assert_eq!(
            result,
            Err(BracketSetError::NotAscending {
                index: 1,
                limit: dec!(50),
                previous: dec!(100),
            })
        );
    }

    #[test]
    fn new_rejects_repeated_limit() {
        let result = BracketSet::new(vec![
            TaxBracket::capped(dec!(100), dec!(0.1)),
            TaxBracket::capped(dec!(100), dec!(0.2)),
            TaxBracket::unbounded(dec!(0.3)),
        ]);

        assert!(matches!(result, Err(BracketSetError::NotAscending { index: 1, .. })));
    }

    #[test]
    fn new_rejects_capped_last_bracket() {
        let result = BracketSet::new(vec![
            TaxBracket::capped(dec!(100), dec!(0.1)),
            TaxBracket::capped(dec!(200), dec!(0.2)),
        ]);

        assert_eq!(result, Err(BracketSetError::MissingUnboundedBracket));
    }

    #[test]
    fn new_rejects_unbounded_bracket_before_end() {
        let result = BracketSet::new(vec![
            TaxBracket::unbounded(dec!(0.1)),
            TaxBracket::unbounded(dec!(0.2)),
        ]);

        assert_eq!(result, Err(BracketSetError::UnboundedNotLast(0)));
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let result = BracketSet::new(vec![TaxBracket::unbounded(dec!(1.5))]);

        assert_eq!(
            result,
            Err(BracketSetError::RateOutOfRange {
                index: 0,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn new_accepts_single_unbounded_bracket() {
        let set = BracketSet::new(vec![TaxBracket::unbounded(dec!(0.25))]).unwrap();

        assert_eq!(set.brackets().len(), 1);
    }

    // =========================================================================
    // lookup_tax_rate tests
    // =========================================================================

    #[test]
    fn lookup_tax_rate_returns_first_bracket_for_zero() {
        assert_eq!(federal().lookup_tax_rate(Decimal::ZERO), Ok(dec!(0.15)));
    }

    #[test]
    fn lookup_tax_rate_includes_upper_limit() {
        assert_eq!(federal().lookup_tax_rate(dec!(53359)), Ok(dec!(0.15)));
        assert_eq!(federal().lookup_tax_rate(dec!(53359.01)), Ok(dec!(0.205)));
    }

    #[test]
    fn lookup_tax_rate_uses_top_bracket_for_large_income() {
        assert_eq!(
            british_columbia().lookup_tax_rate(dec!(10000000)),
            Ok(dec!(0.205))
        );
    }

    #[test]
    fn lookup_tax_rate_rejects_negative_income() {
        assert_eq!(
            federal().lookup_tax_rate(dec!(-1)),
            Err(TaxCalculationError::InvalidIncome(dec!(-1)))
        );
    }

    #[test]
    fn lookup_tax_rate_free_function_delegates() {
        assert_eq!(lookup_tax_rate(dec!(100000), &british_columbia()), Ok(dec!(0.105)));
    }

    proptest! {
        #[test]
        fn lookup_tax_rate_picks_lowest_covering_bracket(cents in 0i64..50_000_000) {
            let income = Decimal::new(cents, 2);
            let set = british_columbia();
            let rate = set.lookup_tax_rate(income).unwrap();

            let position = set
                .brackets()
                .iter()
                .position(|b| b.rate == rate)
                .unwrap();
            prop_assert!(set.brackets()[position].covers(income));
            for lower in &set.brackets()[..position] {
                prop_assert!(!lower.covers(income));
            }
        }
    }

    // =========================================================================
    // walk tests
    // =========================================================================

    #[test]
    fn walk_within_first_bracket_keeps_remaining() {
        let walk = federal().walk(dec!(50000)).unwrap();

        assert_eq!(walk.tax, dec!(7500));
        assert_eq!(walk.remaining, dec!(50000));
    }

    #[test]
    fn walk_taxes_whole_ceiling_of_exceeded_brackets() {
        let walk = federal().walk(dec!(60000)).unwrap();

        // 53359 * 0.15 + (60000 - 53359) * 0.205
        assert_eq!(walk.tax, dec!(9365.255));
        assert_eq!(walk.remaining, dec!(6641));
    }

    #[test]
    fn walk_of_zero_is_zero() {
        let walk = british_columbia().walk(Decimal::ZERO).unwrap();

        assert_eq!(walk.tax, Decimal::ZERO);
        assert_eq!(walk.remaining, Decimal::ZERO);
    }

    #[test]
    fn walk_reaches_unbounded_bracket() {
        let set = BracketSet::new(vec![
            TaxBracket::capped(dec!(100), dec!(0.1)),
            TaxBracket::unbounded(dec!(0.5)),
        ])
        .unwrap();

        let walk = set.walk(dec!(1000)).unwrap();

        // 100 * 0.1 + 900 * 0.5
        assert_eq!(walk.tax, dec!(460));
        assert_eq!(walk.remaining, dec!(900));
    }

    #[test]
    fn walk_of_largest_income_stays_in_range() {
        for set in [federal(), british_columbia()] {
            let walk = set.walk(Decimal::MAX).unwrap();

            assert!(walk.tax > Decimal::ZERO);
            assert!(walk.tax < walk.remaining);
        }
    }

    #[test]
    fn walk_reports_overflow_past_negative_ceiling() {
        let set = BracketSet::new(vec![
            TaxBracket::capped(dec!(-1), dec!(0.1)),
            TaxBracket::unbounded(dec!(0.5)),
        ])
        .unwrap();

        assert_eq!(
            set.walk(Decimal::MAX),
            Err(TaxCalculationError::Overflow(Decimal::MAX))
        );
    }

    proptest! {
        #[test]
        fn walk_tax_never_decreases_with_income(
            a in 0i64..60_000_000,
            b in 0i64..60_000_000,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            for set in [federal(), british_columbia()] {
                let low_tax = set.walk(Decimal::new(low, 2)).unwrap().tax;
                let high_tax = set.walk(Decimal::new(high, 2)).unwrap().tax;
                prop_assert!(low_tax <= high_tax);
            }
        }
    }

    // =========================================================================
    // BracketTable tests
    // =========================================================================

    #[test]
    fn standard_table_is_valid() {
        let table = BracketTable::standard().unwrap();

        assert_eq!(table.federal(), &federal());
        assert_eq!(table.jurisdiction(BRITISH_COLUMBIA), Ok(&british_columbia()));
    }

    #[test]
    fn standard_table_lists_configured_jurisdictions() {
        let table = BracketTable::standard().unwrap();
        let names: Vec<&str> = table.supported_jurisdictions().collect();

        assert_eq!(names, vec![BRITISH_COLUMBIA]);
    }

    #[test]
    fn jurisdiction_rejects_unknown_name() {
        let table = BracketTable::standard().unwrap();

        assert_eq!(
            table.jurisdiction("Ontario"),
            Err(TaxCalculationError::UnsupportedJurisdiction("Ontario".to_string()))
        );
    }

    #[test]
    fn jurisdiction_names_are_case_sensitive() {
        let table = BracketTable::standard().unwrap();

        assert!(table.jurisdiction("british columbia").is_err());
    }

    #[test]
    fn with_jurisdiction_adds_schedule() {
        let flat = BracketSet::new(vec![TaxBracket::unbounded(dec!(0.1))]).unwrap();
        let table = BracketTable::new(federal()).with_jurisdiction("Alberta", flat);

        assert_eq!(table.jurisdiction("Alberta").unwrap().brackets().len(), 1);
    }
}
