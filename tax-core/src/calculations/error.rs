use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a bracket schedule is rejected at construction time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketSetError {
    /// The schedule contains no brackets at all.
    #[error("bracket schedule is empty")]
    Empty,

    /// A bracket's upper limit is not strictly greater than the one before it.
    #[error("bracket {index} upper limit {limit} does not exceed the previous limit {previous}")]
    NotAscending {
        index: usize,
        limit: Decimal,
        previous: Decimal,
    },

    /// An open-ended bracket appears before the end of the schedule.
    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedNotLast(usize),

    /// The final bracket has an upper limit, leaving high incomes uncovered.
    #[error("last bracket must be unbounded")]
    MissingUnboundedBracket,

    /// A marginal rate lies outside `[0, 1]`.
    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// Errors surfaced by the tax calculators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxCalculationError {
    /// No bracket schedule is configured for the named jurisdiction.
    #[error("unsupported jurisdiction '{0}'")]
    UnsupportedJurisdiction(String),

    /// The income is outside the range the calculation is defined for.
    #[error("invalid income {0}")]
    InvalidIncome(Decimal),

    /// No bracket covers the given income.
    #[error("no tax bracket found for income {0}")]
    NoMatchingBracket(Decimal),

    /// An intermediate amount for this income exceeds the decimal range.
    #[error("income {0} is too large to calculate")]
    Overflow(Decimal),

    /// A configured bracket schedule violates its invariants.
    #[error("invalid bracket schedule: {0}")]
    InvalidBrackets(#[from] BracketSetError),
}
