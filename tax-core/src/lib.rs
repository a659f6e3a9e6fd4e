pub mod calculations;
pub mod models;

pub use calculations::{IncomeCarryover, TaxCalculationError};
pub use models::*;
