//! End-to-end comparison runs against the built-in rate table.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::rates::{BRITISH_COLUMBIA, DEFAULT_INCOMES};
use tax_core::calculations::{
    BracketTable, ComparisonAssembler, IncomeCarryover, calculate_combined_marginal_tax_rate,
    calculate_dividend_tax, calculate_tax_comparison, estimate_payroll_deductions,
};
use tax_core::TaxCalculationError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn default_incomes_produce_one_record_each() {
    init_tracing();

    let records = calculate_tax_comparison(&DEFAULT_INCOMES, BRITISH_COLUMBIA).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].income, dec!(50000));
    assert_eq!(records[1].income, dec!(75000));
}

#[test]
fn record_agrees_with_individual_calculators() {
    init_tracing();

    let income = dec!(82500);
    let record = calculate_tax_comparison(&[income], BRITISH_COLUMBIA)
        .unwrap()
        .remove(0);

    let deductions = estimate_payroll_deductions(income).unwrap();
    let taxable = income - deductions.total();
    let dividend = calculate_dividend_tax(taxable, BRITISH_COLUMBIA).unwrap();
    let wage = calculate_combined_marginal_tax_rate(taxable, BRITISH_COLUMBIA).unwrap();

    assert_eq!(record.taxable_income, taxable);
    assert_eq!(record.wages.cpp, deductions.cpp);
    assert_eq!(record.wages.ei, deductions.ei);
    assert_eq!(record.wages.federal_tax, wage.federal_tax);
    assert_eq!(record.wages.provincial_tax, wage.provincial_tax);
    assert_eq!(record.dividends.federal_credit, dividend.federal_tax_credit);
    assert_eq!(record.dividends.provincial_credit, dividend.provincial_tax_credit);
    assert_eq!(record.dividends.take_home, dividend.net_dividend);
}

#[test]
fn dividend_credit_share_is_constant_across_incomes() {
    // Credits scale linearly with taxable income, which is a fixed share of income.
    let records = calculate_tax_comparison(
        &[dec!(40000), dec!(90000), dec!(250000)],
        BRITISH_COLUMBIA,
    )
    .unwrap();

    for record in &records {
        assert_eq!(record.dividends.tax_percentage, dec!(37.82231604));
    }
}

#[test]
fn carryover_modes_diverge_above_first_federal_bracket() {
    let table = BracketTable::standard().unwrap();
    let shared = ComparisonAssembler::new(table, BRITISH_COLUMBIA).unwrap();
    let independent = ComparisonAssembler::new(table, BRITISH_COLUMBIA)
        .unwrap()
        .with_carryover(IncomeCarryover::Independent);

    let below = dec!(50000);
    let above = dec!(150000);

    assert_eq!(
        shared.assemble_one(below).unwrap(),
        independent.assemble_one(below).unwrap()
    );
    assert!(
        shared.assemble_one(above).unwrap().wages.take_home
            > independent.assemble_one(above).unwrap().wages.take_home
    );
}

#[test]
fn invalid_inputs_surface_named_errors() {
    assert_eq!(
        calculate_tax_comparison(&[dec!(50000)], "Quebec"),
        Err(TaxCalculationError::UnsupportedJurisdiction("Quebec".to_string()))
    );
    assert_eq!(
        calculate_tax_comparison(&[Decimal::ZERO], BRITISH_COLUMBIA),
        Err(TaxCalculationError::InvalidIncome(Decimal::ZERO))
    );
}

#[test]
fn largest_decimal_income_is_an_error_not_a_panic() {
    let income: Decimal = "79228162514264337593543950335".parse().unwrap();

    assert_eq!(
        calculate_tax_comparison(&[income], BRITISH_COLUMBIA),
        Err(TaxCalculationError::Overflow(income))
    );
    assert_eq!(
        calculate_dividend_tax(income, BRITISH_COLUMBIA),
        Err(TaxCalculationError::Overflow(income))
    );
}

#[test]
fn records_serialize_amounts_as_decimal_strings() {
    let records = calculate_tax_comparison(&[dec!(50000)], BRITISH_COLUMBIA).unwrap();

    let json = serde_json::to_value(&records).unwrap();

    let field = |value: &serde_json::Value| value.as_str().unwrap().parse::<Decimal>().unwrap();

    assert_eq!(json[0]["income"], "50000");
    assert_eq!(field(&json[0]["wages"]["cpp"]), dec!(2550));
    assert_eq!(field(&json[0]["dividends"]["provincial_credit"]), dec!(8398.8));
}
