//! Turns comparison records into display text.
//!
//! Nothing here computes tax; every figure comes straight from a
//! [`ComparisonRecord`] and only passes through the display rounding helpers.

use std::fmt::Write as _;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::calculations::common::percentage_of;
use tax_core::{ComparisonRecord, IncomeCarryover, TaxCalculationError};
use thiserror::Error;

use crate::utils::{format_money, format_percentage};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Calculation(#[from] TaxCalculationError),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Fmt(#[from] std::fmt::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Everything a renderer needs for one page of comparisons.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport<'a> {
    pub jurisdiction: &'a str,
    pub carryover: IncomeCarryover,
    pub records: &'a [ComparisonRecord],
}

/// Renders a report in the requested format.
pub fn render(
    format: OutputFormat,
    report: &ComparisonReport<'_>,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Text => render_text_report(report),
        OutputFormat::Html => render_html_page(report),
        OutputFormat::Json => render_json(report),
    }
}

/// One labelled line: amount plus its share of income.
fn line(
    label: &str,
    amount: Decimal,
    income: Decimal,
) -> Result<(String, String, String), TaxCalculationError> {
    Ok((
        label.to_string(),
        format_money(amount),
        format_percentage(percentage_of(amount, income)?),
    ))
}

fn dividend_lines(
    record: &ComparisonRecord,
) -> Result<Vec<(String, String, String)>, TaxCalculationError> {
    let d = &record.dividends;
    Ok(vec![
        line("Federal credit", d.federal_credit, record.income)?,
        line("Provincial credit", d.provincial_credit, record.income)?,
        (
            "Total credits".to_string(),
            format_money(d.federal_credit + d.provincial_credit),
            format_percentage(d.tax_percentage),
        ),
        (
            "Take home".to_string(),
            format_money(d.take_home),
            format_percentage(d.take_home_percentage),
        ),
    ])
}

fn wage_lines(
    record: &ComparisonRecord,
) -> Result<Vec<(String, String, String)>, TaxCalculationError> {
    let w = &record.wages;
    Ok(vec![
        (
            "CPP".to_string(),
            format_money(w.cpp),
            format_percentage(w.cpp_percentage),
        ),
        (
            "EI".to_string(),
            format_money(w.ei),
            format_percentage(w.ei_percentage),
        ),
        line("Provincial tax", w.provincial_tax, record.income)?,
        line("Federal tax", w.federal_tax, record.income)?,
        (
            "Take home".to_string(),
            format_money(w.take_home),
            format_percentage(w.take_home_percentage),
        ),
    ])
}

/// Plain-text block for a single record.
pub fn render_text(record: &ComparisonRecord) -> Result<String, RenderError> {
    let mut out = String::new();
    writeln!(out, "Income: {}", format_money(record.income))?;
    writeln!(out, "  Taxable after CPP/EI: {}", format_money(record.taxable_income))?;

    for (heading, lines) in [
        ("Dividends", dividend_lines(record)?),
        ("Wages", wage_lines(record)?),
    ] {
        writeln!(out, "  {heading}:")?;
        for (label, amount, pct) in lines {
            writeln!(out, "    {:<18} {:>14} ({pct})", format!("{label}:"), amount)?;
        }
    }
    Ok(out)
}

fn render_text_report(report: &ComparisonReport<'_>) -> Result<String, RenderError> {
    let mut out = String::new();
    writeln!(out, "Dividend vs wage comparison for {}", report.jurisdiction)?;
    for record in report.records {
        writeln!(out)?;
        out.push_str(&render_text(record)?);
    }
    Ok(out)
}

/// Escapes text for safe interpolation into HTML element content and attributes.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PAGE_STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;background:#f4f4f5;color:#18181b}\
h1{font-size:1.5rem}\
.cards{display:flex;flex-wrap:wrap;gap:1.5rem}\
.card{background:#fff;border-radius:.5rem;box-shadow:0 1px 3px rgba(0,0,0,.15);padding:1.5rem;flex:1 1 26rem}\
.paths{display:flex;justify-content:space-between;gap:2rem}\
h2{font-size:1.25rem;margin-top:0}\
h3{font-size:1.05rem;margin-bottom:.5rem}\
p{margin:.25rem 0}";

/// A complete HTML document with one card per income.
pub fn render_html_page(report: &ComparisonReport<'_>) -> Result<String, RenderError> {
    let jurisdiction = escape_html(report.jurisdiction);
    let mut out = String::new();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Dividends vs wages: {jurisdiction}</title>")?;
    writeln!(out, "<style>{PAGE_STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Dividends vs wages: {jurisdiction}</h1>")?;
    writeln!(out, "<div class=\"cards\">")?;

    for record in report.records {
        writeln!(out, "<section class=\"card\">")?;
        writeln!(out, "<h2>Income: {}</h2>", format_money(record.income))?;
        writeln!(out, "<div class=\"paths\">")?;
        for (heading, lines) in [
            ("Dividends", dividend_lines(record)?),
            ("Wages", wage_lines(record)?),
        ] {
            writeln!(out, "<div>")?;
            writeln!(out, "<h3>{heading}:</h3>")?;
            for (label, amount, pct) in lines {
                writeln!(
                    out,
                    "<p>{}: {} ({})</p>",
                    escape_html(&label),
                    escape_html(&amount),
                    escape_html(&pct)
                )?;
            }
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</div>")?;
        writeln!(out, "</section>")?;
    }

    writeln!(out, "</div>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

/// Pretty-printed JSON with unrounded amounts.
pub fn render_json(report: &ComparisonReport<'_>) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(report)?)
}
