//! Cross-year program performance records built from two mothership
//! rollups.

use crate::schema::{AmountPair, MothershipData, ProgramPerformance, Section};
use std::collections::BTreeSet;

/// Overhead departments excluded from program performance reporting.
pub const OVERHEAD_DEPARTMENTS: [&str; 5] = [
    "Administrative",
    "Support Services",
    "Headquarter Building",
    "Cornerstone Fund",
    "NC Expansion",
];

pub fn is_overhead_department(name: &str) -> bool {
    OVERHEAD_DEPARTMENTS.contains(&name)
}

/// Sums a department's non-subtotal line items per section. Subtotal rows
/// are skipped so their constituents are not counted twice.
fn section_sums(data: &MothershipData, name: &str) -> Option<(AmountPair, AmountPair)> {
    let dept = data.department(name)?;

    let mut revenue = AmountPair::default();
    let mut expenses = AmountPair::default();
    for item in &dept.line_items {
        if item.is_total {
            continue;
        }
        match item.section {
            Section::Revenue => {
                revenue.actual += item.actual;
                revenue.budget += item.budget;
            }
            Section::Expense => {
                expenses.actual += item.actual;
                expenses.budget += item.budget;
            }
        }
    }

    Some((revenue, expenses))
}

/// Merges two fiscal years of mothership data into per-program performance
/// records.
///
/// Takes the union of department names across both years minus the overhead
/// denylist. A record is emitted for a (name, year) only when at least one
/// of the four constituent sums is non-zero. Output is ordered by name
/// ascending (case-sensitive), years ascending within a name.
pub fn build_programs(
    first_year: &MothershipData,
    second_year: &MothershipData,
) -> Vec<ProgramPerformance> {
    let names: BTreeSet<&str> = first_year
        .departments
        .iter()
        .chain(&second_year.departments)
        .map(|d| d.name.as_str())
        .filter(|name| !is_overhead_department(name))
        .collect();

    let mut programs = Vec::new();
    for name in names {
        for data in [first_year, second_year] {
            let Some((revenue, expenses)) = section_sums(data, name) else {
                continue;
            };

            if revenue.actual == 0.0
                && revenue.budget == 0.0
                && expenses.actual == 0.0
                && expenses.budget == 0.0
            {
                continue;
            }

            let combined = AmountPair::new(
                revenue.actual + expenses.actual,
                revenue.budget + expenses.budget,
            );
            programs.push(ProgramPerformance {
                name: name.to_string(),
                revenue,
                expenses,
                net: revenue.actual - expenses.actual,
                percent_of_budget: combined.percent_of_budget(),
                year: data.year,
            });
        }
    }

    programs
}
