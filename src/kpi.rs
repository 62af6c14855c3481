//! Stateless KPI derivations over the normalized model.
//!
//! All ratio functions treat a zero denominator as a defined case yielding
//! zero; mid-year comparisons are gated to active months so two months of
//! actuals are never compared against twelve months of budget.

use crate::programs::is_overhead_department;
use crate::schema::{AmountPair, LineItem, MonthlyEntry, MothershipData, Section, YearFilter};
use std::cmp::Ordering;

/// The organization books all staff cost under this single subtotal row.
pub const PERSONNEL_LINE_ITEM: &str = "Total 600 Personnel Expenses";

/// All months matching the year filter, in source order.
pub fn filtered_monthly<'a>(
    monthly: &'a [MonthlyEntry],
    filter: YearFilter,
) -> Vec<&'a MonthlyEntry> {
    monthly.iter().filter(|m| filter.matches(m.year)).collect()
}

/// Months with posted revenue. Keeps stray early-posted expenses in
/// otherwise-empty future months out of aggregated totals. Idempotent.
pub fn active_months<'a>(
    monthly: &'a [MonthlyEntry],
    filter: YearFilter,
) -> Vec<&'a MonthlyEntry> {
    monthly
        .iter()
        .filter(|m| filter.matches(m.year) && m.revenue.actual != 0.0)
        .collect()
}

pub fn active_month_count(monthly: &[MonthlyEntry], filter: YearFilter) -> usize {
    active_months(monthly, filter).len()
}

fn sum_pairs<'a>(
    months: impl IntoIterator<Item = &'a MonthlyEntry>,
    pick: impl Fn(&MonthlyEntry) -> AmountPair,
) -> AmountPair {
    months.into_iter().fold(AmountPair::default(), |acc, m| {
        let pair = pick(m);
        AmountPair::new(acc.actual + pair.actual, acc.budget + pair.budget)
    })
}

/// Revenue actual/budget summed over active months only.
pub fn total_revenue(monthly: &[MonthlyEntry], filter: YearFilter) -> AmountPair {
    sum_pairs(active_months(monthly, filter), |m| m.revenue)
}

/// Expense actual/budget summed over active months only.
pub fn total_expenses(monthly: &[MonthlyEntry], filter: YearFilter) -> AmountPair {
    sum_pairs(active_months(monthly, filter), |m| m.expenses)
}

pub fn net_surplus(monthly: &[MonthlyEntry], filter: YearFilter) -> f64 {
    total_revenue(monthly, filter).actual - total_expenses(monthly, filter).actual
}

pub fn operating_margin(monthly: &[MonthlyEntry], filter: YearFilter) -> f64 {
    let revenue = total_revenue(monthly, filter);
    if revenue.actual == 0.0 {
        return 0.0;
    }
    (revenue.actual - total_expenses(monthly, filter).actual) / revenue.actual * 100.0
}

pub fn expense_ratio(monthly: &[MonthlyEntry], filter: YearFilter) -> f64 {
    let revenue = total_revenue(monthly, filter);
    if revenue.actual == 0.0 {
        return 0.0;
    }
    total_expenses(monthly, filter).actual / revenue.actual * 100.0
}

/// 100 minus the absolute revenue variance percentage, clamped to [0, 100].
/// A zero budget scores 100 regardless of actuals.
pub fn budget_health(monthly: &[MonthlyEntry], filter: YearFilter) -> f64 {
    let revenue = total_revenue(monthly, filter);
    if revenue.budget == 0.0 {
        return 100.0;
    }
    let variance = ((revenue.actual - revenue.budget) / revenue.budget * 100.0).abs();
    100.0 - variance.clamp(0.0, 100.0)
}

/// Annualizes `year`'s active revenue and compares it to the prior year's
/// full actual. Zero when `year` has no active months or the prior year
/// posted nothing.
pub fn yoy_growth(monthly: &[MonthlyEntry], year: i32) -> f64 {
    let prior = total_revenue(monthly, YearFilter::Year(year - 1));
    let current = total_revenue(monthly, YearFilter::Year(year));
    let active = active_month_count(monthly, YearFilter::Year(year));
    if active == 0 || prior.actual == 0.0 {
        return 0.0;
    }
    let annualized = current.actual / active as f64 * 12.0;
    (annualized - prior.actual) / prior.actual * 100.0
}

/// Full-year revenue projection from the active months posted so far.
pub fn annualized_projection(monthly: &[MonthlyEntry], year: i32) -> f64 {
    let active = active_month_count(monthly, YearFilter::Year(year));
    if active == 0 {
        return 0.0;
    }
    total_revenue(monthly, YearFilter::Year(year)).actual / active as f64 * 12.0
}

/// Scales an annual budget to the active-month fraction of the year. The 0
/// and >= 12 boundaries are treated as a full year and left untouched.
pub fn prorate_budget(annual_budget: f64, active_months: usize) -> f64 {
    if (1..=11).contains(&active_months) {
        annual_budget * active_months as f64 / 12.0
    } else {
        annual_budget
    }
}

/// Derived copy of an actual-vs-budget pair with the budget pro-rated.
pub fn prorate_pair(pair: AmountPair, active_months: usize) -> AmountPair {
    AmountPair::new(pair.actual, prorate_budget(pair.budget, active_months))
}

fn ratio_of_expenses(mothership: &MothershipData, numerator: f64) -> f64 {
    let denominator = mothership.total_expenses.actual;
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator * 100.0
}

fn expense_item_sum(items: &[LineItem]) -> f64 {
    items
        .iter()
        .filter(|li| li.section == Section::Expense && !li.is_total)
        .map(|li| li.actual)
        .sum()
}

/// Share of total expenses going to personnel, from the single personnel
/// subtotal line item.
pub fn personnel_ratio(mothership: &MothershipData) -> f64 {
    let personnel = mothership
        .line_items
        .iter()
        .find(|li| li.name == PERSONNEL_LINE_ITEM);
    match personnel {
        Some(item) => ratio_of_expenses(mothership, item.actual),
        None => 0.0,
    }
}

/// Share of total expenses spent inside client-facing program departments.
pub fn program_spend_ratio(mothership: &MothershipData) -> f64 {
    let program_expenses: f64 = mothership
        .departments
        .iter()
        .filter(|d| !is_overhead_department(&d.name))
        .map(|d| expense_item_sum(&d.line_items))
        .sum();
    ratio_of_expenses(mothership, program_expenses)
}

/// Share of total expenses spent by the Administrative department.
pub fn admin_overhead(mothership: &MothershipData) -> f64 {
    match mothership.department("Administrative") {
        Some(admin) => ratio_of_expenses(mothership, expense_item_sum(&admin.line_items)),
        None => 0.0,
    }
}

/// Sums subtotal categories of one section across the filtered months,
/// keyed by the subtotal name with its "Total " prefix stripped. Zero sums
/// are dropped; output is ordered by descending magnitude.
pub fn category_breakdown(
    monthly: &[MonthlyEntry],
    filter: YearFilter,
    section: Section,
) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for month in filtered_monthly(monthly, filter) {
        for category in &month.categories {
            if category.section != section || !category.is_total {
                continue;
            }
            let name = category
                .name
                .strip_prefix("Total ")
                .unwrap_or(&category.name);
            match totals.iter().position(|(n, _)| n == name) {
                Some(position) => totals[position].1 += category.actual,
                None => totals.push((name.to_string(), category.actual)),
            }
        }
    }

    totals.retain(|(_, value)| *value != 0.0);
    totals.sort_by(|(_, a), (_, b)| {
        b.abs().partial_cmp(&a.abs()).unwrap_or(Ordering::Equal)
    });
    totals
}
