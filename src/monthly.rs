//! Aggregation of the monthly trend export into per-month entries.

use crate::cell::{clean_label, parse_number};
use crate::error::Result;
use crate::header::{resolve_month_columns, MonthColumns};
use crate::rows::{classify_row, RowKind, SheetMode, SummaryRow};
use crate::schema::{AmountPair, CategoryData, MonthlyEntry, Section};
use crate::sheet::{read_records, DATA_ROW_INDEX, HEADER_ROW_INDEX, MIN_RECORD_COUNT};
use csv::StringRecord;
use log::debug;

/// A classified data row with its per-month values, aligned index-for-index
/// with the resolved month columns.
struct ClassifiedRow {
    name: String,
    is_total: bool,
    section: Section,
    values: Vec<AmountPair>,
}

fn month_values(record: &StringRecord, columns: &[MonthColumns]) -> Vec<AmountPair> {
    columns
        .iter()
        .map(|col| {
            let actual = col
                .actual_idx
                .map(|i| parse_number(record.get(i).unwrap_or("")))
                .unwrap_or(0.0);
            let budget = col
                .budget_idx
                .map(|i| parse_number(record.get(i).unwrap_or("")))
                .unwrap_or(0.0);
            AmountPair::new(actual, budget)
        })
        .collect()
}

/// Parses a monthly trend export into one entry per reporting month, in
/// header discovery order.
///
/// Sheets shorter than five records yield an empty result. Summary rows
/// feed the entry's revenue/expense/net totals; every other classified row
/// lands in the month's category list unless both its actual and budget are
/// zero for that month (absence means zero, not unknown).
pub fn parse_monthly_csv(text: &str) -> Result<Vec<MonthlyEntry>> {
    let records = read_records(text)?;
    if records.len() < MIN_RECORD_COUNT {
        debug!(
            "monthly trend sheet has {} records, below the data threshold",
            records.len()
        );
        return Ok(Vec::new());
    }

    let columns = resolve_month_columns(&records[HEADER_ROW_INDEX]);
    debug!(
        "monthly trend sheet: {} month groups across {} data rows",
        columns.len(),
        records.len() - DATA_ROW_INDEX
    );

    let mut section = Section::Revenue;
    let mut rows: Vec<ClassifiedRow> = Vec::new();
    let mut total_revenue: Option<Vec<AmountPair>> = None;
    let mut total_expenditures: Option<Vec<AmountPair>> = None;
    let mut net_revenue: Option<Vec<AmountPair>> = None;

    for record in &records[DATA_ROW_INDEX..] {
        let label = clean_label(record.get(0).unwrap_or(""));
        if label.is_empty() {
            continue;
        }

        let (kind, next_section) = classify_row(&label, section, SheetMode::Monthly);
        section = next_section;

        match kind {
            RowKind::Structural => {}
            RowKind::Summary(summary) => {
                let values = month_values(record, &columns);
                match summary {
                    SummaryRow::TotalRevenue => total_revenue = Some(values),
                    SummaryRow::TotalExpenditures => total_expenditures = Some(values),
                    SummaryRow::NetRevenue => net_revenue = Some(values),
                    // Captured so it stays out of the category list, but no
                    // output slot consumes it.
                    _ => {}
                }
            }
            RowKind::Item {
                is_total, section, ..
            } => {
                let values = month_values(record, &columns);
                let row = ClassifiedRow {
                    name: label,
                    is_total,
                    section,
                    values,
                };
                // Row labels are unique per sheet; a repeated label replaces
                // the earlier capture so month keys stay unique.
                match rows.iter().position(|r| r.name == row.name) {
                    Some(position) => rows[position] = row,
                    None => rows.push(row),
                }
            }
        }
    }

    let entries = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let summary = |slot: &Option<Vec<AmountPair>>| {
                slot.as_ref().map(|v| v[i]).unwrap_or_default()
            };

            let categories = rows
                .iter()
                .filter(|row| row.values[i].actual != 0.0 || row.values[i].budget != 0.0)
                .map(|row| {
                    CategoryData::new(
                        row.name.clone(),
                        row.values[i].actual,
                        row.values[i].budget,
                        row.is_total,
                        row.section,
                    )
                })
                .collect();

            MonthlyEntry {
                month: col.month.clone(),
                year: col.year,
                label: col.label.clone(),
                revenue: summary(&total_revenue),
                expenses: summary(&total_expenditures),
                net_revenue: summary(&net_revenue),
                categories,
            }
        })
        .collect();

    Ok(entries)
}
