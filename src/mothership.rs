//! Aggregation of the per-department "mothership" export into an annual
//! organizational rollup.

use crate::cell::{clean_label, parse_number};
use crate::error::Result;
use crate::header::{resolve_department_columns, DepartmentColumns};
use crate::rows::{classify_row, RowKind, SheetMode, SummaryRow};
use crate::schema::{AmountPair, DepartmentData, LineItem, MothershipData, Section};
use crate::sheet::{read_records, DATA_ROW_INDEX, HEADER_ROW_INDEX, MIN_RECORD_COUNT};
use csv::StringRecord;
use log::debug;

/// Leaf-department filter. The "Total" column and the parent rollup header
/// groups are not departments of their own.
fn is_leaf_department(name: &str) -> bool {
    name != "Total"
        && !name.starts_with("Total ")
        && !name.starts_with("Childrens Programs")
        && !name.starts_with("Fundraising <")
        && name != "Fundraising"
}

fn read_pair(record: &StringRecord, columns: &DepartmentColumns) -> AmountPair {
    let actual = columns
        .actual_idx
        .map(|i| parse_number(record.get(i).unwrap_or("")))
        .unwrap_or(0.0);
    let budget = columns
        .budget_idx
        .map(|i| parse_number(record.get(i).unwrap_or("")))
        .unwrap_or(0.0);
    AmountPair::new(actual, budget)
}

#[derive(Default)]
struct DepartmentAccumulator {
    revenue: AmountPair,
    expenses: AmountPair,
    line_items: Vec<LineItem>,
}

/// Parses one fiscal year's mothership export.
///
/// A single pass over the data rows builds both the organization-wide line
/// items (from the "Total" column, keeping every classified row) and each
/// leaf department's line items (kept only when the department posted a
/// non-zero actual or budget on that row). The section boundary is a
/// property of the shared row labels, so one scan covers every column.
///
/// Sheets shorter than five records yield [`MothershipData::empty`].
pub fn parse_mothership_csv(text: &str, year: i32) -> Result<MothershipData> {
    let records = read_records(text)?;
    if records.len() < MIN_RECORD_COUNT {
        debug!(
            "mothership sheet for {} has {} records, below the data threshold",
            year,
            records.len()
        );
        return Ok(MothershipData::empty(year));
    }

    let columns = resolve_department_columns(&records[HEADER_ROW_INDEX]);
    let total_column = columns.iter().find(|c| c.name == "Total");
    let department_columns: Vec<&DepartmentColumns> = columns
        .iter()
        .filter(|c| is_leaf_department(&c.name))
        .collect();
    debug!(
        "mothership sheet for {}: {} leaf departments of {} column groups",
        year,
        department_columns.len(),
        columns.len()
    );

    let mut accumulators: Vec<DepartmentAccumulator> = department_columns
        .iter()
        .map(|_| DepartmentAccumulator::default())
        .collect();
    let mut line_items: Vec<LineItem> = Vec::new();
    let mut total_revenue = AmountPair::default();
    let mut total_expenses = AmountPair::default();
    let mut net_revenue = AmountPair::default();

    let mut section = Section::Revenue;
    for record in &records[DATA_ROW_INDEX..] {
        let label = clean_label(record.get(0).unwrap_or(""));
        if label.is_empty() {
            continue;
        }

        let (kind, next_section) = classify_row(&label, section, SheetMode::Mothership);
        section = next_section;

        let org_pair = total_column
            .map(|c| read_pair(record, c))
            .unwrap_or_default();

        match kind {
            RowKind::Structural => {}
            RowKind::Summary(summary) => match summary {
                SummaryRow::TotalRevenue => {
                    total_revenue = org_pair;
                    for (accumulator, dept) in accumulators.iter_mut().zip(&department_columns) {
                        accumulator.revenue = read_pair(record, dept);
                    }
                }
                SummaryRow::TotalExpenditures => {
                    total_expenses = org_pair;
                    for (accumulator, dept) in accumulators.iter_mut().zip(&department_columns) {
                        accumulator.expenses = read_pair(record, dept);
                    }
                }
                SummaryRow::NetOperatingRevenue | SummaryRow::NetRevenue => {
                    net_revenue = org_pair;
                }
                SummaryRow::TotalOtherExpenditures | SummaryRow::NetOtherRevenue => {}
            },
            RowKind::Item {
                depth,
                is_total,
                section,
            } => {
                line_items.push(LineItem::new(
                    label.clone(),
                    org_pair.actual,
                    org_pair.budget,
                    depth,
                    is_total,
                    section,
                ));

                for (accumulator, dept) in accumulators.iter_mut().zip(&department_columns) {
                    let pair = read_pair(record, dept);
                    if pair.actual != 0.0 || pair.budget != 0.0 {
                        accumulator.line_items.push(LineItem::new(
                            label.clone(),
                            pair.actual,
                            pair.budget,
                            0,
                            is_total,
                            section,
                        ));
                    }
                }
            }
        }
    }

    let departments = department_columns
        .iter()
        .zip(accumulators)
        .map(|(dept, accumulator)| {
            // Unlike-signed sum: revenue plus expense magnitude, not a net.
            DepartmentData::new(
                dept.name.clone(),
                accumulator.revenue.actual + accumulator.expenses.actual,
                accumulator.revenue.budget + accumulator.expenses.budget,
                accumulator.line_items,
            )
        })
        .collect();

    Ok(MothershipData {
        year,
        departments,
        total_revenue,
        total_expenses,
        net_revenue,
        line_items,
    })
}
