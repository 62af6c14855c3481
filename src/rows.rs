//! Row classification for the data portion of a sheet.
//!
//! Rows carry no explicit schema; the classifier works from the first-column
//! label alone plus a revenue/expense section accumulator that a sentinel
//! label flips partway down the sheet. The accumulator is threaded through
//! [`classify_row`] explicitly so a full sheet scan stays a pure fold over
//! its rows.

use crate::schema::Section;

/// Which export shape the sheet follows. Mothership sheets carry one extra
/// nesting level below the department grouping and a second expense
/// sentinel for the other-expenditures block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMode {
    Monthly,
    Mothership,
}

/// Summary rows captured into dedicated slots instead of the line-item
/// list, to avoid double counting against their constituent rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRow {
    TotalRevenue,
    TotalExpenditures,
    NetOperatingRevenue,
    NetRevenue,
    TotalOtherExpenditures,
    NetOtherRevenue,
}

/// Classification of a single data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Structural section header ("Revenue", "Gross Profit") or an expense
    /// sentinel; emits nothing.
    Structural,
    /// A summary row; the caller captures its values out of band.
    Summary(SummaryRow),
    /// An ordinary line-item/category row.
    Item {
        depth: u8,
        is_total: bool,
        section: Section,
    },
}

/// Sentinel labels that flip the scan into the expense section. The row
/// itself is not emitted.
fn is_expense_sentinel(label: &str, mode: SheetMode) -> bool {
    label == "Expenditures" || (mode == SheetMode::Mothership && label == "Other Expenditures")
}

fn summary_kind(label: &str, mode: SheetMode) -> Option<SummaryRow> {
    match label {
        "Total Revenue" => Some(SummaryRow::TotalRevenue),
        "Total Expenditures" => Some(SummaryRow::TotalExpenditures),
        "Net Operating Revenue" => Some(SummaryRow::NetOperatingRevenue),
        "Net Revenue" => Some(SummaryRow::NetRevenue),
        "Total Other Expenditures" if mode == SheetMode::Mothership => {
            Some(SummaryRow::TotalOtherExpenditures)
        }
        "Net Other Revenue" if mode == SheetMode::Mothership => Some(SummaryRow::NetOtherRevenue),
        _ => None,
    }
}

/// Nesting depth from label shape. Account-coded rows (leading digit) sit
/// at the grouping level; everything else is nested detail.
fn item_depth(label: &str, is_total: bool, mode: SheetMode) -> u8 {
    let digit_leading = label.chars().next().is_some_and(|c| c.is_ascii_digit());
    match mode {
        SheetMode::Monthly => {
            if digit_leading || is_total {
                0
            } else {
                1
            }
        }
        SheetMode::Mothership => {
            if is_total {
                0
            } else if digit_leading {
                1
            } else {
                2
            }
        }
    }
}

/// Classifies one cleaned row label, returning the classification and the
/// section state for the rows that follow.
pub fn classify_row(label: &str, section: Section, mode: SheetMode) -> (RowKind, Section) {
    if is_expense_sentinel(label, mode) {
        return (RowKind::Structural, Section::Expense);
    }
    if label == "Revenue" || label == "Gross Profit" {
        return (RowKind::Structural, section);
    }
    if let Some(summary) = summary_kind(label, mode) {
        return (RowKind::Summary(summary), section);
    }

    let is_total = label.starts_with("Total ");
    (
        RowKind::Item {
            depth: item_depth(label, is_total, mode),
            is_total,
            section,
        },
        section,
    )
}
