//! Header-row resolution for both export shapes.
//!
//! The exports carry structure only through column-name string patterns:
//! the monthly trend sheet repeats `"<Mon> <Year> <metric>"` groups and the
//! mothership sheet repeats `"<Department> <metric>"` groups. Both are
//! resolved against declarative vocabulary tables so format drift stays a
//! data change, not a control-flow change.

use crate::cell::decode_entities;
use chrono::Month;
use csv::StringRecord;

/// Fiscal years the monthly trend header vocabulary covers.
pub const SUPPORTED_YEARS: [i32; 2] = [2025, 2026];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Three-letter month code as it appears in the headers ("Jan", "Feb", ...).
fn month_code(month: Month) -> &'static str {
    &month.name()[..3]
}

/// The four metric columns each month/department group repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Actual,
    Budget,
    OverBudget,
    PercentOfBudget,
}

impl Metric {
    /// Suffix table ordered longest-first: "Over Budget" must be tried
    /// before "Budget", which is a textual suffix of it.
    const SUFFIXES: [(&'static str, Metric); 4] = [
        ("% of Budget", Metric::PercentOfBudget),
        ("Over Budget", Metric::OverBudget),
        ("Budget", Metric::Budget),
        ("Actual", Metric::Actual),
    ];

    /// Exact match against the metric vocabulary.
    fn from_exact(text: &str) -> Option<Metric> {
        Metric::SUFFIXES
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, metric)| *metric)
    }

    /// Splits `"<prefix> <metric>"` by the longest matching metric suffix,
    /// returning the trimmed prefix.
    fn split_suffix(text: &str) -> Option<(&str, Metric)> {
        Metric::SUFFIXES.iter().find_map(|(suffix, metric)| {
            text.strip_suffix(suffix)
                .map(|prefix| (prefix.trim(), *metric))
        })
    }
}

/// Column addresses for one reporting month discovered in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthColumns {
    /// Three-letter month code.
    pub month: String,
    pub year: i32,
    /// "Mon YYYY" key, e.g. "Jan 2025".
    pub label: String,
    pub actual_idx: Option<usize>,
    pub budget_idx: Option<usize>,
}

/// Column addresses for one department group discovered in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentColumns {
    pub name: String,
    pub actual_idx: Option<usize>,
    pub budget_idx: Option<usize>,
    pub over_budget_idx: Option<usize>,
    pub percent_idx: Option<usize>,
}

/// What a single time-series header cell resolved to.
enum TimeSeriesCell {
    Month { code: &'static str, year: i32, metric: Metric },
    /// The synthetic "Total <metric>" pseudo-month.
    Total,
}

/// Matches one header cell against the {month} x {year} x {metric}
/// cross-product. Prefix-based: the cell must start with `"<Mon> <Year>"`
/// and the trimmed remainder must equal a metric name exactly.
fn resolve_time_series_cell(cell: &str) -> Option<TimeSeriesCell> {
    for month in MONTHS {
        let code = month_code(month);
        for year in SUPPORTED_YEARS {
            let prefix = format!("{} {}", code, year);
            if let Some(rest) = cell.strip_prefix(prefix.as_str()) {
                if let Some(metric) = Metric::from_exact(rest.trim()) {
                    return Some(TimeSeriesCell::Month { code, year, metric });
                }
            }
        }
    }

    if let Some(rest) = cell.strip_prefix("Total ") {
        if Metric::from_exact(rest.trim()).is_some() {
            return Some(TimeSeriesCell::Total);
        }
    }

    None
}

/// Scans a monthly-trend header row into ordered month column groups.
///
/// Group order follows header discovery order; unrecognized cells are
/// ignored and duplicate cells for the same month/metric overwrite the
/// earlier index (last occurrence wins). The "Total" pseudo-month is
/// recognized but carries no group of its own.
pub fn resolve_month_columns(header_row: &StringRecord) -> Vec<MonthColumns> {
    let mut columns: Vec<MonthColumns> = Vec::new();

    for (idx, raw) in header_row.iter().enumerate().skip(1) {
        let cell = raw.trim();
        if cell.is_empty() {
            continue;
        }

        let (code, year, metric) = match resolve_time_series_cell(cell) {
            Some(TimeSeriesCell::Month { code, year, metric }) => (code, year, metric),
            Some(TimeSeriesCell::Total) | None => continue,
        };

        let label = format!("{} {}", code, year);
        let position = match columns.iter().position(|c| c.label == label) {
            Some(position) => position,
            None => {
                columns.push(MonthColumns {
                    month: code.to_string(),
                    year,
                    label,
                    actual_idx: None,
                    budget_idx: None,
                });
                columns.len() - 1
            }
        };
        let group = &mut columns[position];

        match metric {
            Metric::Actual => group.actual_idx = Some(idx),
            Metric::Budget => group.budget_idx = Some(idx),
            Metric::OverBudget | Metric::PercentOfBudget => {}
        }
    }

    columns
}

/// Scans a mothership header row into ordered department column groups.
///
/// Cells are HTML-entity-decoded, then suffix-matched against the metric
/// table (longest suffix first); the trimmed remainder is the department
/// name. Last occurrence wins on duplicates.
pub fn resolve_department_columns(header_row: &StringRecord) -> Vec<DepartmentColumns> {
    let mut columns: Vec<DepartmentColumns> = Vec::new();

    for (idx, raw) in header_row.iter().enumerate().skip(1) {
        let cell = decode_entities(raw.trim());
        if cell.is_empty() {
            continue;
        }

        let (name, metric) = match Metric::split_suffix(&cell) {
            Some((name, metric)) if !name.is_empty() => (name.to_string(), metric),
            _ => continue,
        };

        let position = match columns.iter().position(|c| c.name == name) {
            Some(position) => position,
            None => {
                columns.push(DepartmentColumns {
                    name,
                    actual_idx: None,
                    budget_idx: None,
                    over_budget_idx: None,
                    percent_idx: None,
                });
                columns.len() - 1
            }
        };
        let group = &mut columns[position];

        match metric {
            Metric::Actual => group.actual_idx = Some(idx),
            Metric::Budget => group.budget_idx = Some(idx),
            Metric::OverBudget => group.over_budget_idx = Some(idx),
            Metric::PercentOfBudget => group.percent_idx = Some(idx),
        }
    }

    columns
}
