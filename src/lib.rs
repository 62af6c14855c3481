//! # Financial Report Normalizer
//!
//! A library for converting two families of irregularly-structured financial
//! spreadsheet exports into a normalized, hierarchical actual-vs-budget data
//! model with year-to-date-aware key metrics.
//!
//! ## Core Concepts
//!
//! - **Monthly trend export**: a wide CSV repeating `"<Mon> <Year> <metric>"`
//!   column groups, one group per reporting month
//! - **Mothership export**: a per-department annual CSV repeating
//!   `"<Department> <metric>"` column groups, one file per fiscal year
//! - **Active month**: a month with posted revenue; only active months count
//!   toward totals, growth figures, and budget pro-ration
//! - **Lenient cells**: malformed numeric cells degrade to zero and short
//!   sheets to empty results, so one bad export never poisons the load
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_report_normalizer::*;
//!
//! let data = build_financial_data(&monthly_csv, &mothership_2025_csv, &mothership_2026_csv)?;
//!
//! let revenue = kpi::total_revenue(&data.monthly, YearFilter::Year(2026));
//! let health = kpi::budget_health(&data.monthly, YearFilter::Year(2026));
//! let ytd_budget = kpi::prorate_budget(
//!     revenue.budget,
//!     kpi::active_month_count(&data.monthly, YearFilter::Year(2026)),
//! );
//! ```

pub mod cell;
pub mod error;
pub mod header;
pub mod kpi;
pub mod loader;
pub mod monthly;
pub mod mothership;
pub mod programs;
pub mod rows;
pub mod schema;
pub mod sheet;

pub use cell::parse_number;
pub use error::{ReportError, Result};
pub use header::{
    resolve_department_columns, resolve_month_columns, DepartmentColumns, Metric, MonthColumns,
    SUPPORTED_YEARS,
};
pub use loader::{load_financial_data, SourceFile};
pub use monthly::parse_monthly_csv;
pub use mothership::parse_mothership_csv;
pub use programs::{build_programs, is_overhead_department, OVERHEAD_DEPARTMENTS};
pub use rows::{classify_row, RowKind, SheetMode, SummaryRow};
pub use schema::*;
pub use sheet::{DATA_ROW_INDEX, HEADER_ROW_INDEX, MIN_RECORD_COUNT};

use log::{debug, info};

/// Parses the three source exports and assembles the full aggregate the
/// presentation layer consumes. Built once per load cycle; callers replace
/// the previous aggregate wholesale rather than patching it.
pub fn build_financial_data(
    monthly_csv: &str,
    mothership_2025_csv: &str,
    mothership_2026_csv: &str,
) -> Result<FinancialData> {
    let monthly = parse_monthly_csv(monthly_csv)?;
    let mothership_2025 = parse_mothership_csv(mothership_2025_csv, 2025)?;
    let mothership_2026 = parse_mothership_csv(mothership_2026_csv, 2026)?;

    info!(
        "normalized {} monthly entries and {} + {} departments",
        monthly.len(),
        mothership_2025.departments.len(),
        mothership_2026.departments.len()
    );

    let programs = build_programs(&mothership_2025, &mothership_2026);
    debug!("built {} program performance records", programs.len());

    Ok(FinancialData {
        monthly,
        mothership_2025,
        mothership_2026,
        programs,
    })
}
