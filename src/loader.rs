//! Concurrent retrieval and assembly of the three source exports.
//!
//! Transport is the caller's concern; this module only orchestrates. The
//! three fetches run concurrently and independently, and a failure of any
//! one aborts the whole load with a single error naming the resource — no
//! partial aggregate is ever constructed.

use crate::error::{ReportError, Result};
use crate::schema::FinancialData;
use futures::future::try_join3;
use std::fmt::Display;
use std::future::Future;

/// The three source exports a full load requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFile {
    MonthlyTrend,
    Mothership2025,
    Mothership2026,
}

impl SourceFile {
    pub fn describe(&self) -> &'static str {
        match self {
            SourceFile::MonthlyTrend => "monthly trend report",
            SourceFile::Mothership2025 => "2025 mothership report",
            SourceFile::Mothership2026 => "2026 mothership report",
        }
    }
}

async fn fetch_one<Fut, E>(file: SourceFile, fetched: Fut) -> Result<String>
where
    Fut: Future<Output = std::result::Result<String, E>>,
    E: Display,
{
    fetched.await.map_err(|e| ReportError::Transport {
        resource: file.describe(),
        details: e.to_string(),
    })
}

/// Fetches all three exports concurrently through the supplied transport
/// and assembles the full [`FinancialData`] aggregate.
pub async fn load_financial_data<F, Fut, E>(fetch: F) -> Result<FinancialData>
where
    F: Fn(SourceFile) -> Fut,
    Fut: Future<Output = std::result::Result<String, E>>,
    E: Display,
{
    let (monthly, mothership_2025, mothership_2026) = try_join3(
        fetch_one(SourceFile::MonthlyTrend, fetch(SourceFile::MonthlyTrend)),
        fetch_one(SourceFile::Mothership2025, fetch(SourceFile::Mothership2025)),
        fetch_one(SourceFile::Mothership2026, fetch(SourceFile::Mothership2026)),
    )
    .await?;

    crate::build_financial_data(&monthly, &mothership_2025, &mothership_2026)
}
