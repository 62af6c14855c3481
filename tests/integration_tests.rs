use anyhow::Result;
use financial_report_normalizer::*;

fn monthly_fixture() -> String {
    [
        "Camp Hollow Ridge,,,,,,,,",
        "Statement of Activity Trend,,,,,,,,",
        "January 2025 - December 2026,,,,,,,,",
        ",Jan 2025 Actual,Jan 2025 Budget,Feb 2025 Actual,Feb 2025 Budget,Jan 2026 Actual,Jan 2026 Budget,Total Actual,Total Budget",
        "Revenue,,,,,,,,",
        "400 Contributions,,,,,,,,",
        "Grants,600,500,660,500,100,60,1360,1060",
        "\"Camp Fees\",\"$400\",\"$400\",440,400,50,40,890,840",
        "Total 400 Contributions,\"1,000\",900,\"1,100\",900,150,100,\"2,250\",\"1,900\"",
        "Total Revenue,\"1,000\",900,\"1,100\",900,150,100,\"2,250\",\"1,900\"",
        "Gross Profit,,,,,,,,",
        "Expenditures,,,,,,,,",
        "600 Personnel Expenses,,,,,,,,",
        "Salaries,500,520,580,520,70,60,1150,1100",
        "Total 600 Personnel Expenses,500,520,580,520,70,60,1150,1100",
        "Office Supplies,100,130,120,130,20,20,240,280",
        "Total Expenditures,600,650,700,650,90,80,1390,1380",
        "Net Operating Revenue,400,250,400,250,60,20,860,520",
        "Net Revenue,400,250,400,250,60,20,860,520",
        "",
    ]
    .join("\n")
}

fn mothership_2025_fixture() -> String {
    [
        "Camp Hollow Ridge,,,,,,,,,,",
        "Budget vs. Actuals: Mothership FY25,,,,,,,,,,",
        "January - December 2025,,,,,,,,,,",
        ",Summer Camp Actual,Summer Camp Budget,Golf Actual,Golf Budget,Administrative Actual,Administrative Budget,Fundraising Actual,Fundraising Budget,Total Actual,Total Budget",
        "Revenue,,,,,,,,,,",
        "Camp Fees,900,800,0,0,0,0,0,0,900,800",
        "Green Fees,0,0,300,250,0,0,0,0,300,250",
        "Donations,0,0,0,0,100,120,50,40,150,160",
        "Total Revenue,900,800,300,250,100,120,50,40,\"1,350\",\"1,210\"",
        "Gross Profit,,,,,,,,,,",
        "Expenditures,,,,,,,,,,",
        "Salaries,400,450,120,100,200,180,0,0,720,730",
        "Total 600 Personnel Expenses,400,450,120,100,200,180,0,0,720,730",
        "Supplies,50,40,30,35,0,0,0,0,80,75",
        "Total Expenditures,450,490,150,135,200,180,0,0,800,805",
        "Net Operating Revenue,450,310,150,115,-100,-60,50,40,550,405",
        "Net Revenue,450,310,150,115,-100,-60,50,40,550,405",
        "",
    ]
    .join("\n")
}

fn mothership_2026_fixture() -> String {
    [
        "Camp Hollow Ridge,,,,",
        "Budget vs. Actuals: Mothership FY26,,,,",
        "January - December 2026,,,,",
        ",Summer Camp Actual,Summer Camp Budget,Total Actual,Total Budget",
        "Revenue,,,,",
        "Camp Fees,200,\"1,000\",200,\"1,000\"",
        "Total Revenue,200,\"1,000\",200,\"1,000\"",
        "Gross Profit,,,,",
        "Expenditures,,,,",
        "Salaries,100,500,100,500",
        "Total Expenditures,100,500,100,500",
        "Net Operating Revenue,100,500,100,500",
        "Net Revenue,100,500,100,500",
        "",
    ]
    .join("\n")
}

fn full_aggregate() -> Result<FinancialData> {
    Ok(build_financial_data(
        &monthly_fixture(),
        &mothership_2025_fixture(),
        &mothership_2026_fixture(),
    )?)
}

#[test]
fn test_monthly_entries_cover_every_header_month() -> Result<()> {
    let data = full_aggregate()?;

    let labels: Vec<&str> = data.monthly.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan 2025", "Feb 2025", "Jan 2026"]);

    let jan_2025 = &data.monthly[0];
    assert_eq!(jan_2025.revenue, AmountPair::new(1000.0, 900.0));
    assert_eq!(jan_2025.expenses, AmountPair::new(600.0, 650.0));
    assert_eq!(jan_2025.net_revenue, AmountPair::new(400.0, 250.0));

    // Net revenue comes from its own summary row, not derived from the
    // other two; on this consistent sheet the three agree.
    for month in &data.monthly {
        assert_eq!(
            month.revenue.actual - month.expenses.actual,
            month.net_revenue.actual,
            "{}",
            month.label
        );
    }
    Ok(())
}

#[test]
fn test_monthly_categories_and_sections() -> Result<()> {
    let data = full_aggregate()?;
    let jan_2025 = &data.monthly[0];

    let grants = jan_2025.category("Grants").unwrap();
    assert_eq!(grants.section, Section::Revenue);
    assert_eq!(grants.actual, 600.0);
    assert_eq!(grants.percent_of_budget, 120.0);

    let personnel = jan_2025.category("Total 600 Personnel Expenses").unwrap();
    assert!(personnel.is_total);
    assert_eq!(personnel.section, Section::Expense);

    // Summary and structural rows never become categories.
    for excluded in ["Revenue", "Expenditures", "Total Revenue", "Net Revenue"] {
        assert!(jan_2025.category(excluded).is_none(), "{}", excluded);
    }
    Ok(())
}

#[test]
fn test_mothership_rollups() -> Result<()> {
    let data = full_aggregate()?;
    let m2025 = &data.mothership_2025;

    assert_eq!(m2025.total_revenue, AmountPair::new(1350.0, 1210.0));
    assert_eq!(m2025.total_expenses, AmountPair::new(800.0, 805.0));
    assert_eq!(m2025.net_revenue, AmountPair::new(550.0, 405.0));

    let names: Vec<&str> = m2025.departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Summer Camp", "Golf", "Administrative"]);

    // Unlike-signed aggregate: revenue plus expense magnitude.
    let golf = m2025.department("Golf").unwrap();
    assert_eq!(golf.actual, 450.0);
    assert_eq!(golf.budget, 385.0);

    // Golf posted nothing on Camp Fees, so the row stays out of its items
    // while the org-level list keeps every classified row.
    assert!(golf.line_items.iter().all(|li| li.name != "Camp Fees"));
    assert!(m2025.line_items.iter().any(|li| li.name == "Camp Fees"));
    Ok(())
}

#[test]
fn test_program_records_exclude_overhead_and_sort_by_name() -> Result<()> {
    let data = full_aggregate()?;

    let keys: Vec<(&str, i32)> = data
        .programs
        .iter()
        .map(|p| (p.name.as_str(), p.year))
        .collect();
    assert_eq!(
        keys,
        vec![("Golf", 2025), ("Summer Camp", 2025), ("Summer Camp", 2026)]
    );

    let golf = &data.programs[0];
    assert_eq!(golf.revenue, AmountPair::new(300.0, 250.0));
    assert_eq!(golf.expenses, AmountPair::new(150.0, 135.0));
    assert_eq!(golf.net, 150.0);

    // Administrative had real money in both years and still never appears.
    assert!(data.programs.iter().all(|p| p.name != "Administrative"));
    Ok(())
}

#[test]
fn test_kpis_over_the_full_aggregate() -> Result<()> {
    let data = full_aggregate()?;

    let revenue_2025 = kpi::total_revenue(&data.monthly, YearFilter::Year(2025));
    assert_eq!(revenue_2025, AmountPair::new(2100.0, 1800.0));

    let health = kpi::budget_health(&data.monthly, YearFilter::Year(2025));
    assert!((health - 83.333).abs() < 0.001);

    // One active 2026 month: 150 annualizes to 1800 against 2100 prior.
    assert_eq!(kpi::active_month_count(&data.monthly, YearFilter::Year(2026)), 1);
    assert_eq!(kpi::annualized_projection(&data.monthly, 2026), 1800.0);
    let growth = kpi::yoy_growth(&data.monthly, 2026);
    assert!((growth - (-14.2857)).abs() < 0.001);

    // Pro-rating the 2026 annual revenue budget to the single active month.
    let annual_budget = data.mothership_2026.total_revenue.budget;
    assert_eq!(kpi::prorate_budget(annual_budget, 1), 1000.0 / 12.0);

    let personnel = kpi::personnel_ratio(&data.mothership_2025);
    assert_eq!(personnel, 90.0);

    // Program spend: non-total expense items of Summer Camp and Golf.
    let program_spend = kpi::program_spend_ratio(&data.mothership_2025);
    assert_eq!(program_spend, 75.0);

    let admin = kpi::admin_overhead(&data.mothership_2025);
    assert_eq!(admin, 25.0);
    Ok(())
}

#[test]
fn test_category_breakdown_from_monthly_subtotals() -> Result<()> {
    let data = full_aggregate()?;

    let expenses = kpi::category_breakdown(&data.monthly, YearFilter::Year(2025), Section::Expense);
    assert_eq!(
        expenses,
        vec![("600 Personnel Expenses".to_string(), 1080.0)]
    );

    let revenue = kpi::category_breakdown(&data.monthly, YearFilter::Both, Section::Revenue);
    assert_eq!(revenue, vec![("400 Contributions".to_string(), 2250.0)]);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_load_matches_direct_build() -> Result<()> {
    let loaded = load_financial_data(|file| async move {
        Ok::<_, String>(match file {
            SourceFile::MonthlyTrend => monthly_fixture(),
            SourceFile::Mothership2025 => mothership_2025_fixture(),
            SourceFile::Mothership2026 => mothership_2026_fixture(),
        })
    })
    .await?;

    assert_eq!(loaded, full_aggregate()?);
    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_names_the_resource() {
    let result = load_financial_data(|file| async move {
        match file {
            SourceFile::MonthlyTrend => Err("connection reset"),
            _ => Ok(monthly_fixture()),
        }
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to load monthly trend report: connection reset"
    );
}
