use serde::{Deserialize, Serialize};

/// Which side of the report a row belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Revenue,
    Expense,
}

/// An actual-vs-budget pair. Appears wherever the two are compared.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AmountPair {
    pub actual: f64,
    pub budget: f64,
}

impl AmountPair {
    pub fn new(actual: f64, budget: f64) -> Self {
        Self { actual, budget }
    }

    pub fn variance(&self) -> f64 {
        self.actual - self.budget
    }

    pub fn percent_of_budget(&self) -> f64 {
        if self.budget != 0.0 {
            self.actual / self.budget * 100.0
        } else {
            0.0
        }
    }
}

/// One spreadsheet row in normalized form.
///
/// `variance` and `percent_of_budget` are always derived from
/// `actual`/`budget`; construct through [`LineItem::new`] and rebudget
/// through [`LineItem::with_budget`] so they never go stale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub actual: f64,
    pub budget: f64,
    pub variance: f64,
    pub percent_of_budget: f64,
    /// 0 = top-level/subtotal, deeper values are nested detail rows.
    pub depth: u8,
    pub is_total: bool,
    pub section: Section,
    /// Reserved for future nesting; always empty in the current parse.
    pub children: Vec<LineItem>,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        actual: f64,
        budget: f64,
        depth: u8,
        is_total: bool,
        section: Section,
    ) -> Self {
        let pair = AmountPair::new(actual, budget);
        Self {
            name: name.into(),
            actual,
            budget,
            variance: pair.variance(),
            percent_of_budget: pair.percent_of_budget(),
            depth,
            is_total,
            section,
            children: Vec::new(),
        }
    }

    /// Returns a copy with a replaced budget and freshly derived
    /// variance/percent-of-budget (used by pro-ration).
    pub fn with_budget(&self, budget: f64) -> Self {
        let pair = AmountPair::new(self.actual, budget);
        let mut item = self.clone();
        item.budget = budget;
        item.variance = pair.variance();
        item.percent_of_budget = pair.percent_of_budget();
        item
    }
}

/// Month-scoped analogue of [`LineItem`], keyed by label within a
/// [`MonthlyEntry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryData {
    pub name: String,
    pub actual: f64,
    pub budget: f64,
    pub variance: f64,
    pub percent_of_budget: f64,
    pub is_total: bool,
    pub section: Section,
    pub children: Vec<CategoryData>,
}

impl CategoryData {
    pub fn new(
        name: impl Into<String>,
        actual: f64,
        budget: f64,
        is_total: bool,
        section: Section,
    ) -> Self {
        let pair = AmountPair::new(actual, budget);
        Self {
            name: name.into(),
            actual,
            budget,
            variance: pair.variance(),
            percent_of_budget: pair.percent_of_budget(),
            is_total,
            section,
            children: Vec::new(),
        }
    }
}

/// One calendar month of one fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyEntry {
    /// Three-letter month code, e.g. "Jan".
    pub month: String,
    pub year: i32,
    /// "Mon YYYY" display label.
    pub label: String,
    pub revenue: AmountPair,
    pub expenses: AmountPair,
    pub net_revenue: AmountPair,
    /// Categories in source row order, names unique per month. Sparse: a
    /// label that is absent here had a zero balance for this month.
    pub categories: Vec<CategoryData>,
}

impl MonthlyEntry {
    /// Looks up a category by label. `None` means a zero balance for this
    /// month, not an unknown value.
    pub fn category(&self, name: &str) -> Option<&CategoryData> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// One department's annual rollup.
///
/// The aggregate `actual`/`budget` is the sum of the revenue and expense
/// sides with expenses as positive magnitudes (not a net figure); several
/// ratio KPIs depend on this exact summation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentData {
    pub name: String,
    pub actual: f64,
    pub budget: f64,
    pub variance: f64,
    pub percent_of_budget: f64,
    pub line_items: Vec<LineItem>,
}

impl DepartmentData {
    pub fn new(
        name: impl Into<String>,
        actual: f64,
        budget: f64,
        line_items: Vec<LineItem>,
    ) -> Self {
        let pair = AmountPair::new(actual, budget);
        Self {
            name: name.into(),
            actual,
            budget,
            variance: pair.variance(),
            percent_of_budget: pair.percent_of_budget(),
            line_items,
        }
    }
}

/// One fiscal year's full organizational picture from the mothership export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MothershipData {
    pub year: i32,
    pub departments: Vec<DepartmentData>,
    pub total_revenue: AmountPair,
    pub total_expenses: AmountPair,
    pub net_revenue: AmountPair,
    /// Organization-wide line items (Total column), not department-scoped.
    pub line_items: Vec<LineItem>,
}

impl MothershipData {
    /// Zero-valued result for sheets too short to carry data.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            departments: Vec::new(),
            total_revenue: AmountPair::default(),
            total_expenses: AmountPair::default(),
            net_revenue: AmountPair::default(),
            line_items: Vec::new(),
        }
    }

    pub fn department(&self, name: &str) -> Option<&DepartmentData> {
        self.departments.iter().find(|d| d.name == name)
    }
}

/// Performance record for one (program name, fiscal year) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramPerformance {
    pub name: String,
    pub revenue: AmountPair,
    pub expenses: AmountPair,
    pub net: f64,
    pub percent_of_budget: f64,
    pub year: i32,
}

/// The top-level aggregate handed to the presentation layer. Built once per
/// load cycle and replaced wholesale on reload, never patched field by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialData {
    pub monthly: Vec<MonthlyEntry>,
    pub mothership_2025: MothershipData,
    pub mothership_2026: MothershipData,
    pub programs: Vec<ProgramPerformance>,
}

impl FinancialData {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Year selection for KPI queries: one fiscal year or both.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YearFilter {
    Year(i32),
    Both,
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::Year(y) => *y == year,
            YearFilter::Both => true,
        }
    }
}
