use serde::Serialize;

/// Growth rate applied when an industry has no entry in the table.
pub const DEFAULT_GROWTH_RATE: f64 = 0.03;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Industry {
    Finance,
    Technology,
    Healthcare,
    Education,
    Manufacturing,
    Retail,
    Government,
    Consulting,
    Other,
}

impl Industry {
    /// Tolerant key lookup: any unrecognized key maps to `Other`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "finance" => Self::Finance,
            "technology" => Self::Technology,
            "healthcare" => Self::Healthcare,
            "education" => Self::Education,
            "manufacturing" => Self::Manufacturing,
            "retail" => Self::Retail,
            "government" => Self::Government,
            "consulting" => Self::Consulting,
            _ => Self::Other,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Technology => "technology",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Manufacturing => "manufacturing",
            Self::Retail => "retail",
            Self::Government => "government",
            Self::Consulting => "consulting",
            Self::Other => "other",
        }
    }
}

/// Industry -> annual salary growth rate (fraction). Lookup of a missing
/// entry falls back to [`DEFAULT_GROWTH_RATE`] rather than failing.
#[derive(Debug, Clone)]
pub struct GrowthTable {
    rates: Vec<(Industry, f64)>,
}

impl GrowthTable {
    pub fn new(rates: Vec<(Industry, f64)>) -> Self {
        Self { rates }
    }

    pub fn rate(&self, industry: Industry) -> f64 {
        self.rates
            .iter()
            .find(|(key, _)| *key == industry)
            .map(|(_, rate)| *rate)
            .unwrap_or(DEFAULT_GROWTH_RATE)
    }
}

impl Default for GrowthTable {
    fn default() -> Self {
        Self::new(vec![
            (Industry::Finance, 0.05),
            (Industry::Technology, 0.06),
            (Industry::Healthcare, 0.04),
            (Industry::Education, 0.03),
            (Industry::Manufacturing, 0.035),
            (Industry::Retail, 0.025),
            (Industry::Government, 0.02),
            (Industry::Consulting, 0.045),
        ])
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AgeTracking {
    Disabled,
    Enabled { current_age: u32, marriage_age: u32 },
}

#[derive(Debug, Clone)]
pub struct ProjectionInput {
    pub starting_salary: f64,
    pub annual_rent: f64,
    pub annual_other_expenses: f64,
    pub years: u32,
    pub industry: Industry,
    pub investment_return_rate: f64,
    pub invest_ratio: f64,
    pub age_tracking: AgeTracking,
}

/// Financial state recorded for one simulated year. Monetary fields are
/// rounded to cents at emission; `year` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub salary: f64,
    pub rent: f64,
    pub expenses: f64,
    pub annual_savings: f64,
    pub invested_balance: f64,
    pub cash_balance: f64,
    pub total_wealth: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub snapshots: Vec<YearSnapshot>,
}

impl ProjectionResult {
    pub fn final_snapshot(&self) -> Option<&YearSnapshot> {
        self.snapshots.last()
    }
}
