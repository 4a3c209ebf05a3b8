use super::types::{
    AgeTracking, GrowthTable, ProjectionInput, ProjectionResult, YearSnapshot,
};

/// Fixed rent reduction once the simulated age reaches the marriage age,
/// modeling shared housing cost.
const MARRIAGE_RENT_FACTOR: f64 = 0.8;

/// Projects year-by-year wealth accumulation using the default growth table.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    project_with_table(input, &GrowthTable::default())
}

/// Projects against a caller-owned growth table. Pure and deterministic:
/// identical inputs yield bit-identical results. `years == 0` produces an
/// empty result rather than an error.
pub fn project_with_table(input: &ProjectionInput, growth: &GrowthTable) -> ProjectionResult {
    let growth_rate = growth.rate(input.industry);

    let mut salary = input.starting_salary;
    let mut invested = 0.0_f64;
    let mut cash = 0.0_f64;
    let mut snapshots = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        // Salary compounds every year including year 1, so the first
        // reported salary is already one growth step past the starting
        // salary. Intentional, matches the reference trajectory.
        salary *= 1.0 + growth_rate;

        let age = match input.age_tracking {
            AgeTracking::Enabled { current_age, .. } => {
                Some(current_age.saturating_add(year - 1))
            }
            AgeTracking::Disabled => None,
        };

        let rent = effective_rent(input, age);
        let expenses = rent + input.annual_other_expenses;
        // Negative savings represent a shortfall, not an error.
        let annual_savings = salary - expenses;

        let to_invest = annual_savings * input.invest_ratio;
        let to_cash = annual_savings * (1.0 - input.invest_ratio);

        invested = invested * (1.0 + input.investment_return_rate) + to_invest;
        cash += to_cash;
        let total = cash + invested;

        snapshots.push(YearSnapshot {
            year,
            age,
            salary: round_cents(salary),
            rent: round_cents(rent),
            expenses: round_cents(expenses),
            annual_savings: round_cents(annual_savings),
            invested_balance: round_cents(invested),
            cash_balance: round_cents(cash),
            total_wealth: round_cents(total),
        });
        // salary, invested and cash carry forward unrounded.
    }

    ProjectionResult { snapshots }
}

fn effective_rent(input: &ProjectionInput, age: Option<u32>) -> f64 {
    match (input.age_tracking, age) {
        (AgeTracking::Enabled { marriage_age, .. }, Some(age)) if age >= marriage_age => {
            input.annual_rent * MARRIAGE_RENT_FACTOR
        }
        _ => input.annual_rent,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
