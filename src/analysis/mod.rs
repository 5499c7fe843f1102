//! All-time spending analysis: category and monthly series, averages, top
//! categories, recurring and irregular expenses and a next-month forecast.

use std::collections::BTreeMap;

use chrono::{Month, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::engine::{self, saturating_sum, CategorySpending};
use crate::models::{Category, Transaction};

mod recurring;
pub mod text;

pub use recurring::{detect_recurring, RecurringExpense};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpending {
    /// `YYYY-MM`
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialOverview {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub current_balance: Decimal,
}

pub fn financial_overview(transactions: &[Transaction]) -> FinancialOverview {
    let total_income = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    );
    let total_expenses = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount),
    );
    FinancialOverview {
        total_income,
        total_expenses,
        current_balance: total_income.saturating_sub(total_expenses),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingAnalysis {
    pub category_spending: Vec<CategorySpending>,
    pub monthly_spending: Vec<MonthlySpending>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub average_monthly_spend: Decimal,
    pub this_month_spend: Decimal,
    pub top_categories: Vec<CategorySpending>,
    pub biggest_month: Option<MonthlySpending>,
    pub recurring: Vec<RecurringExpense>,
    pub irregular: Vec<Transaction>,
    pub forecast_next_month: Option<Decimal>,
}

impl SpendingAnalysis {
    pub fn compute(
        transactions: &[Transaction],
        categories: &[Category],
        reference_date: NaiveDate,
        config: &AnalysisConfig,
    ) -> Self {
        let overview = financial_overview(transactions);
        let category_spending = category_spending(transactions, categories);
        let monthly_spending = monthly_spending(transactions);

        let months = Decimal::from(monthly_spending.len().max(1));
        let average_monthly_spend = overview.total_expenses / months;

        let current_key = reference_date.format("%Y-%m").to_string();
        let this_month_spend = monthly_spending
            .iter()
            .find(|m| m.month == current_key)
            .map(|m| m.amount)
            .unwrap_or(Decimal::ZERO);

        Self {
            top_categories: engine::top_categories(&category_spending, config.top_categories),
            biggest_month: biggest_month(&monthly_spending),
            recurring: detect_recurring(transactions),
            irregular: irregular_expenses(transactions, config.irregular_factor),
            forecast_next_month: forecast_next_month(&monthly_spending),
            category_spending,
            monthly_spending,
            total_income: overview.total_income,
            total_expenses: overview.total_expenses,
            average_monthly_spend,
            this_month_spend,
        }
    }

    pub fn top_category(&self) -> Option<&CategorySpending> {
        self.top_categories.first()
    }
}

/// Expense totals per resolved category name, in first-seen order.
pub fn category_spending(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpending> {
    let mut series: Vec<CategorySpending> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let name = Category::resolve(categories, &txn.category)
            .map(|c| c.name.as_str())
            .or(txn.category.name.as_deref())
            .unwrap_or(UNCATEGORIZED);
        match series.iter_mut().find(|s| s.category == name) {
            Some(entry) => entry.amount = entry.amount.saturating_add(txn.amount),
            None => series.push(CategorySpending::new(name, txn.amount)),
        }
    }
    series
}

/// Expense totals per `YYYY-MM`, oldest first. Undated expenses are skipped.
pub fn monthly_spending(transactions: &[Transaction]) -> Vec<MonthlySpending> {
    let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(key) = txn.month_key() {
            let total = by_month.entry(key).or_default();
            *total = total.saturating_add(txn.amount);
        }
    }
    by_month
        .into_iter()
        .map(|(month, amount)| MonthlySpending { month, amount })
        .collect()
}

pub fn biggest_month(series: &[MonthlySpending]) -> Option<MonthlySpending> {
    let mut best: Option<&MonthlySpending> = None;
    for entry in series {
        if best.map_or(true, |b| entry.amount > b.amount) {
            best = Some(entry);
        }
    }
    best.cloned()
}

/// Expenses above `factor` times the mean expense. Needs at least two expenses.
pub fn irregular_expenses(transactions: &[Transaction], factor: Decimal) -> Vec<Transaction> {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    if expenses.len() < 2 {
        return Vec::new();
    }
    let total = saturating_sum(expenses.iter().map(|t| t.amount));
    let threshold = (total / Decimal::from(expenses.len())).saturating_mul(factor);
    expenses
        .into_iter()
        .filter(|t| t.amount > threshold)
        .cloned()
        .collect()
}

/// Least-squares linear trend over the monthly series, projected one month
/// ahead and clamped at zero.
pub fn forecast_next_month(series: &[MonthlySpending]) -> Option<Decimal> {
    if series.len() < 2 {
        return None;
    }
    let n = Decimal::from(series.len());
    let mean_x = (n - Decimal::ONE) / Decimal::TWO;
    let mean_y = saturating_sum(series.iter().map(|m| m.amount)) / n;

    // Overflow means no forecast.
    let mut covariance = Decimal::ZERO;
    let mut variance = Decimal::ZERO;
    for (i, entry) in series.iter().enumerate() {
        let dx = Decimal::from(i) - mean_x;
        let term = dx.checked_mul(entry.amount.checked_sub(mean_y)?)?;
        covariance = covariance.checked_add(term)?;
        variance += dx * dx;
    }
    let slope = covariance.checked_div(variance)?;
    let predicted = mean_y.checked_add(slope.checked_mul(n - mean_x)?)?;
    Some(predicted.max(Decimal::ZERO).round_dp(2))
}

/// Month filter over the monthly series. `None` or "All" keeps everything;
/// otherwise a month name ("Mar", "march") keeps entries of that calendar
/// month across all years.
pub fn filter_by_calendar_month<'a>(
    series: &'a [MonthlySpending],
    month: Option<&str>,
) -> Vec<&'a MonthlySpending> {
    let wanted = month
        .filter(|m| !m.eq_ignore_ascii_case("all"))
        .and_then(|m| m.parse::<Month>().ok())
        .map(|m| format!("{:02}", m.number_from_month()));
    match wanted {
        None => series.iter().collect(),
        Some(mm) => series
            .iter()
            .filter(|m| m.month.get(5..7) == Some(mm.as_str()))
            .collect(),
    }
}
