//! Budget aggregation: month filtering, per-category budget rows, top-level
//! metrics and the insight sets built on top of them.
//!
//! Everything in here is a pure function of its inputs. "Today" is always
//! passed in as `reference_date`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetStatus, Category, CategoryBudgetRow, Transaction};

mod chart;

pub use chart::BudgetChart;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetMetrics {
    pub total_planned_budget: Decimal,
    pub has_any_budget: bool,
    pub total_spent_this_month: Decimal,
    pub remaining_budget: Decimal,
    pub days_left_in_month: u32,
    pub daily_spend_target: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetInsights {
    pub over_budget: Vec<CategoryBudgetRow>,
    pub warning: Vec<CategoryBudgetRow>,
    pub closest_to_limit: Option<CategoryBudgetRow>,
}

impl BudgetInsights {
    pub fn over_budget_names(&self) -> String {
        join_names(&self.over_budget)
    }

    pub fn warning_names(&self) -> String {
        join_names(&self.warning)
    }
}

fn join_names(rows: &[CategoryBudgetRow]) -> String {
    rows.iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: Decimal,
}

impl CategorySpending {
    pub fn new(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// One full aggregation pass for the budget summary view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub reference_date: NaiveDate,
    pub rows: Vec<CategoryBudgetRow>,
    pub metrics: BudgetMetrics,
    pub insights: BudgetInsights,
    pub chart: BudgetChart,
}

pub fn summarize(
    categories: &[Category],
    transactions: &[Transaction],
    reference_date: NaiveDate,
) -> BudgetSummary {
    let month_expenses = monthly_expenses(transactions, reference_date);
    let rows = category_rows(categories, &month_expenses);
    let metrics = top_level_metrics(&rows, &month_expenses, reference_date);
    let insights = insights(&rows);
    let chart = BudgetChart::new(&rows, &metrics);
    BudgetSummary {
        reference_date,
        rows,
        metrics,
        insights,
        chart,
    }
}

// ── Filtering ────────────────────────────────────────────────

/// Expenses dated in the same calendar month as `reference_date`, in input order.
pub fn monthly_expenses(
    transactions: &[Transaction],
    reference_date: NaiveDate,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| {
            t.date.is_some_and(|d| {
                d.year() == reference_date.year() && d.month() == reference_date.month()
            })
        })
        .collect()
}

// ── Rows ─────────────────────────────────────────────────────

pub fn category_rows(
    categories: &[Category],
    month_expenses: &[&Transaction],
) -> Vec<CategoryBudgetRow> {
    let mut spent = vec![Decimal::ZERO; categories.len()];
    for txn in month_expenses {
        if let Some(idx) = Category::resolve_index(categories, &txn.category) {
            spent[idx] = spent[idx].saturating_add(txn.amount);
        }
    }

    categories
        .iter()
        .zip(spent)
        .map(|(cat, spent)| {
            CategoryBudgetRow::new(cat.name.clone(), cat.color.clone(), cat.budget_limit, spent)
        })
        .collect()
}

// ── Metrics ──────────────────────────────────────────────────

pub fn top_level_metrics(
    rows: &[CategoryBudgetRow],
    month_expenses: &[&Transaction],
    reference_date: NaiveDate,
) -> BudgetMetrics {
    let total_planned_budget = saturating_sum(
        rows.iter()
            .filter_map(|r| r.budget_limit)
            .filter(|l| *l > Decimal::ZERO),
    );
    let total_spent_this_month = saturating_sum(month_expenses.iter().map(|t| t.amount));
    let remaining_budget = total_planned_budget.saturating_sub(total_spent_this_month);

    let days_left_in_month = days_in_month(reference_date).saturating_sub(reference_date.day());
    let daily_spend_target = if remaining_budget > Decimal::ZERO && days_left_in_month > 0 {
        remaining_budget / Decimal::from(days_left_in_month)
    } else {
        Decimal::ZERO
    };

    BudgetMetrics {
        total_planned_budget,
        has_any_budget: total_planned_budget > Decimal::ZERO,
        total_spent_this_month,
        remaining_budget,
        days_left_in_month,
        daily_spend_target,
    }
}

/// Sum that pins at `Decimal::MAX` instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

// ── Insights ─────────────────────────────────────────────────

pub fn insights(rows: &[CategoryBudgetRow]) -> BudgetInsights {
    let with_status = |status: BudgetStatus| -> Vec<CategoryBudgetRow> {
        rows.iter().filter(|r| r.status == status).cloned().collect()
    };

    let mut closest_to_limit: Option<&CategoryBudgetRow> = None;
    for row in rows {
        let Some(pct) = row.percent_used else {
            continue;
        };
        let beats = closest_to_limit
            .and_then(|best| best.percent_used)
            .map_or(true, |best| pct > best);
        if beats {
            closest_to_limit = Some(row);
        }
    }

    BudgetInsights {
        over_budget: with_status(BudgetStatus::Over),
        warning: with_status(BudgetStatus::Warning),
        closest_to_limit: closest_to_limit.cloned(),
    }
}

// ── Top categories ───────────────────────────────────────────

/// The `n` largest entries, descending. Equal amounts keep their input order.
pub fn top_categories(series: &[CategorySpending], n: usize) -> Vec<CategorySpending> {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests;
