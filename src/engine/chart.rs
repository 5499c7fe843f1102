use rust_decimal::Decimal;
use serde::Serialize;

use super::BudgetMetrics;
use crate::models::CategoryBudgetRow;

/// Chart-ready series for the budget summary: planned vs. actual overall,
/// and budget vs. spent per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetChart {
    pub overall: Vec<(String, Decimal)>,
    pub labels: Vec<String>,
    pub planned: Vec<Decimal>,
    pub spent: Vec<Decimal>,
}

impl BudgetChart {
    pub fn new(rows: &[CategoryBudgetRow], metrics: &BudgetMetrics) -> Self {
        Self {
            overall: vec![
                ("Planned Budget".to_string(), metrics.total_planned_budget),
                ("Actual Spend".to_string(), metrics.total_spent_this_month),
            ],
            labels: rows.iter().map(|r| r.name.clone()).collect(),
            planned: rows
                .iter()
                .map(|r| r.budget_limit.unwrap_or(Decimal::ZERO))
                .collect(),
            spent: rows.iter().map(|r| r.spent).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
