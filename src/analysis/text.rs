//! Human-readable insight and recommendation sentences.

use rust_decimal::Decimal;

use crate::engine::BudgetSummary;
use crate::format::{format_amount, format_percent};

use super::SpendingAnalysis;

pub fn insight_lines(analysis: &SpendingAnalysis) -> Vec<String> {
    let mut lines = Vec::new();

    if analysis.average_monthly_spend > Decimal::ZERO {
        lines.push(format!(
            "On average you spend {} per month.",
            format_amount(analysis.average_monthly_spend)
        ));
    }

    if analysis.this_month_spend > Decimal::ZERO {
        lines.push(format!(
            "You've already spent {} this month.",
            format_amount(analysis.this_month_spend)
        ));
    }

    if let Some(top) = analysis.top_category() {
        lines.push(format!(
            "Your highest spending category overall is {} ({}).",
            top.category,
            format_amount(top.amount)
        ));
    }

    lines
}

pub fn recommendations(analysis: &SpendingAnalysis) -> Vec<String> {
    let mut recs = Vec::new();

    if let Some(top) = analysis.top_category() {
        recs.push(format!(
            "Consider setting a tighter budget for {} if you want to reduce your overall spending.",
            top.category
        ));
    }
    if !analysis.recurring.is_empty() {
        recs.push(
            "Review your recurring expenses to see if any subscriptions can be cancelled or downgraded."
                .to_string(),
        );
    }
    if recs.is_empty() {
        recs.push(
            "Start adding more transactions to unlock personalised tips about your spending patterns."
                .to_string(),
        );
    }

    recs
}

pub fn budget_lines(summary: &BudgetSummary) -> Vec<String> {
    let metrics = &summary.metrics;
    let insights = &summary.insights;
    let mut lines = Vec::new();

    if !metrics.has_any_budget {
        lines.push("No budgets set yet. Add a budget limit to a category to track it here.".to_string());
        return lines;
    }

    if !insights.over_budget.is_empty() {
        lines.push(format!("Over budget: {}.", insights.over_budget_names()));
    }
    if !insights.warning.is_empty() {
        lines.push(format!("Close to the limit: {}.", insights.warning_names()));
    }
    if let Some(row) = &insights.closest_to_limit {
        if let Some(pct) = row.percent_used {
            lines.push(format!(
                "{} is closest to its limit at {} used.",
                row.name,
                format_percent(pct)
            ));
        }
    }

    if metrics.daily_spend_target > Decimal::ZERO {
        lines.push(format!(
            "You can spend about {} per day for the remaining {} days.",
            format_amount(metrics.daily_spend_target),
            metrics.days_left_in_month
        ));
    } else if metrics.remaining_budget < Decimal::ZERO {
        lines.push(format!(
            "You are {} over your total budget this month.",
            format_amount(metrics.remaining_budget.abs())
        ));
    }

    lines
}
