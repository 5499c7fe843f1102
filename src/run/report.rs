//! Plain-text rendering of engine output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::analysis::{filter_by_calendar_month, text, FinancialOverview, SpendingAnalysis};
use crate::engine::BudgetSummary;
use crate::format::{format_amount, format_percent, truncate};
use crate::models::Category;

const RULE_WIDTH: usize = 72;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn or_dash(val: Option<Decimal>, fmt: fn(Decimal) -> String) -> String {
    val.map(fmt).unwrap_or_else(|| "-".to_string())
}

pub fn render_summary(summary: &BudgetSummary) -> String {
    let m = &summary.metrics;
    let mut out = String::new();

    let _ = writeln!(out, "Budget summary - {}", summary.reference_date.format("%B %Y"));
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "  Planned budget:    {}", format_amount(m.total_planned_budget));
    let _ = writeln!(out, "  Spent this month:  {}", format_amount(m.total_spent_this_month));
    let _ = writeln!(out, "  Remaining:         {}", format_amount(m.remaining_budget));
    let _ = writeln!(out, "  Days left:         {}", m.days_left_in_month);
    let _ = writeln!(out, "  Daily target:      {}", format_amount(m.daily_spend_target));

    if summary.chart.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No categories yet.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<20} {:>12} {:>12} {:>12} {:>8}  Status",
        "Category", "Budget", "Spent", "Remaining", "Used"
    );
    for row in &summary.rows {
        let _ = writeln!(
            out,
            "  {:<20} {:>12} {:>12} {:>12} {:>8}  {}",
            truncate(&row.name, 20),
            or_dash(row.budget_limit.filter(|_| row.has_budget()), format_amount),
            format_amount(row.spent),
            or_dash(row.remaining, format_amount),
            or_dash(row.percent_used, format_percent),
            row.status,
        );
    }

    let lines = text::budget_lines(summary);
    if !lines.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Insights:");
        for line in lines {
            let _ = writeln!(out, "  - {line}");
        }
    }
    out
}

pub fn render_analysis(
    analysis: &SpendingAnalysis,
    month: Option<&str>,
    reference_date: NaiveDate,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Spending analysis (as of {reference_date})");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "  Total income:       {}", format_amount(analysis.total_income));
    let _ = writeln!(out, "  Total expenses:     {}", format_amount(analysis.total_expenses));
    let _ = writeln!(out, "  Average per month:  {}", format_amount(analysis.average_monthly_spend));
    let _ = writeln!(out, "  This month:         {}", format_amount(analysis.this_month_spend));
    let _ = writeln!(
        out,
        "  Next month (trend): {}",
        or_dash(analysis.forecast_next_month, format_amount)
    );
    if let Some(biggest) = &analysis.biggest_month {
        let _ = writeln!(
            out,
            "  Biggest month:      {} ({})",
            biggest.month,
            format_amount(biggest.amount)
        );
    }

    if !analysis.top_categories.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top categories:");
        for entry in &analysis.top_categories {
            let _ = writeln!(
                out,
                "  {:<24} {:>12}",
                truncate(&entry.category, 24),
                format_amount(entry.amount)
            );
        }
    }

    let trend = filter_by_calendar_month(&analysis.monthly_spending, month);
    if !trend.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Monthly spending:");
        for entry in trend {
            let _ = writeln!(out, "  {:<10} {:>12}", entry.month, format_amount(entry.amount));
        }
    }

    if !analysis.recurring.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recurring expenses:");
        for item in &analysis.recurring {
            let _ = writeln!(
                out,
                "  {:<24} {:>12}  ({} months)",
                truncate(&item.description, 24),
                format_amount(item.amount),
                item.months.len()
            );
        }
    }

    if !analysis.irregular.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unusually large expenses:");
        for txn in &analysis.irregular {
            let date = txn
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "  {:<10} {:<24} {:>12}",
                date,
                truncate(txn.description.as_deref().unwrap_or(""), 24),
                format_amount(txn.amount)
            );
        }
    }

    let insights = text::insight_lines(analysis);
    if !insights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Insights:");
        for line in insights {
            let _ = writeln!(out, "  - {line}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations:");
    for line in text::recommendations(analysis) {
        let _ = writeln!(out, "  - {line}");
    }
    out
}

pub fn render_overview(overview: &FinancialOverview, transaction_count: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Financial overview");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "  Income:        {}", format_amount(overview.total_income));
    let _ = writeln!(out, "  Expenses:      {}", format_amount(overview.total_expenses));
    let _ = writeln!(out, "  Balance:       {}", format_amount(overview.current_balance));
    let _ = writeln!(out, "  Transactions:  {transaction_count}");
    out
}

pub fn render_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<24} {:>12}  Color", "ID", "Name", "Budget");
    let _ = writeln!(out, "{}", "─".repeat(52));
    for cat in categories {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:>12}  {}",
            cat.id,
            truncate(&cat.name, 24),
            or_dash(cat.effective_limit(), format_amount),
            cat.color.as_deref().unwrap_or("")
        );
    }
    out
}
