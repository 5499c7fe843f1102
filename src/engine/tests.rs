#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{CategoryRef, TransactionType};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(id: i64, amount: Decimal, date: Option<NaiveDate>, category: CategoryRef) -> Transaction {
    Transaction::new(id, TransactionType::Expense, amount, date, category)
}

fn income(id: i64, amount: Decimal, date: Option<NaiveDate>) -> Transaction {
    Transaction::new(id, TransactionType::Income, amount, date, CategoryRef::uncategorized())
}

fn food_and_travel() -> Vec<Category> {
    vec![
        Category::new(1, "Food").with_limit(dec!(100)),
        Category::new(2, "Travel").with_limit(Decimal::ZERO),
    ]
}

// ── monthly_expenses ─────────────────────────────────────────

#[test]
fn test_monthly_expenses_filters_month_year_and_type() {
    let today = day(2024, 5, 15);
    let txns = vec![
        expense(1, dec!(10), Some(day(2024, 5, 1)), CategoryRef::by_id(1)),
        expense(2, dec!(20), Some(day(2024, 4, 30)), CategoryRef::by_id(1)),
        expense(3, dec!(30), Some(day(2023, 5, 10)), CategoryRef::by_id(1)),
        income(4, dec!(1000), Some(day(2024, 5, 2))),
        expense(5, dec!(40), None, CategoryRef::by_id(1)),
        expense(6, dec!(50), Some(day(2024, 5, 31)), CategoryRef::uncategorized()),
    ];
    let ids: Vec<i64> = monthly_expenses(&txns, today).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 6]);
}

#[test]
fn test_monthly_expenses_preserves_input_order() {
    let today = day(2024, 5, 15);
    let txns = vec![
        expense(3, dec!(1), Some(day(2024, 5, 20)), CategoryRef::by_id(1)),
        expense(1, dec!(1), Some(day(2024, 5, 2)), CategoryRef::by_id(1)),
        expense(2, dec!(1), Some(day(2024, 5, 9)), CategoryRef::by_id(1)),
    ];
    let ids: Vec<i64> = monthly_expenses(&txns, today).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn test_monthly_expenses_empty_input() {
    assert!(monthly_expenses(&[], day(2024, 1, 1)).is_empty());
}

// ── category_rows ────────────────────────────────────────────

#[test]
fn test_rows_follow_category_order_one_to_one() {
    let categories = vec![
        Category::new(3, "C"),
        Category::new(1, "A"),
        Category::new(2, "B"),
    ];
    let rows = category_rows(&categories, &[]);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert!(rows.iter().all(|r| r.spent == Decimal::ZERO));
}

#[test]
fn test_rows_match_bare_id_embedded_id_and_name() {
    let today = day(2024, 5, 15);
    let categories = vec![Category::new(1, "Food").with_limit(dec!(100))];
    // Bare id and embedded object id both normalize to `id`; a name-only
    // payload keeps just the name.
    let txns = vec![
        expense(1, dec!(10), Some(today), CategoryRef::by_id(1)),
        expense(
            2,
            dec!(20),
            Some(today),
            CategoryRef {
                id: Some(1),
                name: Some("Food".into()),
            },
        ),
        expense(3, dec!(30), Some(today), CategoryRef::by_name("Food")),
    ];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    assert_eq!(rows[0].spent, dec!(60));
}

#[test]
fn test_rows_each_transaction_counts_once() {
    let today = day(2024, 5, 15);
    let categories = vec![Category::new(1, "Food"), Category::new(2, "Travel")];
    // Id points at Travel, name at Food: the id wins.
    let txns = vec![expense(
        1,
        dec!(25),
        Some(today),
        CategoryRef {
            id: Some(2),
            name: Some("Food".into()),
        },
    )];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    assert_eq!(rows[0].spent, Decimal::ZERO);
    assert_eq!(rows[1].spent, dec!(25));
}

#[test]
fn test_rows_duplicate_names_first_category_wins() {
    let today = day(2024, 5, 15);
    let categories = vec![Category::new(1, "Misc"), Category::new(2, "Misc")];
    let txns = vec![expense(1, dec!(5), Some(today), CategoryRef::by_name("Misc"))];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    assert_eq!(rows[0].spent, dec!(5));
    assert_eq!(rows[1].spent, Decimal::ZERO);
}

#[test]
fn test_rows_unmatched_and_uncategorized_are_ignored() {
    let today = day(2024, 5, 15);
    let categories = food_and_travel();
    let txns = vec![
        expense(1, dec!(5), Some(today), CategoryRef::uncategorized()),
        expense(2, dec!(7), Some(today), CategoryRef::by_id(42)),
        expense(3, dec!(9), Some(today), CategoryRef::by_name("Nope")),
    ];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    assert!(rows.iter().all(|r| r.spent == Decimal::ZERO));
}

#[test]
fn test_rows_no_budget_regardless_of_spent() {
    let today = day(2024, 5, 15);
    let mut categories = food_and_travel();
    categories.push(Category::new(3, "Gifts"));
    let txns = vec![
        expense(1, dec!(500), Some(today), CategoryRef::by_id(2)),
        expense(2, dec!(500), Some(today), CategoryRef::by_id(3)),
    ];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    for row in &rows[1..] {
        assert_eq!(row.status, BudgetStatus::NoBudget);
        assert!(row.remaining.is_none());
        assert!(row.percent_used.is_none());
        assert_eq!(row.spent, dec!(500));
    }
}

#[test]
fn test_rows_status_boundaries() {
    let today = day(2024, 5, 15);
    let cases = [
        (dec!(110), BudgetStatus::Warning),
        (dec!(110.01), BudgetStatus::Over),
        (dec!(80), BudgetStatus::Warning),
        (dec!(79.99), BudgetStatus::Under),
    ];
    for (spent, expected) in cases {
        let categories = vec![Category::new(1, "Food").with_limit(dec!(100))];
        let txns = vec![expense(1, spent, Some(today), CategoryRef::by_id(1))];
        let month = monthly_expenses(&txns, today);
        let rows = category_rows(&categories, &month);
        assert_eq!(rows[0].percent_used, Some(spent), "spent {spent}");
        assert_eq!(rows[0].status, expected, "spent {spent}");
    }
}

// ── top_level_metrics ────────────────────────────────────────

#[test]
fn test_planned_budget_excludes_zero_and_missing_limits() {
    let categories = vec![
        Category::new(1, "A").with_limit(dec!(100)),
        Category::new(2, "B").with_limit(Decimal::ZERO),
        Category::new(3, "C"),
    ];
    let rows = category_rows(&categories, &[]);
    let metrics = top_level_metrics(&rows, &[], day(2024, 5, 15));
    assert_eq!(metrics.total_planned_budget, dec!(100));
    assert!(metrics.has_any_budget);
}

#[test]
fn test_no_budget_at_all() {
    let categories = vec![Category::new(1, "A")];
    let rows = category_rows(&categories, &[]);
    let metrics = top_level_metrics(&rows, &[], day(2024, 5, 15));
    assert_eq!(metrics.total_planned_budget, Decimal::ZERO);
    assert!(!metrics.has_any_budget);
    assert_eq!(metrics.daily_spend_target, Decimal::ZERO);
}

#[test]
fn test_total_spent_counts_uncategorized_expenses() {
    let today = day(2024, 5, 15);
    let categories = food_and_travel();
    let txns = vec![
        expense(1, dec!(40), Some(today), CategoryRef::by_id(1)),
        expense(2, dec!(15), Some(today), CategoryRef::uncategorized()),
    ];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    let metrics = top_level_metrics(&rows, &month, today);
    assert_eq!(metrics.total_spent_this_month, dec!(55));
    assert_eq!(metrics.remaining_budget, dec!(45));
}

#[test]
fn test_days_left_and_daily_target() {
    let today = day(2024, 4, 20);
    let categories = vec![Category::new(1, "Food").with_limit(dec!(300))];
    let txns = vec![expense(1, dec!(100), Some(today), CategoryRef::by_id(1))];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    let metrics = top_level_metrics(&rows, &month, today);
    assert_eq!(metrics.days_left_in_month, 10);
    assert_eq!(metrics.remaining_budget, dec!(200));
    assert_eq!(metrics.daily_spend_target, dec!(20));
}

#[test]
fn test_daily_target_zero_on_last_day() {
    let today = day(2024, 2, 29);
    let categories = vec![Category::new(1, "Food").with_limit(dec!(300))];
    let rows = category_rows(&categories, &[]);
    let metrics = top_level_metrics(&rows, &[], today);
    assert_eq!(metrics.days_left_in_month, 0);
    assert_eq!(metrics.daily_spend_target, Decimal::ZERO);
}

#[test]
fn test_daily_target_zero_when_overspent() {
    let today = day(2024, 5, 1);
    let categories = vec![Category::new(1, "Food").with_limit(dec!(100))];
    let txns = vec![expense(1, dec!(150), Some(today), CategoryRef::by_id(1))];
    let month = monthly_expenses(&txns, today);
    let rows = category_rows(&categories, &month);
    let metrics = top_level_metrics(&rows, &month, today);
    assert_eq!(metrics.remaining_budget, dec!(-50));
    assert_eq!(metrics.daily_spend_target, Decimal::ZERO);
}

#[test]
fn test_days_in_month() {
    assert_eq!(days_in_month(day(2024, 2, 10)), 29);
    assert_eq!(days_in_month(day(2023, 2, 10)), 28);
    assert_eq!(days_in_month(day(2024, 12, 31)), 31);
    assert_eq!(days_in_month(day(2024, 4, 1)), 30);
}

// ── insights ─────────────────────────────────────────────────

#[test]
fn test_insights_sets_and_names() {
    let rows = vec![
        CategoryBudgetRow::new("Food".into(), None, Some(dec!(100)), dec!(120)),
        CategoryBudgetRow::new("Rent".into(), None, Some(dec!(100)), dec!(90)),
        CategoryBudgetRow::new("Fun".into(), None, Some(dec!(100)), dec!(200)),
        CategoryBudgetRow::new("Gas".into(), None, Some(dec!(100)), dec!(85)),
        CategoryBudgetRow::new("Misc".into(), None, None, dec!(999)),
    ];
    let result = insights(&rows);
    assert_eq!(result.over_budget_names(), "Food, Fun");
    assert_eq!(result.warning_names(), "Rent, Gas");
    assert_eq!(result.closest_to_limit.unwrap().name, "Fun");
}

#[test]
fn test_closest_to_limit_ties_keep_first() {
    let rows = vec![
        CategoryBudgetRow::new("A".into(), None, Some(dec!(100)), dec!(50)),
        CategoryBudgetRow::new("B".into(), None, Some(dec!(200)), dec!(100)),
    ];
    assert_eq!(insights(&rows).closest_to_limit.unwrap().name, "A");
}

#[test]
fn test_closest_to_limit_none_without_budgets() {
    let rows = vec![CategoryBudgetRow::new("A".into(), None, None, dec!(50))];
    let result = insights(&rows);
    assert!(result.closest_to_limit.is_none());
    assert_eq!(result.over_budget_names(), "");
}

// ── top_categories ───────────────────────────────────────────

#[test]
fn test_top_categories_truncates_to_five_descending() {
    let series: Vec<CategorySpending> = [10, 70, 30, 50, 20, 60, 40]
        .iter()
        .enumerate()
        .map(|(i, amt)| CategorySpending::new(format!("c{i}"), Decimal::from(*amt)))
        .collect();
    let top = top_categories(&series, 5);
    let amounts: Vec<Decimal> = top.iter().map(|c| c.amount).collect();
    assert_eq!(amounts, vec![dec!(70), dec!(60), dec!(50), dec!(40), dec!(30)]);
}

#[test]
fn test_top_categories_ties_keep_input_order() {
    let series = vec![
        CategorySpending::new("first", dec!(10)),
        CategorySpending::new("big", dec!(99)),
        CategorySpending::new("second", dec!(10)),
    ];
    let top = top_categories(&series, 5);
    let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["big", "first", "second"]);
}

#[test]
fn test_top_categories_fewer_than_n() {
    let series = vec![CategorySpending::new("only", dec!(1))];
    assert_eq!(top_categories(&series, 5).len(), 1);
    assert!(top_categories(&[], 5).is_empty());
}

// ── summarize ────────────────────────────────────────────────

#[test]
fn test_summarize_end_to_end() {
    let today = day(2024, 5, 15);
    let txns = vec![
        expense(1, dec!(50), Some(day(2024, 5, 3)), CategoryRef::by_id(1)),
        expense(2, dec!(30), Some(day(2024, 4, 3)), CategoryRef::by_id(2)),
    ];
    let summary = summarize(&food_and_travel(), &txns, today);

    let food = &summary.rows[0];
    assert_eq!(food.name, "Food");
    assert_eq!(food.spent, dec!(50));
    assert_eq!(food.percent_used, Some(dec!(50)));
    assert_eq!(food.status, BudgetStatus::Under);

    let travel = &summary.rows[1];
    assert_eq!(travel.spent, Decimal::ZERO);
    assert_eq!(travel.status, BudgetStatus::NoBudget);

    assert_eq!(summary.metrics.total_spent_this_month, dec!(50));
    assert_eq!(summary.metrics.total_planned_budget, dec!(100));
}

#[test]
fn test_summarize_is_idempotent() {
    let today = day(2024, 5, 15);
    let txns = vec![
        expense(1, dec!(50), Some(day(2024, 5, 3)), CategoryRef::by_id(1)),
        expense(2, dec!(95), Some(day(2024, 5, 4)), CategoryRef::by_name("Food")),
    ];
    let categories = food_and_travel();
    let first = summarize(&categories, &txns, today);
    let second = summarize(&categories, &txns, today);
    assert_eq!(first, second);
}

#[test]
fn test_summarize_chart_series() {
    let today = day(2024, 5, 15);
    let txns = vec![expense(1, dec!(50), Some(today), CategoryRef::by_id(1))];
    let summary = summarize(&food_and_travel(), &txns, today);
    assert_eq!(summary.chart.labels, vec!["Food", "Travel"]);
    assert_eq!(summary.chart.planned, vec![dec!(100), Decimal::ZERO]);
    assert_eq!(summary.chart.spent, vec![dec!(50), Decimal::ZERO]);
    assert_eq!(summary.chart.overall[0], ("Planned Budget".to_string(), dec!(100)));
    assert_eq!(summary.chart.overall[1], ("Actual Spend".to_string(), dec!(50)));
}

#[test]
fn test_summarize_empty_inputs() {
    let summary = summarize(&[], &[], day(2024, 5, 15));
    assert!(summary.rows.is_empty());
    assert!(summary.chart.is_empty());
    assert_eq!(summary.metrics.total_spent_this_month, Decimal::ZERO);
    assert!(summary.insights.closest_to_limit.is_none());
}

#[test]
fn test_summarize_saturates_huge_amounts() {
    let today = day(2024, 5, 15);
    let huge = Decimal::from_scientific("5e28").unwrap();
    let txns = vec![
        expense(1, huge, Some(today), CategoryRef::by_id(1)),
        expense(2, huge, Some(today), CategoryRef::by_id(1)),
    ];
    let summary = summarize(&food_and_travel(), &txns, today);
    assert_eq!(summary.rows[0].spent, Decimal::MAX);
    assert_eq!(summary.rows[0].status, BudgetStatus::Over);
    assert_eq!(summary.metrics.total_spent_this_month, Decimal::MAX);
    assert!(summary.metrics.remaining_budget < Decimal::ZERO);
    assert_eq!(summary.metrics.daily_spend_target, Decimal::ZERO);
    assert_eq!(summary.insights.over_budget_names(), "Food");
}
