use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringExpense {
    pub description: String,
    pub amount: Decimal,
    /// Distinct `YYYY-MM` months the charge showed up in, oldest first.
    pub months: Vec<String>,
}

fn noise() -> Option<&'static Regex> {
    static NOISE: OnceLock<Option<Regex>> = OnceLock::new();
    NOISE
        .get_or_init(|| Regex::new(r"[^\p{L}\s]+").ok())
        .as_ref()
}

/// Drop everything but letters (reference numbers, punctuation, symbols) so
/// that "NETFLIX #1234" and "Netflix 5678" land on the same key.
pub fn normalize_description(description: &str) -> String {
    let stripped = match noise() {
        Some(re) => re.replace_all(description, " ").into_owned(),
        None => description.to_string(),
    };
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Expenses with the same description and amount in at least two distinct
/// months. Undated or undescribed expenses never count.
pub fn detect_recurring(transactions: &[Transaction]) -> Vec<RecurringExpense> {
    let mut groups: Vec<(String, Decimal, String, BTreeSet<String>)> = Vec::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let (Some(description), Some(month)) = (txn.description.as_deref(), txn.month_key()) else {
            continue;
        };
        let key = normalize_description(description);
        if key.is_empty() {
            continue;
        }
        match groups
            .iter_mut()
            .find(|(k, amount, _, _)| *k == key && *amount == txn.amount)
        {
            Some((_, _, _, months)) => {
                months.insert(month);
            }
            None => groups.push((
                key,
                txn.amount,
                description.trim().to_string(),
                BTreeSet::from([month]),
            )),
        }
    }

    groups
        .into_iter()
        .filter(|(_, _, _, months)| months.len() >= 2)
        .map(|(_, amount, description, months)| RecurringExpense {
            description,
            amount,
            months: months.into_iter().collect(),
        })
        .collect()
}
