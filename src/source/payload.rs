use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::Value;

use super::fields::{decimal_from_value, id_from_value, parse_date, string_from_value};
use crate::models::{Category, CategoryRef, Transaction, TransactionType};

/// Accept either a bare JSON array or a paginated `{"results": [...]}` body.
fn records(json: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => anyhow::bail!("expected a JSON array or an object with a \"results\" array"),
        },
        _ => anyhow::bail!("expected a JSON array"),
    }
}

pub fn transactions_from_json(json: &str) -> Result<Vec<Transaction>> {
    let items = records(json)?;
    let total = items.len();
    let txns: Vec<Transaction> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| transaction_from_value(i, item))
        .collect();
    if txns.len() < total {
        tracing::warn!(skipped = total - txns.len(), "skipped unusable transaction records");
    }
    Ok(txns)
}

pub fn categories_from_json(json: &str) -> Result<Vec<Category>> {
    let items = records(json)?;
    let total = items.len();
    let cats: Vec<Category> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| category_from_value(i, item))
        .collect();
    if cats.len() < total {
        tracing::warn!(skipped = total - cats.len(), "skipped unusable category records");
    }
    Ok(cats)
}

fn transaction_from_value(index: usize, item: &Value) -> Option<Transaction> {
    let Some(id) = item.get("id").and_then(id_from_value) else {
        tracing::warn!(index, "transaction without an id");
        return None;
    };
    let kind_raw = item.get("type").and_then(Value::as_str).unwrap_or_default();
    let Some(kind) = TransactionType::parse(kind_raw) else {
        tracing::warn!(id, kind = kind_raw, "transaction with unknown type");
        return None;
    };

    let amount = item
        .get("amount")
        .and_then(decimal_from_value)
        .unwrap_or(Decimal::ZERO);
    let date = item.get("date").and_then(Value::as_str).and_then(parse_date);
    if date.is_none() {
        tracing::debug!(id, "transaction has no usable date");
    }

    let mut txn = Transaction::new(id, kind, amount, date, category_ref(item));
    txn.description = item.get("description").and_then(string_from_value);
    Some(txn)
}

/// Fold every category shape the API produces into one reference:
/// `category: 7`, `category: {"id": 7, "name": ..}`, `category_id: 7`,
/// `category_name: "Food"`.
fn category_ref(item: &Value) -> CategoryRef {
    let embedded = item.get("category");
    let id = embedded
        .and_then(|c| match c {
            Value::Object(obj) => obj.get("id").and_then(id_from_value),
            other => id_from_value(other),
        })
        .or_else(|| item.get("category_id").and_then(id_from_value));
    let name = embedded
        .and_then(|c| c.get("name"))
        .and_then(string_from_value)
        .or_else(|| item.get("category_name").and_then(string_from_value))
        .or_else(|| {
            // A non-numeric string in `category` is a name.
            embedded
                .and_then(string_from_value)
                .filter(|s| s.parse::<i64>().is_err())
        });
    CategoryRef { id, name }
}

fn category_from_value(index: usize, item: &Value) -> Option<Category> {
    let Some(id) = item.get("id").and_then(id_from_value) else {
        tracing::warn!(index, "category without an id");
        return None;
    };
    let name = item
        .get("name")
        .and_then(string_from_value)
        .unwrap_or_else(|| format!("Category {id}"));
    let budget_limit = ["budget_limit", "budgetLimit"]
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|v| !v.is_null())
        .map(|v| decimal_from_value(v).unwrap_or(Decimal::ZERO));

    Some(Category {
        id,
        name,
        budget_limit,
        color: item.get("color").and_then(string_from_value),
    })
}
