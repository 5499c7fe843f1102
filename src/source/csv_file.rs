use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use super::fields::{parse_date, parse_decimal};
use crate::models::{Category, CategoryRef, Transaction, TransactionType};

/// Rows keyed by lowercase header name.
struct Table {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    fn read(path: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        let headers = rdr
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        let mut rows = Vec::new();
        for result in rdr.records() {
            rows.push(result.context("Failed to read CSV record")?);
        }
        Ok(Self { headers, rows })
    }

    fn column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h == name))
    }
}

fn field(row: &csv::StringRecord, col: Option<usize>) -> Option<&str> {
    col.and_then(|c| row.get(c)).filter(|s| !s.is_empty())
}

pub(super) fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let table = Table::read(path)?;
    let id_col = table.column(&["id"]);
    let type_col = table.column(&["type"]);
    let amount_col = table.column(&["amount"]);
    let date_col = table.column(&["date"]);
    let category_col = table.column(&["category", "category_id"]);
    let category_name_col = table.column(&["category_name"]);
    let description_col = table.column(&["description"]);

    if type_col.is_none() || amount_col.is_none() {
        anyhow::bail!("{}: CSV needs at least 'type' and 'amount' columns", path.display());
    }

    let mut txns = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        let line = i + 2;
        let kind_raw = field(row, type_col).unwrap_or_default();
        let Some(kind) = TransactionType::parse(kind_raw) else {
            tracing::warn!(line, kind = kind_raw, "skipping row with unknown type");
            continue;
        };
        // Exports without an id column get their line number.
        let id = field(row, id_col)
            .and_then(|s| s.parse().ok())
            .unwrap_or(line as i64);
        let amount = field(row, amount_col)
            .and_then(parse_decimal)
            .unwrap_or(Decimal::ZERO);
        let date = field(row, date_col).and_then(parse_date);

        let mut category = CategoryRef::uncategorized();
        if let Some(raw) = field(row, category_col) {
            match raw.parse::<i64>() {
                Ok(id) => category.id = Some(id),
                Err(_) => category.name = Some(raw.to_string()),
            }
        }
        if let Some(name) = field(row, category_name_col) {
            category.name = Some(name.to_string());
        }

        let mut txn = Transaction::new(id, kind, amount, date, category);
        txn.description = field(row, description_col).map(str::to_string);
        txns.push(txn);
    }
    Ok(txns)
}

pub(super) fn read_categories(path: &Path) -> Result<Vec<Category>> {
    let table = Table::read(path)?;
    let id_col = table.column(&["id"]);
    let name_col = table.column(&["name"]);
    let limit_col = table.column(&["budget_limit", "budgetlimit", "limit"]);
    let color_col = table.column(&["color"]);

    let mut cats = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        let line = i + 2;
        let Some(id) = field(row, id_col).and_then(|s| s.parse::<i64>().ok()) else {
            tracing::warn!(line, "skipping category row without an id");
            continue;
        };
        cats.push(Category {
            id,
            name: field(row, name_col)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Category {id}")),
            budget_limit: field(row, limit_col).map(|s| parse_decimal(s).unwrap_or(Decimal::ZERO)),
            color: field(row, color_col).map(str::to_string),
        });
    }
    Ok(cats)
}
