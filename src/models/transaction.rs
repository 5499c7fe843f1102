use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical category reference. Payloads may carry a bare id, an embedded
/// category object or only a display name; all of them end up here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl CategoryRef {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn uncategorized() -> Self {
        Self::default()
    }

    pub fn is_uncategorized(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always a non-negative magnitude; `kind` carries the direction.
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category: CategoryRef,
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        id: i64,
        kind: TransactionType,
        amount: Decimal,
        date: Option<NaiveDate>,
        category: CategoryRef,
    ) -> Self {
        Self {
            id,
            kind,
            amount: amount.abs(),
            date,
            category,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// `YYYY-MM` key of the transaction date, if it has one.
    pub fn month_key(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m").to_string())
    }
}
