use rust_decimal::Decimal;
use serde::Serialize;

use super::CategoryRef;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub budget_limit: Option<Decimal>,
    pub color: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            budget_limit: None,
            color: None,
        }
    }

    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.budget_limit = Some(limit);
        self
    }

    /// The limit, but only when it is an actual budget (strictly positive).
    pub fn effective_limit(&self) -> Option<Decimal> {
        self.budget_limit.filter(|l| *l > Decimal::ZERO)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id(categories: &[Category], id: i64) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Resolve a reference to a category: id first, then display name.
    pub fn resolve<'a>(
        categories: &'a [Category],
        reference: &CategoryRef,
    ) -> Option<&'a Category> {
        Self::resolve_index(categories, reference).map(|idx| &categories[idx])
    }

    /// Position of the category a reference points at. An id match beats a
    /// name match; among equal matches the first category wins.
    pub fn resolve_index(categories: &[Category], reference: &CategoryRef) -> Option<usize> {
        reference
            .id
            .and_then(|id| categories.iter().position(|c| c.id == id))
            .or_else(|| {
                let name = reference.name.as_deref()?;
                categories.iter().position(|c| c.name == name)
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
