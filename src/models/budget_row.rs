use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    Over,
    Warning,
    Under,
    NoBudget,
}

impl BudgetStatus {
    /// Percent used above this is over budget; exactly this is still a warning.
    pub const OVER_THRESHOLD: Decimal = Decimal::from_parts(110, 0, 0, false, 0);
    pub const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

    /// Classify spend against a limit. Limits that are absent or not positive
    /// mean no budget.
    pub fn classify(budget_limit: Option<Decimal>, spent: Decimal) -> Self {
        match percent_used(budget_limit, spent) {
            None => Self::NoBudget,
            Some(pct) if pct > Self::OVER_THRESHOLD => Self::Over,
            Some(pct) if pct >= Self::WARNING_THRESHOLD => Self::Warning,
            Some(_) => Self::Under,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Warning => "warning",
            Self::Under => "under",
            Self::NoBudget => "no-budget",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `None` only when there is no budget. Spend too large to scale pins at
/// `Decimal::MAX`, which is still over budget.
pub fn percent_used(budget_limit: Option<Decimal>, spent: Decimal) -> Option<Decimal> {
    let limit = budget_limit.filter(|l| *l > Decimal::ZERO)?;
    let pct = spent
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .or_else(|| {
            spent
                .checked_div(limit)
                .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::MAX);
    Some(pct)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetRow {
    pub name: String,
    pub color: Option<String>,
    pub budget_limit: Option<Decimal>,
    pub spent: Decimal,
    pub remaining: Option<Decimal>,
    pub percent_used: Option<Decimal>,
    pub status: BudgetStatus,
}

impl CategoryBudgetRow {
    pub fn new(
        name: String,
        color: Option<String>,
        budget_limit: Option<Decimal>,
        spent: Decimal,
    ) -> Self {
        let percent_used = percent_used(budget_limit, spent);
        let remaining = percent_used
            .and(budget_limit)
            .map(|limit| limit.saturating_sub(spent));
        Self {
            name,
            color,
            budget_limit,
            spent,
            remaining,
            percent_used,
            status: BudgetStatus::classify(budget_limit, spent),
        }
    }

    pub fn has_budget(&self) -> bool {
        self.status != BudgetStatus::NoBudget
    }
}
