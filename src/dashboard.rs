//! Caller-side state: the loaded collections plus the last aggregation.
//!
//! Every mutation re-runs the engine, so `summary()` and `analysis()` always
//! describe the current data.

use anyhow::Result;
use chrono::NaiveDate;

use crate::analysis::{financial_overview, FinancialOverview, SpendingAnalysis};
use crate::config::AnalysisConfig;
use crate::engine::{self, BudgetSummary};
use crate::models::{Category, Transaction};
use crate::source::DataSource;

pub struct Dashboard {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    reference_date: NaiveDate,
    analysis_config: AnalysisConfig,

    summary: BudgetSummary,
    analysis: SpendingAnalysis,
    overview: FinancialOverview,
    revision: u64,
}

impl Dashboard {
    pub fn new(
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        reference_date: NaiveDate,
        analysis_config: AnalysisConfig,
    ) -> Self {
        let summary = engine::summarize(&categories, &transactions, reference_date);
        let analysis =
            SpendingAnalysis::compute(&transactions, &categories, reference_date, &analysis_config);
        let overview = financial_overview(&transactions);
        Self {
            transactions,
            categories,
            reference_date,
            analysis_config,
            summary,
            analysis,
            overview,
            revision: 0,
        }
    }

    pub fn load(
        source: &dyn DataSource,
        reference_date: NaiveDate,
        analysis_config: AnalysisConfig,
    ) -> Result<Self> {
        let categories = source.load_categories()?;
        let transactions = source.load_transactions()?;
        Ok(Self::new(transactions, categories, reference_date, analysis_config))
    }

    // ── Accessors ────────────────────────────────────────────

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn summary(&self) -> &BudgetSummary {
        &self.summary
    }

    pub fn analysis(&self) -> &SpendingAnalysis {
        &self.analysis
    }

    pub fn overview(&self) -> &FinancialOverview {
        &self.overview
    }

    /// Bumped on every re-aggregation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Mutations ────────────────────────────────────────────

    pub fn add_transaction(&mut self, txn: Transaction) {
        self.transactions.push(txn);
        self.refresh();
    }

    /// Replace the transaction with the same id. Returns false if none matched.
    pub fn update_transaction(&mut self, txn: Transaction) -> bool {
        let Some(slot) = self.transactions.iter_mut().find(|t| t.id == txn.id) else {
            return false;
        };
        *slot = txn;
        self.refresh();
        true
    }

    pub fn delete_transaction(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return false;
        }
        self.refresh();
        true
    }

    /// Insert a new category at the end, or replace one with the same id in place.
    pub fn upsert_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => *slot = category,
            None => self.categories.push(category),
        }
        self.refresh();
    }

    pub fn delete_category(&mut self, id: i64) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return false;
        }
        self.refresh();
        true
    }

    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.summary = engine::summarize(&self.categories, &self.transactions, self.reference_date);
        self.analysis = SpendingAnalysis::compute(
            &self.transactions,
            &self.categories,
            self.reference_date,
            &self.analysis_config,
        );
        self.overview = financial_overview(&self.transactions);
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            transactions = self.transactions.len(),
            categories = self.categories.len(),
            "re-aggregated dashboard"
        );
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
