//! Ordered per-category accumulators shared by the monthly and weekly reports.
//!
//! Categories are free-form labels, so the report keeps them in the order they
//! were first seen rather than sorting them. This makes the "biggest category"
//! tie-break deterministic: when two categories sum to the same amount, the one
//! that appeared first in the input wins.

use crate::transaction::Transaction;

/// A transaction record the report engine refuses to aggregate.
///
/// Amounts are magnitudes, so a negative or non-finite amount means the record
/// was corrupted somewhere between ingestion and the report. The report returns
/// this error rather than silently skipping the record.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// The transaction amount was negative.
    #[error("transaction amount {0} is negative")]
    NegativeAmount(f64),

    /// The transaction amount was NaN or infinite.
    #[error("transaction amount {0} is not a finite number")]
    NonFiniteAmount(f64),
}

/// Check that a transaction's amount is a valid magnitude.
pub(crate) fn check_amount(amount: f64) -> Result<(), RecordError> {
    if !amount.is_finite() {
        return Err(RecordError::NonFiniteAmount(amount));
    }

    if amount < 0.0 {
        return Err(RecordError::NegativeAmount(amount));
    }

    Ok(())
}

/// The category with the largest summed amount within a report bucket.
///
/// Defaults to an empty name and zero amount when the bucket has no
/// transactions of the relevant kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopCategory {
    /// The category label, or an empty string if there were no transactions.
    pub name: String,
    /// The summed amount for the category.
    pub amount: f64,
}

/// Summed amounts per category, iterated in first-insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    /// Add `amount` to the running total for `category`.
    ///
    /// A category not seen before is appended, so iteration order always
    /// matches the order categories first appeared.
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_owned(), amount)),
        }
    }

    /// Get the summed amount for `category`, if it has been seen.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    /// Iterate over category totals in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
    }

    /// The number of distinct categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no categories have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sum of all category totals.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    /// The category with the largest total.
    ///
    /// A category only replaces the current leader when its total is strictly
    /// greater, so ties keep the category that was seen first. Returns the
    /// default [TopCategory] when there are no entries.
    pub fn top(&self) -> TopCategory {
        let mut top = TopCategory::default();

        for (name, total) in self.iter() {
            if total > top.amount {
                top = TopCategory {
                    name: name.to_owned(),
                    amount: total,
                };
            }
        }

        top
    }

    /// Category totals sorted by amount, largest first.
    ///
    /// The sort is stable, so categories with equal totals keep their
    /// first-insertion order.
    pub fn sorted_descending(&self) -> Vec<(String, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|(_, left), (_, right)| {
            right.partial_cmp(left).unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}

/// Transactions grouped by category, iterated in first-insertion order.
///
/// Each category keeps its transactions in the order they were pushed, so the
/// original input order survives the grouping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryGroups {
    entries: Vec<(String, Vec<Transaction>)>,
}

impl CategoryGroups {
    /// Append `transaction` to the list for its category.
    pub fn push(&mut self, transaction: Transaction) {
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| *name == transaction.category)
        {
            Some((_, transactions)) => transactions.push(transaction),
            None => self
                .entries
                .push((transaction.category.clone(), vec![transaction])),
        }
    }

    /// Get the transactions for `category`, if it has been seen.
    pub fn get(&self, category: &str) -> Option<&[Transaction]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, transactions)| transactions.as_slice())
    }

    /// Iterate over categories and their transactions in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Transaction])> {
        self.entries
            .iter()
            .map(|(name, transactions)| (name.as_str(), transactions.as_slice()))
    }

    /// The number of distinct categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no transactions have been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of transactions across all categories.
    pub fn transaction_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, transactions)| transactions.len())
            .sum()
    }

    /// Sum each category's transaction amounts into a [CategoryTotals].
    pub fn totals(&self) -> CategoryTotals {
        let mut totals = CategoryTotals::default();

        for (category, transactions) in self.iter() {
            for transaction in transactions {
                totals.add(category, transaction.amount);
            }
        }

        totals
    }
}
