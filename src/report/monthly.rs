//! Groups transactions into calendar-month buckets and computes the per-month
//! overview used by the history view.

use std::collections::BTreeMap;
use std::fmt;

use time::Date;

use crate::{
    report::category::{CategoryGroups, RecordError, TopCategory, check_amount},
    transaction::{Transaction, TransactionKind},
};

/// A calendar year and month, used to key month buckets.
///
/// Ordered chronologically so a `BTreeMap` keyed by `MonthKey` iterates months
/// in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u8,
}

impl From<Date> for MonthKey {
    fn from(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Headline figures for one month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyOverview {
    /// The sum of all income amounts for the month.
    pub total_income: f64,
    /// The sum of all expense amounts for the month.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub net: f64,
    /// The income category with the largest sum, or the default when the month
    /// has no income.
    pub biggest_income: TopCategory,
    /// The expense category with the largest sum, or the default when the
    /// month has no expenses.
    pub biggest_expense: TopCategory,
}

/// One month of transactions, split by kind and grouped by category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthBucket {
    /// Income transactions grouped by category.
    pub income: CategoryGroups,
    /// Expense transactions grouped by category.
    pub expenses: CategoryGroups,
    /// Headline figures computed from the groups above.
    pub overview: MonthlyOverview,
}

/// Group transactions by calendar month and compute each month's overview.
///
/// Transactions may arrive in any order. Within each month and category the
/// input order is preserved.
///
/// # Errors
/// Returns a [RecordError] if any transaction has a negative or non-finite
/// amount. Ingestion validates amounts, so this only fires on records that
/// bypassed the create endpoint.
pub fn group_by_month(
    transactions: Vec<Transaction>,
) -> Result<BTreeMap<MonthKey, MonthBucket>, RecordError> {
    let mut months: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();

    for transaction in transactions {
        check_amount(transaction.amount)?;

        let bucket = months.entry(MonthKey::from(transaction.date)).or_default();

        match transaction.kind {
            TransactionKind::Income => bucket.income.push(transaction),
            TransactionKind::Expense => bucket.expenses.push(transaction),
        }
    }

    for bucket in months.values_mut() {
        bucket.overview = compute_overview(&bucket.income, &bucket.expenses);
    }

    Ok(months)
}

fn compute_overview(income: &CategoryGroups, expenses: &CategoryGroups) -> MonthlyOverview {
    let income_totals = income.totals();
    let expense_totals = expenses.totals();

    let total_income = income_totals.sum();
    let total_expense = expense_totals.sum();

    MonthlyOverview {
        total_income,
        total_expense,
        net: total_income - total_expense,
        biggest_income: income_totals.top(),
        biggest_expense: expense_totals.top(),
    }
}

#[cfg(test)]
mod month_key_tests {
    use time::macros::date;

    use super::MonthKey;

    #[test]
    fn displays_as_year_dash_month() {
        let key = MonthKey::from(date!(2024 - 03 - 15));

        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn orders_chronologically() {
        let december = MonthKey::from(date!(2023 - 12 - 31));
        let january = MonthKey::from(date!(2024 - 01 - 01));
        let march = MonthKey::from(date!(2024 - 03 - 01));

        assert!(december < january);
        assert!(january < march);
    }

    #[test]
    fn same_month_compares_equal() {
        assert_eq!(
            MonthKey::from(date!(2024 - 03 - 01)),
            MonthKey::from(date!(2024 - 03 - 31))
        );
    }
}

#[cfg(test)]
mod group_by_month_tests {
    use time::{Date, macros::date};

    use crate::{
        report::category::{RecordError, TopCategory},
        transaction::{Transaction, TransactionKind},
    };

    use super::{MonthKey, group_by_month};

    fn create_test_transaction(
        id: i64,
        amount: f64,
        date: Date,
        kind: TransactionKind,
        category: &str,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            date,
            kind,
            category: category.to_owned(),
            description: String::new(),
        }
    }

    /// March 2024 has $100 income (Job) and $50 expenses (Food), April 2024
    /// has $20 expenses (Shopping) and no income.
    fn two_month_fixture() -> Vec<Transaction> {
        vec![
            create_test_transaction(
                1,
                60.0,
                date!(2024 - 03 - 05),
                TransactionKind::Income,
                "Job",
            ),
            create_test_transaction(
                2,
                50.0,
                date!(2024 - 03 - 10),
                TransactionKind::Expense,
                "Food",
            ),
            create_test_transaction(
                3,
                40.0,
                date!(2024 - 03 - 20),
                TransactionKind::Income,
                "Job",
            ),
            create_test_transaction(
                4,
                20.0,
                date!(2024 - 04 - 02),
                TransactionKind::Expense,
                "Shopping",
            ),
        ]
    }

    #[test]
    fn computes_overview_for_each_month() {
        let months = group_by_month(two_month_fixture()).unwrap();

        let march = &months[&MonthKey {
            year: 2024,
            month: 3,
        }];
        assert_eq!(march.overview.total_income, 100.0);
        assert_eq!(march.overview.total_expense, 50.0);
        assert_eq!(march.overview.net, 50.0);
        assert_eq!(
            march.overview.biggest_income,
            TopCategory {
                name: "Job".to_owned(),
                amount: 100.0
            }
        );
        assert_eq!(
            march.overview.biggest_expense,
            TopCategory {
                name: "Food".to_owned(),
                amount: 50.0
            }
        );

        let april = &months[&MonthKey {
            year: 2024,
            month: 4,
        }];
        assert_eq!(april.overview.total_income, 0.0);
        assert_eq!(april.overview.total_expense, 20.0);
        assert_eq!(april.overview.net, -20.0);
        assert_eq!(april.overview.biggest_income, TopCategory::default());
        assert_eq!(
            april.overview.biggest_expense,
            TopCategory {
                name: "Shopping".to_owned(),
                amount: 20.0
            }
        );
    }

    #[test]
    fn net_equals_income_minus_expense() {
        let months = group_by_month(two_month_fixture()).unwrap();

        for bucket in months.values() {
            assert_eq!(
                bucket.overview.net,
                bucket.overview.total_income - bucket.overview.total_expense
            );
        }
    }

    #[test]
    fn grouping_partitions_the_input() {
        let transactions = two_month_fixture();
        let input_count = transactions.len();

        let months = group_by_month(transactions).unwrap();

        let output_count: usize = months
            .values()
            .map(|bucket| bucket.income.transaction_count() + bucket.expenses.transaction_count())
            .sum();
        assert_eq!(output_count, input_count);

        for (key, bucket) in &months {
            for (_, transactions) in bucket.income.iter().chain(bucket.expenses.iter()) {
                for transaction in transactions {
                    assert_eq!(MonthKey::from(transaction.date), *key);
                }
            }
        }
    }

    #[test]
    fn grouping_is_deterministic() {
        let first = group_by_month(two_month_fixture()).unwrap();
        let second = group_by_month(two_month_fixture()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let months = group_by_month(vec![]).unwrap();

        assert!(months.is_empty());
    }

    #[test]
    fn same_category_transactions_merge_in_input_order() {
        let months = group_by_month(two_month_fixture()).unwrap();

        let march = &months[&MonthKey {
            year: 2024,
            month: 3,
        }];
        let job = march.income.get("Job").unwrap();

        assert_eq!(job.len(), 2);
        assert_eq!(job[0].id, 1);
        assert_eq!(job[1].id, 3);
    }

    #[test]
    fn biggest_category_tie_keeps_first_seen() {
        let transactions = vec![
            create_test_transaction(
                1,
                30.0,
                date!(2024 - 03 - 01),
                TransactionKind::Expense,
                "Food",
            ),
            create_test_transaction(
                2,
                30.0,
                date!(2024 - 03 - 02),
                TransactionKind::Expense,
                "Shopping",
            ),
        ];

        let months = group_by_month(transactions).unwrap();
        let march = &months[&MonthKey {
            year: 2024,
            month: 3,
        }];

        assert_eq!(march.overview.biggest_expense.name, "Food");
        assert_eq!(march.overview.biggest_expense.amount, 30.0);
    }

    #[test]
    fn biggest_category_is_at_least_every_category_sum() {
        let months = group_by_month(two_month_fixture()).unwrap();

        for bucket in months.values() {
            let expense_totals = bucket.expenses.totals();
            for (_, total) in expense_totals.iter() {
                assert!(bucket.overview.biggest_expense.amount >= total);
            }

            let income_totals = bucket.income.totals();
            for (_, total) in income_totals.iter() {
                assert!(bucket.overview.biggest_income.amount >= total);
            }
        }
    }

    #[test]
    fn rejects_negative_amount() {
        let transactions = vec![create_test_transaction(
            1,
            -10.0,
            date!(2024 - 03 - 01),
            TransactionKind::Expense,
            "Food",
        )];

        let result = group_by_month(transactions);

        assert_eq!(result, Err(RecordError::NegativeAmount(-10.0)));
    }

    #[test]
    fn rejects_non_finite_amount() {
        let transactions = vec![create_test_transaction(
            1,
            f64::NAN,
            date!(2024 - 03 - 01),
            TransactionKind::Income,
            "Job",
        )];

        let result = group_by_month(transactions);

        assert!(matches!(result, Err(RecordError::NonFiniteAmount(_))));
    }
}
