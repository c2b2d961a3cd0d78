//! Week-of-month bucketing for the dashboard's current-month summaries.

use std::collections::BTreeMap;

use time::Date;

use crate::{
    report::category::{CategoryTotals, RecordError, TopCategory, check_amount},
    transaction::{Transaction, TransactionKind},
};

/// The zero-based week of the month that `date` falls in.
///
/// Weeks run Sunday through Saturday and are counted from the calendar row the
/// first of the month sits on, so the 1st is always in week 0. Most months
/// span five rows; a 31-day month starting on Friday or Saturday spans six.
pub fn week_of_month(date: Date) -> u8 {
    // replace_day(1) cannot fail since every month has a day 1.
    let first = date
        .replace_day(1)
        .map(|first| first.weekday().number_days_from_sunday())
        .unwrap_or(0);

    (date.day() - 1 + first) / 7
}

/// The number of calendar rows the month of `date` spans.
pub fn weeks_in_month(date: Date) -> u8 {
    let last_day = date.month().length(date.year());
    let last = date.replace_day(last_day).unwrap_or(date);

    week_of_month(last) + 1
}

/// Totals for one week of the month, for a single transaction kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekSummary {
    /// The sum of all amounts in the week.
    pub total: f64,
    /// Per-category sums in first-seen order.
    pub categories: CategoryTotals,
    /// The category with the largest sum, or the default when the week is
    /// empty.
    pub top: TopCategory,
}

/// Summarise one kind of transaction by week of the month.
///
/// The caller is expected to pass transactions from a single calendar month;
/// the date-range query that feeds the dashboard guarantees this. Weeks with
/// no transactions of `kind` are absent from the map.
///
/// # Errors
/// Returns a [RecordError] if any transaction of `kind` has a negative or
/// non-finite amount.
pub fn weekly_summary(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Result<BTreeMap<u8, WeekSummary>, RecordError> {
    let mut weeks: BTreeMap<u8, WeekSummary> = BTreeMap::new();

    for transaction in transactions {
        if transaction.kind != kind {
            continue;
        }

        check_amount(transaction.amount)?;

        let summary = weeks.entry(week_of_month(transaction.date)).or_default();
        summary.total += transaction.amount;
        summary.categories.add(&transaction.category, transaction.amount);
    }

    for summary in weeks.values_mut() {
        summary.top = summary.categories.top();
    }

    Ok(weeks)
}

#[cfg(test)]
mod week_of_month_tests {
    use time::macros::date;

    use super::{week_of_month, weeks_in_month};

    #[test]
    fn first_of_month_is_week_zero() {
        assert_eq!(week_of_month(date!(2024 - 03 - 01)), 0);
        assert_eq!(week_of_month(date!(2015 - 02 - 01)), 0);
    }

    #[test]
    fn march_2024_starts_on_friday() {
        // The 1st is a Friday, so the 2nd is still in week 0 and the 3rd
        // (Sunday) starts week 1.
        assert_eq!(week_of_month(date!(2024 - 03 - 02)), 0);
        assert_eq!(week_of_month(date!(2024 - 03 - 03)), 1);
        assert_eq!(week_of_month(date!(2024 - 03 - 15)), 2);
        assert_eq!(week_of_month(date!(2024 - 03 - 31)), 5);
        assert_eq!(weeks_in_month(date!(2024 - 03 - 15)), 6);
    }

    #[test]
    fn four_row_month_uses_weeks_zero_through_three() {
        // February 2015 starts on a Sunday and has 28 days, exactly four rows.
        for day in 1..=28 {
            let date = date!(2015 - 02 - 01).replace_day(day).unwrap();
            assert!(week_of_month(date) <= 3, "day {day} exceeded week 3");
        }
        assert_eq!(week_of_month(date!(2015 - 02 - 28)), 3);
        assert_eq!(weeks_in_month(date!(2015 - 02 - 01)), 4);
    }

    #[test]
    fn thirty_day_sunday_month_has_a_fifth_row() {
        // November 2015 starts on a Sunday, so the 29th and 30th spill into a
        // fifth row.
        assert_eq!(week_of_month(date!(2015 - 11 - 28)), 3);
        assert_eq!(week_of_month(date!(2015 - 11 - 29)), 4);
        assert_eq!(week_of_month(date!(2015 - 11 - 30)), 4);
        assert_eq!(weeks_in_month(date!(2015 - 11 - 01)), 5);
    }

    #[test]
    fn thirty_one_day_saturday_month_has_a_sixth_row() {
        // August 2015 starts on a Saturday, pushing the 31st into a sixth row.
        assert_eq!(week_of_month(date!(2015 - 08 - 31)), 5);
        assert_eq!(weeks_in_month(date!(2015 - 08 - 01)), 6);
    }
}
