//! The transaction aggregation engine.
//!
//! Pure, synchronous transforms from a flat transaction list into nested
//! time-bucketed summaries: month buckets for the history view and
//! week-of-month buckets for the dashboard. Nothing in this module touches
//! the database.

mod category;
mod monthly;
mod weekly;

pub use category::{CategoryGroups, CategoryTotals, RecordError, TopCategory};
pub use monthly::{MonthBucket, MonthKey, MonthlyOverview, group_by_month};
pub use weekly::{WeekSummary, week_of_month, weekly_summary, weeks_in_month};
