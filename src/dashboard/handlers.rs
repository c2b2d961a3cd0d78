//! Dashboard HTTP handlers.
//!
//! The dashboard shows the current month at a glance: an add-transaction form,
//! this month's transactions, the monthly overview, and per-week summaries.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    dashboard::view::dashboard_view,
    endpoints,
    navigation::NavBar,
    report::{MonthKey, group_by_month, weekly_summary},
    timezone::get_local_offset,
    transaction::{TransactionKind, get_transactions_in_date_range},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the current month.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    let date_range = current_month_date_range(today);
    let transactions = get_transactions_in_date_range(date_range, &connection)
        .inspect_err(|error| {
            tracing::error!("Could not get transactions for the current month: {error}")
        })?;

    let month = group_by_month(transactions.clone())?
        .remove(&MonthKey::from(today))
        .unwrap_or_default();
    let income_totals = month.income.totals();
    let expense_totals = month.expenses.totals();
    let income_weeks = weekly_summary(&transactions, TransactionKind::Income)?;
    let expense_weeks = weekly_summary(&transactions, TransactionKind::Expense)?;

    Ok(dashboard_view(
        nav_bar,
        today,
        &transactions,
        &month.overview,
        &income_totals,
        &expense_totals,
        &income_weeks,
        &expense_weeks,
    )
    .into_response())
}

/// The inclusive date range covering the whole month that `today` falls in.
fn current_month_date_range(today: Date) -> RangeInclusive<Date> {
    let first = today.replace_day(1).unwrap_or(today);
    let last = today
        .replace_day(today.month().length(today.year()))
        .unwrap_or(today);

    first..=last
}
