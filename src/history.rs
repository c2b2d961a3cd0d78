//! The history page: every past month of transactions, summarised.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    report::{MonthBucket, MonthKey, group_by_month},
    transaction::get_all_transactions,
};

/// The state needed for displaying the history page.
#[derive(Debug, Clone)]
pub struct HistoryState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HistoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page summarising every month of transactions, oldest first.
pub async fn get_history_page(State(state): State<HistoryState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("Could not get transactions: {error}"))?;
    let months = group_by_month(transactions)?;

    Ok(history_view(NavBar::new(endpoints::HISTORY_VIEW), &months).into_response())
}

fn history_view(nav_bar: NavBar, months: &BTreeMap<MonthKey, MonthBucket>) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h2 class="text-xl font-bold mb-4" { "History" }

                @if months.is_empty() {
                    p { "No transactions yet. Add some from the dashboard." }
                }

                @for (month, bucket) in months {
                    (month_section(month, bucket))
                }
            }
        }
    );

    base("History", &[], &content)
}

fn month_section(month: &MonthKey, bucket: &MonthBucket) -> Markup {
    html!(
        details class="mb-4" id=(format!("month-{month}"))
        {
            summary class="text-lg font-semibold cursor-pointer py-2"
            {
                (month) ": net " (format_currency(bucket.overview.net))
            }

            div class=(CARD_STYLE)
            {
                dl class="grid grid-cols-2 gap-y-2 mb-4"
                {
                    dt class="font-medium" { "Income" }
                    dd class="text-right" { (format_currency(bucket.overview.total_income)) }

                    dt class="font-medium" { "Expenses" }
                    dd class="text-right" { (format_currency(bucket.overview.total_expense)) }

                    dt class="font-medium" { "Biggest income category" }
                    dd class="text-right" { (bucket.overview.biggest_income.name) }

                    dt class="font-medium" { "Biggest expense category" }
                    dd class="text-right" { (bucket.overview.biggest_expense.name) }
                }

                div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
                {
                    (category_table("Income", &bucket.income))
                    (category_table("Expenses", &bucket.expenses))
                }
            }
        }
    )
}

fn category_table(title: &str, groups: &crate::report::CategoryGroups) -> Markup {
    let totals = groups.totals();

    html!(
        div
        {
            h3 class="text-base font-semibold mb-2" { (title) }

            @if groups.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Nothing recorded." }
            } @else {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Transactions" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                        }
                    }

                    tbody
                    {
                        @for (category, amount) in totals.sorted_descending() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (category) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    (groups.get(&category).map(|group| group.len()).unwrap_or(0))
                                }
                                td class=(TABLE_CELL_STYLE) { (format_currency(amount)) }
                            }
                        }
                    }
                }
            }
        }
    )
}
