//! Maud templates for the dashboard page.

use std::collections::BTreeMap;

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency, format_short_date, loading_spinner,
    },
    navigation::NavBar,
    report::{CategoryTotals, MonthlyOverview, WeekSummary, weeks_in_month},
    transaction::{Transaction, TransactionKind},
};

/// The income categories offered by the add-transaction form. The store
/// accepts any string, this list only drives the form's dropdown.
const INCOME_CATEGORIES: [&str; 3] = ["Job", "Card Payment", "Business"];
/// The expense categories offered by the add-transaction form.
const EXPENSE_CATEGORIES: [&str; 3] = ["Food", "Shopping", "Subscriptions"];

/// Render the dashboard page.
///
/// `transactions` should contain only the transactions for the month that
/// `today` falls in, ordered by date.
pub fn dashboard_view(
    nav_bar: NavBar,
    today: Date,
    transactions: &[Transaction],
    overview: &MonthlyOverview,
    income_totals: &CategoryTotals,
    expense_totals: &CategoryTotals,
    income_weeks: &BTreeMap<u8, WeekSummary>,
    expense_weeks: &BTreeMap<u8, WeekSummary>,
) -> Markup {
    let nav_bar = nav_bar.into_html();
    let weeks = weeks_in_month(today);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl grid grid-cols-1 lg:grid-cols-2 gap-4"
            {
                section
                {
                    h2 class="text-xl font-bold mb-4" { "Add a transaction" }

                    (transaction_form(today))
                }

                section
                {
                    h2 class="text-xl font-bold mb-4" { "This month" }

                    (overview_card(overview))
                }
            }

            section class="w-full max-w-screen-xl mt-8" id="category-rankings"
            {
                h2 class="text-xl font-bold mb-4" { "By category" }

                div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
                {
                    (ranking_card("Income", income_totals))
                    (ranking_card("Expenses", expense_totals))
                }
            }

            section class="w-full max-w-screen-xl mt-8"
            {
                h2 class="text-xl font-bold mb-4" { "Weekly summary" }

                div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
                {
                    (weekly_card("Income", weeks, income_weeks))
                    (weekly_card("Expenses", weeks, expense_weeks))
                }
            }

            section class="w-full max-w-screen-xl mt-8"
            {
                h2 class="text-xl font-bold mb-4" { "Transactions" }

                @if transactions.is_empty() {
                    p { "No transactions yet this month. Add one with the form above." }
                } @else {
                    (transaction_table(transactions))
                }
            }
        }
    );

    base("Dashboard", &[dollar_input_styles()], &content)
}

fn transaction_form(today: Date) -> Markup {
    html!(
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-indicator="#indicator"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        step="0.01"
                        min="0"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            fieldset class="flex items-center gap-x-6"
            {
                @for kind in [TransactionKind::Income, TransactionKind::Expense] {
                    label class="flex items-center gap-x-2 text-sm font-medium text-gray-900 dark:text-white"
                    {
                        input
                            type="radio"
                            name="kind"
                            value=(kind)
                            checked[kind == TransactionKind::Expense];

                        (kind)
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    optgroup label="Income"
                    {
                        @for category in INCOME_CATEGORIES {
                            option value=(category) { (category) }
                        }
                    }

                    optgroup label="Expense"
                    {
                        @for category in EXPENSE_CATEGORIES {
                            option value=(category) { (category) }
                        }
                    }

                    option value="Other" selected { "Other" }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="What was this for?"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button
                type="submit" id="submit-button"
                class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Add transaction"
            }
        }
    )
}

fn overview_card(overview: &MonthlyOverview) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            dl class="grid grid-cols-2 gap-y-3"
            {
                dt class="font-medium" { "Income" }
                dd class="text-right" { (format_currency(overview.total_income)) }

                dt class="font-medium" { "Expenses" }
                dd class="text-right" { (format_currency(overview.total_expense)) }

                dt class="font-medium" { "Net" }
                dd class="text-right font-semibold" { (format_currency(overview.net)) }

                dt class="font-medium" { "Biggest income category" }
                dd class="text-right" { (overview.biggest_income.name) }

                dt class="font-medium" { "Biggest expense category" }
                dd class="text-right" { (overview.biggest_expense.name) }
            }
        }
    )
}

fn ranking_card(title: &str, totals: &CategoryTotals) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold mb-2" { (title) }

            @if totals.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Nothing recorded." }
            } @else {
                dl class="grid grid-cols-2 gap-y-2"
                {
                    @for (category, amount) in totals.sorted_descending() {
                        dt { (category) }
                        dd class="text-right" { (format_currency(amount)) }
                    }
                }
            }
        }
    )
}

fn weekly_card(title: &str, weeks: u8, summaries: &BTreeMap<u8, WeekSummary>) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold mb-2" { (title) }

            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class="px-4 py-2" { "Week" }
                        th scope="col" class="px-4 py-2" { "Total" }
                        th scope="col" class="px-4 py-2" { "Top category" }
                        th scope="col" class="px-4 py-2" { "Categories" }
                    }
                }

                tbody
                {
                    @for week in 0..weeks {
                        @let summary = summaries.get(&week);
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class="px-4 py-2" { "Week " ((week + 1)) }
                            td class="px-4 py-2"
                            {
                                (format_currency(summary.map(|s| s.total).unwrap_or(0.0)))
                            }
                            td class="px-4 py-2"
                            {
                                @if let Some(summary) = summary {
                                    (summary.top.name)
                                }
                            }
                            td class="px-4 py-2"
                            {
                                @if let Some(summary) = summary {
                                    ul
                                    {
                                        @for (category, amount) in summary.categories.sorted_descending() {
                                            li { (category) " " (format_currency(amount)) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn transaction_table(transactions: &[Transaction]) -> Markup {
    html!(
        div class="relative overflow-x-auto shadow-md sm:rounded"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (format_short_date(transaction.date)) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                button
                                    type="button"
                                    hx-delete=(format_endpoint(endpoints::TRANSACTION, transaction.id))
                                    hx-target="closest tr"
                                    hx-swap="outerHTML"
                                    hx-target-error="#alert-container"
                                    class=(BUTTON_DELETE_STYLE)
                                {
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}
