//! The budgets overview: period navigation, totals, and the paged budget list.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    budget::{
        aggregation::{BudgetSummary, aggregate_budgets},
        core::Budget,
        db::{
            cleanup_budgets, collect_budget_information, get_active_budgets,
            get_available_amount, get_inactive_budgets,
        },
    },
    endpoints::{self, format_endpoint, period_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, PaginationIndicator, create_pagination_indicators, page_count},
    period::{Granularity, PeriodLabel, ResolvedPeriod, current_window, period_label,
        resolve_period},
    preferences::{get_page_size, get_view_range},
    session::{SessionWindow, get_session_window, put_session_window, take_flash_message},
    timezone::current_local_date,
};

/// The state needed for the budgets overview.
#[derive(Debug, Clone)]
pub struct BudgetsViewState {
    /// The database connection for reading budgets.
    db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
    /// The config that controls how to display pages of data.
    pagination_config: PaginationConfig,
}

impl FromRef<AppState> for BudgetsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BudgetsQuery {
    /// The page of budgets to display.
    pub page: Option<u64>,
}

/// Render the budgets overview for the saved display window.
pub async fn get_budgets_page(
    State(state): State<BudgetsViewState>,
    Query(query): Query<BudgetsQuery>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    render_budgets_page(state, query, jar, None)
}

/// Render the budgets overview for the window starting at the date in the
/// path. A date that fails to parse falls back to the saved window.
pub async fn get_budgets_page_for_date(
    State(state): State<BudgetsViewState>,
    Path(date): Path<String>,
    Query(query): Query<BudgetsQuery>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    render_budgets_page(state, query, jar, Some(date))
}

fn render_budgets_page(
    state: BudgetsViewState,
    query: BudgetsQuery,
    jar: PrivateCookieJar,
    override_date: Option<String>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let granularity = get_view_range(&connection)
        .inspect_err(|error| tracing::error!("could not get view range preference: {error}"))?;
    let page_size = get_page_size(&connection)
        .inspect_err(|error| tracing::error!("could not get page size preference: {error}"))?;
    let page = match query.page {
        None | Some(0) => state.pagination_config.default_page,
        Some(page) => page,
    };

    let saved = get_session_window(&jar).map(|window| (window.start, window.end));
    let window = current_window(saved, granularity, override_date.as_deref(), today);
    let resolved = resolve_period(window, today);

    cleanup_budgets(&connection)
        .inspect_err(|error| tracing::error!("could not clean up budgets: {error}"))?;
    let active = get_active_budgets(&connection)
        .inspect_err(|error| tracing::error!("could not get active budgets: {error}"))?;
    let inactive = get_inactive_budgets(&connection)
        .inspect_err(|error| tracing::error!("could not get inactive budgets: {error}"))?;
    let information = collect_budget_information(&active, resolved.current, &connection)
        .inspect_err(|error| tracing::error!("could not collect budget information: {error}"))?;
    let available = get_available_amount(resolved.current, &connection)
        .inspect_err(|error| tracing::error!("could not get available amount: {error}"))?;

    let summary = aggregate_budgets(active, inactive, information, page, page_size);
    let page_count = page_count(summary.total as u64, page_size);
    let indicators =
        create_pagination_indicators(page, page_count, state.pagination_config.max_indicators);

    let (jar, flash_message) = take_flash_message(jar);
    let jar = put_session_window(
        jar,
        SessionWindow {
            start: resolved.current.start,
            end: resolved.current.end,
        },
    )?;

    let view = budgets_view(&BudgetsViewModel {
        resolved,
        summary,
        available,
        flash_message,
        indicators,
    });

    Ok((jar, view).into_response())
}

struct BudgetsViewModel {
    resolved: ResolvedPeriod,
    summary: BudgetSummary,
    available: f64,
    flash_message: Option<String>,
    indicators: Vec<PaginationIndicator>,
}

struct BudgetTableRow {
    name: String,
    spent: f64,
    budgeted: f64,
    edit_url: String,
    delete_url: String,
    allocation_url: String,
}

impl BudgetTableRow {
    fn from_summary(summary: &BudgetSummary) -> Vec<Self> {
        summary
            .page_budgets
            .iter()
            .map(|budget| {
                let information = summary
                    .information
                    .iter()
                    .find(|info| info.budget_id == budget.id);

                Self {
                    name: budget.name.clone(),
                    spent: information.map(|info| info.spent).unwrap_or_default(),
                    budgeted: information.map(|info| info.budgeted).unwrap_or_default(),
                    edit_url: format_endpoint(endpoints::EDIT_BUDGET_VIEW, budget.id),
                    delete_url: format_endpoint(endpoints::DELETE_BUDGET_VIEW, budget.id),
                    allocation_url: format_endpoint(endpoints::BUDGET_ALLOCATION, budget.id),
                }
            })
            .collect()
    }
}

fn page_url(page: u64) -> String {
    match serde_urlencoded::to_string([("page", page)]) {
        Ok(query) => format!("{}?{query}", endpoints::BUDGETS_VIEW),
        Err(error) => {
            tracing::error!("could not encode page query for page {page}: {error}");
            endpoints::BUDGETS_VIEW.to_owned()
        }
    }
}

fn period_navigation(resolved: &ResolvedPeriod) -> Markup {
    let granularity = resolved.current.granularity;
    let title = period_label(resolved.current.start, granularity);
    let date_range = format!(
        "{} to {}",
        period_label(resolved.current.start, Granularity::Day),
        period_label(resolved.current.end, Granularity::Day),
    );
    let prev_label = period_label(resolved.previous.start, granularity);
    let next_label = period_label(resolved.next.start, granularity);

    let label_list = |labels: &[PeriodLabel]| {
        html!(
            ul class="absolute z-10 mt-1 w-44 rounded border border-gray-200 bg-white p-2 \
                shadow-lg dark:border-gray-700 dark:bg-gray-800"
            {
                @for entry in labels {
                    li
                    {
                        a
                            href=(period_endpoint(entry.key))
                            class="block rounded px-3 py-1 hover:bg-gray-100 dark:hover:bg-gray-700"
                        {
                            (entry.label)
                        }
                    }
                }
            }
        )
    };

    html!(
        header class="flex flex-wrap items-center justify-between gap-4"
        {
            div class="flex items-center gap-3"
            {
                a
                    href=(period_endpoint(resolved.previous.start))
                    class=(LINK_STYLE)
                    title=(prev_label)
                {
                    "\u{2190} " (prev_label)
                }

                div
                {
                    h1 class="text-xl font-bold" { (title) }
                    p class="text-sm text-gray-500 dark:text-gray-400" { (date_range) }
                }

                a
                    href=(period_endpoint(resolved.next.start))
                    class=(LINK_STYLE)
                    title=(next_label)
                {
                    (next_label) " \u{2192}"
                }
            }

            div class="flex gap-4 text-sm"
            {
                details class="relative"
                {
                    summary class="cursor-pointer select-none" { "Earlier periods" }
                    (label_list(&resolved.previous_labels))
                }

                details class="relative"
                {
                    summary class="cursor-pointer select-none" { "Later periods" }
                    (label_list(&resolved.next_labels))
                }
            }
        }
    )
}

fn progress_view(resolved: &ResolvedPeriod) -> Markup {
    let elapsed = resolved.days_elapsed;
    let remaining = resolved.days_remaining;
    let percent = ((elapsed as f64 / (elapsed + remaining) as f64) * 100.0).round() as i64;

    html!(
        section
        {
            div class="flex justify-between text-sm text-gray-500 dark:text-gray-400"
            {
                span { (elapsed) " days elapsed" }
                span { (remaining) " days remaining" }
            }

            div class="mt-1 h-2 w-full rounded bg-gray-200 dark:bg-gray-700"
            {
                div
                    class="h-2 rounded bg-blue-600"
                    style=(format!("width: {percent}%"))
                {}
            }
        }
    )
}

fn totals_view(summary: &BudgetSummary, available: f64) -> Markup {
    let card = |label: &str, amount: f64| {
        html!(
            div class="rounded border border-gray-200 bg-white px-4 py-3 dark:border-gray-700 \
                dark:bg-gray-800"
            {
                p class="text-xs uppercase text-gray-500 dark:text-gray-400" { (label) }
                p class="text-lg font-semibold tabular-nums" { (format_currency(amount)) }
            }
        )
    };

    html!(
        section class="grid grid-cols-1 gap-4 sm:grid-cols-3" data-totals="true"
        {
            (card("Spent", summary.spent_total))
            (card("Budgeted", summary.budgeted_total))
            (card("Available", available))
        }
    )
}

fn budget_table(rows: &[BudgetTableRow]) -> Markup {
    let table_row = |row: &BudgetTableRow| {
        let left = row.budgeted - row.spent;

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    (row.name)
                }

                td class="px-6 py-4 text-right" { (format_currency(row.spent)) }

                td class="px-6 py-4 text-right"
                {
                    form hx-post=(row.allocation_url) class="inline-flex items-center gap-2"
                    {
                        input
                            type="number"
                            name="amount"
                            step="0.01"
                            min="0"
                            value=(format!("{:.2}", row.budgeted))
                            class="w-24 rounded border border-gray-300 p-1 text-right text-sm \
                                dark:border-gray-600 dark:bg-gray-700";
                        button type="submit" class=(LINK_STYLE) { "Set" }
                    }
                }

                td class="px-6 py-4 text-right" { (format_currency(left)) }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(row.edit_url) class=(LINK_STYLE) { "Edit" }
                        a href=(row.delete_url) class=(LINK_STYLE) { "Delete" }
                    }
                }
            }
        )
    };

    html!(
        section class="w-full overflow-x-auto dark:bg-gray-800 lg:max-w-5xl lg:w-full lg:mx-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Budget" }
                        th scope="col" class="px-6 py-3 text-right" { "Spent" }
                        th scope="col" class="px-6 py-3 text-right" { "Budgeted" }
                        th scope="col" class="px-6 py-3 text-right" { "Left" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (table_row(row))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan="5"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No budgets found. Create a budget "
                                a href=(endpoints::NEW_BUDGET_VIEW) class=(LINK_STYLE) { "here" }
                                "."
                            }
                        }
                    }
                }
            }
        }
    )
}

fn inactive_budgets_view(inactive: &[Budget]) -> Markup {
    html!(
        @if !inactive.is_empty() {
            section data-inactive-budgets="true"
            {
                h2 class="text-lg font-semibold" { "Inactive budgets" }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "These budgets are excluded from spend tracking."
                }

                ul class="mt-2 space-y-1"
                {
                    @for budget in inactive {
                        li
                        {
                            a
                                href=(format_endpoint(endpoints::EDIT_BUDGET_VIEW, budget.id))
                                class=(LINK_STYLE)
                            {
                                (budget.name)
                            }
                        }
                    }
                }
            }
        }
    )
}

fn pagination_view(indicators: &[PaginationIndicator]) -> Markup {
    html!(
        @if indicators.len() > 1 {
            nav class="flex justify-center gap-2 text-sm" aria-label="Budget pages"
            {
                @for indicator in indicators {
                    @match indicator {
                        PaginationIndicator::CurrPage(page) => {
                            span class="font-bold" aria-current="page" { (page) }
                        }
                        PaginationIndicator::Page(page) => {
                            a href=(page_url(*page)) class=(LINK_STYLE) { (page) }
                        }
                        PaginationIndicator::Ellipsis => {
                            span { "\u{2026}" }
                        }
                        PaginationIndicator::BackButton(page) => {
                            a href=(page_url(*page)) class=(LINK_STYLE) { "Back" }
                        }
                        PaginationIndicator::NextButton(page) => {
                            a href=(page_url(*page)) class=(LINK_STYLE) { "Next" }
                        }
                    }
                }
            }
        }
    )
}

fn budgets_view(model: &BudgetsViewModel) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let rows = BudgetTableRow::from_summary(&model.summary);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full space-y-6 lg:max-w-5xl"
            {
                @if let Some(message) = &model.flash_message {
                    (Alert::success(message).into_markup())
                }

                (period_navigation(&model.resolved))
                (progress_view(&model.resolved))
                (totals_view(&model.summary, model.available))

                div class="flex justify-end"
                {
                    a href=(endpoints::NEW_BUDGET_VIEW) class=(LINK_STYLE) { "Add Budget" }
                }

                (budget_table(&rows))
                (pagination_view(&model.indicators))
                (inactive_budgets_view(&model.summary.inactive))
            }
        }
    );

    base("Budgets", &content)
}
