use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    render,
    services::dashboard_service::{self, DashboardData},
    services::refresh_monitor,
    AppState,
};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// A bad or missing `?date=DD/MM/YYYY` falls back to today rather than
/// erroring.
fn parse_display_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y").ok()
}

fn requested_date(raw: Option<&str>) -> NaiveDate {
    raw.and_then(parse_display_date)
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// The shared snapshot is dedicated to today, so browsing history derives its
/// data per request and two viewers on different dates cannot clobber each
/// other.
async fn data_for(state: &AppState, date: NaiveDate) -> DashboardData {
    if date == chrono::Local::now().date_naive() {
        state.store.snapshot()
    } else {
        refresh_monitor::day_data(state, date).await
    }
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> axum::response::Response {
    let date = requested_date(query.date.as_deref());

    // Page loads on today refresh inline rather than waiting for the next
    // monitor tick.
    if date == chrono::Local::now().date_naive() {
        refresh_monitor::refresh_now(&state).await;
    }

    let data = data_for(&state, date).await;
    let ctx = dashboard_service::page_ctx(&data, date, state.settings.refresh_secs);

    let body = match state.hbs.render("pages/dashboard", &ctx) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("template error: {e}")),
            )
                .into_response()
        }
    };

    if is_htmx(&headers) {
        return (StatusCode::OK, Html(body)).into_response();
    }

    match render::render_full(&state, "Tableau de bord", body) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

/// Stat cards partial, polled by the page between full reloads.
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> axum::response::Response {
    let date = requested_date(query.date.as_deref());
    let data = data_for(&state, date).await;
    let ctx = dashboard_service::stats_ctx(&data);

    let html = state
        .hbs
        .render("partials/stats_cards", &ctx)
        .unwrap_or_else(|e| format!("template error: {e}"));

    (StatusCode::OK, Html(html)).into_response()
}

/// Full derived snapshot as JSON, consumed by the client-side charts.
pub async fn get_dashboard_data(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> axum::response::Response {
    let date = requested_date(query.date.as_deref());
    let data = data_for(&state, date).await;
    (StatusCode::OK, Json(data)).into_response()
}
