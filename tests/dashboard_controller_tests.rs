use axum::{
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use hotdoksboard::{config, controllers::dashboard_controller, routes, services, templates, AppState};
use tower::ServiceExt;

fn test_state() -> AppState {
    let mut settings = config::load();
    // Nothing listens here, so every fetch fails fast and the dashboard
    // stays in its zero state.
    settings.api_base_url = "http://127.0.0.1:9/hot-doks-api".to_string();
    // A non-default cadence, so tests can see it flow into the page.
    settings.refresh_secs = 7;

    let hotdoks =
        services::hotdoks::HotdoksClient::new(settings.api_base_url.clone(), settings.page_length);

    AppState {
        hbs: templates::build_handlebars(),
        settings,
        hotdoks,
        store: services::refresh_monitor::DashboardStore::new(),
    }
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn get_health_returns_ok() {
    let app = routes::app(test_state());

    let req = Request::builder().uri("/health").body(axum::body::Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn root_redirects_to_dashboard() {
    let app = routes::app(test_state());

    let req = Request::builder().uri("/").body(axum::body::Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/dashboard")
    );
}

#[tokio::test]
async fn unknown_path_renders_not_found() {
    let app = routes::app(test_state());

    let req = Request::builder().uri("/nope").body(axum::body::Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = response_body_string(res).await;
    assert!(body.contains("404"));
}

#[tokio::test]
async fn get_dashboard_renders_zero_state_when_api_is_down() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/dashboard")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("TABLEAU DE BORD"));
    assert!(body.contains("Pas de données à afficher"));
    assert!(body.contains("AUJOURD'HUI"));
}

#[tokio::test]
async fn get_dashboard_with_explicit_date_shows_that_day() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/dashboard?date=14/07/2023")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("VENDREDI 14 JUILLET"));
    // Navigation arrows point at the neighboring days.
    assert!(body.contains("date=13/07/2023"));
    assert!(body.contains("date=15/07/2023"));
}

#[tokio::test]
async fn dashboard_page_embeds_the_configured_poll_interval_and_date() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/dashboard?date=14/07/2023")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    // refresh_secs = 7 in test_state; the client poll follows it.
    assert!(body.contains("window.__REFRESH_MS__ = 7000"));
    assert!(body.contains("window.__DASHBOARD_DATE__ = \"14/07/2023\""));
}

#[tokio::test]
async fn browsing_a_past_day_leaves_the_shared_snapshot_on_today() {
    let state = test_state();
    let store = state.store.clone();
    let app = routes::app(state);

    let req = Request::builder()
        .uri("/dashboard?date=14/07/2023")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The historical view is derived per request; the store still tracks
    // today, so a second viewer on the live dashboard is unaffected.
    assert_eq!(store.selected_date(), chrono::Local::now().date_naive());
}

#[tokio::test]
async fn get_dashboard_with_invalid_date_falls_back_to_today() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/dashboard?date=garbage")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("AUJOURD'HUI"));
}

#[tokio::test]
async fn htmx_request_gets_the_partial_without_the_layout() {
    let app = routes::app(test_state());

    let req = Request::builder()
        .uri("/dashboard")
        .header("HX-Request", "true")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("TABLEAU DE BORD"));
    assert!(!body.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn get_dashboard_data_returns_the_zero_snapshot() {
    let state = test_state();
    let app = Router::new()
        .route("/dashboard/data", get(dashboard_controller::get_dashboard_data))
        .with_state(state);

    let req = Request::builder()
        .uri("/dashboard/data")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["stats"]["orderCount"], 0);
    assert_eq!(json["totalOrders"], 0);
    assert!(json["timeSlots"].as_array().unwrap().is_empty());
    // Fixed-cardinality category lists survive the zero state.
    assert_eq!(json["hotdogDistribution"].as_array().unwrap().len(), 3);
    assert_eq!(json["paymentDistribution"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_dashboard_stats_renders_the_cards_partial() {
    let state = test_state();
    let app = Router::new()
        .route("/dashboard/stats", get(dashboard_controller::get_dashboard_stats))
        .with_state(state);

    let req = Request::builder()
        .uri("/dashboard/stats")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("Recettes"));
    assert!(body.contains("Temps d'attente actuel"));
    assert!(body.contains("0.00€"));
}
