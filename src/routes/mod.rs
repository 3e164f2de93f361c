use axum::Router;
use tower_http::services::ServeDir;

use crate::{controllers::home_controller, AppState};

pub mod dashboard_routes;
pub mod home_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = dashboard_routes::add_routes(router);

    router
        .nest_service("/static", ServeDir::new("static"))
        .fallback(home_controller::not_found)
        .with_state(state)
}
