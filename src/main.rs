use std::net::SocketAddr;

use hotdoksboard::services::hotdoks::HotdoksClient;
use hotdoksboard::services::refresh_monitor::{self, DashboardStore};
use hotdoksboard::{config, routes, templates, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let hotdoks = HotdoksClient::new(settings.api_base_url.clone(), settings.page_length);

    let state = AppState {
        hbs: templates::build_handlebars(),
        settings: settings.clone(),
        hotdoks,
        store: DashboardStore::new(),
    };

    refresh_monitor::spawn_refresh_monitor(state.clone());

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
