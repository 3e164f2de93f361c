use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub host: String,
    pub port: u16,

    pub refresh_secs: u64,
    pub page_length: u32,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let api_base_url = env::var("HOTDOKS_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080/hot-doks-api".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let refresh_secs = env::var("REFRESH_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(5);

    let page_length = env::var("PAGE_LENGTH")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1000);

    Settings {
        api_base_url,
        host,
        port,
        refresh_secs,
        page_length,
    }
}
