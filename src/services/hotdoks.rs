use chrono::NaiveDate;
use reqwest::Client;

use crate::models::Order;

/// Read-side client for the hot-doks order API. The write paths (create
/// order, transition status) belong to the order-taking workflow and are not
/// consumed here.
#[derive(Clone)]
pub struct HotdoksClient {
    http: Client,
    base_url: String,
    page_length: u32,
}

impl HotdoksClient {
    pub fn new(base_url: String, page_length: u32) -> Self {
        Self {
            http: Client::new(),
            base_url,
            page_length,
        }
    }

    /// Fetch every order of one calendar day. The API expects the date as
    /// zero-padded day-month-year with no separators (`DDMMYYYY`).
    pub async fn orders_for_day(&self, date: NaiveDate) -> Result<Vec<Order>, String> {
        let url = format!("{}/orders/filtered", self.base_url.trim_end_matches('/'));
        let order_date = date.format("%d%m%Y").to_string();
        let page_length = self.page_length.to_string();

        tracing::debug!(%url, %order_date, "fetching orders");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("orderDate", order_date.as_str()),
                ("startIndex", "0"),
                ("pageLength", page_length.as_str()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("order fetch failed: {status} {body}"));
        }

        // A non-array body counts as a malformed response, not as data.
        res.json::<Vec<Order>>().await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_date_format_is_ddmmyyyy() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(date.format("%d%m%Y").to_string(), "03062024");
    }

    #[tokio::test]
    async fn unreachable_api_returns_err() {
        let client = HotdoksClient::new("http://127.0.0.1:9/hot-doks-api".to_string(), 10);
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(client.orders_for_day(date).await.is_err());
    }
}
