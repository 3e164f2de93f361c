use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// One order as returned by the hot-doks API for a given day.
///
/// The upstream payload is tolerated rather than validated: timestamps that
/// are absent or unparseable come through as `None`, unknown enum strings map
/// to the `Unknown` variants, and the record as a whole still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub ordered_by: Option<String>,
    #[serde(default)]
    pub prepared_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub order_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub preparation_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub payment_type: Option<PaymentType>,
    #[serde(default)]
    pub hotdogs: Vec<Hotdog>,
    #[serde(default)]
    pub total_price: f64,
}

impl Order {
    /// An order is in progress until it reaches a closed status. Statuses the
    /// API may add later are not assumed closed.
    pub fn is_in_progress(&self) -> bool {
        !matches!(
            self.order_status,
            OrderStatus::Ready | OrderStatus::Delivered | OrderStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotdog {
    #[serde(rename = "type", default)]
    pub kind: HotdogType,
    #[serde(default)]
    pub with_ketchup: bool,
    #[serde(default)]
    pub with_mustard: bool,
    #[serde(default)]
    pub with_mayo: bool,
    #[serde(default)]
    pub with_onions: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[serde(rename = "ORDERED")]
    Ordered,
    #[serde(rename = "IN_PREPARATION")]
    InPreparation,
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "DELIVERED")]
    Delivered,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HotdogType {
    #[serde(rename = "CLASSIC")]
    Classic,
    #[serde(rename = "ALSACE")]
    Alsace,
    #[serde(rename = "NEWYORK")]
    NewYork,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "CARD")]
    Card,
}

/// The API serializes `LocalDateTime` as an ISO string without a zone
/// ("2023-08-15T14:30:00"). Missing or malformed values become `None` so a
/// bad record never fails the whole day's payload.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse::<NaiveDateTime>().ok()))
}
