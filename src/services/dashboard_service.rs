//! Derivation of everything the dashboard shows from one day's order list.
//!
//! All computation here is a pure function of `(orders, reference)`; fetching
//! and state sharing live in `refresh_monitor`. Every structure is recomputed
//! from scratch on each refresh, nothing is cached across cycles.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use serde_json::json;

use crate::models::{HotdogType, Order, PaymentType};

const SLOT_MINUTES: i64 = 15;
/// Inclusive upper bound of a slot window, one millisecond short of the next
/// slot. Orders exactly on a slot boundary belong to the slot that starts
/// there.
const SLOT_WINDOW_MS: i64 = SLOT_MINUTES * 60_000 - 1;

/// Displayed wait times never drop below this, the minimum preparation lead
/// time. Zero-order slots stay at 0, which means "no data", not "instant".
const WAIT_TIME_FLOOR: i64 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct DistributionEntry {
    pub name: &'static str,
    pub value: f64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub revenue: f64,
    pub order_count: usize,
    pub hot_dog_count: usize,
    pub avg_wait_time: i64,
    pub in_progress_count: usize,
    pub in_progress_hot_dog_count: usize,
}

/// Everything derived from one day's orders, in one refresh pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: Stats,
    pub hotdog_distribution: Vec<DistributionEntry>,
    pub payment_distribution: Vec<DistributionEntry>,
    pub time_slots: Vec<String>,
    pub displayed_slots: Vec<String>,
    pub order_volume: Vec<ChartPoint>,
    pub wait_times: Vec<ChartPoint>,
    pub total_orders: usize,
}

impl DashboardData {
    /// The zero state shown after a failed or empty fetch: default category
    /// lists at zero, zero stats, no series.
    pub fn empty() -> Self {
        Self {
            stats: Stats::default(),
            hotdog_distribution: hotdog_buckets(),
            payment_distribution: payment_buckets(),
            time_slots: vec![],
            displayed_slots: vec![],
            order_volume: vec![],
            wait_times: vec![],
            total_orders: 0,
        }
    }

    pub fn compute(orders: &[Order], reference: NaiveDateTime) -> Self {
        // A day with no orders at all is the zero state, not "no backlog":
        // the stats keep 0 instead of the 2-minute wait floor.
        if orders.is_empty() {
            return Self::empty();
        }

        let (hotdog_distribution, payment_distribution) = compute_distributions(orders);
        let (time_slots, displayed_slots) = compute_time_slots(orders);
        let (order_volume, wait_times) = compute_chart_data(orders, &time_slots, reference);
        let stats = compute_current_stats(orders, reference);
        let total_orders = orders.iter().filter(|o| o.order_time.is_some()).count();

        Self {
            stats,
            hotdog_distribution,
            payment_distribution,
            time_slots,
            displayed_slots,
            order_volume,
            wait_times,
            total_orders,
        }
    }
}

fn hotdog_buckets() -> Vec<DistributionEntry> {
    vec![
        DistributionEntry { name: "Classic", value: 0.0, fill: "#e57373" },
        DistributionEntry { name: "Alsace", value: 0.0, fill: "#8d6e63" },
        DistributionEntry { name: "New York", value: 0.0, fill: "#ffd54f" },
    ]
}

fn payment_buckets() -> Vec<DistributionEntry> {
    vec![
        DistributionEntry { name: "Carte", value: 0.0, fill: "#FF9800" },
        DistributionEntry { name: "Espèces", value: 0.0, fill: "#4CAF50" },
    ]
}

/// Per-type hot-dog counts and per-payment-method revenue. Buckets have fixed
/// cardinality so the pies render empty slices instead of dropping categories.
/// Unknown hot-dog types and null payment types contribute to no bucket.
pub fn compute_distributions(orders: &[Order]) -> (Vec<DistributionEntry>, Vec<DistributionEntry>) {
    let mut hotdogs = hotdog_buckets();
    let mut payments = payment_buckets();

    for order in orders {
        for item in &order.hotdogs {
            match item.kind {
                HotdogType::Classic => hotdogs[0].value += 1.0,
                HotdogType::Alsace => hotdogs[1].value += 1.0,
                HotdogType::NewYork => hotdogs[2].value += 1.0,
                HotdogType::Unknown => {}
            }
        }

        match order.payment_type {
            Some(PaymentType::Card) => payments[0].value += order.total_price,
            Some(PaymentType::Cash) => payments[1].value += order.total_price,
            None => {}
        }
    }

    (hotdogs, payments)
}

/// 15-minute slot labels covering the day's orders, from the slot containing
/// the earliest order down-rounded to the grid through the slot after the
/// latest order up-rounded to the grid (an exact boundary stays put).
///
/// The second sequence thins the x-axis ticks: first slot, last slot, and
/// every top of the hour.
pub fn compute_time_slots(orders: &[Order]) -> (Vec<String>, Vec<String>) {
    let times: Vec<NaiveDateTime> = orders.iter().filter_map(|o| o.order_time).collect();

    let (Some(first), Some(last)) = (times.iter().min(), times.iter().max()) else {
        return (vec![], vec![]);
    };

    // Minute-granularity rounding: seconds are dropped before the ceiling, so
    // 09:45:30 still ends the grid at 09:45 (its slot window covers it).
    let first_minutes = i64::from(first.hour()) * 60 + i64::from(first.minute());
    let last_minutes = i64::from(last.hour()) * 60 + i64::from(last.minute());
    let start = first_minutes / SLOT_MINUTES * SLOT_MINUTES;
    let end = (last_minutes + SLOT_MINUTES - 1) / SLOT_MINUTES * SLOT_MINUTES;

    let time_slots: Vec<String> = (start..=end)
        .step_by(SLOT_MINUTES as usize)
        .map(slot_label)
        .collect();

    let displayed_slots: Vec<String> = time_slots
        .iter()
        .enumerate()
        .filter(|(i, slot)| {
            *i == 0 || *i == time_slots.len() - 1 || slot.ends_with(":00")
        })
        .map(|(_, slot)| slot.clone())
        .collect();

    (time_slots, displayed_slots)
}

fn slot_label(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60 % 24, minutes % 60)
}

fn slot_minutes(label: &str) -> Option<i64> {
    let (h, m) = label.split_once(':')?;
    Some(h.parse::<i64>().ok()? * 60 + m.parse::<i64>().ok()?)
}

/// Per-slot order volume and average wait time, one point per slot in slot
/// order so the two charts share an x-axis. Slot windows are anchored on the
/// reference date.
pub fn compute_chart_data(
    orders: &[Order],
    time_slots: &[String],
    reference: NaiveDateTime,
) -> (Vec<ChartPoint>, Vec<ChartPoint>) {
    let day_start = reference.date().and_time(NaiveTime::MIN);

    let mut volume = Vec::with_capacity(time_slots.len());
    let mut wait = Vec::with_capacity(time_slots.len());

    for slot in time_slots {
        let Some(minutes) = slot_minutes(slot) else {
            continue;
        };
        let slot_start = day_start + Duration::minutes(minutes);
        let slot_end = slot_start + Duration::milliseconds(SLOT_WINDOW_MS);

        let in_slot: Vec<&Order> = orders
            .iter()
            .filter(|o| {
                o.order_time
                    .map(|t| t >= slot_start && t <= slot_end)
                    .unwrap_or(false)
            })
            .collect();

        volume.push(ChartPoint {
            time: slot.clone(),
            value: in_slot.len() as f64,
        });

        let avg = if in_slot.is_empty() {
            // "No data", deliberately below the wait-time floor.
            0
        } else {
            let total: f64 = in_slot
                .iter()
                .filter_map(|o| o.order_time)
                .map(|t| wait_minutes(reference, t))
                .sum();
            (total / in_slot.len() as f64).round().max(WAIT_TIME_FLOOR as f64) as i64
        };

        wait.push(ChartPoint {
            time: slot.clone(),
            value: avg as f64,
        });
    }

    (volume, wait)
}

fn wait_minutes(reference: NaiveDateTime, order_time: NaiveDateTime) -> f64 {
    ((reference - order_time).num_milliseconds() as f64 / 60_000.0).round()
}

/// The headline numbers: whole-day revenue and counts, plus the in-progress
/// subset and the current weighted wait time.
pub fn compute_current_stats(orders: &[Order], reference: NaiveDateTime) -> Stats {
    let revenue: f64 = orders.iter().map(|o| o.total_price).sum();
    let order_count = orders.len();
    let hot_dog_count: usize = orders.iter().map(|o| o.hotdogs.len()).sum();

    let in_progress: Vec<&Order> = orders.iter().filter(|o| o.is_in_progress()).collect();
    let in_progress_count = in_progress.len();
    let in_progress_hot_dog_count: usize = in_progress.iter().map(|o| o.hotdogs.len()).sum();

    // Weighted by hot-dog count: a large order waiting long pulls the number
    // harder than several small fast ones. Orders without a usable timestamp
    // drop out of numerator and denominator both.
    let mut avg_wait_time = WAIT_TIME_FLOOR;
    if !in_progress.is_empty() {
        let mut total_wait = 0.0;
        let mut total_hotdogs = 0usize;

        for order in &in_progress {
            let Some(order_time) = order.order_time else {
                continue;
            };
            let weight = order.hotdogs.len();
            total_wait += wait_minutes(reference, order_time) * weight as f64;
            total_hotdogs += weight;
        }

        if total_hotdogs > 0 {
            avg_wait_time =
                ((total_wait / total_hotdogs as f64).round() as i64).max(WAIT_TIME_FLOOR);
        }
    }

    Stats {
        revenue,
        order_count,
        hot_dog_count,
        avg_wait_time,
        in_progress_count,
        in_progress_hot_dog_count,
    }
}

/// Reference instant for a dashboard day: now when looking at today, midnight
/// of that day when browsing history.
pub fn reference_for(date: NaiveDate) -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    if date == now.date() {
        now
    } else {
        date.and_time(NaiveTime::MIN)
    }
}

const FRENCH_DAYS: [&str; 7] = [
    "LUNDI", "MARDI", "MERCREDI", "JEUDI", "VENDREDI", "SAMEDI", "DIMANCHE",
];
const FRENCH_MONTHS: [&str; 12] = [
    "JANVIER", "FÉVRIER", "MARS", "AVRIL", "MAI", "JUIN", "JUILLET", "AOÛT", "SEPTEMBRE",
    "OCTOBRE", "NOVEMBRE", "DÉCEMBRE",
];

pub fn format_date_display(date: NaiveDate) -> String {
    if date == chrono::Local::now().date_naive() {
        return "AUJOURD'HUI".to_string();
    }
    let day = FRENCH_DAYS[date.weekday().num_days_from_monday() as usize];
    let month = FRENCH_MONTHS[date.month0() as usize];
    format!("{} {} {}", day, date.day(), month)
}

fn wait_time_color(wait: i64) -> &'static str {
    if wait <= 5 {
        "#c8e6c9"
    } else if wait <= 10 {
        "#ffe0b2"
    } else {
        "#ffcdd2"
    }
}

fn in_progress_color(count: usize) -> &'static str {
    if count <= 3 {
        "#c8e6c9"
    } else if count <= 6 {
        "#fff3e0"
    } else {
        "#ffcdd2"
    }
}

/// Build the context used by the `partials/stats_cards` template.
pub fn stats_ctx(data: &DashboardData) -> serde_json::Value {
    let s = &data.stats;
    json!({
        "revenue": format!("{:.2}", s.revenue),
        "order_count": s.order_count,
        "hot_dog_count": s.hot_dog_count,
        "avg_wait_time": s.avg_wait_time,
        "in_progress_count": s.in_progress_count,
        "in_progress_hot_dog_count": s.in_progress_hot_dog_count,
        "wait_color": wait_time_color(s.avg_wait_time),
        "in_progress_color": in_progress_color(s.in_progress_count),
    })
}

/// Build the context used by the `pages/dashboard` template. The refresh
/// cadence rides along so the client-side poll tracks the server's.
pub fn page_ctx(data: &DashboardData, date: NaiveDate, refresh_secs: u64) -> serde_json::Value {
    let prev = date - Duration::days(1);
    let next = date + Duration::days(1);
    json!({
        "date_display": format_date_display(date),
        "date_api": date.format("%d/%m/%Y").to_string(),
        "prev_date": prev.format("%d/%m/%Y").to_string(),
        "next_date": next.format("%d/%m/%Y").to_string(),
        "has_orders": data.total_orders > 0,
        "refresh_ms": refresh_secs.saturating_mul(1000),
        "stats": stats_ctx(data),
    })
}
