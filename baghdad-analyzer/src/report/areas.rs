use std::collections::BTreeMap;

use crate::dataset::Frame;
use crate::output::{num, Table};
use crate::report::group::{rank_by, DeliveryStats};
use crate::stats::{pct, round2};

pub const SLA_MINUTES: f64 = 30.0;

/// Delivery performance for one dropoff area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRow {
    pub dropoff_area: String,
    pub orders: usize,
    pub avg_minutes: f64,
    pub p95_minutes: f64,
    pub sla30: String,
    pub revenue: f64,
}

impl Table for AreaRow {
    const HEADERS: &'static [&'static str] = &[
        "dropoff_area",
        "orders",
        "avg_minutes",
        "p95_minutes",
        "sla30",
        "revenue",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.dropoff_area.clone(),
            self.orders.to_string(),
            num(self.avg_minutes),
            num(self.p95_minutes),
            self.sla30.clone(),
            num(self.revenue),
        ]
    }
}

/// Areas ranked by delivered orders, busiest first.
pub fn compute(frame: &Frame) -> Vec<AreaRow> {
    let mut groups: BTreeMap<&str, DeliveryStats> = BTreeMap::new();
    for order in frame.delivered() {
        groups
            .entry(order.dropoff_area.as_str())
            .or_default()
            .add(order);
    }

    let mut rows: Vec<AreaRow> = groups
        .into_iter()
        .map(|(area, stats)| AreaRow {
            dropoff_area: area.to_string(),
            orders: stats.orders,
            avg_minutes: round2(stats.avg_minutes()),
            p95_minutes: round2(stats.p95_minutes()),
            sla30: pct(stats.sla_rate(SLA_MINUTES)),
            revenue: round2(stats.revenue),
        })
        .collect();
    rank_by(&mut rows, |row| row.orders as f64);
    rows
}

/// The `limit` areas with the lowest mean delivery time.
pub fn fastest(rows: &[AreaRow], limit: usize) -> Vec<&AreaRow> {
    let mut fastest: Vec<&AreaRow> = rows.iter().collect();
    fastest.sort_by(|a, b| a.avg_minutes.total_cmp(&b.avg_minutes));
    fastest.truncate(limit);
    fastest
}
