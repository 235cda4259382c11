use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use baghdad_store::decimal::to_f64;

use crate::dataset::Frame;
use crate::output::{num, opt_num, Table};
use crate::report::group::DeliveryStats;
use crate::stats::round2;

/// Drivers below this many delivered orders are not ranked.
pub const MIN_ORDERS: usize = 20;
pub const TOP_DRIVERS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DriverRow {
    pub driver_id: i32,
    pub driver_name: String,
    pub orders: usize,
    pub avg_rating: Option<f64>,
    pub avg_minutes: f64,
    pub avg_distance: f64,
    /// Mean minutes per mean kilometre.
    pub efficiency_min_per_km: Option<f64>,
    pub profile_rating: Option<f64>,
    pub start_date: Option<NaiveDate>,
}

impl Table for DriverRow {
    const HEADERS: &'static [&'static str] = &[
        "driver_id",
        "driver_name",
        "orders",
        "avg_rating",
        "avg_minutes",
        "avg_distance",
        "efficiency_min_per_km",
        "profile_rating",
        "start_date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.driver_id.to_string(),
            self.driver_name.clone(),
            self.orders.to_string(),
            opt_num(self.avg_rating),
            num(self.avg_minutes),
            num(self.avg_distance),
            opt_num(self.efficiency_min_per_km),
            opt_num(self.profile_rating),
            self.start_date.map(|d| d.to_string()).unwrap_or_default(),
        ]
    }
}

/// Every driver with at least one delivered order, in driver id order.
pub fn per_driver(frame: &Frame) -> Vec<DriverRow> {
    let mut groups: BTreeMap<i32, DeliveryStats> = BTreeMap::new();
    for order in frame.delivered() {
        groups.entry(order.driver_id).or_default().add(order);
    }

    groups
        .into_iter()
        .map(|(driver_id, stats)| {
            let profile = frame.drivers.get(&driver_id);
            let avg_minutes = stats.avg_minutes();
            let avg_distance = stats.avg_distance();
            DriverRow {
                driver_id,
                driver_name: profile.map(|d| d.driver_name.clone()).unwrap_or_default(),
                orders: stats.orders,
                avg_rating: stats.avg_rating().map(round2),
                avg_minutes: round2(avg_minutes),
                avg_distance: round2(avg_distance),
                efficiency_min_per_km: (avg_distance > 0.0)
                    .then(|| round2(avg_minutes / avg_distance)),
                profile_rating: profile.and_then(|d| to_f64(&d.rating)),
                start_date: profile.map(|d| d.start_date),
            }
        })
        .collect()
}

/// Best rated drivers among those with enough orders; more orders breaks ties.
pub fn compute(frame: &Frame) -> Vec<DriverRow> {
    let mut rows: Vec<DriverRow> = per_driver(frame)
        .into_iter()
        .filter(|row| row.orders >= MIN_ORDERS)
        .collect();
    rows.sort_by(by_rating_then_orders);
    rows.truncate(TOP_DRIVERS);
    rows
}

fn by_rating_then_orders(a: &DriverRow, b: &DriverRow) -> Ordering {
    let rating = |row: &DriverRow| row.avg_rating.unwrap_or(f64::NEG_INFINITY);
    rating(b)
        .total_cmp(&rating(a))
        .then_with(|| b.orders.cmp(&a.orders))
}
