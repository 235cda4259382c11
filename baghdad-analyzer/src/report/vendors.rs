use std::collections::BTreeMap;

use crate::dataset::{Frame, VendorInfo};
use crate::output::{num, Table};
use crate::report::areas::SLA_MINUTES;
use crate::report::group::{rank_by, DeliveryStats};
use crate::stats::{pct, round2};

pub const TOP_BY_ORDERS: usize = 15;
pub const TOP_BY_REVENUE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub vendor_id: i32,
    pub vendor_name: String,
    pub area: String,
    pub cuisine: String,
    pub orders: usize,
    pub revenue: f64,
    pub avg_minutes: f64,
    pub sla30: String,
}

impl Table for VendorRow {
    const HEADERS: &'static [&'static str] = &[
        "vendor_id",
        "vendor_name",
        "area",
        "cuisine",
        "orders",
        "revenue",
        "avg_minutes",
        "sla30",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.vendor_id.to_string(),
            self.vendor_name.clone(),
            self.area.clone(),
            self.cuisine.clone(),
            self.orders.to_string(),
            num(self.revenue),
            num(self.avg_minutes),
            self.sla30.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorRankings {
    pub by_orders: Vec<VendorRow>,
    pub by_revenue: Vec<VendorRow>,
}

/// Per-vendor totals in vendor id order. Orders whose vendor is unknown are skipped.
pub fn per_vendor(frame: &Frame) -> Vec<VendorRow> {
    let mut groups: BTreeMap<i32, (&VendorInfo, DeliveryStats)> = BTreeMap::new();
    for order in frame.delivered() {
        let Some(vendor) = order.vendor.as_ref() else {
            continue;
        };
        groups
            .entry(order.vendor_id)
            .or_insert_with(|| (vendor, DeliveryStats::default()))
            .1
            .add(order);
    }

    groups
        .into_iter()
        .map(|(vendor_id, (vendor, stats))| VendorRow {
            vendor_id,
            vendor_name: vendor.name.clone(),
            area: vendor.area.clone(),
            cuisine: vendor.cuisine.clone(),
            orders: stats.orders,
            revenue: round2(stats.revenue),
            avg_minutes: round2(stats.avg_minutes()),
            sla30: pct(stats.sla_rate(SLA_MINUTES)),
        })
        .collect()
}

pub fn compute(frame: &Frame) -> VendorRankings {
    let rows = per_vendor(frame);

    let mut by_orders = rows.clone();
    rank_by(&mut by_orders, |row| row.orders as f64);
    by_orders.truncate(TOP_BY_ORDERS);

    let mut by_revenue = rows;
    rank_by(&mut by_revenue, |row| row.revenue);
    by_revenue.truncate(TOP_BY_REVENUE);

    VendorRankings {
        by_orders,
        by_revenue,
    }
}
