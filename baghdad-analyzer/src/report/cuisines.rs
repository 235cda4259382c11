use std::collections::BTreeMap;

use crate::dataset::Frame;
use crate::output::{num, Table};
use crate::report::areas::SLA_MINUTES;
use crate::report::group::{rank_by, DeliveryStats};
use crate::stats::{pct, round2};

/// Cuisines shown in the orders chart.
pub const CHART_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CuisineRow {
    pub cuisine: String,
    pub orders: usize,
    pub revenue: f64,
    pub avg_minutes: f64,
    pub sla30: String,
}

impl Table for CuisineRow {
    const HEADERS: &'static [&'static str] =
        &["cuisine", "orders", "revenue", "avg_minutes", "sla30"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.cuisine.clone(),
            self.orders.to_string(),
            num(self.revenue),
            num(self.avg_minutes),
            self.sla30.clone(),
        ]
    }
}

/// Every cuisine served by a known vendor, most ordered first.
pub fn compute(frame: &Frame) -> Vec<CuisineRow> {
    let mut groups: BTreeMap<&str, DeliveryStats> = BTreeMap::new();
    for order in frame.delivered() {
        if let Some(vendor) = order.vendor.as_ref() {
            groups.entry(vendor.cuisine.as_str()).or_default().add(order);
        }
    }

    let mut rows: Vec<CuisineRow> = groups
        .into_iter()
        .map(|(cuisine, stats)| CuisineRow {
            cuisine: cuisine.to_string(),
            orders: stats.orders,
            revenue: round2(stats.revenue),
            avg_minutes: round2(stats.avg_minutes()),
            sla30: pct(stats.sla_rate(SLA_MINUTES)),
        })
        .collect();
    rank_by(&mut rows, |row| row.orders as f64);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::*;
    use crate::dataset::Dataset;

    #[test]
    fn cuisines_pool_their_vendors() {
        let kfc = vendor(1, "KFC - Karada", "Karada", "Fried Chicken");
        let broasted = vendor(2, "Broasted Al Reem", "Dora", "Fried Chicken");
        let kubba = vendor(3, "Kubba Al Sayid", "Kadhimiya", "Iraqi");

        let rows = compute(&frame(&Dataset {
            orders: vec![
                delivered(1, &kfc, "Dora", 20),
                delivered(2, &broasted, "Karada", 35),
                delivered(3, &kubba, "Mansour", 25),
            ],
            vendors: vec![kfc, broasted, kubba],
            ..Default::default()
        }));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cuisine, "Fried Chicken");
        assert_eq!(rows[0].orders, 2);
        assert_eq!(rows[0].avg_minutes, 27.5);
        assert_eq!(rows[0].sla30, "50.00%");
        assert_eq!(rows[1].cuisine, "Iraqi");
        assert_eq!(rows[1].revenue, 13.0);
    }

    #[test]
    fn empty_frame_has_no_cuisines() {
        assert!(compute(&frame(&Dataset::default())).is_empty());
    }
}
