use baghdad_store::models::OrderStatus;

use crate::dataset::Frame;
use crate::output::{num, Table};
use crate::report::group::DeliveryStats;
use crate::stats::{pct, round2};

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalKpis {
    pub total_orders: usize,
    pub delivered_orders: usize,
    pub canceled_orders: usize,
    pub returned_orders: usize,
    pub cancel_rate: f64,
    pub return_rate: f64,
    pub avg_delivery_min: f64,
    pub p95_delivery_min: f64,
    pub total_revenue: f64,
    pub aov: f64,
    pub avg_distance: f64,
    /// `(threshold minutes, attainment)` in threshold order.
    pub sla: Vec<(u32, f64)>,
}

pub fn compute(frame: &Frame, sla_thresholds: &[u32]) -> GlobalKpis {
    let count = |status: OrderStatus| frame.orders.iter().filter(|o| o.status == status).count();
    let total_orders = frame.orders.len();
    let canceled_orders = count(OrderStatus::Canceled);
    let returned_orders = count(OrderStatus::Returned);
    let rate = |n: usize| {
        if total_orders == 0 {
            0.0
        } else {
            n as f64 / total_orders as f64
        }
    };

    let delivered: DeliveryStats = frame.delivered().collect();
    let aov = if delivered.orders == 0 {
        0.0
    } else {
        delivered.revenue / delivered.orders as f64
    };

    GlobalKpis {
        total_orders,
        delivered_orders: delivered.orders,
        canceled_orders,
        returned_orders,
        cancel_rate: rate(canceled_orders),
        return_rate: rate(returned_orders),
        avg_delivery_min: round2(delivered.avg_minutes()),
        p95_delivery_min: round2(delivered.p95_minutes()),
        total_revenue: round2(delivered.revenue),
        aov: round2(aov),
        avg_distance: round2(delivered.avg_distance()),
        sla: sla_thresholds
            .iter()
            .map(|t| (*t, delivered.sla_rate(*t as f64)))
            .collect(),
    }
}

/// One `metric,value` line of `global_kpis.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: String,
    pub value: String,
}

impl Table for MetricRow {
    const HEADERS: &'static [&'static str] = &["metric", "value"];

    fn cells(&self) -> Vec<String> {
        vec![self.metric.clone(), self.value.clone()]
    }
}

impl GlobalKpis {
    pub fn rows(&self) -> Vec<MetricRow> {
        let row = |metric: &str, value: String| MetricRow {
            metric: metric.to_string(),
            value,
        };
        let mut rows = vec![
            row("total_orders", self.total_orders.to_string()),
            row("delivered_orders", self.delivered_orders.to_string()),
            row("canceled_orders", self.canceled_orders.to_string()),
            row("returned_orders", self.returned_orders.to_string()),
            row("cancel_rate", pct(self.cancel_rate)),
            row("return_rate", pct(self.return_rate)),
            row("avg_delivery_min", num(self.avg_delivery_min)),
            row("p95_delivery_min", num(self.p95_delivery_min)),
            row("total_revenue", num(self.total_revenue)),
            row("aov", num(self.aov)),
            row("avg_distance_km", num(self.avg_distance)),
        ];
        rows.extend(
            self.sla
                .iter()
                .map(|(threshold, rate)| row(&format!("sla_{}_min", threshold), pct(*rate))),
        );
        rows
    }

    pub fn print(&self) {
        println!("Total Orders: {}", self.total_orders);
        println!(
            "Delivered: {}  |  Canceled: {} ({})  |  Returned: {} ({})",
            self.delivered_orders,
            self.canceled_orders,
            pct(self.cancel_rate),
            self.returned_orders,
            pct(self.return_rate)
        );
        println!(
            "Avg Delivery Time: {} min  |  P95: {} min",
            num(self.avg_delivery_min),
            num(self.p95_delivery_min)
        );
        println!(
            "Total Revenue: ${}  |  AOV: ${}",
            num(self.total_revenue),
            num(self.aov)
        );
        println!("Avg Distance: {} km", num(self.avg_distance));
        for (threshold, rate) in &self.sla {
            println!("SLA <= {} min: {}", threshold, pct(*rate));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::*;
    use crate::dataset::Dataset;

    const THRESHOLDS: [u32; 4] = [25, 30, 35, 40];

    #[test]
    fn no_orders_means_zeros() {
        let kpis = compute(&frame(&Dataset::default()), &THRESHOLDS);

        assert_eq!(kpis.total_orders, 0);
        assert_eq!(kpis.cancel_rate, 0.0);
        assert_eq!(kpis.return_rate, 0.0);
        assert_eq!(kpis.avg_delivery_min, 0.0);
        assert_eq!(kpis.p95_delivery_min, 0.0);
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.aov, 0.0);
        assert!(kpis.sla.iter().all(|(_, rate)| *rate == 0.0));
        assert_eq!(kpis.rows()[4].value, "0.00%");
    }

    #[test]
    fn only_canceled_orders_still_report_rates() {
        let v = vendor(1, "KFC - Karada", "Karada", "Fried Chicken");
        let dataset = Dataset {
            orders: vec![
                with_status(delivered(1, &v, "Dora", 20), OrderStatus::Canceled),
                with_status(delivered(2, &v, "Dora", 20), OrderStatus::Returned),
            ],
            vendors: vec![v],
            ..Default::default()
        };

        let kpis = compute(&frame(&dataset), &THRESHOLDS);
        assert_eq!(kpis.delivered_orders, 0);
        assert_eq!(kpis.cancel_rate, 0.5);
        assert_eq!(kpis.return_rate, 0.5);
        assert_eq!(kpis.aov, 0.0);
    }

    #[test]
    fn revenue_and_sla_cover_delivered_orders_only() {
        let v = vendor(1, "KFC - Karada", "Karada", "Fried Chicken");
        let dataset = Dataset {
            orders: vec![
                delivered(1, &v, "Dora", 20),
                delivered(2, &v, "Dora", 30),
                delivered(3, &v, "Mansour", 38),
                with_status(delivered(4, &v, "Dora", 90), OrderStatus::Canceled),
            ],
            vendors: vec![v],
            ..Default::default()
        };

        let kpis = compute(&frame(&dataset), &THRESHOLDS);
        assert_eq!(kpis.total_orders, 4);
        assert_eq!(kpis.delivered_orders, 3);
        assert_eq!(kpis.cancel_rate, 0.25);
        assert_eq!(kpis.total_revenue, 39.0);
        assert_eq!(kpis.aov, 13.0);
        assert_eq!(kpis.avg_delivery_min, 29.33);
        assert_eq!(kpis.avg_distance, 3.0);

        let rates: Vec<f64> = kpis.sla.iter().map(|(_, r)| *r).collect();
        assert_eq!(rates[0], 1.0 / 3.0);
        assert_eq!(rates[1], 2.0 / 3.0);
        assert_eq!(rates[3], 1.0);
        assert!(rates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn total_revenue_is_the_rounded_row_sum() {
        let v = vendor(1, "KFC - Karada", "Karada", "Fried Chicken");
        let mut first = delivered(1, &v, "Dora", 20);
        first.subtotal = dec("10.11");
        first.tip = dec("0.37");
        let mut second = delivered(2, &v, "Dora", 20);
        second.delivery_fee = dec("1.29");

        let f = frame(&Dataset {
            orders: vec![first, second],
            vendors: vec![v],
            ..Default::default()
        });
        let expected = round2(f.delivered().map(|o| o.subtotal + o.delivery_fee + o.tip).sum());
        assert_eq!(compute(&f, &THRESHOLDS).total_revenue, expected);
        assert_eq!(expected, 24.77);
    }

    #[test]
    fn metric_rows_list_every_threshold() {
        let kpis = compute(&frame(&Dataset::default()), &THRESHOLDS);
        let metrics: Vec<String> = kpis.rows().into_iter().map(|r| r.metric).collect();
        assert!(metrics.contains(&"sla_25_min".to_string()));
        assert!(metrics.contains(&"sla_40_min".to_string()));
        assert_eq!(metrics.len(), 11 + THRESHOLDS.len());
    }
}
