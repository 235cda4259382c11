use tracing::{debug, warn};

use crate::dataset::Frame;
use crate::output::{num, Table};
use crate::report::group::rank_by;
use crate::stats::{z_scores, LinearFit};

/// The fit needs more delivered orders than this.
pub const MIN_ORDERS: usize = 5;
pub const TOP_OUTLIERS: usize = 15;

/// A delivery that took longer than the fitted line predicts.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRow {
    pub order_id: i32,
    pub vendor_name: String,
    pub area: String,
    pub distance_km: f64,
    pub delivery_minutes: f64,
    pub residual_z: f64,
}

impl Table for OutlierRow {
    const HEADERS: &'static [&'static str] = &[
        "order_id",
        "vendor_name",
        "area",
        "distance_km",
        "delivery_minutes",
        "residual_z",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.vendor_name.clone(),
            self.area.clone(),
            num(self.distance_km),
            format!("{:.0}", self.delivery_minutes),
            num(self.residual_z),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceFit {
    /// `(distance_km, delivery_minutes)` of every delivered order.
    pub points: Vec<(f64, f64)>,
    pub fit: Option<LinearFit>,
    pub outliers: Vec<OutlierRow>,
}

pub fn compute(frame: &Frame) -> DistanceFit {
    let delivered: Vec<_> = frame.delivered().collect();
    let x: Vec<f64> = delivered.iter().map(|o| o.distance_km).collect();
    let y: Vec<f64> = delivered.iter().map(|o| o.delivery_minutes).collect();
    let points = x.iter().copied().zip(y.iter().copied()).collect();

    if delivered.len() <= MIN_ORDERS {
        warn!(orders = delivered.len(), "too few delivered orders, skipping fit");
        return DistanceFit {
            points,
            fit: None,
            outliers: vec![],
        };
    }
    let Some(fit) = LinearFit::ols(&x, &y) else {
        warn!("distances have no spread, skipping fit");
        return DistanceFit {
            points,
            fit: None,
            outliers: vec![],
        };
    };
    debug!(slope = fit.slope, intercept = fit.intercept, "fitted minutes on distance");

    let z = z_scores(&fit.residuals(&x, &y));
    let mut outliers: Vec<OutlierRow> = delivered
        .iter()
        .zip(z)
        .filter(|(_, z)| *z > 0.0)
        .map(|(order, residual_z)| {
            let vendor = order.vendor.as_ref();
            OutlierRow {
                order_id: order.order_id,
                vendor_name: vendor.map(|v| v.name.clone()).unwrap_or_default(),
                area: vendor.map(|v| v.area.clone()).unwrap_or_default(),
                distance_km: order.distance_km,
                delivery_minutes: order.delivery_minutes,
                residual_z,
            }
        })
        .collect();
    rank_by(&mut outliers, |row| row.residual_z);
    outliers.truncate(TOP_OUTLIERS);

    DistanceFit {
        points,
        fit: Some(fit),
        outliers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::*;
    use crate::dataset::Dataset;
    use baghdad_store::models::Order;

    fn order(id: i32, distance: &str, minutes: i32) -> Order {
        let v = vendor(1, "Abu Shakir Grill", "Kadhimiya", "Grill");
        let mut order = delivered(id, &v, "Karada", minutes);
        order.distance_km = dec(distance);
        order
    }

    fn dataset(orders: Vec<Order>) -> Dataset {
        Dataset {
            vendors: vec![vendor(1, "Abu Shakir Grill", "Kadhimiya", "Grill")],
            orders,
            ..Default::default()
        }
    }

    #[test]
    fn exact_line_has_no_outliers() {
        let orders = (1..=8)
            .map(|km| order(km, &format!("{}.00", km), 5 * km + 2))
            .collect();
        let result = compute(&frame(&dataset(orders)));

        let fit = result.fit.unwrap();
        assert!((fit.slope - 5.0).abs() < 1e-9);
        assert!((fit.intercept - 2.0).abs() < 1e-9);
        assert_eq!(result.points.len(), 8);
        assert!(result.outliers.iter().all(|o| o.residual_z.abs() < 1e-6));
    }

    #[test]
    fn slow_delivery_tops_the_outliers() {
        let mut orders: Vec<Order> = (1..=8)
            .map(|km| order(km, &format!("{}.00", km), 5 * km + 2))
            .collect();
        orders[3].delivery_minutes += 40;

        let result = compute(&frame(&dataset(orders)));
        assert_eq!(result.outliers[0].order_id, 4);
        assert_eq!(result.outliers[0].vendor_name, "Abu Shakir Grill");
        assert_eq!(result.outliers[0].area, "Kadhimiya");
        assert!(result.outliers[0].residual_z > 2.0);
        assert!(result
            .outliers
            .windows(2)
            .all(|w| w[0].residual_z >= w[1].residual_z));
    }

    #[test]
    fn five_orders_are_not_enough() {
        let orders = (1..=5).map(|km| order(km, "2.00", 12 + km)).collect();
        let result = compute(&frame(&dataset(orders)));
        assert_eq!(result.fit, None);
        assert!(result.outliers.is_empty());
        assert_eq!(result.points.len(), 5);
    }

    #[test]
    fn constant_distance_skips_the_fit() {
        let orders = (1..=6).map(|n| order(n, "2.00", 20 + n)).collect();
        assert_eq!(compute(&frame(&dataset(orders))).fit, None);
    }
}
