use crate::dataset::OrderRecord;
use crate::stats::{mean, quantile, share_at_most};

/// Running totals for a group of delivered orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryStats {
    pub orders: usize,
    pub revenue: f64,
    minutes: Vec<f64>,
    distances: Vec<f64>,
    ratings: Vec<f64>,
}

impl DeliveryStats {
    pub fn add(&mut self, order: &OrderRecord) {
        self.orders += 1;
        self.revenue += order.revenue;
        self.minutes.push(order.delivery_minutes);
        self.distances.push(order.distance_km);
        if let Some(rating) = order.driver_rating {
            self.ratings.push(rating);
        }
    }

    pub fn avg_minutes(&self) -> f64 {
        mean(&self.minutes).unwrap_or(0.0)
    }

    pub fn p95_minutes(&self) -> f64 {
        quantile(&self.minutes, 0.95).unwrap_or(0.0)
    }

    pub fn avg_distance(&self) -> f64 {
        mean(&self.distances).unwrap_or(0.0)
    }

    pub fn avg_rating(&self) -> Option<f64> {
        mean(&self.ratings)
    }

    pub fn sla_rate(&self, threshold: f64) -> f64 {
        share_at_most(&self.minutes, threshold)
    }
}

impl<'a> FromIterator<&'a OrderRecord> for DeliveryStats {
    fn from_iter<I: IntoIterator<Item = &'a OrderRecord>>(iter: I) -> Self {
        let mut stats = Self::default();
        for order in iter {
            stats.add(order);
        }
        stats
    }
}

/// Stable descending sort by a count, keeping the key order for ties.
pub fn rank_by<T, F>(rows: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
