use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::dataset::Frame;
use crate::output::{num, Table};
use crate::report::group::rank_by;
use crate::stats::round2;

pub const TOP_CUSTOMERS: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub customer_id: i32,
    pub customer_name: String,
    pub city: String,
    pub signup_date: Option<NaiveDate>,
    pub orders: usize,
    pub revenue: f64,
    pub first_order: NaiveDateTime,
    pub last_order: NaiveDateTime,
}

impl Table for CustomerRow {
    const HEADERS: &'static [&'static str] = &[
        "customer_id",
        "customer_name",
        "city",
        "signup_date",
        "orders",
        "revenue",
        "first_order",
        "last_order",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.customer_name.clone(),
            self.city.clone(),
            self.signup_date.map(|d| d.to_string()).unwrap_or_default(),
            self.orders.to_string(),
            num(self.revenue),
            self.first_order.to_string(),
            self.last_order.to_string(),
        ]
    }
}

/// How many customers placed a given number of delivered orders.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    pub orders_per_customer: usize,
    pub customers: usize,
}

impl Table for FrequencyRow {
    const HEADERS: &'static [&'static str] = &["orders_per_customer", "customers"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.orders_per_customer.to_string(),
            self.customers.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerBehavior {
    pub unique_customers: usize,
    /// Share of customers with two or more delivered orders.
    pub repeat_rate: f64,
    pub top: Vec<CustomerRow>,
    pub distribution: Vec<FrequencyRow>,
}

pub fn compute(frame: &Frame) -> CustomerBehavior {
    let mut groups: BTreeMap<i32, CustomerRow> = BTreeMap::new();
    for order in frame.delivered() {
        let row = groups
            .entry(order.customer_id)
            .or_insert_with(|| {
                let profile = frame.customers.get(&order.customer_id);
                CustomerRow {
                    customer_id: order.customer_id,
                    customer_name: profile.map(|c| c.customer_name.clone()).unwrap_or_default(),
                    city: profile.map(|c| c.city.clone()).unwrap_or_default(),
                    signup_date: profile.map(|c| c.signup_date),
                    orders: 0,
                    revenue: 0.0,
                    first_order: order.ordered_at,
                    last_order: order.ordered_at,
                }
            });
        row.orders += 1;
        row.revenue += order.revenue;
        row.first_order = row.first_order.min(order.ordered_at);
        row.last_order = row.last_order.max(order.ordered_at);
    }

    let mut rows: Vec<CustomerRow> = groups
        .into_values()
        .map(|mut row| {
            row.revenue = round2(row.revenue);
            row
        })
        .collect();

    let unique_customers = rows.len();
    let repeat_rate = if unique_customers == 0 {
        0.0
    } else {
        rows.iter().filter(|row| row.orders >= 2).count() as f64 / unique_customers as f64
    };

    let mut frequency: BTreeMap<usize, usize> = BTreeMap::new();
    for row in &rows {
        *frequency.entry(row.orders).or_default() += 1;
    }

    rank_by(&mut rows, |row| row.orders as f64);
    rows.truncate(TOP_CUSTOMERS);

    CustomerBehavior {
        unique_customers,
        repeat_rate,
        top: rows,
        distribution: frequency
            .into_iter()
            .map(|(orders_per_customer, customers)| FrequencyRow {
                orders_per_customer,
                customers,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::*;
    use crate::dataset::Dataset;
    use baghdad_store::models::OrderStatus;

    fn sample() -> CustomerBehavior {
        let v = vendor(1, "Shawarma Abu Ali - Karada", "Karada", "Shawarma");
        let mut orders = Vec::new();
        for (id, customer, date) in [
            (1, 1, "2025-03-05"),
            (2, 1, "2025-03-01"),
            (3, 1, "2025-03-09"),
            (4, 2, "2025-03-02"),
            (5, 3, "2025-03-02"),
            (6, 3, "2025-03-04"),
        ] {
            let mut order = delivered(id, &v, "Dora", 25);
            order.customer_id = customer;
            order.order_datetime = at(date, 13);
            orders.push(order);
        }
        let mut canceled = with_status(delivered(7, &v, "Dora", 25), OrderStatus::Canceled);
        canceled.customer_id = 4;
        orders.push(canceled);

        compute(&frame(&Dataset {
            customers: vec![customer(1, "Zainab Kareem"), customer(2, "Mustafa Jabbar")],
            vendors: vec![v],
            orders,
            ..Default::default()
        }))
    }

    #[test]
    fn repeat_rate_counts_two_or_more() {
        let behavior = sample();
        assert_eq!(behavior.unique_customers, 3);
        assert!((behavior.repeat_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn top_customers_span_first_to_last_order() {
        let top = &sample().top;
        assert_eq!(top[0].customer_name, "Zainab Kareem");
        assert_eq!(top[0].orders, 3);
        assert_eq!(top[0].revenue, 39.0);
        assert_eq!(top[0].first_order, at("2025-03-01", 13));
        assert_eq!(top[0].last_order, at("2025-03-09", 13));
        assert_eq!(top[1].customer_id, 3);
        // no profile for customer 3
        assert_eq!(top[1].customer_name, "");
    }

    #[test]
    fn top_customers_carry_their_profile() {
        let top = &sample().top;
        assert_eq!(top[0].city, "Baghdad");
        assert_eq!(top[0].signup_date, NaiveDate::from_ymd_opt(2023, 5, 1));
        assert_eq!(
            top[0].cells()[..4],
            ["1", "Zainab Kareem", "Baghdad", "2023-05-01"]
        );
        assert_eq!(top[1].city, "");
        assert_eq!(top[1].signup_date, None);
        assert_eq!(top[1].cells()[3], "");
    }

    #[test]
    fn distribution_is_sorted_by_order_count() {
        let distribution = sample().distribution;
        let pairs: Vec<(usize, usize)> = distribution
            .iter()
            .map(|r| (r.orders_per_customer, r.customers))
            .collect();
        assert_eq!(pairs, vec![(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn no_customers_means_zero_repeat_rate() {
        let behavior = compute(&frame(&Dataset::default()));
        assert_eq!(behavior.repeat_rate, 0.0);
        assert!(behavior.top.is_empty());
        assert!(behavior.distribution.is_empty());
    }
}
