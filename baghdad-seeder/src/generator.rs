use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rand::distr::weighted::{self, WeightedIndex};
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, NormalError};

use baghdad_store::decimal;
use baghdad_store::models::{NewCustomer, NewDriver, NewOrder, NewVendor, OrderStatus};

use crate::catalog::{VendorListing, BAGHDAD_AREAS, CITY};
use crate::names::full_name;
use crate::random::{round2, HOUR_WEIGHTS};

const STATUSES: [OrderStatus; 3] = [
    OrderStatus::Delivered,
    OrderStatus::Canceled,
    OrderStatus::Returned,
];
const STATUS_WEIGHTS: [u32; 3] = [92, 6, 2];

pub const MIN_DELIVERY_MINUTES: i32 = 10;

/// What a seeding run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub drivers: usize,
    pub customers: usize,
    pub orders: usize,
    pub window_days: u32,
    pub rng_seed: u64,
    pub anchor: NaiveDate,
}

/// Vendor columns the order generator needs, as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRef {
    pub vendor_id: i32,
    pub cuisine: String,
    pub area: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("cannot generate orders without any {0}")]
    NoCandidates(&'static str),
    #[error("invalid sampling weights")]
    Weights(#[from] weighted::Error),
    #[error("invalid normal distribution")]
    Normal(#[from] NormalError),
}

pub struct Generator {
    rng: StdRng,
    anchor: NaiveDate,
    hours: WeightedIndex<u32>,
    statuses: WeightedIndex<u32>,
    tip: Normal<f64>,
    driver_rating: Normal<f64>,
}

impl Generator {
    pub fn new(rng_seed: u64, anchor: NaiveDate) -> Result<Self, GenerateError> {
        Ok(Self {
            rng: StdRng::seed_from_u64(rng_seed),
            anchor,
            hours: WeightedIndex::new(HOUR_WEIGHTS)?,
            statuses: WeightedIndex::new(STATUS_WEIGHTS)?,
            tip: Normal::new(1.0, 1.0)?,
            driver_rating: Normal::new(4.4, 0.5)?,
        })
    }

    pub fn drivers(&mut self, count: usize) -> Vec<NewDriver> {
        (0..count)
            .map(|_| NewDriver {
                driver_name: full_name(&mut self.rng),
                rating: decimal::from_f64(self.rng.random_range(3.5..=4.9)),
                start_date: self.date_within_days(730),
            })
            .collect()
    }

    pub fn customers(&mut self, count: usize) -> Vec<NewCustomer> {
        (0..count)
            .map(|_| NewCustomer {
                customer_name: full_name(&mut self.rng),
                city: CITY.to_string(),
                signup_date: self.date_within_days(1095),
            })
            .collect()
    }

    pub fn vendors(&mut self, listings: &[VendorListing]) -> Vec<NewVendor> {
        listings
            .iter()
            .map(|listing| NewVendor {
                vendor_name: listing.name.clone(),
                cuisine: listing.cuisine.to_string(),
                area: listing.area.to_string(),
                rating: decimal::from_f64(self.rng.random_range(3.6..=4.9)),
                join_date: self.date_within_days(730),
            })
            .collect()
    }

    /// Orders spread over the `window_days` days leading up to the anchor.
    pub fn orders(
        &mut self,
        count: usize,
        window_days: u32,
        customer_ids: &[i32],
        driver_ids: &[i32],
        vendors: &[VendorRef],
    ) -> Result<Vec<NewOrder>, GenerateError> {
        if count == 0 {
            return Ok(vec![]);
        }
        if customer_ids.is_empty() {
            return Err(GenerateError::NoCandidates("customers"));
        }
        if driver_ids.is_empty() {
            return Err(GenerateError::NoCandidates("drivers"));
        }
        if vendors.is_empty() {
            return Err(GenerateError::NoCandidates("vendors"));
        }

        let window_days = window_days.max(1);
        let base = self.anchor - Days::new(window_days as u64);

        let mut orders = Vec::with_capacity(count);
        for _ in 0..count {
            let customer_id = *customer_ids
                .choose(&mut self.rng)
                .ok_or(GenerateError::NoCandidates("customers"))?;
            let driver_id = *driver_ids
                .choose(&mut self.rng)
                .ok_or(GenerateError::NoCandidates("drivers"))?;
            let vendor = vendors
                .choose(&mut self.rng)
                .ok_or(GenerateError::NoCandidates("vendors"))?;

            let hour = self.hours.sample(&mut self.rng) as i64;
            let day_offset = self.rng.random_range(0..window_days) as u64;
            let minute = self.rng.random_range(0..60) as i64;
            let order_datetime = order_time(base + Days::new(day_offset), hour, minute);

            let dropoff_area = self.dropoff_area(&vendor.area);

            let distance = round2(self.rng.random_range(0.8..=10.0));
            let speed = self.rng.random_range(4.2..=7.2);
            let noise = self.rng.random_range(-3..=7) as f64;
            let delivery_minutes = ((distance * speed + noise) as i32).max(MIN_DELIVERY_MINUTES);

            let subtotal = self.rng.random_range(4.0..=30.0);
            let delivery_fee = (distance * self.rng.random_range(0.2..=0.8)).max(1.0);
            let tip = self.tip.sample(&mut self.rng).max(0.0);

            let status = STATUSES[self.statuses.sample(&mut self.rng)];
            let driver_rating = match status {
                OrderStatus::Delivered => Some(decimal::from_f64(
                    self.driver_rating.sample(&mut self.rng).clamp(1.0, 5.0),
                )),
                _ => None,
            };

            orders.push(NewOrder {
                customer_id,
                driver_id,
                vendor_id: vendor.vendor_id,
                food_category: vendor.cuisine.clone(),
                order_datetime,
                pickup_area: vendor.area.clone(),
                dropoff_area,
                distance_km: decimal::from_f64(distance),
                delivery_minutes,
                subtotal: decimal::from_f64(subtotal),
                delivery_fee: decimal::from_f64(delivery_fee),
                tip: decimal::from_f64(tip),
                driver_rating,
                status,
            });
        }
        Ok(orders)
    }

    fn dropoff_area(&mut self, pickup_area: &str) -> String {
        let candidates: Vec<&str> = BAGHDAD_AREAS
            .iter()
            .copied()
            .filter(|area| *area != pickup_area)
            .collect();
        candidates
            .choose(&mut self.rng)
            .map(|area| area.to_string())
            .unwrap_or_else(|| BAGHDAD_AREAS[0].to_string())
    }

    fn date_within_days(&mut self, days: u64) -> NaiveDate {
        self.anchor - Days::new(self.rng.random_range(0..=days))
    }
}

fn order_time(date: NaiveDate, hour: i64, minute: i64) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + TimeDelta::hours(hour) + TimeDelta::minutes(minute)
}
