use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use diesel::{prelude::*, PgConnection};

use baghdad_store::decimal::to_f64;
use baghdad_store::models::{Customer, Driver, Order, OrderStatus, Vendor};
use baghdad_store::schema;

use crate::error::AnalysisError;

/// The four tables as loaded from the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub drivers: Vec<Driver>,
    pub customers: Vec<Customer>,
    pub vendors: Vec<Vendor>,
    pub orders: Vec<Order>,
}

impl Dataset {
    pub fn load(conn: &mut PgConnection) -> Result<Self, AnalysisError> {
        let drivers = schema::drivers::table
            .select(Driver::as_select())
            .order(schema::drivers::driver_id.asc())
            .load(conn)?;
        let customers = schema::customers::table
            .select(Customer::as_select())
            .order(schema::customers::customer_id.asc())
            .load(conn)?;
        let vendors = schema::vendors::table
            .select(Vendor::as_select())
            .order(schema::vendors::vendor_id.asc())
            .load(conn)?;
        let orders = schema::orders::table
            .select(Order::as_select())
            .order(schema::orders::order_id.asc())
            .load(conn)?;

        Ok(Self {
            drivers,
            customers,
            vendors,
            orders,
        })
    }
}

/// Days counted as the weekend.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekendPolicy {
    days: Vec<Weekday>,
}

impl WeekendPolicy {
    pub fn new(days: Vec<Weekday>) -> Self {
        Self { days }
    }

    pub fn is_weekend(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}

impl Default for WeekendPolicy {
    fn default() -> Self {
        Self::new(vec![Weekday::Fri, Weekday::Sat, Weekday::Sun])
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorInfo {
    pub name: String,
    pub area: String,
    pub cuisine: String,
}

/// One order with numeric columns as floats and calendar fields derived.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_id: i32,
    pub customer_id: i32,
    pub driver_id: i32,
    pub vendor_id: i32,
    pub vendor: Option<VendorInfo>,
    pub food_category: String,
    pub ordered_at: NaiveDateTime,
    pub date: NaiveDate,
    pub hour: u32,
    pub weekday: Weekday,
    pub iso_year: i32,
    pub iso_week: u32,
    pub month: String,
    pub is_weekend: bool,
    pub pickup_area: String,
    pub dropoff_area: String,
    pub distance_km: f64,
    pub delivery_minutes: f64,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tip: f64,
    pub revenue: f64,
    pub driver_rating: Option<f64>,
    pub status: OrderStatus,
}

impl OrderRecord {
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }
}

/// Orders joined to their vendors, plus driver and customer lookups.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub orders: Vec<OrderRecord>,
    pub drivers: BTreeMap<i32, Driver>,
    pub customers: BTreeMap<i32, Customer>,
}

impl Frame {
    pub fn build(dataset: &Dataset, weekend: &WeekendPolicy) -> Result<Self, AnalysisError> {
        let vendors: BTreeMap<i32, &Vendor> =
            dataset.vendors.iter().map(|v| (v.vendor_id, v)).collect();

        let orders = dataset
            .orders
            .iter()
            .map(|order| enrich(order, vendors.get(&order.vendor_id).copied(), weekend))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            orders,
            drivers: dataset
                .drivers
                .iter()
                .map(|d| (d.driver_id, d.clone()))
                .collect(),
            customers: dataset
                .customers
                .iter()
                .map(|c| (c.customer_id, c.clone()))
                .collect(),
        })
    }

    pub fn delivered(&self) -> impl Iterator<Item = &OrderRecord> + '_ {
        self.orders.iter().filter(|o| o.is_delivered())
    }
}

fn enrich(
    order: &Order,
    vendor: Option<&Vendor>,
    weekend: &WeekendPolicy,
) -> Result<OrderRecord, AnalysisError> {
    let number = |column: &'static str, value: &BigDecimal| {
        to_f64(value)
            .filter(|v| v.is_finite())
            .ok_or(AnalysisError::Decimal {
                column,
                order_id: order.order_id,
            })
    };

    let subtotal = number("subtotal", &order.subtotal)?;
    let delivery_fee = number("delivery_fee", &order.delivery_fee)?;
    let tip = number("tip", &order.tip)?;
    let driver_rating = order
        .driver_rating
        .as_ref()
        .map(|rating| number("driver_rating", rating))
        .transpose()?;

    let date = order.order_datetime.date();
    let weekday = date.weekday();
    let iso = date.iso_week();

    Ok(OrderRecord {
        order_id: order.order_id,
        customer_id: order.customer_id,
        driver_id: order.driver_id,
        vendor_id: order.vendor_id,
        vendor: vendor.map(|v| VendorInfo {
            name: v.vendor_name.clone(),
            area: v.area.clone(),
            cuisine: v.cuisine.clone(),
        }),
        food_category: order.food_category.clone(),
        ordered_at: order.order_datetime,
        date,
        hour: order.order_datetime.hour(),
        weekday,
        iso_year: iso.year(),
        iso_week: iso.week(),
        month: order.order_datetime.format("%Y-%m").to_string(),
        is_weekend: weekend.is_weekend(weekday),
        pickup_area: order.pickup_area.clone(),
        dropoff_area: order.dropoff_area.clone(),
        distance_km: number("distance_km", &order.distance_km)?,
        delivery_minutes: order.delivery_minutes as f64,
        subtotal,
        delivery_fee,
        tip,
        revenue: subtotal + delivery_fee + tip,
        driver_rating,
        status: order.status,
    })
}
