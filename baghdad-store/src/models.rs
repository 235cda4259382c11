use std::fmt;
use std::io::Write;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    expression::AsExpression,
    pg::{Pg, PgValue},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
};

use crate::schema::{customers, drivers, orders, vendors};

#[derive(FromSqlRow, AsExpression, PartialEq, Eq, Hash, Copy, Clone, Debug)]
#[diesel(sql_type = crate::schema::sql_types::OrderStatus)]
pub enum OrderStatus {
    Delivered,
    Canceled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Delivered,
        OrderStatus::Canceled,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<crate::schema::sql_types::OrderStatus, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<crate::schema::sql_types::OrderStatus, Pg> for OrderStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"delivered" => Ok(OrderStatus::Delivered),
            b"canceled" => Ok(OrderStatus::Canceled),
            b"returned" => Ok(OrderStatus::Returned),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = drivers, primary_key(driver_id))]
pub struct Driver {
    pub driver_id: i32,
    pub driver_name: String,
    pub rating: BigDecimal,
    pub start_date: NaiveDate,
}

#[derive(Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = drivers)]
pub struct NewDriver {
    pub driver_name: String,
    pub rating: BigDecimal,
    pub start_date: NaiveDate,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = customers, primary_key(customer_id))]
pub struct Customer {
    pub customer_id: i32,
    pub customer_name: String,
    pub city: String,
    pub signup_date: NaiveDate,
}

#[derive(Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub customer_name: String,
    pub city: String,
    pub signup_date: NaiveDate,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = vendors, primary_key(vendor_id))]
pub struct Vendor {
    pub vendor_id: i32,
    pub vendor_name: String,
    pub cuisine: String,
    pub area: String,
    pub rating: BigDecimal,
    pub join_date: NaiveDate,
}

#[derive(Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = vendors)]
pub struct NewVendor {
    pub vendor_name: String,
    pub cuisine: String,
    pub area: String,
    pub rating: BigDecimal,
    pub join_date: NaiveDate,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = orders, primary_key(order_id))]
pub struct Order {
    pub order_id: i32,
    pub customer_id: i32,
    pub driver_id: i32,
    pub vendor_id: i32,
    pub food_category: String,
    pub order_datetime: NaiveDateTime,
    pub pickup_area: String,
    pub dropoff_area: String,
    pub distance_km: BigDecimal,
    pub delivery_minutes: i32,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub tip: BigDecimal,
    pub driver_rating: Option<BigDecimal>,
    pub status: OrderStatus,
}

#[derive(Insertable, Debug, PartialEq, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub customer_id: i32,
    pub driver_id: i32,
    pub vendor_id: i32,
    pub food_category: String,
    pub order_datetime: NaiveDateTime,
    pub pickup_area: String,
    pub dropoff_area: String,
    pub distance_km: BigDecimal,
    pub delivery_minutes: i32,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub tip: BigDecimal,
    pub driver_rating: Option<BigDecimal>,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_the_postgres_enum() {
        let labels: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["delivered", "canceled", "returned"]);
        assert_eq!(OrderStatus::Canceled.to_string(), "canceled");
    }
}
