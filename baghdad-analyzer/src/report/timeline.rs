use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};

use crate::dataset::{weekday_name, Frame};
use crate::output::{num, Table};
use crate::report::group::DeliveryStats;
use crate::stats::round2;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub orders: usize,
    pub revenue: f64,
    pub avg_minutes: f64,
}

impl Table for DailyRow {
    const HEADERS: &'static [&'static str] = &["date", "orders", "revenue", "avg_minutes"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.orders.to_string(),
            num(self.revenue),
            num(self.avg_minutes),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub hour: u32,
    pub orders: usize,
}

impl Table for HourRow {
    const HEADERS: &'static [&'static str] = &["hour", "orders"];

    fn cells(&self) -> Vec<String> {
        vec![self.hour.to_string(), self.orders.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayRow {
    pub weekday: &'static str,
    pub orders: usize,
}

impl Table for WeekdayRow {
    const HEADERS: &'static [&'static str] = &["weekday", "orders"];

    fn cells(&self) -> Vec<String> {
        vec![self.weekday.to_string(), self.orders.to_string()]
    }
}

/// Orders and revenue per ISO week or calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRow {
    pub period: String,
    pub orders: usize,
    pub revenue: f64,
    pub avg_minutes: f64,
}

impl Table for PeriodRow {
    const HEADERS: &'static [&'static str] = &["period", "orders", "revenue", "avg_minutes"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.period.clone(),
            self.orders.to_string(),
            num(self.revenue),
            num(self.avg_minutes),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTypeRow {
    pub day_type: &'static str,
    pub orders: usize,
    pub revenue: f64,
    pub avg_minutes: f64,
    pub avg_order_value: f64,
}

impl Table for DayTypeRow {
    const HEADERS: &'static [&'static str] =
        &["day_type", "orders", "revenue", "avg_minutes", "avg_order_value"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.day_type.to_string(),
            self.orders.to_string(),
            num(self.revenue),
            num(self.avg_minutes),
            num(self.avg_order_value),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub daily: Vec<DailyRow>,
    pub hourly: Vec<HourRow>,
    pub weekdays: Vec<WeekdayRow>,
    pub weekly: Vec<PeriodRow>,
    pub monthly: Vec<PeriodRow>,
    pub day_types: Vec<DayTypeRow>,
}

pub fn compute(frame: &Frame) -> Timeline {
    let mut daily: BTreeMap<NaiveDate, DeliveryStats> = BTreeMap::new();
    let mut weekly: BTreeMap<(i32, u32), DeliveryStats> = BTreeMap::new();
    let mut monthly: BTreeMap<&str, DeliveryStats> = BTreeMap::new();
    let mut hourly = [0usize; 24];
    // indexed by days from Monday
    let mut weekdays = [0usize; 7];
    let mut weekend = DeliveryStats::default();
    let mut workdays = DeliveryStats::default();

    for order in frame.delivered() {
        daily.entry(order.date).or_default().add(order);
        weekly
            .entry((order.iso_year, order.iso_week))
            .or_default()
            .add(order);
        monthly.entry(order.month.as_str()).or_default().add(order);
        if let Some(slot) = hourly.get_mut(order.hour as usize) {
            *slot += 1;
        }
        weekdays[order.weekday.num_days_from_monday() as usize] += 1;
        if order.is_weekend {
            weekend.add(order);
        } else {
            workdays.add(order);
        }
    }

    Timeline {
        daily: daily
            .into_iter()
            .map(|(date, stats)| DailyRow {
                date,
                orders: stats.orders,
                revenue: round2(stats.revenue),
                avg_minutes: round2(stats.avg_minutes()),
            })
            .collect(),
        hourly: hourly
            .iter()
            .enumerate()
            .map(|(hour, orders)| HourRow {
                hour: hour as u32,
                orders: *orders,
            })
            .collect(),
        weekdays: WEEK
            .iter()
            .map(|day| WeekdayRow {
                weekday: weekday_name(*day),
                orders: weekdays[day.num_days_from_monday() as usize],
            })
            .collect(),
        weekly: weekly
            .into_iter()
            .map(|((year, week), stats)| period_row(format!("{}-W{:02}", year, week), &stats))
            .collect(),
        monthly: monthly
            .into_iter()
            .map(|(month, stats)| period_row(month.to_string(), &stats))
            .collect(),
        day_types: vec![day_type_row("weekday", &workdays), day_type_row("weekend", &weekend)],
    }
}

fn period_row(period: String, stats: &DeliveryStats) -> PeriodRow {
    PeriodRow {
        period,
        orders: stats.orders,
        revenue: round2(stats.revenue),
        avg_minutes: round2(stats.avg_minutes()),
    }
}

fn day_type_row(day_type: &'static str, stats: &DeliveryStats) -> DayTypeRow {
    let aov = if stats.orders == 0 {
        0.0
    } else {
        stats.revenue / stats.orders as f64
    };
    DayTypeRow {
        day_type,
        orders: stats.orders,
        revenue: round2(stats.revenue),
        avg_minutes: round2(stats.avg_minutes()),
        avg_order_value: round2(aov),
    }
}
