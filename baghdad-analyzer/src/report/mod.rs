//! Descriptive sections computed over delivered orders.
//!
//! Each section is a pure function of a [`Frame`]; [`Report`] runs all of
//! them and knows which file every table and chart lands in.

use chrono::Weekday;
use tracing::info;

use crate::chart::Chart;
use crate::dataset::{Dataset, Frame, WeekendPolicy};
use crate::error::AnalysisError;
use crate::output::{num, print_table, section, write_csv, OutputDirs};
use crate::stats::pct;

pub mod areas;
pub mod customers;
pub mod cuisines;
pub mod drivers;
pub mod fit;
pub mod group;
pub mod kpis;
pub mod peaks;
pub mod timeline;
pub mod vendors;

pub const DEFAULT_SLA_MINUTES: [u32; 4] = [25, 30, 35, 40];
const FASTEST_AREAS: usize = 12;

/// Knobs that change what the sections count.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPolicy {
    pub weekend: WeekendPolicy,
    pub sla_minutes: Vec<u32>,
}

impl ReportPolicy {
    pub fn new(weekend: Vec<Weekday>, sla_minutes: Vec<u32>) -> Self {
        Self {
            weekend: WeekendPolicy::new(weekend),
            sla_minutes,
        }
    }
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            weekend: WeekendPolicy::default(),
            sla_minutes: DEFAULT_SLA_MINUTES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kpis: kpis::GlobalKpis,
    pub timeline: timeline::Timeline,
    pub areas: Vec<areas::AreaRow>,
    pub vendors: vendors::VendorRankings,
    pub cuisines: Vec<cuisines::CuisineRow>,
    pub drivers: Vec<drivers::DriverRow>,
    pub customers: customers::CustomerBehavior,
    pub fit: fit::DistanceFit,
    pub peak_hours: Vec<peaks::PeakHourRow>,
    pub top_vendors_per_area: Vec<peaks::AreaVendorRow>,
}

impl Report {
    pub fn build(dataset: &Dataset, policy: &ReportPolicy) -> Result<Self, AnalysisError> {
        let frame = Frame::build(dataset, &policy.weekend)?;
        info!(
            orders = frame.orders.len(),
            delivered = frame.delivered().count(),
            "building report"
        );
        Ok(Self::from_frame(&frame, &policy.sla_minutes))
    }

    pub fn from_frame(frame: &Frame, sla_minutes: &[u32]) -> Self {
        Self {
            kpis: kpis::compute(frame, sla_minutes),
            timeline: timeline::compute(frame),
            areas: areas::compute(frame),
            vendors: vendors::compute(frame),
            cuisines: cuisines::compute(frame),
            drivers: drivers::compute(frame),
            customers: customers::compute(frame),
            fit: fit::compute(frame),
            peak_hours: peaks::peak_hours(frame),
            top_vendors_per_area: peaks::top_vendors_per_area(frame),
        }
    }

    /// Writes every CSV table and PNG chart.
    pub fn write(&self, dirs: &OutputDirs) -> Result<(), AnalysisError> {
        write_csv(&dirs.table("global_kpis.csv"), &self.kpis.rows())?;

        let timeline = &self.timeline;
        write_csv(&dirs.table("daily_kpis.csv"), &timeline.daily)?;
        write_csv(&dirs.table("hourly_orders.csv"), &timeline.hourly)?;
        write_csv(&dirs.table("weekday_orders.csv"), &timeline.weekdays)?;
        write_csv(&dirs.table("weekly_kpis.csv"), &timeline.weekly)?;
        write_csv(&dirs.table("monthly_kpis.csv"), &timeline.monthly)?;
        write_csv(&dirs.table("day_type_kpis.csv"), &timeline.day_types)?;

        let dates: Vec<String> = timeline.daily.iter().map(|d| d.date.to_string()).collect();
        Chart::new("Daily Orders", "Date", "Orders").line(
            &dirs.figure("daily_orders.png"),
            &dates,
            &timeline.daily.iter().map(|d| d.orders as f64).collect::<Vec<_>>(),
        )?;
        Chart::new("Daily Revenue", "Date", "Revenue").line(
            &dirs.figure("daily_revenue.png"),
            &dates,
            &timeline.daily.iter().map(|d| d.revenue).collect::<Vec<_>>(),
        )?;
        Chart::new("Orders by Hour", "Hour", "Orders").bar(
            &dirs.figure("orders_by_hour.png"),
            &timeline.hourly.iter().map(|h| h.hour.to_string()).collect::<Vec<_>>(),
            &timeline.hourly.iter().map(|h| h.orders as f64).collect::<Vec<_>>(),
        )?;
        Chart::new("Orders by Day of Week", "Day", "Orders").bar(
            &dirs.figure("orders_by_dow.png"),
            &timeline.weekdays.iter().map(|d| d.weekday.to_string()).collect::<Vec<_>>(),
            &timeline.weekdays.iter().map(|d| d.orders as f64).collect::<Vec<_>>(),
        )?;

        write_csv(&dirs.table("area_kpis.csv"), &self.areas)?;
        let fastest = areas::fastest(&self.areas, FASTEST_AREAS);
        Chart::new(
            "Avg Delivery Minutes by Dropoff Area (Top 12 fastest)",
            "Area",
            "Avg Minutes",
        )
        .bar(
            &dirs.figure("avg_minutes_by_area.png"),
            &fastest.iter().map(|a| a.dropoff_area.clone()).collect::<Vec<_>>(),
            &fastest.iter().map(|a| a.avg_minutes).collect::<Vec<_>>(),
        )?;

        write_csv(&dirs.table("top_vendors_by_orders.csv"), &self.vendors.by_orders)?;
        write_csv(&dirs.table("top_vendors_by_revenue.csv"), &self.vendors.by_revenue)?;
        Chart::new("Top 10 Vendors by Revenue", "Vendor", "Revenue").bar(
            &dirs.figure("top10_vendors_revenue.png"),
            &self.vendors.by_revenue.iter().map(|v| v.vendor_name.clone()).collect::<Vec<_>>(),
            &self.vendors.by_revenue.iter().map(|v| v.revenue).collect::<Vec<_>>(),
        )?;

        write_csv(&dirs.table("cuisine_kpis.csv"), &self.cuisines)?;
        let top_cuisines = &self.cuisines[..self.cuisines.len().min(cuisines::CHART_LIMIT)];
        Chart::new("Top Cuisines by Orders", "Cuisine", "Orders").bar(
            &dirs.figure("top_cuisines_orders.png"),
            &top_cuisines.iter().map(|c| c.cuisine.clone()).collect::<Vec<_>>(),
            &top_cuisines.iter().map(|c| c.orders as f64).collect::<Vec<_>>(),
        )?;

        write_csv(&dirs.table("top_drivers.csv"), &self.drivers)?;

        let customers = &self.customers;
        write_csv(&dirs.table("top_customers.csv"), &customers.top)?;
        write_csv(&dirs.table("orders_per_customer.csv"), &customers.distribution)?;
        Chart::new(
            "Orders per Customer (Frequency)",
            "# Orders per Customer",
            "# Customers",
        )
        .bar(
            &dirs.figure("orders_per_customer_dist.png"),
            &customers
                .distribution
                .iter()
                .map(|f| f.orders_per_customer.to_string())
                .collect::<Vec<_>>(),
            &customers
                .distribution
                .iter()
                .map(|f| f.customers as f64)
                .collect::<Vec<_>>(),
        )?;

        write_csv(&dirs.table("outliers_slow_deliveries.csv"), &self.fit.outliers)?;
        if let Some(line) = &self.fit.fit {
            Chart::new(
                "Distance vs Delivery Minutes (linear fit)",
                "Distance (km)",
                "Delivery Minutes",
            )
            .scatter(
                &dirs.figure("distance_vs_minutes_fit.png"),
                &self.fit.points,
                Some(line),
            )?;
        }

        write_csv(&dirs.table("peak_hour_per_area.csv"), &self.peak_hours)?;
        write_csv(
            &dirs.table("top3_vendors_per_area.csv"),
            &self.top_vendors_per_area,
        )?;
        Ok(())
    }

    /// Console summary, one block per section.
    pub fn print(&self) {
        section("Global KPIs");
        self.kpis.print();

        section("Time Series");
        print_table(&self.timeline.day_types);
        println!();
        print_table(&self.timeline.monthly);

        section("Area Analysis (Dropoff)");
        print_table(&self.areas[..self.areas.len().min(FASTEST_AREAS)]);

        section("Vendor Analysis");
        println!("Top Vendors by Orders:");
        print_table(&self.vendors.by_orders);

        section("Cuisine Analysis");
        print_table(&self.cuisines);

        section("Driver Performance");
        println!("Top Drivers (orders>={}):", drivers::MIN_ORDERS);
        print_table(&self.drivers);

        section("Customer Behavior");
        println!(
            "Unique Customers (delivered): {} | Repeat Customers (>=2 orders): {}",
            self.customers.unique_customers,
            pct(self.customers.repeat_rate)
        );

        section("Distance vs Delivery Minutes (Fit)");
        match &self.fit.fit {
            Some(line) => {
                println!(
                    "minutes ~ {} * distance_km + {}",
                    num(line.slope),
                    num(line.intercept)
                );
                print_table(&self.fit.outliers);
            }
            None => println!("Not enough delivered orders for a fit."),
        }

        section("Peak Hour per Area");
        print_table(&self.peak_hours);

        section("Top Vendors per Area (Top 3)");
        print_table(&self.top_vendors_per_area);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::dataset::fixtures::*;
    use baghdad_store::models::OrderStatus;

    const TABLES: [&str; 17] = [
        "global_kpis.csv",
        "daily_kpis.csv",
        "hourly_orders.csv",
        "weekday_orders.csv",
        "weekly_kpis.csv",
        "monthly_kpis.csv",
        "day_type_kpis.csv",
        "area_kpis.csv",
        "top_vendors_by_orders.csv",
        "top_vendors_by_revenue.csv",
        "cuisine_kpis.csv",
        "top_drivers.csv",
        "top_customers.csv",
        "orders_per_customer.csv",
        "outliers_slow_deliveries.csv",
        "peak_hour_per_area.csv",
        "top3_vendors_per_area.csv",
    ];

    fn sample() -> Dataset {
        let kfc = vendor(1, "KFC - Karada", "Karada", "Fried Chicken");
        let masgouf = vendor(2, "Masgouf Abu Ali", "Adhamiya", "Seafood");
        let mut orders = Vec::new();
        for id in 1..=12 {
            let v = if id % 3 == 0 { &masgouf } else { &kfc };
            let mut order = delivered(id, v, if id % 2 == 0 { "Dora" } else { "Mansour" }, 15 + id);
            order.distance_km = dec(&format!("{}.50", id % 7));
            order.customer_id = id % 4 + 1;
            order.order_datetime = at(&format!("2025-03-{:02}", id), 10 + (id as u32 % 12));
            orders.push(order);
        }
        orders.push(with_status(delivered(13, &kfc, "Dora", 30), OrderStatus::Canceled));

        Dataset {
            drivers: vec![driver(1, "Hussein Ali")],
            customers: (1..=4).map(|id| customer(id, &format!("Customer {}", id))).collect(),
            vendors: vec![kfc, masgouf],
            orders,
        }
    }

    #[test]
    fn report_writes_every_table_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::create(dir.path().join("outputs"), dir.path().join("figures")).unwrap();

        let report = Report::build(&sample(), &ReportPolicy::default()).unwrap();
        report.write(&dirs).unwrap();

        for name in TABLES {
            let content = fs::read_to_string(dirs.table(name)).unwrap();
            assert!(!content.is_empty(), "{} has no header", name);
        }
        for name in [
            "daily_orders.png",
            "daily_revenue.png",
            "orders_by_hour.png",
            "orders_by_dow.png",
            "avg_minutes_by_area.png",
            "top10_vendors_revenue.png",
            "top_cuisines_orders.png",
            "orders_per_customer_dist.png",
            "distance_vs_minutes_fit.png",
        ] {
            assert!(dirs.figure(name).is_file(), "{} is missing", name);
        }

        let kpis = fs::read_to_string(dirs.table("global_kpis.csv")).unwrap();
        assert!(kpis.starts_with("metric,value\ntotal_orders,13\ndelivered_orders,12\n"));
    }

    #[test]
    fn empty_dataset_writes_headers_only() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::create(dir.path().join("outputs"), dir.path().join("figures")).unwrap();

        let report = Report::build(&Dataset::default(), &ReportPolicy::default()).unwrap();
        report.write(&dirs).unwrap();

        assert_eq!(
            fs::read_to_string(dirs.table("area_kpis.csv")).unwrap(),
            "dropoff_area,orders,avg_minutes,p95_minutes,sla30,revenue\n"
        );
        assert_eq!(
            fs::read_to_string(dirs.table("peak_hour_per_area.csv")).unwrap(),
            "area,hour,orders\n"
        );
        assert!(dirs.figure("daily_orders.png").is_file());
        assert!(dirs.figure("orders_by_hour.png").is_file());
        assert!(!dirs.figure("distance_vs_minutes_fit.png").exists());
        assert_eq!(report.kpis.total_orders, 0);
    }

    #[test]
    fn sla_thresholds_follow_the_policy() {
        let policy = ReportPolicy::new(vec![Weekday::Fri, Weekday::Sat], vec![20, 45]);
        let report = Report::build(&sample(), &policy).unwrap();

        let thresholds: Vec<u32> = report.kpis.sla.iter().map(|(t, _)| *t).collect();
        assert_eq!(thresholds, vec![20, 45]);
        assert_eq!(report.kpis.sla[1].1, 1.0);
    }
}
