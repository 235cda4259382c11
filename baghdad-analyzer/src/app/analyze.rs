use std::path::PathBuf;

use anyhow::Context;
use chrono::Weekday;
use clap::Args;
use tracing::info;

use baghdad_analyzer::dataset::Dataset;
use baghdad_analyzer::output::OutputDirs;
use baghdad_analyzer::report::{Report, ReportPolicy};
use baghdad_store::{establish_connection, DatabaseConfig};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory for CSV tables
    #[arg(long, default_value = "outputs")]
    pub outputs: PathBuf,
    /// Directory for PNG charts
    #[arg(long, default_value = "figures")]
    pub figures: PathBuf,
    /// Days counted as the weekend
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_weekday,
        default_values = ["friday", "saturday", "sunday"]
    )]
    pub weekend: Vec<Weekday>,
    /// Delivery time thresholds in minutes for SLA attainment
    #[arg(long, value_delimiter = ',', default_values_t = [25u32, 30, 35, 40])]
    pub sla: Vec<u32>,
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("unknown weekday `{}`", value))
}

pub fn main(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env()?;
    let conn = &mut establish_connection(&config)?;

    let dataset = Dataset::load(conn).context("Cannot load tables")?;
    info!(
        drivers = dataset.drivers.len(),
        customers = dataset.customers.len(),
        vendors = dataset.vendors.len(),
        orders = dataset.orders.len(),
        "loaded tables"
    );

    let dirs = OutputDirs::create(&args.outputs, &args.figures)?;
    let report = Report::build(&dataset, &ReportPolicy::new(args.weekend, args.sla))?;
    report.print();
    report.write(&dirs).context("Cannot write outputs")?;

    println!(
        "\nDone. CSVs in {}/, figures in {}/.",
        args.outputs.display(),
        args.figures.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use baghdad_store::run_migrations;
    use diesel::Connection;

    use super::*;

    #[test]
    #[ignore = "needs a Postgres database in DATABASE_URL"]
    fn loads_the_seeded_tables() {
        let config = DatabaseConfig::from_env().unwrap();
        let conn = &mut establish_connection(&config).unwrap();
        run_migrations(conn).unwrap();

        conn.test_transaction::<_, diesel::result::Error, _>(|conn| {
            let dataset = Dataset::load(conn).unwrap();
            let report = Report::build(&dataset, &ReportPolicy::default()).unwrap();
            assert_eq!(report.kpis.total_orders, dataset.orders.len());
            assert_eq!(
                report.peak_hours.len(),
                report.areas.len(),
                "one peak hour per dropoff area"
            );
            Ok(())
        });
    }
}
