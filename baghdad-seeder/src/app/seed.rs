use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use diesel::{insert_into, prelude::*, PgConnection};
use tracing::info;

use baghdad_seeder::catalog::vendor_listings;
use baghdad_seeder::generator::{Generator, SeedPlan, VendorRef};
use baghdad_seeder::BATCH_SIZE;
use baghdad_store::models::{NewCustomer, NewDriver, NewOrder, NewVendor};
use baghdad_store::{establish_connection, run_migrations, schema, DatabaseConfig};

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Number of drivers to create
    #[arg(long, default_value_t = 50)]
    drivers: usize,
    /// Number of customers to create
    #[arg(long, default_value_t = 500)]
    customers: usize,
    /// Number of orders to create
    #[arg(long, default_value_t = 1200)]
    orders: usize,
    /// Days of order history ending the day before the anchor
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,
    /// Seed for the random generator
    #[arg(long, default_value_t = 101)]
    rng_seed: u64,
    /// Reference date for all generated dates, defaults to today
    #[arg(long)]
    anchor: Option<NaiveDate>,
    /// Remove existing rows before seeding
    #[arg(long)]
    truncate: bool,
}

impl SeedArgs {
    fn plan(&self) -> SeedPlan {
        SeedPlan {
            drivers: self.drivers,
            customers: self.customers,
            orders: self.orders,
            window_days: self.days,
            rng_seed: self.rng_seed,
            anchor: self.anchor.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}

pub fn main(args: SeedArgs) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env()?;
    let conn = &mut establish_connection(&config)?;
    run_migrations(conn).context("Cannot migrate schema")?;

    if args.truncate {
        truncate(conn).context("Cannot clear existing rows")?;
        info!("cleared existing rows");
    }

    let plan = args.plan();
    info!(?plan, "seeding");
    let mut generator =
        Generator::new(plan.rng_seed, plan.anchor).context("Cannot set up the generator")?;

    let driver_ids = insert_drivers(conn, &generator.drivers(plan.drivers))
        .context("Cannot insert drivers")?;
    info!(count = driver_ids.len(), "inserted drivers");

    let customer_ids = insert_customers(conn, &generator.customers(plan.customers))
        .context("Cannot insert customers")?;
    info!(count = customer_ids.len(), "inserted customers");

    let vendors = insert_vendors(conn, &generator.vendors(&vendor_listings()))
        .context("Cannot insert vendors")?;
    info!(count = vendors.len(), "inserted vendors");

    let orders = generator.orders(
        plan.orders,
        plan.window_days,
        &customer_ids,
        &driver_ids,
        &vendors,
    )?;
    let inserted = insert_orders(conn, &orders).context("Cannot insert orders")?;
    info!(count = inserted, "inserted orders");

    println!("Seeded Baghdad vendors by area and orders successfully.");
    Ok(())
}

fn truncate(conn: &mut PgConnection) -> QueryResult<()> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(schema::orders::table).execute(conn)?;
        diesel::delete(schema::vendors::table).execute(conn)?;
        diesel::delete(schema::customers::table).execute(conn)?;
        diesel::delete(schema::drivers::table).execute(conn)?;
        Ok(())
    })
}

fn insert_drivers(conn: &mut PgConnection, rows: &[NewDriver]) -> QueryResult<Vec<i32>> {
    use schema::drivers::dsl::*;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let mut ids = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(BATCH_SIZE) {
            ids.extend(
                insert_into(drivers)
                    .values(chunk)
                    .returning(driver_id)
                    .get_results::<i32>(conn)?,
            );
        }
        Ok(ids)
    })
}

fn insert_customers(conn: &mut PgConnection, rows: &[NewCustomer]) -> QueryResult<Vec<i32>> {
    use schema::customers::dsl::*;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let mut ids = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(BATCH_SIZE) {
            ids.extend(
                insert_into(customers)
                    .values(chunk)
                    .returning(customer_id)
                    .get_results::<i32>(conn)?,
            );
        }
        Ok(ids)
    })
}

fn insert_vendors(conn: &mut PgConnection, rows: &[NewVendor]) -> QueryResult<Vec<VendorRef>> {
    use schema::vendors::dsl::*;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let mut refs = Vec::with_capacity(rows.len());
        for chunk in rows.chunks(BATCH_SIZE) {
            let inserted = insert_into(vendors)
                .values(chunk)
                .returning((vendor_id, cuisine, area))
                .get_results::<(i32, String, String)>(conn)?;
            refs.extend(inserted.into_iter().map(|(id, c, a)| VendorRef {
                vendor_id: id,
                cuisine: c,
                area: a,
            }));
        }
        Ok(refs)
    })
}

fn insert_orders(conn: &mut PgConnection, rows: &[NewOrder]) -> QueryResult<usize> {
    use schema::orders::dsl::*;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let mut inserted = 0;
        for chunk in rows.chunks(BATCH_SIZE) {
            inserted += insert_into(orders).values(chunk).execute(conn)?;
        }
        Ok(inserted)
    })
}
