use clap::{Parser, Subcommand};

pub mod app;

#[derive(Parser)]
#[command(version, about = "Seed the Baghdad food delivery schema with synthetic data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Generate drivers, customers, vendors and orders
    Seed(app::seed::SeedArgs),
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Migrate => app::migrate::main(),
        Commands::Seed(args) => app::seed::main(args),
    }
}
