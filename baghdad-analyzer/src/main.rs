use clap::{Parser, Subcommand};

pub mod app;

#[derive(Parser)]
#[command(version, about = "Descriptive analysis of the Baghdad food delivery data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute KPIs and write CSV tables and PNG charts
    Analyze(app::analyze::AnalyzeArgs),
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => app::analyze::main(args),
    }
}
