use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::str::FromStr;

use shopping_list::config::{ProvenanceMode, ShoppingListConfig};
use shopping_list::plan_input::load_plan_input;
use shopping_list::shopping_list::ShoppingListGenerator;
use shopping_list::shopping_list_display::format_shopping_list;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a consolidated shopping list from a meal plan", long_about = None)]
struct Cli {
    /// Path to the plan JSON document ({ "recipes": [...], "mealPlanEntries": [...] })
    #[arg(short, long)]
    input: PathBuf,

    /// First day of the shopping week (YYYY-MM-DD)
    #[arg(short, long)]
    week_start: NaiveDate,

    /// Owner of the generated shopping list records
    #[arg(short, long)]
    user_id: String,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Overrides SHOPPING_LIST_PROVENANCE (first or all)
    #[arg(long, value_parser = ProvenanceMode::from_str)]
    provenance: Option<ProvenanceMode>,

    /// Skip meal plan entries dated outside the requested week
    #[arg(long)]
    restrict_to_week: bool,

    /// Emit structured JSON logs instead of plain text
    #[arg(long)]
    json_logs: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn init_logging(json_logs: bool) {
    if json_logs {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "shopping_list=info".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        env_logger::init();
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let mut config = ShoppingListConfig::from_env().context("Invalid shopping list configuration")?;
    if let Some(provenance) = cli.provenance {
        config.provenance = provenance;
    }
    if cli.restrict_to_week {
        config.restrict_to_week = true;
    }

    let plan = load_plan_input(&cli.input)?;

    info!(
        "Generating shopping list for user {} starting {}",
        cli.user_id, cli.week_start
    );
    let items = ShoppingListGenerator::new(config).generate(
        &plan.meal_plan_entries,
        &plan.recipes,
        cli.week_start,
        &cli.user_id,
    );

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&items)
                .context("Failed to serialize shopping list")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", format_shopping_list(&items)),
    }

    Ok(())
}
