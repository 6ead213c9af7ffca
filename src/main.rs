use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use duplicator::commands::{self, MigrateDirection};
use duplicator::config::{AppConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// Database path or sqlite URL, overrides the config file
    #[clap(short, long, global = true)]
    database: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    Schema {
        #[clap(subcommand)]
        command: SchemaCommands,
    },
    /// Deep-copy an entity instance and print the created records as JSON
    Duplicate {
        #[clap(short, long)]
        entity: String,
        #[clap(short, long)]
        id: i64,
        /// Inclusion tree, e.g. '[{"as":"r_role"}]'
        #[clap(long)]
        include: Option<String>,
        #[clap(short, long)]
        schema: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long)]
        schema: Option<PathBuf>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand, Debug)]
enum SchemaCommands {
    Check {
        #[clap(short, long)]
        schema: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(database) = args.database {
        config.database.url = database;
    }
    setup_logging(&config.logging.level);

    match args.command {
        Commands::Db { command } => match command {
            DbCommands::Init { schema } => {
                info!("Initializing database: {}", config.database.url);
                commands::init_database(&config, schema.as_deref()).await?;
            }
            DbCommands::Migrate { direction } => {
                info!("Running database migration: {:?}", direction);
                commands::migrate_database(&config, direction).await?;
            }
        },
        Commands::Schema { command } => match command {
            SchemaCommands::Check { schema } => {
                println!("{}", commands::check_schema(&schema)?);
            }
        },
        Commands::Duplicate {
            entity,
            id,
            include,
            schema,
        } => {
            let outcome = commands::duplicate_entity(
                &config,
                &entity,
                id,
                include.as_deref(),
                schema.as_deref(),
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    let log_level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .without_time()
        .init();
}
