use clap::{Parser, Subcommand};
use docmeta_config::{Config, StoreBackend};
use docmeta_extract::{ClientOptions, SuipClient, Upload};
use docmeta_store::Database;
use miette::{IntoDiagnostic, Result};
use std::fmt::Debug;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docmeta", version, about = "Document metadata extraction service")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Create the SQLite database and apply migrations
    InitDb,
    /// Extract metadata from a local file and print it, without storing it
    Extract { path: PathBuf },
    /// Print stored records, most recent first
    List {
        /// Only records whose file type contains this (case-insensitive)
        #[arg(short, long)]
        filetype: Option<String>,
    },
}

/// Errors carry their whole `exn` tree (with locations) into the report.
fn report<E: Debug>(err: E) -> miette::Report {
    miette::miette!("{err:?}")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = docmeta_config::load(cli.config.as_deref()).map_err(report)?;
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level)).into_diagnostic()?;
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Command::Serve => docmeta_server::start_server(config).await.map_err(report),
        Command::InitDb => init_db(&config).await,
        Command::Extract { path } => extract(&config, path).await,
        Command::List { filetype } => list(&config, filetype.as_deref()).await,
    }
}

async fn init_db(config: &Config) -> Result<()> {
    if config.store.backend != StoreBackend::Sqlite {
        miette::bail!("init-db only applies to the sqlite store backend");
    }
    let db = Database::connect(&config.store.path).await.map_err(report)?;
    db.migrate().await.map_err(report)?;
    db.close().await;
    tracing::info!(path = %config.store.path.display(), "Database ready");
    Ok(())
}

async fn extract(config: &Config, path: PathBuf) -> Result<()> {
    let service = SuipClient::new(ClientOptions {
        url: config.remote.url.clone(),
        field_name: config.remote.field_name.clone(),
        timeout: config.remote.timeout(),
        accept_invalid_certs: config.remote.accept_invalid_certs,
    })
    .map_err(report)?;
    let metadata = docmeta_extract::extract(&service, Upload::path(path)).await.map_err(report)?;
    println!("{}", serde_json::to_string_pretty(&metadata).into_diagnostic()?);
    Ok(())
}

async fn list(config: &Config, filetype: Option<&str>) -> Result<()> {
    let store = docmeta_server::state::open_store(config).await.map_err(report)?;
    let records = store.list_all().await.map_err(report)?;
    let records = match filetype {
        Some(filetype) => docmeta_library::filter_by_filetype(records, filetype),
        None => records,
    };
    println!("{}", serde_json::to_string_pretty(&records).into_diagnostic()?);
    Ok(())
}
