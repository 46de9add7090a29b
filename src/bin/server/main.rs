use anyhow::anyhow;
use cadence::core::application::{Application, ApplicationServices};
use cadence::core::config::Config;
use cadence::domain::schedule;
use cadence::inbound::http::router;
use cadence::outbound::db::connection::Db;
use cadence::outbound::db::repository::Repository;
use clap::{Parser, Subcommand};
use std::process::exit;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias = Application<schedule::Service<Repository, Repository>>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long)]
    config_path: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the http api.
    Run,
    /// Apply migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let db = Db::connect(&config.db).await?;
    db.migrate().await?;
    tracing::debug!("migrations applied");

    match cli.command {
        None | Some(Commands::Migrate) => Ok(()),
        Some(Commands::Run) => run_server(create_application(db, config)).await,
    }
}

fn create_application(db: Db, config: Config) -> ApplicationAlias {
    let repo = Repository::new(&db);
    let schedule_service = schedule::Service::new(repo.clone(), repo)
        .with_thresholds(config.compliance)
        .with_bulk_concurrency(config.bulk_concurrency);

    Application::new(config, schedule_service)
}

async fn run_server(app: ApplicationAlias) -> anyhow::Result<()> {
    let bind_address = app.config().bind_address;
    let router = router(app);

    let listener = tokio::net::TcpListener::bind(bind_address.as_str())
        .await
        .map_err(|_| anyhow!("server failed to bind to {bind_address}"))?;

    tracing::info!(
        "listening on {}",
        listener
            .local_addr()
            .map_err(|_| anyhow!("failed to get local_addr"))?
    );

    axum::serve(listener, router)
        .await
        .map_err(|_| anyhow!("failed to start server"))
}
