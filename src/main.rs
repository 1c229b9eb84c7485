#![forbid(unsafe_code)]
use std::sync::Arc;

use actix_web::web::Data;
use anyhow::Context;
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use diesel_migrations::{FileBasedMigrations, MigrationHarness};
use jobboard::actions::misc::create_database_if_needed;
use jobboard::config::EnvConfig;
use jobboard::utils::session::InMemorySessionStore;
use jobboard::{AppData, LoggerFormat};
use tracing::subscriber::set_global_default;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{
    layer::SubscriberExt, EnvFilter, FmtSubscriber, Registry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv().context("Failed to set up env")?;

    let env_config = envy::prefixed("JOBBOARD_")
        .from_env::<EnvConfig>()
        .context("Failed to parse config")?;

    //bind guard to variable instead of _
    let _guard = setup_logger(env_config.clone().logger_format)?;

    let connspec = &env_config.database_url;
    let _ = create_database_if_needed(connspec).with_context(|| {
        format!("Failed to create/detect database. URL was {connspec}")
    })?;
    let manager = ConnectionManager::<PgConnection>::new(connspec);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create db pool")?;

    let _ = {
        let mut conn = pool.get().context("Failed to get connection")?;

        let migrations: FileBasedMigrations =
            FileBasedMigrations::find_migrations_directory()
                .context("Error running migrations")?;
        let _ = conn
            .run_pending_migrations(migrations)
            .map_err(|e| anyhow::anyhow!(e))
            .context("Error running migrations")?;
    };

    let app_data = Data::new(AppData {
        pool,
        sessions: Arc::new(InMemorySessionStore::new()),
    });

    Ok(jobboard::run(
        format!("{}:{}", env_config.http_host, env_config.http_port),
        app_data,
    )
    .await?)
}

pub fn setup_logger(format: LoggerFormat) -> anyhow::Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_env("JOBBOARD_RUST_LOG")
        .context("Failed to set up env logger")?;

    let (non_blocking, _guard) =
        tracing_appender::non_blocking(std::io::stdout());

    let _ = LogTracer::init().context("Failed to set up log tracer")?;

    let _ = match format {
        LoggerFormat::Json => {
            let formatting_layer = BunyanFormattingLayer::new(
                format!("jobboard-{}", env!("CARGO_PKG_VERSION")),
                // Output the formatted spans to non-blocking writer
                non_blocking,
            );
            let subscriber = Registry::default()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(formatting_layer);
            let _ = set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }

        LoggerFormat::Pretty => {
            let subscriber = FmtSubscriber::builder()
                .pretty()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_thread_names(true)
                .finish();
            let _ = set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
    };
    Ok(_guard)
}
