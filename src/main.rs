use anyhow::Context;
use recall::{
    AppState, RecallConfig,
    api::routes::create_router,
    cli::{Cli, Commands},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();

    let config_found = cli.config.exists();
    let config = if config_found {
        RecallConfig::load(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        RecallConfig::default()
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "recall={level},recall_server={level},tower_http={level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if !config_found {
        warn!(
            "Config file {} not found, using defaults",
            cli.config.display()
        );
    }

    if let Some(Commands::Config { validate }) = cli.command {
        if validate {
            config.validate()?;
            println!("Configuration is valid");
        } else {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        return Ok(());
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        threshold = config.memory.compression_threshold,
        provider = config.provider_name(),
        "Starting Recall"
    );

    let state = AppState::from_config(config).await?;
    let app = create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Recall listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Recall stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
