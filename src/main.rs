//! Clinics and hospitals lookup service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clinic_locator::api::router_from_config;
use clinic_locator::config::Config;
use clinic_locator::metrics;
use clinic_locator::overpass::{FacilityQuery, OverpassClient};
use clinic_locator::utils::shutdown_signal;

/// Nearby clinics and hospitals API.
#[derive(Parser, Debug)]
#[command(name = "clinic-locator")]
#[command(about = "HTTP API that finds clinics and hospitals near a coordinate")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (defaults to PORT, then 8080).
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port.
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Run one search and print the JSON response.
    Search {
        /// Latitude of the location.
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude of the location.
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,

        /// Radius in meters (defaults to DEFAULT_RADIUS).
        #[arg(long, allow_negative_numbers = true)]
        radius: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("clinic_locator=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = if args.json_logs || config.log_json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Search {
            latitude,
            longitude,
            radius,
        }) => cmd_search(&config, latitude, longitude, radius).await,
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CLINIC LOCATOR - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Overpass URL: {}", config.overpass_url);
    println!("  Overpass timeout: {}ms", config.overpass_timeout_ms);
    println!("  Connect timeout: {}ms", config.overpass_connect_timeout_ms);
    println!("  Strict upstream: {}", config.strict_upstream);
    println!("  Default radius: {}m", config.default_radius);
    println!("  CORS origins: {}", config.cors_allowed_origins.join(", "));
    println!("  CORS methods: {}", config.cors_allowed_methods.join(", "));
    println!("  CORS credentials: {}", config.cors_allow_credentials);
    println!("  Metrics: {}", if config.metrics_enabled { "enabled" } else { "disabled" });
    println!("======================================================================");

    Ok(())
}

/// Run a single search from the command line.
async fn cmd_search(
    config: &Config,
    latitude: f64,
    longitude: f64,
    radius: Option<i64>,
) -> anyhow::Result<()> {
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = OverpassClient::new(config)?;
    info!(
        "Querying {} (strict: {})",
        client.url(),
        client.is_strict()
    );
    let query = FacilityQuery::new(latitude, longitude, radius.unwrap_or(config.default_radius));

    let response = clinic_locator::api::handlers::search(&client, &query).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::install_prometheus()?)
    } else {
        None
    };
    let router = router_from_config(&config, metrics_handle)?;

    info!("Overpass endpoint: {}", config.overpass_url);
    info!("Overpass timeout: {}ms", config.overpass_timeout_ms);
    info!("Strict upstream: {}", config.strict_upstream);
    info!("Allowed origins: {}", config.cors_allowed_origins.join(", "));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
