//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_upstream::HttpUpstream;
use crate::adapters::web::{AppState, build_router};
use crate::domain::udf::UdfOperation;
use crate::ports::config_port::ConfigPort;
use crate::ports::upstream_port::UpstreamPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(name = "vnfeed", about = "UDF charting data-feed adapter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the data-feed server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate configuration and probe the upstream backend
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve { config } => run_serve(&config),
        Command::Check { config } => run_check(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Listen address from `[web] listen`, falling back to the default on a
/// missing or unparseable value.
pub fn resolve_listen_addr(config: &dyn ConfigPort) -> SocketAddr {
    config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string())
        .parse()
        .unwrap_or_else(|_| DEFAULT_LISTEN.parse().unwrap())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    // try_init: keeps repeated in-process invocations (tests) from panicking.
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vnfeed=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    init_tracing();

    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let upstream = match HttpUpstream::from_config(&config) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Wire adapters and serve
    let addr = resolve_listen_addr(&config);
    eprintln!("Proxying feed requests to {}", upstream.base_url());
    eprintln!("Starting data-feed server on {}", addr);

    let state = AppState {
        upstream: Arc::new(upstream),
    };
    let router = build_router(state);

    tokio::runtime::Runtime::new().unwrap().block_on(async {
        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error: failed to bind {addr}: {e}");
                return ExitCode::from(1);
            }
        };
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("error: server terminated: {e}");
            return ExitCode::from(1);
        }
        ExitCode::SUCCESS
    })
}

pub fn run_check(config_path: &PathBuf) -> ExitCode {
    init_tracing();

    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let upstream = match HttpUpstream::from_config(&config) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Config validated successfully");
    eprintln!("  upstream: {}", upstream.base_url());
    eprintln!("  timeout:  {:?}", upstream.timeout());
    eprintln!("  listen:   {}", resolve_listen_addr(&config));

    eprintln!("\nProbing upstream config operation...");
    tokio::runtime::Runtime::new().unwrap().block_on(async {
        match upstream.fetch(UdfOperation::Config, &[]).await {
            Ok(response) if response.is_success() && response.json().is_some() => {
                eprintln!("Upstream answered {} with a JSON body", response.status);
                eprintln!("\nCheck complete: configuration is valid");
                ExitCode::SUCCESS
            }
            Ok(response) => {
                eprintln!(
                    "error: upstream answered status {} with an unusable body",
                    response.status
                );
                ExitCode::from(3)
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::from(3)
            }
        }
    })
}
