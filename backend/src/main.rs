//! Backend entry-point: parses configuration, wires the store adapters,
//! and runs the HTTP server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::{self, config::DEFAULT_DATABASE_NAME, ServerConfig};

/// Process configuration, from flags or the environment.
#[derive(Debug, Parser)]
#[command(name = "hospital-directory", about = "Location-aware hospital directory service")]
struct Cli {
    /// MongoDB connection string. Unset leaves the store unconfigured and
    /// data endpoints reporting 500.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database name within the cluster.
    #[arg(long, env = "MONGODB_DATABASE", default_value = DEFAULT_DATABASE_NAME)]
    database_name: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Interface to bind.
    #[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind_addr: IpAddr,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let config = ServerConfig::new(SocketAddr::new(cli.bind_addr, cli.port))
        .with_database_url(cli.database_url)
        .with_database_name(cli.database_name);

    server::run(config).await
}
