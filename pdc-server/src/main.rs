//! pdc-server binary - PDC Pro inspection API

use anyhow::Result;
use clap::Parser;
use tracing::info;

use pdc_common::config::{self, ServerConfig};
use pdc_common::db;
use pdc_server::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "pdc-server", about = "PDC Pro vehicle inspection API server")]
struct Args {
    /// Root data folder (overrides PDC_ROOT_FOLDER and the config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Listen port (overrides PDC_PORT and the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting PDC Pro API server v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let mut server_config = ServerConfig::load(&root_folder)?;
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let db_path = config::database_path(&root_folder);
    let pool = db::init_database(&db_path).await?;

    let state = AppState::new(pool, server_config.image_host.clone());
    let app = build_router(state);

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("pdc-server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
