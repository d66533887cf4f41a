use std::net::SocketAddr;

use tracing::info;

use gestor_web::server::WebServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let web_addr: SocketAddr = std::env::var("GESTOR_WEB_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    let data_dir = std::env::var("GESTOR_DATA_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| gestor_common::default_data_dir());

    let cfg = WebServerConfig { data_dir };

    info!(
        "Starting Gestor de Cine on http://{} (data dir: {})",
        web_addr,
        cfg.data_dir.display()
    );

    gestor_web::server::serve(web_addr, cfg).await
}
