use demporium_server_lib::api::config::Config;
use demporium_server_lib::api::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("demporium_server_lib=info,tower_http=info")),
        )
        .init();

    let config = Config::new();

    if let Err(e) = server::start(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
