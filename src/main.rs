use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "cadenza_server=debug,tower_http=debug,sea_orm=info";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(err) = cadenza_server::server::run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
