use std::sync::Arc;

use polls::config::Settings;
use polls::interface::PollsInterface;
use polls::persist::Persistor;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    if let Err(e) = run(settings).await {
        error!(error = %e, "polls stopped");
        std::process::exit(1);
    }
}

async fn run(settings: Settings) -> polls::Result<()> {
    let store = Persistor::open(settings.persistence_mode())?;
    info!(limit = ?settings.index_limit, "store ready");
    let interface = PollsInterface::new(store).with_index_limit(settings.index_limit);
    polls::server::serve(&settings.bind_address, Arc::new(interface)).await
}
