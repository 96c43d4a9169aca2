mod dto;
mod files;
mod items;
mod lists;
mod problem;
mod router;
mod telemetry;
mod validate;

use tracing::info;

use todo_infra::FileService;
use todo_storage::Database;
use todo_util::{load_env_file, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let storage = Database::new();
    if config.seed_demo {
        storage.seed_demo_data(chrono::Utc::now()).await?;
        info!(stage = "app", "seeded demo data");
    }

    let file_store = FileService::new(config.upload_dir.clone());
    file_store.ensure_root().await?;

    let state = router::AppState::new(metrics, storage, file_store);

    let addr = config.bind_addr;
    info!(stage = "app", %addr, env = %config.environment.as_str(), "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}
