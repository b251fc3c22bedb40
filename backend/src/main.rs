use anyhow::Result;
use backend::axum_http::http_serve;
use backend::config::config_loader;
use infra::local_store::snapshot::SnapshotStore;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    backend::init_tracing()?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let store = SnapshotStore::load(&dotenvy_env.storage.data_dir, &dotenvy_env.seed_admin.username)?;
    let password_hash = application::usecases::users::hash_password(&dotenvy_env.seed_admin.password)?;
    store.ensure_seed_admin(&dotenvy_env.seed_admin.username, password_hash)?;
    info!("Snapshot store has been loaded");

    http_serve::start(Arc::new(dotenvy_env), Arc::new(store)).await?;

    Ok(())
}
