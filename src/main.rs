use std::error::Error;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{ConfigLoader, ServerSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_engine=debug,axum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::from_env()?;

    let config = ConfigLoader::load(&settings.config_dir)?;
    let employees = ConfigLoader::load_employees(&settings.employees_file)?;
    tracing::info!(
        scheme = %config.scheme().code,
        rate_sets = config.config().rates().len(),
        employees = employees.len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::in_memory(config, employees));
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("Server started at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
