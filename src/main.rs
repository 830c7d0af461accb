use anyhow::{Context, Result};

use paint_estimator::{app, config, logging, pricing::PricingCatalog};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting paint estimator"
    );

    // Loaded once; every request prices against this copy
    let catalog = PricingCatalog::load(settings.pricing_catalog_path.as_deref())?;
    tracing::info!(
        source = %settings.catalog_source(),
        room_types = catalog.room_base_prices.len(),
        volume_tiers = catalog.volume_discount_tiers.len(),
        minimum_service_charge = %catalog.minimum_service_charge,
        "Pricing catalog loaded"
    );

    let state = app::AppState::new(settings.clone(), catalog);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("failed binding {}", settings.server_addr))?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
