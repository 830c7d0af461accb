//! Tracing setup
//!
//! `RUST_LOG` wins when set. Otherwise the estimator logs at debug outside
//! production so per-room pricing events are visible while tuning a catalog.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, Settings};

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "paint_estimator=debug,tower_http=debug,info",
        Environment::Staging => "paint_estimator=debug,tower_http=info,info",
        Environment::Prod => "paint_estimator=info,tower_http=info,warn",
    }
}

pub fn init_logging(settings: &Settings) {
    let env = &settings.env;
    let format = if env.is_prod() { "json" } else { "compact" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // Prod output goes to a log shipper
    if env.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .init();
    }

    tracing::info!(
        env = ?env,
        format,
        catalog = %settings.catalog_source(),
        max_rooms = settings.max_rooms_per_estimate,
        "Estimator logging ready"
    );
}
