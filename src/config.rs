use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Pricing
    pub pricing_catalog_path: Option<PathBuf>,
    pub max_rooms_per_estimate: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Pricing
        let pricing_catalog_path = env::var("PRICING_CATALOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let max_rooms_per_estimate = match env::var("MAX_ROOMS_PER_ESTIMATE") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MAX_ROOMS_PER_ESTIMATE must be a number, got {raw:?}"))?,
            Err(_) => 50,
        };

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            pricing_catalog_path,
            max_rooms_per_estimate,
        })
    }
}

impl Settings {
    /// Where the pricing catalog comes from, for startup logs.
    pub fn catalog_source(&self) -> String {
        self.pricing_catalog_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            pricing_catalog_path: None,
            max_rooms_per_estimate: 50,
        }
    }
}
