//! CLI configuration from environment.

use gate_overpass::DEFAULT_ENDPOINTS;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub overpass_endpoints: Vec<String>,
    pub backend_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let overpass_endpoints = env::var("OVERPASS_ENDPOINTS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect());

        Self {
            overpass_endpoints,
            backend_url: env::var("GATE_BACKEND_URL").ok(),
        }
    }
}
