use std::collections::HashMap;

use anyhow::Context;
use serde::Serialize;

/// Service configuration, read from the environment at startup (a `.env`
/// file is honored through dotenv in `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_pool_size: u32,
    pub port: u16,
    pub build_version: String,
    pub contact_info: ContactInfo,
}

/// Support contact block served by `GET /api/contact-info`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub message: String,
    pub contact_details: HashMap<String, String>,
    pub on_call_support: Vec<String>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        let mut contact_details = HashMap::new();
        contact_details.insert("name".to_string(), "John Snow - Developer".to_string());
        contact_details.insert("email".to_string(), "johnsnow@bank.com".to_string());
        Self {
            message: "Welcome to the bank accounts related local APIs".to_string(),
            contact_details,
            on_call_support: vec!["(555) 555-1234".to_string(), "(555) 523-1345".to_string()],
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let defaults = Self::default();
        let mut contact_info = ContactInfo::default();
        if let Ok(message) = std::env::var("ACCOUNTS_CONTACT_MESSAGE") {
            contact_info.message = message;
        }

        Ok(Self {
            database_url,
            database_pool_size: env_or("DATABASE_POOL_SIZE", defaults.database_pool_size),
            port: env_or("PORT", defaults.port),
            build_version: std::env::var("BUILD_VERSION")
                .unwrap_or(defaults.build_version),
            contact_info,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost:5432/accountsdb".to_string(),
            database_pool_size: 10,
            port: 8080,
            build_version: "1.0.0".to_string(),
            contact_info: ContactInfo::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
