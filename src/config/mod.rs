// src/config/mod.rs
// All runtime settings come from the environment (.env supported), with
// working defaults for local development.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct KennelConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Data Layout
    pub data_dir: String,
    pub max_cages: u16,
    pub walk_log_capacity: usize,
    pub cages_page_limit: u32,

    // ── Photo Bucket
    pub media_endpoint: String,
    pub media_bucket: String,
    pub media_public_url: String,
    pub media_bearer_token: Option<String>,
    pub upload_max_bytes: usize,

    // ── Logging Configuration
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            // Trim whitespace and strip trailing comments before parsing
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl KennelConfig {
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            host: env_var_or("KENNEL_HOST", "0.0.0.0".to_string()),
            port: env_var_or("KENNEL_PORT", 3000),
            data_dir: env_var_or("KENNEL_DATA_DIR", "./data".to_string()),
            max_cages: env_var_or("KENNEL_MAX_CAGES", 60),
            walk_log_capacity: env_var_or("KENNEL_WALK_LOG_CAPACITY", 20),
            cages_page_limit: env_var_or("KENNEL_CAGES_PAGE_LIMIT", 10),
            media_endpoint: env_var_or("MEDIA_ENDPOINT", "http://localhost:9000".to_string()),
            media_bucket: env_var_or("MEDIA_BUCKET", "kennel-photos".to_string()),
            media_public_url: env_var_or(
                "MEDIA_PUBLIC_URL",
                "http://localhost:9000/kennel-photos".to_string(),
            ),
            media_bearer_token: env_var_opt("MEDIA_BEARER_TOKEN"),
            upload_max_bytes: env_var_or("KENNEL_UPLOAD_MAX_BYTES", 10 * 1024 * 1024),
            log_level: env_var_or("KENNEL_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<KennelConfig> = Lazy::new(KennelConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = KennelConfig::from_env();

        assert_eq!(config.max_cages, 60);
        assert_eq!(config.walk_log_capacity, 20);
        assert_eq!(config.cages_page_limit, 10);
        assert_eq!(config.upload_max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_bind_address() {
        let config = KennelConfig::from_env();
        assert!(config.bind_address().contains(':'));
    }
}
