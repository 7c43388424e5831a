//! Service configuration.
//!
//! Settings come from environment variables (after `.env` is loaded by the
//! binary), each with a default suitable for a local run.
//!
//! # Environment Variables
//!
//! - `BIND_ADDR`: listen address (default: 0.0.0.0:8080)
//! - `STORE_BACKEND`: `memory` or `postgres` (default: memory)
//! - `DATABASE_URL`: PostgreSQL connection string, required for `postgres`
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `INDEX_BACKEND`: `memory` or `opensearch` (default: memory)
//! - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
//! - `SELLER_INDEX_NAME`: search index name (default: sellers)
//! - `REJECT_UPDATE_WITHOUT_ID`: reject PUT bodies without an id (default: false)
//! - `REQUIRE_SELLER_NAME`: reject writes without a name (default: false)
//! - `MIRROR_MAX_RETRIES`: retries for search index writes (default: 3)
//! - `LOG_FORMAT`: `text` or `json` (default: text)

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::ServiceError;
use seller_gateway::{GatewayConfig, MirrorConfig, UpdateWithoutId};
use seller_repository::config::DEFAULT_MAX_CONNECTIONS;
use seller_repository::opensearch::IndexConfig;
use seller_repository::StoreConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default search index name.
const DEFAULT_INDEX_NAME: &str = "sellers";

/// Where sellers are stored.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    Memory,
    Postgres(StoreConfig),
}

/// Where sellers are indexed.
#[derive(Debug, Clone)]
pub enum IndexBackend {
    Memory,
    OpenSearch { url: String, index: IndexConfig },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub index: IndexBackend,
    pub gateway: GatewayConfig,
    pub require_name: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;

        let store = match lookup("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory,
            "postgres" => {
                let database_url = lookup("DATABASE_URL").ok_or_else(|| {
                    ServiceError::config("DATABASE_URL is required when STORE_BACKEND=postgres")
                })?;
                let max_connections = parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    Some(DEFAULT_MAX_CONNECTIONS),
                )?;
                StoreBackend::Postgres(
                    StoreConfig::new(database_url).with_max_connections(max_connections),
                )
            }
            other => {
                return Err(ServiceError::config(format!(
                    "Unknown STORE_BACKEND '{}', expected 'memory' or 'postgres'",
                    other
                )))
            }
        };

        let index = match lookup("INDEX_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => IndexBackend::Memory,
            "opensearch" => IndexBackend::OpenSearch {
                url: lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
                index: IndexConfig::new(
                    lookup("SELLER_INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
                ),
            },
            other => {
                return Err(ServiceError::config(format!(
                    "Unknown INDEX_BACKEND '{}', expected 'memory' or 'opensearch'",
                    other
                )))
            }
        };

        let update_without_id = if parse_or(&lookup, "REJECT_UPDATE_WITHOUT_ID", Some(false))? {
            UpdateWithoutId::Reject
        } else {
            UpdateWithoutId::CreateInstead
        };
        let max_retries = parse_or(
            &lookup,
            "MIRROR_MAX_RETRIES",
            Some(MirrorConfig::default().max_retries),
        )?;
        let gateway = GatewayConfig::default()
            .with_update_without_id(update_without_id)
            .with_mirror(MirrorConfig::default().with_max_retries(max_retries));

        let log_format = match lookup("LOG_FORMAT").as_deref().unwrap_or("text") {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            bind_addr,
            store,
            index,
            gateway,
            require_name: parse_or(&lookup, "REQUIRE_SELLER_NAME", Some(false))?,
            log_format,
        })
    }
}

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<F, T>(lookup: &F, key: &str, default: Option<T>) -> Result<T, ServiceError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ServiceError::config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => default.ok_or_else(|| ServiceError::config(format!("{} is required", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ServiceError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(matches!(config.store, StoreBackend::Memory));
        assert!(matches!(config.index, IndexBackend::Memory));
        assert_eq!(
            config.gateway.update_without_id,
            UpdateWithoutId::CreateInstead
        );
        assert_eq!(config.gateway.mirror.max_retries, 3);
        assert!(!config.require_name);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_postgres_and_opensearch() {
        let config = config_from(&[
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/sellers"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("INDEX_BACKEND", "opensearch"),
            ("SELLER_INDEX_NAME", "sellers-v2"),
        ])
        .unwrap();

        let StoreBackend::Postgres(store) = config.store else {
            panic!("expected postgres store");
        };
        assert_eq!(store.database_url, "postgres://localhost/sellers");
        assert_eq!(store.max_connections, 12);

        let IndexBackend::OpenSearch { url, index } = config.index else {
            panic!("expected opensearch index");
        };
        assert_eq!(url, "http://localhost:9200");
        assert_eq!(index.name, "sellers-v2");
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let result = config_from(&[("STORE_BACKEND", "postgres")]);
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_backend() {
        assert!(config_from(&[("INDEX_BACKEND", "solr")]).is_err());
    }

    #[test]
    fn test_flags() {
        let config = config_from(&[
            ("REJECT_UPDATE_WITHOUT_ID", "true"),
            ("REQUIRE_SELLER_NAME", "true"),
            ("MIRROR_MAX_RETRIES", "0"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.gateway.update_without_id, UpdateWithoutId::Reject);
        assert!(config.require_name);
        assert_eq!(config.gateway.mirror.max_retries, 0);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_number() {
        let result = config_from(&[("MIRROR_MAX_RETRIES", "many")]);
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));
    }
}
