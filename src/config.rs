//! Catalog endpoint configuration.
//!
//! Values come from the process environment, after loading a `.env` file if
//! one is present. Missing variables fall back to the public fake store API.
//!
//! | Variable               | Default                              |
//! |------------------------|--------------------------------------|
//! | `CART_API_URL`         | `https://fakestoreapi.com/carts`     |
//! | `PRODUCT_API_URL`      | `https://fakestoreapi.com/products`  |
//! | `CATALOG_TIMEOUT_SECS` | `10`                                 |

use crate::error::ConfigError;
use crate::{debug_log, info_log};
use std::time::Duration;

pub const DEFAULT_CART_API_URL: &str = "https://fakestoreapi.com/carts";
pub const DEFAULT_PRODUCT_API_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the catalog lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub cart_api_url: String,
    pub product_api_url: String,
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cart_api_url: DEFAULT_CART_API_URL.to_string(),
            product_api_url: DEFAULT_PRODUCT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cart_api_url = lookup("CART_API_URL").unwrap_or_else(|| {
            debug_log!("CART_API_URL not set, using default: {}", defaults.cart_api_url);
            defaults.cart_api_url.clone()
        });
        let product_api_url = lookup("PRODUCT_API_URL").unwrap_or_else(|| {
            debug_log!(
                "PRODUCT_API_URL not set, using default: {}",
                defaults.product_api_url
            );
            defaults.product_api_url.clone()
        });
        let request_timeout = match lookup("CATALOG_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::InvalidValue {
                    key: "CATALOG_TIMEOUT_SECS".to_string(),
                    message: e.to_string(),
                })?,
            None => defaults.request_timeout,
        };

        info_log!(
            "Catalog configured: carts at {}, products at {}",
            cart_api_url,
            product_api_url
        );

        Ok(Self {
            cart_api_url,
            product_api_url,
            request_timeout,
        })
    }

    /// URL of a single cart.
    pub fn cart_url(&self, cart_id: i64) -> String {
        join_id(&self.cart_api_url, cart_id)
    }

    /// URL of a single product.
    pub fn product_url(&self, product_id: i64) -> String {
        join_id(&self.product_api_url, product_id)
    }
}

fn join_id(base: &str, id: i64) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CatalogConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.cart_url(2), "https://fakestoreapi.com/carts/2");
        assert_eq!(config.product_url(5), "https://fakestoreapi.com/products/5");
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            ("CART_API_URL", "http://localhost:8080/carts/"),
            ("PRODUCT_API_URL", "http://localhost:8080/products"),
            ("CATALOG_TIMEOUT_SECS", " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.cart_url(7), "http://localhost:8080/carts/7");
        assert_eq!(config.product_url(1), "http://localhost:8080/products/1");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = CatalogConfig::from_lookup(lookup_from(&[("CATALOG_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "CATALOG_TIMEOUT_SECS"
        ));
    }
}
