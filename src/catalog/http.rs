//! `reqwest`-backed catalog client.
//!
//! GPUI runs futures on its own executor, while `reqwest` needs a tokio
//! reactor. Each request is therefore spawned onto a small tokio runtime owned
//! by the client, and the GPUI side only awaits the join handle.

use super::{decode_payload, CartRecord, CatalogClient, CatalogResponse, ProductRecord, STATUS_OK};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::{debug_log, trace_log};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Catalog client talking HTTPS to the configured endpoints.
pub struct HttpCatalog {
    client: reqwest::Client,
    config: CatalogConfig,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl HttpCatalog {
    /// Build a client and its runtime.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("catalog-http")
            .enable_all()
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            runtime: Arc::new(runtime),
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn get<T>(&self, url: String) -> Result<CatalogResponse<T>, CatalogError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        debug_log!("GET {}", url);
        let client = self.client.clone();

        let request = self.runtime.spawn(async move {
            let response = client.get(&url).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            trace_log!("{} answered {} ({} bytes)", url, status, body.len());

            // Error bodies are not records; only a 200 carries a payload.
            let data = if status == STATUS_OK {
                decode_payload::<T>(&body)?
            } else {
                None
            };
            Ok::<_, CatalogError>(CatalogResponse { status, data })
        });

        request
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?
    }
}

#[async_trait]
impl CatalogClient for HttpCatalog {
    async fn fetch_cart(&self, cart_id: i64) -> Result<CatalogResponse<CartRecord>, CatalogError> {
        self.get(self.config.cart_url(cart_id)).await
    }

    async fn fetch_product(
        &self,
        product_id: i64,
    ) -> Result<CatalogResponse<ProductRecord>, CatalogError> {
        self.get(self.config.product_url(product_id)).await
    }
}
