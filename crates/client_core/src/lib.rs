//! Client-side core for the product catalog backend.
//!
//! `HttpProductStore` speaks the backend's REST+JSON contract behind the
//! `ProductStore` seam; `Catalog` is the sole owner of the in-memory product
//! collection and the edit-target, and every local mutation it makes happens
//! only after the store confirmed the remote one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{Product, ProductDraft, ProductId},
    error::ApiError,
    protocol::{CreateProductRequest, ProductRecord},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Failure classes of a remote call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Seam in front of the remote CRUD collaborator.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError>;
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, StoreError>;
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

/// REST+JSON implementation of [`ProductStore`].
///
/// Endpoints are resolved relative to the configured base URL:
/// `GET/POST /products` and `PUT/DELETE /products/{id}`.
pub struct HttpProductStore {
    http: Client,
    base_url: String,
}

impl HttpProductStore {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(StoreError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Prefer the structured error body when there is one; fall back to
        // the raw body, then to the status line.
        let message = match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiError>(&body) {
                Ok(api_error) => api_error.message,
                Err(_) if !body.trim().is_empty() => body,
                Err(_) => status.to_string(),
            },
            Err(_) => status.to_string(),
        };
        Err(StoreError::Status { status, message })
    }
}

#[async_trait]
impl ProductStore for HttpProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let response = self
            .http
            .get(format!("{}/products", self.base_url))
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let records: Vec<ProductRecord> = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(StoreError::Decode)?;
        debug!(count = records.len(), "listed products");
        Ok(records.into_iter().map(Product::from).collect())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let response = self
            .http
            .post(format!("{}/products", self.base_url))
            .json(&CreateProductRequest::from_draft(draft))
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let record: ProductRecord = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(StoreError::Decode)?;
        debug!(product_id = record.id.0, "created product");
        Ok(record.into())
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, StoreError> {
        let response = self
            .http
            .put(format!("{}/products/{}", self.base_url, id.0))
            .json(&ProductRecord::from_draft(id, draft))
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let record: ProductRecord = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(StoreError::Decode)?;
        debug!(product_id = record.id.0, "updated product");
        Ok(record.into())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(format!("{}/products/{}", self.base_url, id.0))
            .send()
            .await
            .map_err(StoreError::Transport)?;
        Self::check_status(response).await?;
        debug!(product_id = id.0, "deleted product");
        Ok(())
    }
}

/// Sole owner of the in-memory product collection and the edit-target.
///
/// A failed remote call leaves both exactly as they were; no optimistic entry
/// ever needs rolling back.
#[derive(Default)]
pub struct Catalog {
    products: Vec<Product>,
    edit_target: Option<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn edit_target(&self) -> Option<&Product> {
        self.edit_target.as_ref()
    }

    /// Replaces the local collection with the server's, in server order.
    pub async fn load_all(&mut self, store: &dyn ProductStore) -> Result<(), StoreError> {
        self.products = store.list().await?;
        Ok(())
    }

    /// Creates the draft remotely and appends the server-confirmed record.
    ///
    /// The server assigns the id; its uniqueness is trusted, not re-checked.
    pub async fn create(
        &mut self,
        store: &dyn ProductStore,
        draft: &ProductDraft,
    ) -> Result<Product, StoreError> {
        let created = store.create(draft).await?;
        self.products.push(created.clone());
        Ok(created)
    }

    /// Updates the product remotely, replaces the matching local entry with
    /// the server's record, and clears the edit-target (back to create mode).
    pub async fn update(
        &mut self,
        store: &dyn ProductStore,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, StoreError> {
        let updated = store.update(id, draft).await?;
        for product in &mut self.products {
            if product.id == updated.id {
                *product = updated.clone();
            }
        }
        self.edit_target = None;
        Ok(updated)
    }

    /// Deletes the product remotely, drops the matching local entry, then
    /// re-synchronizes the whole collection from the server.
    ///
    /// If the deleted product was the edit-target, the target is cleared.
    /// An error from the re-sync step reaches the caller after the local
    /// removal already happened against a confirmed delete.
    pub async fn delete(
        &mut self,
        store: &dyn ProductStore,
        id: ProductId,
    ) -> Result<(), StoreError> {
        store.delete(id).await?;
        self.products.retain(|product| product.id != id);
        if self
            .edit_target
            .as_ref()
            .is_some_and(|target| target.id == id)
        {
            self.edit_target = None;
        }
        self.load_all(store).await
    }

    /// Selects the collection entry with `id` for editing. Returns false when
    /// no such entry exists, e.g. it was deleted before the click landed.
    pub fn select_for_edit(&mut self, id: ProductId) -> bool {
        match self.products.iter().find(|product| product.id == id) {
            Some(product) => {
                self.edit_target = Some(product.clone());
                true
            }
            None => false,
        }
    }

    /// `None` means create mode.
    pub fn set_edit_target(&mut self, target: Option<Product>) {
        self.edit_target = target;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
