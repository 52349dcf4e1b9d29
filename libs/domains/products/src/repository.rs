use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::pagination::PageRequest;

/// Persistence contract for products.
///
/// Implementations own id generation and uniqueness; callers validate input first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// One page of products, ordered by price when the request has a sort
    async fn list(&self, page: PageRequest) -> ProductResult<Vec<Product>>;

    /// Total number of products
    async fn count(&self) -> ProductResult<u64>;

    /// Merge `input` onto the stored product. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns whether a product was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}
