//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::pagination::{PageRequest, SortOrder};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Create the listing and uniqueness indexes. Idempotent.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            // Products without a code are left out of the index
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .name("idx_code_unique".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Product indexes created");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.hyphenated().to_string() }
    }

    /// Price order when requested, then `_id` so pages never overlap.
    /// UUID v7 ids make `_id` order the insertion order.
    fn sort_document(sort: Option<SortOrder>) -> Document {
        match sort {
            Some(SortOrder::Asc) => doc! { "price": 1, "_id": 1 },
            Some(SortOrder::Desc) => doc! { "price": -1, "_id": 1 },
            None => doc! { "_id": 1 },
        }
    }

    fn map_write_error(err: mongodb::error::Error, code: Option<&str>) -> ProductError {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
                ProductError::InvalidParameter(format!(
                    "Ya existe un producto con el código '{}'",
                    code.unwrap_or_default()
                ))
            }
            _ => err.into(),
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection
            .insert_one(&product)
            .await
            .map_err(|e| Self::map_write_error(e, product.code.as_deref()))?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .limit(i64::from(page.limit()))
            .skip(page.offset())
            .sort(Self::sort_document(page.sort()))
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<u64> {
        let total = self.collection.count_documents(doc! {}).await?;
        Ok(total)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let filter = Self::id_filter(id);
        let mut product = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        product.apply_update(input);

        let result = self
            .collection
            .replace_one(filter, &product)
            .await
            .map_err(|e| Self::map_write_error(e, product.code.as_deref()))?;

        // Deleted between the read and the write
        if result.matched_count == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_document_without_sort_uses_id() {
        let sort = MongoProductRepository::sort_document(None);
        assert_eq!(sort, doc! { "_id": 1 });
    }

    #[test]
    fn test_sort_document_by_price() {
        let asc = MongoProductRepository::sort_document(Some(SortOrder::Asc));
        assert_eq!(asc.get_i32("price").unwrap(), 1);

        let desc = MongoProductRepository::sort_document(Some(SortOrder::Desc));
        assert_eq!(desc.get_i32("price").unwrap(), -1);
        assert_eq!(desc.keys().next().map(String::as_str), Some("price"));
    }

    #[test]
    fn test_id_filter_uses_hyphenated_text() {
        let id = Uuid::now_v7();
        let filter = MongoProductRepository::id_filter(id);
        assert_eq!(filter.get_str("_id").unwrap(), id.to_string());
    }
}
