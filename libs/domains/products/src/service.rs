//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::pagination::{PageInfo, PageRequest};
use crate::repository::ProductRepository;

/// One page of products with its navigation metadata
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_count: u64,
    pub page_info: PageInfo,
}

/// Product service: input validation, id parsing and pagination over a repository.
///
/// Holds no state besides the repository handle, so it is shared behind an `Arc`.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Fetch the requested page and the total count concurrently.
    #[instrument(skip(self))]
    pub async fn list(&self, request: PageRequest) -> ProductResult<ProductPage> {
        let (items, total_count) =
            futures_util::try_join!(self.repository.list(request), self.repository.count())?;

        let page_info = PageInfo::new(total_count, &request);
        Ok(ProductPage {
            items,
            total_count,
            page_info,
        })
    }

    /// `None` when no product has this id, including ids that are not UUIDs.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        match parse_id(id) {
            Some(id) => self.repository.get_by_id(id).await,
            None => Ok(None),
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        let uuid = parse_id(id).ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        self.repository.update(uuid, input).await
    }

    /// Deleting an unknown id succeeds and returns `false`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<bool> {
        let deleted = match parse_id(id) {
            Some(uuid) => self.repository.delete(uuid).await?,
            None => false,
        };

        if deleted {
            tracing::info!(product_id = %id, "Product deleted");
        } else {
            tracing::warn!(product_id = %id, "Delete requested for unknown product");
        }
        Ok(deleted)
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::try_parse(id.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::SortOrder;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn sample(title: &str, price: f64) -> Product {
        Product::new(CreateProduct {
            title: title.to_string(),
            description: String::new(),
            price,
            stock: 3,
            category: "almacen".to_string(),
            code: None,
            status: true,
            thumbnails: vec![],
        })
    }

    #[tokio::test]
    async fn test_list_combines_items_and_page_info() {
        let mut mock_repo = MockProductRepository::new();
        let request = PageRequest::new(10, 2, Some(SortOrder::Asc)).unwrap();
        let items = vec![sample("a", 1.0), sample("b", 2.0)];
        let returned = items.clone();

        mock_repo
            .expect_list()
            .with(eq(request))
            .times(1)
            .returning(move |_| Ok(returned.clone()));
        mock_repo.expect_count().times(1).returning(|| Ok(25));

        let service = ProductService::new(mock_repo);
        let page = service.list(request).await.unwrap();

        assert_eq!(page.items, items);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.page_info.total_pages, 3);
        assert_eq!(page.page_info.prev_page, Some(1));
        assert_eq!(page.page_info.next_page, Some(3));
    }

    #[tokio::test]
    async fn test_list_propagates_store_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_list().returning(|_| Ok(vec![]));
        mock_repo
            .expect_count()
            .returning(|| Err(ProductError::Database("socket closed".into())));

        let service = ProductService::new(mock_repo);
        let err = service.list(PageRequest::default()).await.unwrap_err();
        assert!(matches!(err, ProductError::Database(_)));
    }

    #[tokio::test]
    async fn test_get_by_id_returns_stored_product() {
        let mut mock_repo = MockProductRepository::new();
        let product = sample("Yerba", 4500.0);
        let id = product.id;
        let returned = product.clone();

        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ProductService::new(mock_repo);
        let found = service.get_by_id(&id.to_string()).await.unwrap();
        assert_eq!(found, Some(product));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let found = service.get_by_id(&Uuid::now_v7().to_string()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_malformed_skips_store() {
        // No expectations: any repository call would panic
        let service = ProductService::new(MockProductRepository::new());
        let found = service.get_by_id("nonexistent").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_store() {
        let service = ProductService::new(MockProductRepository::new());
        let input = CreateProduct {
            title: String::new(),
            description: String::new(),
            price: -5.0,
            stock: 0,
            category: "almacen".into(),
            code: None,
            status: true,
            thumbnails: vec![],
        };

        let err = service.create(input).await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_create_maps_store_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(ProductError::Database("not primary".into())));

        let service = ProductService::new(mock_repo);
        let input = CreateProduct {
            title: "Termo".into(),
            description: String::new(),
            price: 100.0,
            stock: 1,
            category: "bazar".into(),
            code: None,
            status: true,
            thumbnails: vec![],
        };
        assert!(matches!(
            service.create(input).await,
            Err(ProductError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_update()
            .withf(move |got, _| *got == id)
            .returning(|id, _| Err(ProductError::NotFound(id.to_string())));

        let service = ProductService::new(mock_repo);
        let err = service
            .update(&id.to_string(), UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_malformed_id_is_not_found() {
        let service = ProductService::new(MockProductRepository::new());
        let err = service
            .update("abc", UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_existing_returns_true() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        assert!(service.delete(&id.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        assert!(!service.delete(&Uuid::now_v7().to_string()).await.unwrap());
        assert!(!service.delete("not-a-uuid").await.unwrap());
    }
}
