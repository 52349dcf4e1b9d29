use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn default_status() -> bool {
    true
}

/// Ids are stored and exchanged as hyphenated text, whatever the serializer's
/// human-readable setting, so BSON filters built from `id.to_string()` match.
mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&id.hyphenated())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Product entity as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// UUID v7, stored as `_id`
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    /// Merchant code, unique when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Whether the product is listed for sale
    #[serde(default = "default_status")]
    pub status: bool,
    /// Image URLs
    #[serde(default)]
    pub thumbnails: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(max = 50))]
    pub code: Option<String>,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

/// DTO for updating an existing product; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 50))]
    pub code: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category: input.category,
            code: input.code,
            status: input.status,
            thumbnails: input.thumbnails,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(code) = update.code {
            self.code = Some(code);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(thumbnails) = update.thumbnails {
            self.thumbnails = thumbnails;
        }
        self.updated_at = Utc::now();
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// `{"message": "..."}` body returned by the mutating routes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateProduct {
        CreateProduct {
            title: "Yerba mate".into(),
            description: "1kg".into(),
            price: 4500.0,
            stock: 12,
            category: "almacen".into(),
            code: Some("YM-1".into()),
            status: true,
            thumbnails: vec![],
        }
    }

    #[test]
    fn test_new_product_gets_v7_id_and_timestamps() {
        let product = Product::new(create_input());
        assert_eq!(product.id.get_version_num(), 7);
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(product.title, "Yerba mate");
    }

    #[test]
    fn test_apply_update_only_touches_given_fields() {
        let mut product = Product::new(create_input());
        let before = product.clone();

        product.apply_update(UpdateProduct {
            price: Some(5000.0),
            stock: Some(0),
            ..Default::default()
        });

        assert_eq!(product.price, 5000.0);
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
        assert_eq!(product.title, before.title);
        assert_eq!(product.code, before.code);
        assert!(product.updated_at >= before.updated_at);
    }

    #[test]
    fn test_create_product_defaults() {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "title": "Termo",
            "price": 30000,
            "category": "bazar"
        }))
        .unwrap();
        assert_eq!(input.stock, 0);
        assert!(input.status);
        assert!(input.thumbnails.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_validation() {
        let mut input = create_input();
        input.price = -1.0;
        input.title = String::new();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("title"));
    }

    #[test]
    fn test_update_product_rejects_negative_stock() {
        let update = UpdateProduct {
            stock: Some(-3),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_product_serializes_id_as_underscore_id() {
        let product = Product::new(create_input());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], product.id.to_string());
        assert!(json.get("id").is_none());

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }
}
