use chrono::{DateTime, Utc};
use crud::{Creatable, Entity, Resource, contains_ignore_case, hex_id};
use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Currencies prices and documents can be expressed in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    Try,
    Usd,
    Eur,
    Gbp,
}

/// A price in one currency. The amount is a decimal string, e.g. `"1250.00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPrice {
    pub currency: Currency,
    #[validate(custom(function = "crud::validation::decimal_string"))]
    #[schema(example = "1250.00")]
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct VariantAttribute {
    #[validate(length(min = 1))]
    #[schema(example = "color")]
    pub key: String,
    #[schema(example = "red")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductVariant {
    pub name: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub attributes: Vec<VariantAttribute>,
    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<ProductPrice>,
}

/// Product entity stored in the `products` collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id", with = "crud::hex_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[serde(default, with = "crud::hex_id::option")]
    pub realm_id: Option<String>,
    #[schema(example = "Koltuk")]
    pub name: String,
    pub description: Option<String>,
    #[serde(default, with = "crud::hex_id::option")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub base_prices: Vec<ProductPrice>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(with = "crud::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crud::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub category_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    #[validate(nested)]
    pub base_prices: Vec<ProductPrice>,
    #[serde(default)]
    #[validate(custom(function = "validate_urls"))]
    pub image_urls: Vec<String>,
}

/// Partial update; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub category_id: Option<String>,
    #[validate(nested)]
    pub variants: Option<Vec<ProductVariant>>,
    #[validate(nested)]
    pub base_prices: Option<Vec<ProductPrice>>,
    #[validate(custom(function = "validate_urls"))]
    pub image_urls: Option<Vec<String>>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Exact category id
    #[validate(custom(function = "crud::validation::object_id"))]
    pub category_id: Option<String>,
}

fn validate_urls(urls: &[String]) -> Result<(), validator::ValidationError> {
    if urls.iter().any(|url| url.trim().is_empty()) {
        return Err(validator::ValidationError::new("image_urls")
            .with_message("image URLs must not be empty".into()));
    }
    Ok(())
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Product {
    const NAME: &'static str = "Product";
    const DEFAULT_SORT: &'static str = "createdAt";
    type Update = UpdateProduct;
    type Filter = ProductFilter;

    fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category_id) = update.category_id {
            self.category_id = Some(category_id);
        }
        if let Some(variants) = update.variants {
            self.variants = variants;
        }
        if let Some(base_prices) = update.base_prices {
            self.base_prices = base_prices;
        }
        if let Some(image_urls) = update.image_urls {
            self.image_urls = image_urls;
        }
        self.updated_at = Utc::now();
    }

    fn filter_document(filter: &ProductFilter) -> Document {
        let mut query = Document::new();
        if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
            query.insert("name", contains_ignore_case(name));
        }
        if let Some(category_id) = &filter.category_id {
            query.insert("categoryId", hex_id::to_bson(category_id));
        }
        query
    }
}

impl Creatable for Product {
    type Create = CreateProduct;

    fn from_create(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new().to_hex(),
            realm_id: None,
            name: input.name,
            description: input.description,
            category_id: input.category_id,
            variants: input.variants,
            base_prices: input.base_prices,
            image_urls: input.image_urls,
            created_at: now,
            updated_at: now,
        }
    }
}
