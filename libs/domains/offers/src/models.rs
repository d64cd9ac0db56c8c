use chrono::{DateTime, Utc};
use crud::{Creatable, Entity, Resource, hex_id, text_search};
use domain_products::Currency;
use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Fields matched by the free-text `search` parameter
pub const SEARCH_FIELDS: &[&str] = &["offerNumber", "customerNote", "internalNote"];

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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OfferStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

/// One product line on an offer or order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[validate(custom(function = "crud::validation::object_id"))]
    #[serde(with = "crud::hex_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub product_name: String,
    pub variant_id: Option<String>,
    pub variant_name: Option<String>,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
    /// Percentage off the unit price
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
}

/// Offer entity stored in the `offers` collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id", alias = "id", with = "crud::hex_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[serde(default, with = "crud::hex_id::option")]
    pub realm_id: Option<String>,
    #[serde(with = "crud::hex_id")]
    pub customer_id: String,
    /// Unique across offers
    #[schema(example = "OF-2026-001")]
    pub offer_number: String,
    #[serde(with = "crud::datetime")]
    pub date: DateTime<Utc>,
    #[serde(with = "crud::datetime")]
    pub valid_until: DateTime<Utc>,
    pub status: OfferStatus,
    pub currency: Currency,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub customer_note: Option<String>,
    pub internal_note: Option<String>,
    /// Order created from this offer, if any
    #[serde(default, with = "crud::hex_id::option")]
    pub order_id: Option<String>,
    #[serde(with = "crud::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crud::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOffer {
    #[validate(custom(function = "crud::validation::object_id"))]
    pub customer_id: String,
    #[validate(length(min = 1, max = 100))]
    pub offer_number: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(deserialize_with = "crud::datetime::deserialize")]
    #[schema(example = "2026-03-01")]
    pub date: DateTime<Utc>,
    #[serde(deserialize_with = "crud::datetime::deserialize")]
    #[schema(example = "2026-03-31")]
    pub valid_until: DateTime<Utc>,
    pub status: OfferStatus,
    pub currency: Currency,
    #[validate(nested)]
    pub items: Vec<LineItem>,
    pub customer_note: Option<String>,
    pub internal_note: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOffer {
    #[validate(custom(function = "crud::validation::object_id"))]
    pub customer_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub offer_number: Option<String>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub valid_until: Option<DateTime<Utc>>,
    pub status: Option<OfferStatus>,
    pub currency: Option<Currency>,
    #[validate(nested)]
    pub items: Option<Vec<LineItem>>,
    pub customer_note: Option<String>,
    pub internal_note: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub order_id: Option<String>,
}

/// Query filters for listing offers
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OfferFilter {
    /// Substring of the offer number or either note
    pub search: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub customer_id: Option<String>,
    pub status: Option<OfferStatus>,
}

impl Entity for Offer {
    const COLLECTION: &'static str = "offers";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Offer {
    const NAME: &'static str = "Offer";
    const DEFAULT_SORT: &'static str = "date";
    const PAGE_INCLUDES_LIMIT: bool = true;
    const CONFLICT_MESSAGE: &'static str = "Offer with this number already exists";
    type Update = UpdateOffer;
    type Filter = OfferFilter;

    fn apply_update(&mut self, update: UpdateOffer) {
        if let Some(customer_id) = update.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(offer_number) = update.offer_number {
            self.offer_number = offer_number;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(valid_until) = update.valid_until {
            self.valid_until = valid_until;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(items) = update.items {
            self.items = items;
        }
        if let Some(customer_note) = update.customer_note {
            self.customer_note = Some(customer_note);
        }
        if let Some(internal_note) = update.internal_note {
            self.internal_note = Some(internal_note);
        }
        if let Some(order_id) = update.order_id {
            self.order_id = Some(order_id);
        }
        self.updated_at = Utc::now();
    }

    fn filter_document(filter: &OfferFilter) -> Document {
        let mut query = match filter.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => text_search(search, SEARCH_FIELDS),
            None => Document::new(),
        };
        if let Some(customer_id) = &filter.customer_id {
            query.insert("customerId", hex_id::to_bson(customer_id));
        }
        if let Some(status) = filter.status {
            query.insert("status", status.to_string());
        }
        query
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("offerNumber", self.offer_number.clone()))
    }
}

impl Creatable for Offer {
    type Create = CreateOffer;

    fn from_create(input: CreateOffer) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new().to_hex(),
            realm_id: None,
            customer_id: input.customer_id,
            offer_number: input.offer_number,
            date: input.date,
            valid_until: input.valid_until,
            status: input.status,
            currency: input.currency,
            items: input.items,
            customer_note: input.customer_note,
            internal_note: input.internal_note,
            order_id: input.order_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body() -> serde_json::Value {
        json!({
            "customerId": "507f1f77bcf86cd799439011",
            "offerNumber": "OF-2026-001",
            "date": "2026-03-01T00:00:00Z",
            "validUntil": "2026-03-31T00:00:00Z",
            "status": "draft",
            "currency": "EUR",
            "items": [{
                "productId": "507f1f77bcf86cd799439012",
                "productName": "Koltuk",
                "quantity": 2,
                "unitPrice": 100.0,
                "discount": 10.0,
                "totalPrice": 180.0
            }]
        })
    }

    #[test]
    fn test_valid_offer() {
        let input: CreateOffer = serde_json::from_value(create_body()).unwrap();
        assert!(input.validate().is_ok());

        let offer = Offer::from_create(input);
        assert_eq!(offer.unique_key(), Some(("offerNumber", "OF-2026-001".into())));
        assert_eq!(offer.currency, Currency::Eur);
    }

    #[test]
    fn test_zero_quantity_fails_validation() {
        let mut body = create_body();
        body["items"][0]["quantity"] = json!(0);
        let input: CreateOffer = serde_json::from_value(body).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_bad_product_id_fails_validation() {
        let mut body = create_body();
        body["items"][0]["productId"] = json!("xyz");
        let input: CreateOffer = serde_json::from_value(body).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_missing_status_is_a_parse_error() {
        let mut body = create_body();
        body.as_object_mut().unwrap().remove("status");
        assert!(serde_json::from_value::<CreateOffer>(body).is_err());
    }

    #[test]
    fn test_filter_document() {
        let filter = OfferFilter {
            search: None,
            customer_id: Some("507f1f77bcf86cd799439011".into()),
            status: Some(OfferStatus::Accepted),
        };
        let query = Offer::filter_document(&filter);
        assert_eq!(
            query.get_object_id("customerId").unwrap(),
            ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()
        );
        assert_eq!(query.get_str("status").unwrap(), "accepted");
        assert!(!query.contains_key("$or"));
    }

    #[test]
    fn test_date_only_values_are_midnight_utc() {
        let mut body = create_body();
        body["date"] = json!("2025-12-03");
        body["validUntil"] = json!("2026-01-02");
        let offer = Offer::from_create(serde_json::from_value(body).unwrap());
        assert_eq!(offer.date.to_rfc3339(), "2025-12-03T00:00:00+00:00");

        let update: UpdateOffer =
            serde_json::from_value(json!({"validUntil": "2026-02-01"})).unwrap();
        assert!(update.date.is_none());
        assert_eq!(update.valid_until.unwrap().to_rfc3339(), "2026-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_stored_offer_uses_native_bson_types() {
        use mongodb::bson::{self, Bson};

        let offer = Offer::from_create(serde_json::from_value(create_body()).unwrap());
        let stored = bson::to_raw_document_buf(&offer).unwrap().to_document().unwrap();
        assert!(matches!(stored.get("_id"), Some(Bson::ObjectId(_))));
        assert!(matches!(stored.get("customerId"), Some(Bson::ObjectId(_))));
        assert!(matches!(stored.get("date"), Some(Bson::DateTime(_))));
        assert!(matches!(stored.get("validUntil"), Some(Bson::DateTime(_))));
        let item = stored.get_array("items").unwrap()[0].as_document().unwrap();
        assert!(matches!(item.get("productId"), Some(Bson::ObjectId(_))));
        assert_eq!(stored.get("orderId"), Some(&Bson::Null));

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["customerId"], "507f1f77bcf86cd799439011");
        assert_eq!(json["date"], "2026-03-01T00:00:00Z");
    }
}
