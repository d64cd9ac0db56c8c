use chrono::{DateTime, Utc};
use crud::{Entity, Resource, hex_id, text_search};
use domain_offers::LineItem;
use domain_products::Currency;
use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Fields matched by the free-text `search` parameter
pub const SEARCH_FIELDS: &[&str] = &["orderNumber", "customerNote", "internalNote"];

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
pub enum OrderStatus {
    Draft,
    Confirmed,
    InProduction,
    Ready,
    Shipped,
    Completed,
    Cancelled,
}

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
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// Order entity stored in the `orders` collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id", with = "crud::hex_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[serde(default, with = "crud::hex_id::option")]
    pub realm_id: Option<String>,
    #[serde(with = "crud::hex_id")]
    pub customer_id: String,
    #[serde(default, with = "crud::hex_id::option")]
    pub source_offer_id: Option<String>,
    /// `SO-<year>-<seq>`, assigned on create
    #[schema(example = "SO-2026-001")]
    pub order_number: String,
    #[serde(with = "crud::datetime")]
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub currency: Currency,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub delivery_days: Option<i64>,
    #[serde(default, with = "crud::datetime::option")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_text: Option<String>,
    pub payment_title: Option<String>,
    pub payment_details: Option<String>,
    pub payment_status: PaymentStatus,
    pub customer_note: Option<String>,
    pub internal_note: Option<String>,
    pub approved_by_name: Option<String>,
    pub approved_by_title: Option<String>,
    #[serde(default, with = "crud::datetime::option")]
    pub approved_at: Option<DateTime<Utc>>,
    pub signature_url: Option<String>,
    #[serde(with = "crud::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crud::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Create body. The order number is generated, never taken from input.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[validate(custom(function = "crud::validation::object_id"))]
    pub customer_id: String,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub source_offer_id: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(deserialize_with = "crud::datetime::deserialize")]
    #[schema(example = "2025-12-03")]
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub currency: Currency,
    #[validate(nested)]
    pub items: Vec<LineItem>,
    #[validate(range(min = 0))]
    pub delivery_days: Option<i64>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_text: Option<String>,
    pub payment_title: Option<String>,
    pub payment_details: Option<String>,
    pub payment_status: PaymentStatus,
    pub customer_note: Option<String>,
    pub internal_note: Option<String>,
    pub approved_by_name: Option<String>,
    pub approved_by_title: Option<String>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub approved_at: Option<DateTime<Utc>>,
    pub signature_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    #[validate(custom(function = "crud::validation::object_id"))]
    pub customer_id: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub source_offer_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub order_number: Option<String>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub date: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
    pub currency: Option<Currency>,
    #[validate(nested)]
    pub items: Option<Vec<LineItem>>,
    #[validate(range(min = 0))]
    pub delivery_days: Option<i64>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_text: Option<String>,
    pub payment_title: Option<String>,
    pub payment_details: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub customer_note: Option<String>,
    pub internal_note: Option<String>,
    pub approved_by_name: Option<String>,
    pub approved_by_title: Option<String>,
    #[serde(default, deserialize_with = "crud::datetime::option::deserialize")]
    pub approved_at: Option<DateTime<Utc>>,
    pub signature_url: Option<String>,
}

/// Query filters for listing orders
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OrderFilter {
    /// Substring of the order number or either note
    pub search: Option<String>,
    #[validate(custom(function = "crud::validation::object_id"))]
    pub customer_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl Order {
    /// Build a new order under an already allocated `order_number`
    pub fn new(input: CreateOrder, order_number: String) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new().to_hex(),
            realm_id: None,
            customer_id: input.customer_id,
            source_offer_id: input.source_offer_id,
            order_number,
            date: input.date,
            status: input.status,
            currency: input.currency,
            items: input.items,
            delivery_days: input.delivery_days,
            delivery_date: input.delivery_date,
            delivery_text: input.delivery_text,
            payment_title: input.payment_title,
            payment_details: input.payment_details,
            payment_status: input.payment_status,
            customer_note: input.customer_note,
            internal_note: input.internal_note,
            approved_by_name: input.approved_by_name,
            approved_by_title: input.approved_by_title,
            approved_at: input.approved_at,
            signature_url: input.signature_url,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Order {
    const NAME: &'static str = "Order";
    const DEFAULT_SORT: &'static str = "date";
    const PAGE_INCLUDES_LIMIT: bool = true;
    const CONFLICT_MESSAGE: &'static str = "Order with this number already exists";
    type Update = UpdateOrder;
    type Filter = OrderFilter;

    fn apply_update(&mut self, update: UpdateOrder) {
        if let Some(customer_id) = update.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(source_offer_id) = update.source_offer_id {
            self.source_offer_id = Some(source_offer_id);
        }
        if let Some(order_number) = update.order_number {
            self.order_number = order_number;
        }
        if let Some(date) = update.date {
            self.date = date;
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
        if let Some(delivery_days) = update.delivery_days {
            self.delivery_days = Some(delivery_days);
        }
        if let Some(delivery_date) = update.delivery_date {
            self.delivery_date = Some(delivery_date);
        }
        if let Some(delivery_text) = update.delivery_text {
            self.delivery_text = Some(delivery_text);
        }
        if let Some(payment_title) = update.payment_title {
            self.payment_title = Some(payment_title);
        }
        if let Some(payment_details) = update.payment_details {
            self.payment_details = Some(payment_details);
        }
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(customer_note) = update.customer_note {
            self.customer_note = Some(customer_note);
        }
        if let Some(internal_note) = update.internal_note {
            self.internal_note = Some(internal_note);
        }
        if let Some(approved_by_name) = update.approved_by_name {
            self.approved_by_name = Some(approved_by_name);
        }
        if let Some(approved_by_title) = update.approved_by_title {
            self.approved_by_title = Some(approved_by_title);
        }
        if let Some(approved_at) = update.approved_at {
            self.approved_at = Some(approved_at);
        }
        if let Some(signature_url) = update.signature_url {
            self.signature_url = Some(signature_url);
        }
        self.updated_at = Utc::now();
    }

    fn filter_document(filter: &OrderFilter) -> Document {
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
        if let Some(payment_status) = filter.payment_status {
            query.insert("paymentStatus", payment_status.to_string());
        }
        query
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("orderNumber", self.order_number.clone()))
    }
}
