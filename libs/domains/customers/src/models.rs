use chrono::{DateTime, Utc};
use crud::{Creatable, Entity, Resource, contains_ignore_case, text_search};
use mongodb::bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Fields matched by the free-text `search` parameter
pub const SEARCH_FIELDS: &[&str] = &["firstName", "lastName", "email", "phone", "companyName"];

/// Customer entity stored in the `customers` collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", alias = "id", with = "crud::hex_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[serde(default, with = "crud::hex_id::option")]
    pub realm_id: Option<String>,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub company_name: Option<String>,
    #[serde(default)]
    pub is_corporate: bool,
    /// Lowercase; unique across customers when present
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "crud::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crud::datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub company_name: Option<String>,
    #[serde(default)]
    pub is_corporate: bool,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub is_corporate: Option<bool>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub tax_number: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Query filters for listing customers
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CustomerFilter {
    /// Substring of first/last name, email, phone or company name
    pub search: Option<String>,
    pub is_corporate: Option<bool>,
    pub is_active: Option<bool>,
    /// Case-insensitive substring of the city
    pub city: Option<String>,
}

impl Entity for Customer {
    const COLLECTION: &'static str = "customers";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Customer {
    const NAME: &'static str = "Customer";
    const DEFAULT_SORT: &'static str = "createdAt";
    const CONFLICT_MESSAGE: &'static str = "Customer with this email already exists";
    type Update = UpdateCustomer;
    type Filter = CustomerFilter;

    fn apply_update(&mut self, update: UpdateCustomer) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(is_corporate) = update.is_corporate {
            self.is_corporate = is_corporate;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(email) = update.email {
            self.email = Some(email.to_lowercase());
        }
        if let Some(company_name) = update.company_name {
            self.company_name = Some(company_name);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(city) = update.city {
            self.city = Some(city);
        }
        if let Some(postal_code) = update.postal_code {
            self.postal_code = Some(postal_code);
        }
        if let Some(country) = update.country {
            self.country = Some(country);
        }
        if let Some(tax_number) = update.tax_number {
            self.tax_number = Some(tax_number);
        }
        if let Some(contact_person) = update.contact_person {
            self.contact_person = Some(contact_person);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
    }

    fn filter_document(filter: &CustomerFilter) -> Document {
        let mut query = match filter.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => text_search(search, SEARCH_FIELDS),
            None => Document::new(),
        };
        if let Some(is_corporate) = filter.is_corporate {
            query.insert("isCorporate", is_corporate);
        }
        if let Some(is_active) = filter.is_active {
            query.insert("isActive", is_active);
        }
        if let Some(city) = filter.city.as_deref().filter(|c| !c.is_empty()) {
            query.insert("city", contains_ignore_case(city));
        }
        query
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        self.email.clone().map(|email| ("email", email))
    }
}

impl Creatable for Customer {
    type Create = CreateCustomer;

    fn from_create(input: CreateCustomer) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new().to_hex(),
            realm_id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            company_name: input.company_name,
            is_corporate: input.is_corporate,
            email: input.email.map(|e| e.to_lowercase()),
            phone: input.phone,
            address: input.address,
            city: input.city,
            postal_code: input.postal_code,
            country: input.country,
            tax_number: input.tax_number,
            contact_person: input.contact_person,
            notes: input.notes,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
