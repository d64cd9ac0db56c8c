//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Business record endpoints, each nested at its mount point
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Records API",
        version = "0.1.0",
        description = "Customers, products, offers and orders behind bearer-token auth",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/customer", api = domain_customers::ApiDoc),
        (path = "/product", api = domain_products::ApiDoc),
        (path = "/offer", api = domain_offers::ApiDoc),
        (path = "/order", api = domain_orders::ApiDoc)
    ),
    modifiers(&BearerAuth)
)]
struct RecordsDoc;

/// Registers the `bearer_auth` scheme referenced by protected operations
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Full document: record endpoints plus the `/auth` routes, which carry
/// their absolute paths and are merged rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = RecordsDoc::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc
    }
}
