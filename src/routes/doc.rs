use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        products::{ImageInput, UpsertProductRequest},
        reference::UpsertReferenceRequest,
        stores::UpsertStoreRequest,
    },
    models::{Image, Product, ProductDetail, ProductWithImages, ReferenceRow, Store},
    routes::{health, params, products, reference, stores},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
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

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        stores::create_store,
        stores::get_store,
        stores::update_store,
        stores::delete_store,
        reference::list_references,
        reference::get_reference,
        reference::create_reference,
        reference::update_reference,
        reference::delete_reference,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
    ),
    components(
        schemas(
            Store,
            ReferenceRow,
            Product,
            Image,
            ProductWithImages,
            ProductDetail,
            ImageInput,
            UpsertStoreRequest,
            UpsertReferenceRequest,
            UpsertProductRequest,
            params::ProductListQuery,
            health::HealthData,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Stores", description = "Tenant stores"),
        (name = "Reference data", description = "Per-store lookup tables (makes, colors, fuel types, ...)"),
        (name = "Products", description = "Product listings with images"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
