use serde::Deserialize;
use utoipa::ToSchema;

/// Query filters for the product collection. Both default to "no filter" so
/// the admin screens see every row while storefront callers can ask for
/// `?isFeatured=true&isArchived=false`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}
