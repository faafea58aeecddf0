use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Wire format keeps the camelCase keys the original dashboard clients expect.

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row from any of the fifteen reference tables. `image_url` is only
/// populated for makes and is omitted from the JSON everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRow {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub price: i64,
    pub is_featured: bool,
    pub is_archived: bool,
    pub category_id: Uuid,
    pub color_id: Uuid,
    pub condition_id: Uuid,
    pub drive_type_id: Uuid,
    pub engine_volume_id: Uuid,
    pub fuel_type_id: Uuid,
    pub location_id: Uuid,
    pub make_id: Uuid,
    pub model_id: Uuid,
    pub option_id: Uuid,
    pub passenger_id: Uuid,
    pub steering_id: Uuid,
    pub transmission_id: Uuid,
    pub year_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<Image>,
}

/// Single-product view with every referenced lookup row loaded, mirroring the
/// `include` the storefront expects. The references are optional only because
/// they are fetched after the product row; in practice the foreign keys
/// guarantee they exist.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<Image>,
    pub category: Option<ReferenceRow>,
    pub color: Option<ReferenceRow>,
    pub condition: Option<ReferenceRow>,
    pub drive_type: Option<ReferenceRow>,
    pub engine_volume: Option<ReferenceRow>,
    pub fuel_type: Option<ReferenceRow>,
    pub location: Option<ReferenceRow>,
    pub make: Option<ReferenceRow>,
    pub model: Option<ReferenceRow>,
    pub option: Option<ReferenceRow>,
    pub passenger: Option<ReferenceRow>,
    pub steering: Option<ReferenceRow>,
    pub transmission: Option<ReferenceRow>,
    pub year: Option<ReferenceRow>,
}
