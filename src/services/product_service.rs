use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::products::{UpsertProductRequest, ValidProduct},
    entity::{
        images,
        products::{self, Entity as Products, Model as ProductModel},
        Images,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Image, Product, ProductDetail, ProductWithImages},
    reference,
    routes::params::ProductListQuery,
    services::{authz::ensure_store_owner, reference_service},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    store_id: Uuid,
    query: ProductListQuery,
) -> AppResult<Vec<ProductWithImages>> {
    let mut finder = Products::find()
        .filter(products::Column::StoreId.eq(store_id))
        .order_by_desc(products::Column::CreatedAt);

    if let Some(featured) = query.is_featured {
        finder = finder.filter(products::Column::IsFeatured.eq(featured));
    }
    if let Some(archived) = query.is_archived {
        finder = finder.filter(products::Column::IsArchived.eq(archived));
    }

    let rows = finder.find_with_related(Images).all(&state.orm).await?;

    Ok(rows
        .into_iter()
        .map(|(product, imgs)| ProductWithImages {
            product: product_from_entity(product),
            images: imgs.into_iter().map(image_from_entity).collect(),
        })
        .collect())
}

/// Single product with its images and every referenced lookup row, matching
/// the include set the storefront renders from.
pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<Option<ProductDetail>> {
    let Some(model) = Products::find_by_id(id).one(&state.orm).await? else {
        return Ok(None);
    };

    let imgs = Images::find()
        .filter(images::Column::ProductId.eq(id))
        .order_by_asc(images::Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let category = reference_service::get(state, &reference::CATEGORIES, model.category_id).await?;
    let color = reference_service::get(state, &reference::COLORS, model.color_id).await?;
    let condition =
        reference_service::get(state, &reference::CONDITIONS, model.condition_id).await?;
    let drive_type =
        reference_service::get(state, &reference::DRIVE_TYPES, model.drive_type_id).await?;
    let engine_volume =
        reference_service::get(state, &reference::ENGINE_VOLUMES, model.engine_volume_id).await?;
    let fuel_type =
        reference_service::get(state, &reference::FUEL_TYPES, model.fuel_type_id).await?;
    let location = reference_service::get(state, &reference::LOCATIONS, model.location_id).await?;
    let make = reference_service::get(state, &reference::MAKES, model.make_id).await?;
    let model_row = reference_service::get(state, &reference::MODELS, model.model_id).await?;
    let option = reference_service::get(state, &reference::OPTIONS, model.option_id).await?;
    let passenger =
        reference_service::get(state, &reference::PASSENGERS, model.passenger_id).await?;
    let steering = reference_service::get(state, &reference::STEERINGS, model.steering_id).await?;
    let transmission =
        reference_service::get(state, &reference::TRANSMISSIONS, model.transmission_id).await?;
    let year = reference_service::get(state, &reference::YEARS, model.year_id).await?;

    Ok(Some(ProductDetail {
        product: product_from_entity(model),
        images: imgs.into_iter().map(image_from_entity).collect(),
        category,
        color,
        condition,
        drive_type,
        engine_volume,
        fuel_type,
        location,
        make,
        model: model_row,
        option,
        passenger,
        steering,
        transmission,
        year,
    }))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: UpsertProductRequest,
) -> AppResult<ProductWithImages> {
    let valid = payload.validate()?;
    ensure_store_owner(&state.pool, store_id, &user.user_id).await?;

    let txn = state.orm.begin().await?;

    let product = product_active(Uuid::new_v4(), store_id, &valid)
        .insert(&txn)
        .await?;
    let mut created_images = Vec::with_capacity(valid.images.len());
    for image in &valid.images {
        let img = images::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            url: Set(image.url.clone()),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?;
        created_images.push(img);
    }

    txn.commit().await?;

    tracing::info!(product_id = %product.id, store_id = %store_id, "product created");
    Ok(ProductWithImages {
        product: product_from_entity(product),
        images: created_images.into_iter().map(image_from_entity).collect(),
    })
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpsertProductRequest,
) -> AppResult<ProductWithImages> {
    let valid = payload.validate()?;
    ensure_store_owner(&state.pool, store_id, &user.user_id).await?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("product {id} not found")))?;

    // Scalar replace plus wholesale image swap, in one transaction so a
    // failure cannot strand the product without images.
    let txn = state.orm.begin().await?;

    Images::delete_many()
        .filter(images::Column::ProductId.eq(existing.id))
        .exec(&txn)
        .await?;

    let mut active = product_active(existing.id, store_id, &valid);
    active.created_at = Set(existing.created_at);
    active.updated_at = Set(Utc::now().into());
    let product = active.update(&txn).await?;

    let mut new_images = Vec::with_capacity(valid.images.len());
    for image in &valid.images {
        let img = images::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            url: Set(image.url.clone()),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?;
        new_images.push(img);
    }

    txn.commit().await?;

    Ok(ProductWithImages {
        product: product_from_entity(product),
        images: new_images.into_iter().map(image_from_entity).collect(),
    })
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<Product> {
    ensure_store_owner(&state.pool, store_id, &user.user_id).await?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("product {id} not found")))?;

    // Images go with it via the cascade.
    Products::delete_by_id(id).exec(&state.orm).await?;

    tracing::info!(product_id = %id, store_id = %store_id, "product deleted");
    Ok(product_from_entity(existing))
}

fn product_active(id: Uuid, store_id: Uuid, valid: &ValidProduct) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(id),
        store_id: Set(store_id),
        name: Set(valid.name.clone()),
        price: Set(valid.price),
        is_featured: Set(valid.is_featured),
        is_archived: Set(valid.is_archived),
        category_id: Set(valid.category_id),
        color_id: Set(valid.color_id),
        condition_id: Set(valid.condition_id),
        drive_type_id: Set(valid.drive_type_id),
        engine_volume_id: Set(valid.engine_volume_id),
        fuel_type_id: Set(valid.fuel_type_id),
        location_id: Set(valid.location_id),
        make_id: Set(valid.make_id),
        model_id: Set(valid.model_id),
        option_id: Set(valid.option_id),
        passenger_id: Set(valid.passenger_id),
        steering_id: Set(valid.steering_id),
        transmission_id: Set(valid.transmission_id),
        year_id: Set(valid.year_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        store_id: model.store_id,
        name: model.name,
        price: model.price,
        is_featured: model.is_featured,
        is_archived: model.is_archived,
        category_id: model.category_id,
        color_id: model.color_id,
        condition_id: model.condition_id,
        drive_type_id: model.drive_type_id,
        engine_volume_id: model.engine_volume_id,
        fuel_type_id: model.fuel_type_id,
        location_id: model.location_id,
        make_id: model.make_id,
        model_id: model.model_id,
        option_id: model.option_id,
        passenger_id: model.passenger_id,
        steering_id: model.steering_id,
        transmission_id: model.transmission_id,
        year_id: model.year_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn image_from_entity(model: images::Model) -> Image {
    Image {
        id: model.id,
        product_id: model.product_id,
        url: model.url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
