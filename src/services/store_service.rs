use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

use crate::{
    dto::stores::UpsertStoreRequest,
    entity::stores::{ActiveModel, Entity as Stores, Model as StoreModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Store,
    state::AppState,
};

pub async fn get_store(state: &AppState, id: Uuid) -> AppResult<Option<Store>> {
    let store = Stores::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(store_from_entity);
    Ok(store)
}

pub async fn create_store(
    state: &AppState,
    user: &AuthUser,
    payload: UpsertStoreRequest,
) -> AppResult<Store> {
    let name = payload.validate()?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        user_id: Set(user.user_id.clone()),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let store = active.insert(&state.orm).await?;

    tracing::info!(store_id = %store.id, "store created");
    Ok(store_from_entity(store))
}

pub async fn update_store(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpsertStoreRequest,
) -> AppResult<Store> {
    let name = payload.validate()?;
    let existing = owned_store(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now().into());
    let store = active.update(&state.orm).await?;

    Ok(store_from_entity(store))
}

pub async fn delete_store(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<Store> {
    let existing = owned_store(state, user, id).await?;

    // Fails at the database while reference rows or products still point at
    // the store; surfaced as the generic 500.
    Stores::delete_by_id(id).exec(&state.orm).await?;

    tracing::info!(store_id = %id, "store deleted");
    Ok(store_from_entity(existing))
}

async fn owned_store(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<StoreModel> {
    let store = Stores::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;
    if store.user_id != user.user_id {
        return Err(AppError::Unauthorized);
    }
    Ok(store)
}

pub(crate) fn store_from_entity(model: StoreModel) -> Store {
    Store {
        id: model.id,
        name: model.name,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
