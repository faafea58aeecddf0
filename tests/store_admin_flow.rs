use storelane_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        products::{ImageInput, UpsertProductRequest},
        reference::UpsertReferenceRequest,
        stores::UpsertStoreRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::ReferenceRow,
    reference::{self, ReferenceMeta},
    services::{product_service, reference_service, store_service},
    state::AppState,
};
use uuid::Uuid;

// Integration flow: owner creates a store and reference data, builds a product,
// replaces its image set, and runs into the guard rails (missing fields, wrong
// owner, reference row still in use).
#[tokio::test]
async fn reference_and_product_admin_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let owner = AuthUser {
        user_id: "user_owner".into(),
    };
    let intruder = AuthUser {
        user_id: "user_intruder".into(),
    };

    // Owner gets a store.
    let store = store_service::create_store(
        &state,
        &owner,
        UpsertStoreRequest {
            name: Some("Flow Motors".into()),
        },
    )
    .await?;

    // Missing name is a validation failure and must not create a row.
    let err = reference_service::create(
        &state,
        &reference::FUEL_TYPES,
        &owner,
        store.id,
        UpsertReferenceRequest {
            name: None,
            image_url: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Name is required"));
    assert_eq!(count(&state, "fuel_types").await?, 0);

    // A caller who does not own the store is rejected before any mutation.
    let err = reference_service::create(
        &state,
        &reference::FUEL_TYPES,
        &intruder,
        store.id,
        UpsertReferenceRequest {
            name: Some("Diesel".into()),
            image_url: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert_eq!(count(&state, "fuel_types").await?, 0);

    // Round-trip: create then fetch by the returned id.
    let diesel = create_ref(&state, &owner, store.id, &reference::FUEL_TYPES, "Diesel").await?;
    let fetched = reference_service::get(&state, &reference::FUEL_TYPES, diesel.id)
        .await?
        .expect("created row fetches back");
    assert_eq!(fetched.name, "Diesel");
    assert_eq!(fetched.store_id, store.id);
    assert!(fetched.image_url.is_none());

    // Nonexistent id is a null payload, not an error.
    let missing = reference_service::get(&state, &reference::FUEL_TYPES, Uuid::new_v4()).await?;
    assert!(missing.is_none());

    // Makes carry the image URL through.
    let toyota = reference_service::create(
        &state,
        &reference::MAKES,
        &owner,
        store.id,
        UpsertReferenceRequest {
            name: Some("Toyota".into()),
            image_url: Some("https://cdn.example/toyota.png".into()),
        },
    )
    .await?;
    assert_eq!(toyota.image_url.as_deref(), Some("https://cdn.example/toyota.png"));

    // Build out the rest of the reference data for a product.
    let category = create_ref(&state, &owner, store.id, &reference::CATEGORIES, "SUV").await?;
    let color = create_ref(&state, &owner, store.id, &reference::COLORS, "White").await?;
    let condition = create_ref(&state, &owner, store.id, &reference::CONDITIONS, "Used").await?;
    let drive_type = create_ref(&state, &owner, store.id, &reference::DRIVE_TYPES, "4WD").await?;
    let engine_volume =
        create_ref(&state, &owner, store.id, &reference::ENGINE_VOLUMES, "3.3").await?;
    let location =
        create_ref(&state, &owner, store.id, &reference::LOCATIONS, "Ulaanbaatar").await?;
    let model = create_ref(&state, &owner, store.id, &reference::MODELS, "LC300").await?;
    let option = create_ref(&state, &owner, store.id, &reference::OPTIONS, "Full").await?;
    let passenger = create_ref(&state, &owner, store.id, &reference::PASSENGERS, "7").await?;
    let steering = create_ref(&state, &owner, store.id, &reference::STEERINGS, "Left").await?;
    let transmission =
        create_ref(&state, &owner, store.id, &reference::TRANSMISSIONS, "Automatic").await?;
    let year = create_ref(&state, &owner, store.id, &reference::YEARS, "2023").await?;

    let request = |images: Vec<&str>| UpsertProductRequest {
        name: Some("LC300 VX".into()),
        images: Some(
            images
                .into_iter()
                .map(|url| ImageInput { url: url.into() })
                .collect(),
        ),
        price: Some(185_000_000),
        category_id: Some(category.id),
        color_id: Some(color.id),
        make_id: Some(toyota.id),
        year_id: Some(year.id),
        condition_id: Some(condition.id),
        drive_type_id: Some(drive_type.id),
        engine_volume_id: Some(engine_volume.id),
        fuel_type_id: Some(diesel.id),
        location_id: Some(location.id),
        model_id: Some(model.id),
        option_id: Some(option.id),
        passenger_id: Some(passenger.id),
        steering_id: Some(steering.id),
        transmission_id: Some(transmission.id),
        is_featured: Some(true),
        is_archived: None,
    };

    // Product validation reports the first missing field in request order.
    let mut incomplete = request(vec!["https://cdn.example/a.jpg"]);
    incomplete.price = None;
    incomplete.make_id = None;
    let err = product_service::create_product(&state, &owner, store.id, incomplete)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Price is required"));
    assert_eq!(count(&state, "products").await?, 0);

    let created = product_service::create_product(
        &state,
        &owner,
        store.id,
        request(vec!["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"]),
    )
    .await?;
    assert_eq!(created.images.len(), 2);
    assert!(created.product.is_featured);

    // PATCH replaces the image collection wholesale.
    let updated = product_service::update_product(
        &state,
        &owner,
        store.id,
        created.product.id,
        request(vec!["https://cdn.example/c.jpg"]),
    )
    .await?;
    let urls: Vec<&str> = updated.images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, vec!["https://cdn.example/c.jpg"]);
    assert_eq!(count(&state, "images").await?, 1);

    // Detail view loads the referenced lookup rows.
    let detail = product_service::get_product(&state, created.product.id)
        .await?
        .expect("product detail");
    assert_eq!(detail.make.as_ref().map(|m| m.name.as_str()), Some("Toyota"));
    assert_eq!(detail.fuel_type.as_ref().map(|f| f.name.as_str()), Some("Diesel"));
    assert_eq!(detail.images.len(), 1);

    // A make referenced by a product cannot be deleted; the row and the
    // product survive the failed attempt.
    let err = reference_service::delete(&state, &reference::MAKES, &owner, store.id, toyota.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DbError(_)));
    assert!(
        reference_service::get(&state, &reference::MAKES, toyota.id)
            .await?
            .is_some()
    );
    assert!(
        product_service::get_product(&state, created.product.id)
            .await?
            .is_some()
    );

    // Deleting the product cascades to its images, after which the make can go.
    product_service::delete_product(&state, &owner, store.id, created.product.id).await?;
    assert_eq!(count(&state, "images").await?, 0);
    reference_service::delete(&state, &reference::MAKES, &owner, store.id, toyota.id).await?;

    // Store rename by a non-owner is rejected.
    let err = store_service::update_store(
        &state,
        &intruder,
        store.id,
        UpsertStoreRequest {
            name: Some("Hijacked".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs.
    sqlx::query(
        "TRUNCATE TABLE images, products, billboards, categories, colors, conditions, \
         drive_types, engine_volumes, fuel_types, locations, makes, models, options, \
         passengers, steerings, transmissions, years, stores RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_ref(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    meta: &'static ReferenceMeta,
    name: &str,
) -> anyhow::Result<ReferenceRow> {
    let row = reference_service::create(
        state,
        meta,
        user,
        store_id,
        UpsertReferenceRequest {
            name: Some(name.into()),
            image_url: None,
        },
    )
    .await?;
    Ok(row)
}

async fn count(state: &AppState, table: &str) -> anyhow::Result<i64> {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT count(*) FROM {table}"))
        .fetch_one(&state.pool)
        .await?;
    Ok(n)
}
