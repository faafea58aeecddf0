use sqlx::PgPool;
use storelane_api::{config::AppConfig, db::create_pool, middleware::auth::issue_token, reference};
use uuid::Uuid;

const DEMO_USER: &str = "user_demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store_id = ensure_store(&pool, DEMO_USER, "Demo Motors").await?;
    let refs = seed_reference_rows(&pool, store_id).await?;
    seed_product(&pool, store_id, &refs).await?;

    println!("Seed completed. Store ID: {store_id}");
    if let Ok(secret) = std::env::var("JWT_SECRET") {
        // 30-day token for poking the API as the demo user.
        let token = issue_token(&secret, DEMO_USER, 30 * 24 * 3600)?;
        println!("Bearer token for {DEMO_USER}: {token}");
    }
    Ok(())
}

async fn ensure_store(pool: &PgPool, user_id: &str, name: &str) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO stores (id, name, user_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let store_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) =
                sqlx::query_as("SELECT id FROM stores WHERE user_id = $1 AND name = $2")
                    .bind(user_id)
                    .bind(name)
                    .fetch_one(pool)
                    .await?;
            existing.0
        }
    };

    println!("Ensured store {name} (owner={user_id})");
    Ok(store_id)
}

struct SeededRefs {
    by_table: Vec<(&'static str, Uuid)>,
}

impl SeededRefs {
    fn id(&self, table: &str) -> Uuid {
        self.by_table
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, id)| *id)
            .expect("seeded table")
    }
}

async fn seed_reference_rows(pool: &PgPool, store_id: Uuid) -> anyhow::Result<SeededRefs> {
    let names: &[(&str, &str)] = &[
        ("billboards", "Spring sale"),
        ("categories", "SUV"),
        ("colors", "White Pearl"),
        ("conditions", "Used"),
        ("drive_types", "4WD"),
        ("engine_volumes", "3.3"),
        ("fuel_types", "Diesel"),
        ("locations", "Ulaanbaatar"),
        ("makes", "Toyota"),
        ("models", "Land Cruiser 300"),
        ("options", "Full"),
        ("passengers", "7"),
        ("steerings", "Left"),
        ("transmissions", "Automatic"),
        ("years", "2023"),
    ];

    let mut by_table = Vec::with_capacity(names.len());
    for (table, name) in names {
        let meta = reference::ALL
            .iter()
            .find(|m| m.table == *table)
            .expect("known table");
        let sql = if meta.has_image_url {
            format!(
                "INSERT INTO {table} (id, store_id, name, image_url) VALUES ($1, $2, $3, $4)
                 ON CONFLICT (store_id, name) DO NOTHING"
            )
        } else {
            format!(
                "INSERT INTO {table} (id, store_id, name) VALUES ($1, $2, $3)
                 ON CONFLICT (store_id, name) DO NOTHING"
            )
        };
        let mut query = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(store_id)
            .bind(*name);
        if meta.has_image_url {
            query = query.bind("https://cdn.example/toyota.png");
        }
        query.execute(pool).await?;

        let (id,): (Uuid,) = sqlx::query_as(&format!(
            "SELECT id FROM {table} WHERE store_id = $1 AND name = $2"
        ))
        .bind(store_id)
        .bind(*name)
        .fetch_one(pool)
        .await?;
        by_table.push((*table, id));
    }

    println!("Seeded reference rows");
    Ok(SeededRefs { by_table })
}

async fn seed_product(pool: &PgPool, store_id: Uuid, refs: &SeededRefs) -> anyhow::Result<()> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM products WHERE store_id = $1 AND name = $2")
            .bind(store_id)
            .bind("Land Cruiser 300 VX")
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        println!("Product already seeded");
        return Ok(());
    }

    let product_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO products (
            id, store_id, name, price, is_featured, is_archived,
            category_id, color_id, condition_id, drive_type_id, engine_volume_id,
            fuel_type_id, location_id, make_id, model_id, option_id,
            passenger_id, steering_id, transmission_id, year_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        "#,
    )
    .bind(product_id)
    .bind(store_id)
    .bind("Land Cruiser 300 VX")
    .bind(185_000_000_i64)
    .bind(true)
    .bind(false)
    .bind(refs.id("categories"))
    .bind(refs.id("colors"))
    .bind(refs.id("conditions"))
    .bind(refs.id("drive_types"))
    .bind(refs.id("engine_volumes"))
    .bind(refs.id("fuel_types"))
    .bind(refs.id("locations"))
    .bind(refs.id("makes"))
    .bind(refs.id("models"))
    .bind(refs.id("options"))
    .bind(refs.id("passengers"))
    .bind(refs.id("steerings"))
    .bind(refs.id("transmissions"))
    .bind(refs.id("years"))
    .execute(pool)
    .await?;

    for url in [
        "https://cdn.example/lc300-front.jpg",
        "https://cdn.example/lc300-side.jpg",
    ] {
        sqlx::query("INSERT INTO images (id, product_id, url) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(product_id)
            .bind(url)
            .execute(pool)
            .await?;
    }

    println!("Seeded product");
    Ok(())
}
