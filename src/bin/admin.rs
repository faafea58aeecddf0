//! `storelane` — operator CLI over the REST API.
//!
//! Plays the part the dashboard forms and tables play: field checks before the
//! request, tabular list output, and a confirmation step in front of deletes.

use std::io::{BufRead, Read, Write};

use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use storelane_api::client::{ApiClient, ClientError, format_created, render_table};
use storelane_api::reference::ReferenceMeta;

#[derive(Parser)]
#[command(name = "storelane")]
#[command(about = "Storelane CLI - manage stores, reference data and products")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Output raw JSON instead of tables")]
    json: bool,

    #[arg(
        long,
        global = true,
        env = "STORELANE_STORE_ID",
        help = "Store the command operates on"
    )]
    store: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Tenant store management")]
    Store {
        #[command(subcommand)]
        cmd: StoreCommands,
    },

    #[command(about = "Reference data (makes, colors, fuel-types, ...)")]
    Ref {
        #[arg(help = "Entity segment, e.g. makes, colors, fuel-types")]
        entity: String,
        #[command(subcommand)]
        cmd: RefCommands,
    },

    #[command(about = "Product listings")]
    Product {
        #[command(subcommand)]
        cmd: ProductCommands,
    },
}

#[derive(Subcommand)]
enum StoreCommands {
    #[command(about = "Create a store owned by the current token's user")]
    Create {
        name: String,
    },
    #[command(about = "Rename a store")]
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
    },
    #[command(about = "Delete a store (must be empty)")]
    Delete {
        id: Uuid,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RefCommands {
    #[command(about = "List all rows for the store")]
    List,
    #[command(about = "Fetch one row by id")]
    Get { id: Uuid },
    #[command(about = "Create a row")]
    Create {
        name: String,
        #[arg(long, help = "Image URL (makes only)")]
        image_url: Option<String>,
    },
    #[command(about = "Replace a row's fields")]
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long, help = "Image URL (makes only)")]
        image_url: Option<String>,
    },
    #[command(about = "Delete a row")]
    Delete {
        id: Uuid,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    List,
    Get {
        id: Uuid,
    },
    #[command(about = "Create a product from a JSON body on stdin")]
    Create,
    #[command(about = "Replace a product from a JSON body on stdin")]
    Update {
        id: Uuid,
    },
    Delete {
        id: Uuid,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = ApiClient::from_env();

    match cli.command {
        Commands::Store { cmd } => handle_store(&client, cmd, cli.json).await,
        Commands::Ref { entity, cmd } => {
            let meta = ReferenceMeta::by_path(&entity)
                .ok_or_else(|| anyhow::anyhow!("unknown entity '{entity}'"))?;
            handle_ref(&client, meta, cmd, cli.json, require_store(cli.store)?).await
        }
        Commands::Product { cmd } => {
            handle_product(&client, cmd, cli.json, require_store(cli.store)?).await
        }
    }
}

fn require_store(store: Option<Uuid>) -> anyhow::Result<Uuid> {
    store.ok_or_else(|| anyhow::anyhow!("no store selected; pass --store or set STORELANE_STORE_ID"))
}

async fn handle_store(client: &ApiClient, cmd: StoreCommands, json: bool) -> anyhow::Result<()> {
    match cmd {
        StoreCommands::Create { name } => {
            let store = client.create_store(&json!({ "name": name })).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&store)?);
            } else {
                println!("✓ Store created: {} ({})", store.name, store.id);
            }
        }
        StoreCommands::Update { id, name } => {
            let store = client.update_store(id, &json!({ "name": name })).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&store)?);
            } else {
                println!("✓ Store updated: {}", store.name);
            }
        }
        StoreCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete store {id}?"))? {
                println!("Aborted.");
                return Ok(());
            }
            match client.delete_store(id).await {
                Ok(store) => println!("✓ Store deleted: {}", store.name),
                Err(ClientError::Api { status, .. }) if status.as_u16() == 500 => {
                    anyhow::bail!("Make sure you removed all products and reference data using this store first.")
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}

async fn handle_ref(
    client: &ApiClient,
    meta: &'static ReferenceMeta,
    cmd: RefCommands,
    json: bool,
    store_id: Uuid,
) -> anyhow::Result<()> {
    match cmd {
        RefCommands::List => {
            let rows = client.list_references(store_id, meta.path).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            // Same columns the dashboard table showed: name, date, id (and
            // the image URL for makes).
            let mut headers = vec!["Name"];
            if meta.has_image_url {
                headers.push("Image URL");
            }
            headers.extend(["Created", "Id"]);
            let table_rows: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.name.clone()];
                    if meta.has_image_url {
                        cells.push(r.image_url.clone().unwrap_or_default());
                    }
                    cells.push(format_created(&r.created_at));
                    cells.push(r.id.to_string());
                    cells
                })
                .collect();
            println!("{}", render_table(&headers, &table_rows));
        }
        RefCommands::Get { id } => {
            let row = client.get_reference(store_id, meta.path, id).await?;
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
        RefCommands::Create { name, image_url } => {
            // Mirror of the server-side checks; the server remains the
            // authority.
            if name.is_empty() {
                anyhow::bail!("Name is required");
            }
            if meta.has_image_url && image_url.as_deref().unwrap_or("").is_empty() {
                anyhow::bail!("Image URL is required");
            }
            let row = client
                .create_reference(store_id, meta.path, &json!({ "name": name, "imageUrl": image_url }))
                .await?;
            println!("✓ {} created: {} ({})", meta.label, row.name, row.id);
        }
        RefCommands::Update { id, name, image_url } => {
            if name.is_empty() {
                anyhow::bail!("Name is required");
            }
            if meta.has_image_url && image_url.as_deref().unwrap_or("").is_empty() {
                anyhow::bail!("Image URL is required");
            }
            let row = client
                .update_reference(store_id, meta.path, id, &json!({ "name": name, "imageUrl": image_url }))
                .await?;
            println!("✓ {} updated: {}", meta.label, row.name);
        }
        RefCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete {} {id}?", meta.label.to_lowercase()))? {
                println!("Aborted.");
                return Ok(());
            }
            match client.delete_reference(store_id, meta.path, id).await {
                Ok(row) => println!("✓ {} deleted: {}", meta.label, row.name),
                Err(ClientError::Api { status, .. }) if status.as_u16() == 500 => {
                    anyhow::bail!(
                        "Make sure you removed all products using this {} first.",
                        meta.label.to_lowercase()
                    )
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}

async fn handle_product(
    client: &ApiClient,
    cmd: ProductCommands,
    json: bool,
    store_id: Uuid,
) -> anyhow::Result<()> {
    match cmd {
        ProductCommands::List => {
            let products = client.list_products(store_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
                return Ok(());
            }
            let headers = ["Name", "Price", "Featured", "Archived", "Created", "Id"];
            let rows: Vec<Vec<String>> = products
                .iter()
                .map(|p| {
                    vec![
                        p.product.name.clone(),
                        p.product.price.to_string(),
                        p.product.is_featured.to_string(),
                        p.product.is_archived.to_string(),
                        format_created(&p.product.created_at),
                        p.product.id.to_string(),
                    ]
                })
                .collect();
            println!("{}", render_table(&headers, &rows));
        }
        ProductCommands::Get { id } => {
            let product = client.get_product(store_id, id).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        ProductCommands::Create => {
            let body = read_stdin_json()?;
            let product = client.create_product(store_id, &body).await?;
            println!("✓ Product created: {} ({})", product.product.name, product.product.id);
        }
        ProductCommands::Update { id } => {
            let body = read_stdin_json()?;
            let product = client.update_product(store_id, id, &body).await?;
            println!("✓ Product updated: {}", product.product.name);
        }
        ProductCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete product {id}?"))? {
                println!("Aborted.");
                return Ok(());
            }
            let product = client.delete_product(store_id, id).await?;
            println!("✓ Product deleted: {}", product.name);
        }
    }
    Ok(())
}

fn read_stdin_json() -> anyhow::Result<serde_json::Value> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
