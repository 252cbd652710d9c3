use dotenvy::dotenv;
use plant_nursery::{
    config::{catalog, database},
    core::{plant, seed},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load the catalog configuration
    let config = catalog::load_default_config()
        .inspect_err(|e| error!("Failed to load catalog configuration: {}", e))?;
    info!("Loaded catalog configuration.");

    // 4. Connect and create missing tables
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed administrator, categories and tags
    let (ctx, summary) = seed::seed_catalog(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
    info!(
        user_id = ctx.user_id,
        categories_created = summary.categories_created,
        tags_created = summary.tags_created,
        "Catalog seeded."
    );

    // 6. Report the catalog state
    let plants = plant::get_all_plants(&db).await?;
    let ids: Vec<i64> = plants.iter().map(|p| p.id).collect();
    let order_counts = plant::compute_order_counts(&db, &ids).await?;
    for p in &plants {
        info!(
            plant_id = p.id,
            stock = p.number_in_stock,
            orders = order_counts.get(&p.id).copied().unwrap_or_default(),
            "{}",
            p.name
        );
    }
    info!("Catalog holds {} plants.", plants.len());

    Ok(())
}
