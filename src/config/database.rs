//! Database configuration module for the nursery catalog.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Referenced tables are created before
//! the tables pointing at them so foreign keys resolve.

use crate::entities::{
    Category, MailAlias, NurseryOrder, Plant, PlantTag, SaleOrderLine, Tag, TrackingMessage, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/plant_nursery.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all catalog tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, User).await?;
    create_table(db, &schema, MailAlias).await?;
    create_table(db, &schema, Category).await?;
    create_table(db, &schema, Tag).await?;
    create_table(db, &schema, Plant).await?;
    create_table(db, &schema, PlantTag).await?;
    create_table(db, &schema, SaleOrderLine).await?;
    create_table(db, &schema, NurseryOrder).await?;
    create_table(db, &schema, TrackingMessage).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CategoryModel, PlantModel, TagModel, TrackingMessageModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<TagModel> = Tag::find().limit(1).all(&db).await?;
        let _: Vec<PlantModel> = Plant::find().limit(1).all(&db).await?;
        let _: Vec<TrackingMessageModel> = TrackingMessage::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
