//! Shared test utilities for the nursery catalog.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        category,
        context::RequestContext,
        plant::{self, NewPlant},
        tag, user,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database with one user and a context acting as that user.
pub async fn setup_with_user() -> Result<(DatabaseConnection, RequestContext)> {
    let db = setup_test_db().await?;
    let admin = user::create_user(&db, "Test Admin".to_string(), "test_admin".to_string()).await?;
    Ok((db, RequestContext::new(admin.id)))
}

/// Creates a category without a mail alias name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name.to_string(), None).await
}

/// Creates a tag with the default color.
pub async fn create_test_tag(db: &DatabaseConnection, name: &str) -> Result<entities::tag::Model> {
    tag::create_tag(db, name.to_string(), None).await
}

/// Creates a test plant with sensible defaults.
///
/// # Defaults
/// * price: 10.0
/// * `number_in_stock`: 10
/// * no category, no tags
pub async fn create_test_plant(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    name: &str,
) -> Result<entities::plant::Model> {
    plant::create_plant(
        db,
        ctx,
        NewPlant {
            name: name.to_string(),
            price: 10.0,
            number_in_stock: 10,
            ..Default::default()
        },
    )
    .await
}

/// Creates a test plant filed under a category.
pub async fn create_plant_in_category(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    name: &str,
    category_id: i64,
) -> Result<entities::plant::Model> {
    plant::create_plant(
        db,
        ctx,
        NewPlant {
            name: name.to_string(),
            price: 10.0,
            number_in_stock: 10,
            category_id: Some(category_id),
            ..Default::default()
        },
    )
    .await
}

/// Builds an unsaved plant model for tests that never touch the database.
#[must_use]
pub fn sample_plant_model(id: i64, name: &str, price: f64) -> entities::plant::Model {
    let now = chrono::Utc::now().naive_utc();
    entities::plant::Model {
        id,
        name: name.to_string(),
        price,
        description_short: None,
        description: None,
        category_id: None,
        number_in_stock: 0,
        image: None,
        user_id: 1,
        internal: false,
        promo: false,
        website_published: false,
        created_at: now,
        updated_at: now,
    }
}
