//! Category business logic - plant categories and their mail aliases.
//!
//! Every category owns a mail alias. Records created through that alias become
//! nursery orders ([`ORDER_MODEL`]) filed under the category, which is what
//! [`get_alias_values`] configures.

use crate::{
    entities::{Category, MailAlias, category, mail_alias},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde_json::json;
use tracing::{info, instrument};

/// Model identifier of records created through a category alias
pub const ORDER_MODEL: &str = "nursery.order";

/// Model identifier of categories, used as the alias parent
pub const CATEGORY_MODEL: &str = "nursery.plant.category";

/// Alias configuration derived from a category
#[derive(Debug, Clone, PartialEq)]
pub struct AliasValues {
    /// Model of the records the alias creates
    pub alias_model: String,
    /// Model of the record owning the alias
    pub alias_parent_model: Option<String>,
    /// Id of the record owning the alias
    pub alias_parent_thread_id: Option<i64>,
    /// Default field values of created records
    pub alias_defaults: serde_json::Value,
}

/// Model that records created through a category alias become.
#[must_use]
pub const fn get_alias_model_name() -> &'static str {
    ORDER_MODEL
}

fn base_alias_values(category: &category::Model) -> AliasValues {
    AliasValues {
        alias_model: get_alias_model_name().to_string(),
        alias_parent_model: Some(CATEGORY_MODEL.to_string()),
        alias_parent_thread_id: Some(category.id),
        alias_defaults: json!({}),
    }
}

/// Alias configuration for a category: orders created through the alias default
/// their `category_id` to this category.
#[must_use]
pub fn get_alias_values(category: &category::Model) -> AliasValues {
    let mut values = base_alias_values(category);
    values.alias_defaults = json!({ "category_id": category.id });
    values
}

fn normalize_alias_name(alias_name: Option<String>) -> Option<String> {
    alias_name
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
}

/// Retrieves all categories, ordered alphabetically by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a category by id.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its exact name.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the mail alias owned by a category.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if the category does not exist.
pub async fn get_category_alias(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<mail_alias::Model> {
    let category = get_category_by_id(db, category_id)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    category
        .find_related(MailAlias)
        .one(db)
        .await?
        .ok_or_else(|| Error::AliasNotFound {
            name: format!("category {category_id}"),
        })
}

/// Creates a category together with its mail alias.
///
/// The alias is inserted first so the category can reference it, then configured
/// from [`get_alias_values`] once the category id is known. Both writes share one
/// database transaction.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The alias name is already used by another alias
/// - A database operation fails
#[instrument(skip(db))]
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    alias_name: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }

    let txn = db.begin().await?;

    let alias = mail_alias::ActiveModel {
        alias_name: Set(normalize_alias_name(alias_name)),
        alias_model: Set(get_alias_model_name().to_string()),
        alias_defaults: Set(json!({})),
        alias_parent_model: Set(None),
        alias_parent_thread_id: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let category = category::ActiveModel {
        name: Set(name.trim().to_string()),
        alias_id: Set(alias.id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let values = get_alias_values(&category);
    let mut alias: mail_alias::ActiveModel = alias.into();
    alias.alias_model = Set(values.alias_model);
    alias.alias_parent_model = Set(values.alias_parent_model);
    alias.alias_parent_thread_id = Set(values.alias_parent_thread_id);
    alias.alias_defaults = Set(values.alias_defaults);
    alias.update(&txn).await?;

    txn.commit().await?;

    info!(category_id = category.id, "Created category {}", category.name);
    Ok(category)
}

/// Renames a category.
///
/// # Errors
/// Returns an error if the new name is empty, the category does not exist,
/// or the update fails.
pub async fn rename_category(
    db: &DatabaseConnection,
    category_id: i64,
    new_name: String,
) -> Result<category::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::validation("Category name cannot be empty"));
    }

    let mut category: category::ActiveModel = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?
        .into();

    category.name = Set(new_name.trim().to_string());
    category.update(db).await.map_err(Into::into)
}

/// Deletes a category and its alias.
///
/// Plants and orders filed under the category keep existing with no category.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if the category does not exist, or a
/// database error if a delete fails.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let category = Category::find_by_id(category_id)
        .one(&txn)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    Category::delete_by_id(category.id).exec(&txn).await?;
    MailAlias::delete_by_id(category.alias_id).exec(&txn).await?;

    txn.commit().await?;

    info!(category_id, "Deleted category {}", category.name);
    Ok(())
}
