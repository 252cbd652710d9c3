//! Tag business logic - colored labels attached to plants.

use crate::{
    entities::{Tag, tag},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Color index given to tags created without one
pub const DEFAULT_TAG_COLOR: i32 = 10;

/// Retrieves all tags, ordered alphabetically by name.
pub async fn get_all_tags(db: &DatabaseConnection) -> Result<Vec<tag::Model>> {
    Tag::find()
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a tag by id.
pub async fn get_tag_by_id(db: &DatabaseConnection, tag_id: i64) -> Result<Option<tag::Model>> {
    Tag::find_by_id(tag_id).one(db).await.map_err(Into::into)
}

/// Finds a tag by its exact name.
pub async fn get_tag_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<tag::Model>> {
    Tag::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a tag, using [`DEFAULT_TAG_COLOR`] when no color is given.
///
/// # Errors
/// Returns an error if the name is empty or whitespace-only, or the insert fails.
pub async fn create_tag(
    db: &DatabaseConnection,
    name: String,
    color: Option<i32>,
) -> Result<tag::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Tag name cannot be empty"));
    }

    let tag = tag::ActiveModel {
        name: Set(name.trim().to_string()),
        color: Set(color.unwrap_or(DEFAULT_TAG_COLOR)),
        ..Default::default()
    };
    tag.insert(db).await.map_err(Into::into)
}

/// Updates a tag's name and color.
///
/// # Errors
/// Returns an error if the name is empty, the tag does not exist, or the update fails.
pub async fn update_tag(
    db: &DatabaseConnection,
    tag_id: i64,
    new_name: String,
    new_color: i32,
) -> Result<tag::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::validation("Tag name cannot be empty"));
    }

    let mut tag: tag::ActiveModel = Tag::find_by_id(tag_id)
        .one(db)
        .await?
        .ok_or(Error::TagNotFound { id: tag_id })?
        .into();

    tag.name = Set(new_name.trim().to_string());
    tag.color = Set(new_color);
    tag.update(db).await.map_err(Into::into)
}

/// Deletes a tag; plants carrying it simply lose the label.
///
/// # Errors
/// Returns [`Error::TagNotFound`] if the tag does not exist.
pub async fn delete_tag(db: &DatabaseConnection, tag_id: i64) -> Result<()> {
    let result = Tag::delete_by_id(tag_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::TagNotFound { id: tag_id });
    }
    Ok(())
}

/// Fails with [`Error::TagNotFound`] for the first id that has no tag.
pub(crate) async fn ensure_tags_exist<C>(db: &C, tag_ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    let found: Vec<i64> = Tag::find()
        .filter(tag::Column::Id.is_in(tag_ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|tag| tag.id)
        .collect();

    match tag_ids.iter().find(|id| !found.contains(*id)) {
        Some(&missing) => Err(Error::TagNotFound { id: missing }),
        None => Ok(()),
    }
}
