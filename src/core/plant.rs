//! Plant business logic - the catalog items.
//!
//! Besides plain create/read/update/delete this module holds the rules that hang
//! off plant writes and reads:
//! - the stock constraint ([`check_available_in_stock`]), checked before any write
//!   of `number_in_stock` so a violation rejects the whole write,
//! - the derived order count ([`compute_order_count`]), recomputed from
//!   `sale_order_lines` on every call and never stored,
//! - price change tracking through the [`Trackable`] implementation of
//!   [`plant::Model`],
//! - the public website URL (see [`crate::core::website`]).

use crate::{
    core::{
        context::RequestContext,
        tag::ensure_tags_exist,
        tracking::{
            CompositionMode, DEFAULT_SUBTYPE, InitValues, TemplateMapping, TemplateRef,
            TrackVisibility, Trackable, TrackedValue, Tracking, collect_init_values,
            record_tracking_message, render_tracking_body,
        },
        user::ensure_user_exists,
        website::{Slugger, website_url},
    },
    entities::{
        Category, Plant, PlantTag, SaleOrderLine, Tag, TrackingMessage, plant, plant_tag,
        sale_order_line, tag, tracking_message,
    },
    errors::{Error, Result},
};
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, instrument};

/// Message of the validation error raised for negative stock
pub const NEGATIVE_STOCK_MESSAGE: &str = "Stock cannot be negative.";

/// Tracking subtype of price changes
pub const PLANT_PRICE_SUBTYPE: &str = "plant_nursery.plant_price";

/// Template notifying followers of a price change
pub const PLANT_PRICE_TEMPLATE: &str = "plant_nursery.mail_template_plant_price_updated";

/// Values for a new plant.
///
/// `user_id` defaults to the acting user of the request.
#[derive(Debug, Clone, Default)]
pub struct NewPlant {
    /// Plant name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Short HTML description
    pub description_short: Option<String>,
    /// Full HTML description
    pub description: Option<String>,
    /// Category, if any
    pub category_id: Option<i64>,
    /// Tags to attach
    pub tag_ids: Vec<i64>,
    /// Initial stock
    pub number_in_stock: i32,
    /// Plant picture
    pub image: Option<Vec<u8>>,
    /// Responsible user, the acting user when `None`
    pub user_id: Option<i64>,
    /// Hidden from the public shop
    pub internal: bool,
    /// On promotion
    pub promo: bool,
    /// Visible on the website
    pub website_published: bool,
}

/// Partial update of a plant; `None` leaves a field untouched.
///
/// Nullable fields use `Some(None)` to clear the value.
#[derive(Debug, Clone, Default)]
pub struct PlantUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description_short: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    /// Replaces the whole tag set
    pub tag_ids: Option<Vec<i64>>,
    pub number_in_stock: Option<i32>,
    pub image: Option<Option<Vec<u8>>>,
    pub user_id: Option<i64>,
    pub internal: Option<bool>,
    pub promo: Option<bool>,
}

/// A plant together with its derived values
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDetails {
    /// The stored plant
    pub plant: plant::Model,
    /// Tags attached to the plant, ordered by name
    pub tags: Vec<tag::Model>,
    /// Number of sale order lines selling the plant
    pub order_count: u64,
    /// Public URL of the plant page
    pub website_url: String,
}

impl Trackable for plant::Model {
    fn tracked_fields() -> &'static [(&'static str, TrackVisibility)] {
        &[
            ("name", TrackVisibility::Always),
            ("price", TrackVisibility::OnChange),
        ]
    }

    fn tracked_value(&self, field: &str) -> Option<TrackedValue> {
        match field {
            "name" => Some(TrackedValue::Text(self.name.clone())),
            "price" => Some(TrackedValue::Float(self.price)),
            _ => None,
        }
    }

    fn track_subtype(&self, init_values: &InitValues) -> Option<&'static str> {
        if init_values.contains_key("price") {
            return Some(PLANT_PRICE_SUBTYPE);
        }
        None
    }

    fn track_template(records: &[Self], tracking: &Tracking) -> TemplateMapping {
        let mut templates = TemplateMapping::new();
        let Some(plant) = records.first() else {
            return templates;
        };
        if tracking
            .get(&plant.id)
            .is_some_and(|changes| changes.contains("price"))
        {
            templates.insert(
                "price",
                TemplateRef {
                    template: PLANT_PRICE_TEMPLATE,
                    composition_mode: CompositionMode::Comment,
                },
            );
        }
        templates
    }
}

/// Stock constraint: fails with a validation error when `number_in_stock` is negative.
pub fn check_available_in_stock(number_in_stock: i32) -> Result<()> {
    if number_in_stock < 0 {
        return Err(Error::validation(NEGATIVE_STOCK_MESSAGE));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Plant name cannot be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(())
}

/// Number of sale order lines selling the plant; 0 when there are none.
pub async fn compute_order_count<C>(db: &C, plant_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    SaleOrderLine::find()
        .filter(sale_order_line::Column::PlantId.eq(plant_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Order counts for several plants in one query; every requested id is present
/// in the result, with 0 for plants never sold.
pub async fn compute_order_counts<C>(db: &C, plant_ids: &[i64]) -> Result<HashMap<i64, u64>>
where
    C: ConnectionTrait,
{
    let mut counts: HashMap<i64, u64> = plant_ids.iter().map(|&id| (id, 0)).collect();
    if plant_ids.is_empty() {
        return Ok(counts);
    }

    let rows: Vec<(i64, i64)> = SaleOrderLine::find()
        .select_only()
        .column(sale_order_line::Column::PlantId)
        .column_as(Expr::col(sale_order_line::Column::Id).count(), "line_count")
        .filter(sale_order_line::Column::PlantId.is_in(plant_ids.iter().copied()))
        .group_by(sale_order_line::Column::PlantId)
        .into_tuple()
        .all(db)
        .await?;

    for (plant_id, line_count) in rows {
        counts.insert(plant_id, u64::try_from(line_count).unwrap_or_default());
    }
    Ok(counts)
}

/// Retrieves a plant by id.
pub async fn get_plant_by_id(
    db: &DatabaseConnection,
    plant_id: i64,
) -> Result<Option<plant::Model>> {
    Plant::find_by_id(plant_id).one(db).await.map_err(Into::into)
}

/// Retrieves all plants in creation order.
pub async fn get_all_plants(db: &DatabaseConnection) -> Result<Vec<plant::Model>> {
    Plant::find()
        .order_by_asc(plant::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the plants filed under a category.
pub async fn get_plants_by_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<plant::Model>> {
    Plant::find()
        .filter(plant::Column::CategoryId.eq(category_id))
        .order_by_asc(plant::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the tags of a plant, ordered by name.
pub async fn get_plant_tags(db: &DatabaseConnection, plant_id: i64) -> Result<Vec<tag::Model>> {
    let plant = get_plant_by_id(db, plant_id)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;

    plant
        .find_related(Tag)
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a plant with its tags, order count and website URL.
pub async fn get_plant_details<S>(
    db: &DatabaseConnection,
    slugger: &S,
    plant_id: i64,
) -> Result<PlantDetails>
where
    S: Slugger + ?Sized,
{
    let plant = get_plant_by_id(db, plant_id)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;
    let tags = get_plant_tags(db, plant_id).await?;
    let order_count = compute_order_count(db, plant_id).await?;
    let website_url = website_url(slugger, &plant);

    Ok(PlantDetails {
        plant,
        tags,
        order_count,
        website_url,
    })
}

async fn ensure_category_exists<C>(db: &C, category_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    Category::find_by_id(category_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::CategoryNotFound { id: category_id })
}

async fn replace_tags<C>(db: &C, plant_id: i64, tag_ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    let tag_ids: BTreeSet<i64> = tag_ids.iter().copied().collect();
    let tag_ids: Vec<i64> = tag_ids.into_iter().collect();
    ensure_tags_exist(db, &tag_ids).await?;

    PlantTag::delete_many()
        .filter(plant_tag::Column::PlantId.eq(plant_id))
        .exec(db)
        .await?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let links = tag_ids.into_iter().map(|tag_id| plant_tag::ActiveModel {
        plant_id: Set(plant_id),
        tag_id: Set(tag_id),
    });
    PlantTag::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Creates a plant.
///
/// The responsible user defaults to the acting user of `ctx`. The plant row and
/// its tag links are written in one transaction.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The price is negative or not finite
/// - The initial stock is negative ([`NEGATIVE_STOCK_MESSAGE`])
/// - The responsible user, category or one of the tags does not exist
/// - A database operation fails
#[instrument(skip(db, ctx, new_plant), fields(name = %new_plant.name))]
pub async fn create_plant(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    new_plant: NewPlant,
) -> Result<plant::Model> {
    validate_name(&new_plant.name)?;
    validate_price(new_plant.price)?;
    check_available_in_stock(new_plant.number_in_stock)?;

    let user_id = new_plant.user_id.unwrap_or(ctx.user_id);

    let txn = db.begin().await?;

    ensure_user_exists(&txn, user_id).await?;
    if let Some(category_id) = new_plant.category_id {
        ensure_category_exists(&txn, category_id).await?;
    }

    let now = chrono::Utc::now().naive_utc();
    let plant = plant::ActiveModel {
        name: Set(new_plant.name.trim().to_string()),
        price: Set(new_plant.price),
        description_short: Set(new_plant.description_short),
        description: Set(new_plant.description),
        category_id: Set(new_plant.category_id),
        number_in_stock: Set(new_plant.number_in_stock),
        image: Set(new_plant.image),
        user_id: Set(user_id),
        internal: Set(new_plant.internal),
        promo: Set(new_plant.promo),
        website_published: Set(new_plant.website_published),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    replace_tags(&txn, plant.id, &new_plant.tag_ids).await?;

    txn.commit().await?;

    info!(plant_id = plant.id, "Created plant {}", plant.name);
    Ok(plant)
}

/// Applies a partial update to a plant.
///
/// All checks run before anything is written and the update, tag replacement and
/// tracking message share one transaction. When a tracked field (`name`, `price`)
/// changes, a tracking message is stored with the subtype and template the plant
/// selects: a price change is logged as [`PLANT_PRICE_SUBTYPE`] and notifies
/// followers through [`PLANT_PRICE_TEMPLATE`].
///
/// # Errors
/// Returns an error if:
/// - The plant does not exist
/// - A new name is empty, a new price invalid, or a new stock negative
/// - A referenced user, category or tag does not exist
/// - A database operation fails
#[instrument(skip(db, ctx, update))]
pub async fn update_plant(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    plant_id: i64,
    update: PlantUpdate,
) -> Result<plant::Model> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    if let Some(number_in_stock) = update.number_in_stock {
        check_available_in_stock(number_in_stock)?;
    }

    let txn = db.begin().await?;

    let old = Plant::find_by_id(plant_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;

    if let Some(user_id) = update.user_id {
        ensure_user_exists(&txn, user_id).await?;
    }
    if let Some(Some(category_id)) = update.category_id {
        ensure_category_exists(&txn, category_id).await?;
    }

    let mut plant: plant::ActiveModel = old.clone().into();
    if let Some(name) = update.name {
        plant.name = Set(name.trim().to_string());
    }
    if let Some(price) = update.price {
        plant.price = Set(price);
    }
    if let Some(description_short) = update.description_short {
        plant.description_short = Set(description_short);
    }
    if let Some(description) = update.description {
        plant.description = Set(description);
    }
    if let Some(category_id) = update.category_id {
        plant.category_id = Set(category_id);
    }
    if let Some(number_in_stock) = update.number_in_stock {
        plant.number_in_stock = Set(number_in_stock);
    }
    if let Some(image) = update.image {
        plant.image = Set(image);
    }
    if let Some(user_id) = update.user_id {
        plant.user_id = Set(user_id);
    }
    if let Some(internal) = update.internal {
        plant.internal = Set(internal);
    }
    if let Some(promo) = update.promo {
        plant.promo = Set(promo);
    }
    plant.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = plant.update(&txn).await?;

    if let Some(tag_ids) = update.tag_ids {
        replace_tags(&txn, plant_id, &tag_ids).await?;
    }

    let init_values = collect_init_values(&old, &updated);
    if !init_values.is_empty() {
        let subtype = updated
            .track_subtype(&init_values)
            .unwrap_or(DEFAULT_SUBTYPE);
        let tracking = Tracking::from([(updated.id, init_values.keys().copied().collect())]);
        let templates = plant::Model::track_template(std::slice::from_ref(&updated), &tracking);
        let template = init_values
            .keys()
            .find_map(|field| templates.get(field).copied());
        let body = render_tracking_body(&updated, &init_values);

        record_tracking_message(&txn, updated.id, subtype, template, body, Some(ctx.user_id))
            .await?;
        debug!(plant_id, subtype, "Tracked plant change");
    }

    txn.commit().await?;
    Ok(updated)
}

/// Sets the stock of a plant.
///
/// # Errors
/// Returns a validation error carrying [`NEGATIVE_STOCK_MESSAGE`] when
/// `number_in_stock` is negative; the stored stock is left unchanged.
pub async fn set_number_in_stock(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    plant_id: i64,
    number_in_stock: i32,
) -> Result<plant::Model> {
    update_plant(
        db,
        ctx,
        plant_id,
        PlantUpdate {
            number_in_stock: Some(number_in_stock),
            ..Default::default()
        },
    )
    .await
}

/// Writes a new stock value on an already loaded plant, after the stock check.
pub(crate) async fn write_number_in_stock<C>(
    db: &C,
    plant: plant::Model,
    number_in_stock: i32,
) -> Result<plant::Model>
where
    C: ConnectionTrait,
{
    check_available_in_stock(number_in_stock)?;

    let mut plant: plant::ActiveModel = plant.into();
    plant.number_in_stock = Set(number_in_stock);
    plant.updated_at = Set(chrono::Utc::now().naive_utc());
    plant.update(db).await.map_err(Into::into)
}

/// Replaces the tags of a plant.
///
/// # Errors
/// Returns an error if the plant or one of the tags does not exist.
pub async fn set_plant_tags(
    db: &DatabaseConnection,
    plant_id: i64,
    tag_ids: &[i64],
) -> Result<()> {
    let txn = db.begin().await?;
    Plant::find_by_id(plant_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;
    replace_tags(&txn, plant_id, tag_ids).await?;
    txn.commit().await?;
    Ok(())
}

/// Publishes a plant on the website or takes it down.
pub async fn set_published(
    db: &DatabaseConnection,
    plant_id: i64,
    published: bool,
) -> Result<plant::Model> {
    let mut plant: plant::ActiveModel = Plant::find_by_id(plant_id)
        .one(db)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?
        .into();

    plant.website_published = Set(published);
    plant.updated_at = Set(chrono::Utc::now().naive_utc());
    plant.update(db).await.map_err(Into::into)
}

/// Deletes a plant with its tag links and tracking log.
///
/// # Errors
/// Returns an error if the plant does not exist, or a validation error if the
/// plant has already been sold (its order lines must keep pointing at it).
#[instrument(skip(db))]
pub async fn delete_plant(db: &DatabaseConnection, plant_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let plant = Plant::find_by_id(plant_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;

    if compute_order_count(&txn, plant_id).await? > 0 {
        return Err(Error::validation(
            "Plants that have been ordered cannot be deleted.",
        ));
    }

    PlantTag::delete_many()
        .filter(plant_tag::Column::PlantId.eq(plant_id))
        .exec(&txn)
        .await?;
    TrackingMessage::delete_many()
        .filter(tracking_message::Column::PlantId.eq(plant_id))
        .exec(&txn)
        .await?;
    Plant::delete_by_id(plant_id).exec(&txn).await?;

    txn.commit().await?;

    info!(plant_id, "Deleted plant {}", plant.name);
    Ok(())
}
