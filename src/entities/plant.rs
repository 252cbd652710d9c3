//! Plant entity - The catalog item.
//!
//! Plants carry their price, descriptions, stock count and image, point at an
//! optional category and a responsible user, and are linked to tags through
//! `plant_tag_rel`. The number of times a plant was ordered is never stored here;
//! see `core::plant::compute_order_count`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    /// Unique identifier for the plant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Plant name (e.g. "Rose Bush")
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Short HTML description shown on listings
    #[sea_orm(column_type = "Text", nullable)]
    pub description_short: Option<String>,
    /// Full HTML description shown on the plant page
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Optional category
    pub category_id: Option<i64>,
    /// Units currently in stock, never negative
    pub number_in_stock: i32,
    /// Plant picture
    pub image: Option<Vec<u8>>,
    /// Responsible user
    pub user_id: i64,
    /// Hidden from the public shop
    pub internal: bool,
    /// Currently on promotion
    pub promo: bool,
    /// Visible on the website
    pub website_published: bool,
    /// When the plant was created
    pub created_at: DateTime,
    /// When the plant was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Plant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A plant belongs to at most one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    /// The responsible user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Tag links
    #[sea_orm(has_many = "super::plant_tag::Entity")]
    PlantTag,
    /// Sales order lines selling this plant
    #[sea_orm(has_many = "super::sale_order_line::Entity")]
    SaleOrderLines,
    /// Change tracking log
    #[sea_orm(has_many = "super::tracking_message::Entity")]
    TrackingMessages,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::plant_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::plant_tag::Relation::Plant.def().rev())
    }
}

impl Related<super::sale_order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleOrderLines.def()
    }
}

impl Related<super::tracking_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackingMessages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
