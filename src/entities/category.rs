//! Category entity - Named groupings of plants.
//!
//! Each category owns a mail alias; orders created through that alias are
//! filed under the category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plant_categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Category name (e.g. "Succulents")
    pub name: String,
    /// Mail alias routing inbound orders to this category
    pub alias_id: i64,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each category owns one mail alias
    #[sea_orm(
        belongs_to = "super::mail_alias::Entity",
        from = "Column::AliasId",
        to = "super::mail_alias::Column::Id"
    )]
    MailAlias,
    /// One category groups many plants
    #[sea_orm(has_many = "super::plant::Entity")]
    Plants,
    /// Orders filed under this category
    #[sea_orm(has_many = "super::nursery_order::Entity")]
    Orders,
}

impl Related<super::mail_alias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MailAlias.def()
    }
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plants.def()
    }
}

impl Related<super::nursery_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
