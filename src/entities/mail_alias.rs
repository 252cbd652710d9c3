//! Mail alias entity - Inbound address configuration that creates records.
//!
//! An alias names the model its records become (`alias_model`) and the default
//! field values applied to each of them (`alias_defaults`, a JSON object).
//! The parent columns point back at the record owning the alias.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Mail alias database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mail_aliases")]
pub struct Model {
    /// Unique identifier for the alias
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Local part of the inbound address (e.g. `"ferns"`), None if mail routing is off
    #[sea_orm(unique)]
    pub alias_name: Option<String>,
    /// Model of the records created by this alias (e.g. `"nursery.order"`)
    pub alias_model: String,
    /// Default field values for created records
    pub alias_defaults: Json,
    /// Model of the record owning the alias
    pub alias_parent_model: Option<String>,
    /// Id of the record owning the alias
    pub alias_parent_thread_id: Option<i64>,
}

/// Defines relationships between `MailAlias` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An alias is owned by at most one category
    #[sea_orm(has_one = "super::category::Entity")]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
