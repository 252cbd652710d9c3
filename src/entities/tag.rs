//! Tag entity - Colored labels attached to plants.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant tag database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plant_tags")]
pub struct Model {
    /// Unique identifier for the tag
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tag label (e.g. "Shade", "Pet friendly")
    pub name: String,
    /// Color index used by list and kanban views
    pub color: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::plant_tag::Entity")]
    PlantTag,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        super::plant_tag::Relation::Plant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::plant_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
