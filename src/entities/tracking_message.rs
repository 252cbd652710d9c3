//! Tracking message entity - Log of tracked field changes on plants.
//!
//! One row is written per update that touched a tracked field. `subtype` classifies
//! the event (e.g. `"plant_nursery.plant_price"`), `template` and `composition_mode`
//! are set when the change should also notify subscribers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tracking message database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracking_messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Plant the change happened on
    pub plant_id: i64,
    /// Notification subtype identifier
    pub subtype: String,
    /// Notification template identifier, if one was selected
    pub template: Option<String>,
    /// Composition mode for the templated notification (`"comment"`, `"mass_mail"`)
    pub composition_mode: Option<String>,
    /// Human-readable summary of the changed values
    #[sea_orm(column_type = "Text")]
    pub body: String,
    /// User who made the change
    pub author_id: Option<i64>,
    /// When the change was recorded
    pub created_at: DateTime,
}

/// Defines relationships between `TrackingMessage` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each message belongs to one plant
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id",
        on_delete = "Cascade"
    )]
    Plant,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
