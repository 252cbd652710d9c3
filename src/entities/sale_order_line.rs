//! Sale order line entity - One sold quantity of a plant.
//!
//! Lines are owned by the sales flow; the catalog only counts them per plant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale order line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_order_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Plant sold on this line
    pub plant_id: i64,
    /// Units sold
    pub quantity: i32,
    /// Price per unit at the time of sale
    pub price_unit: f64,
    /// When the line was recorded
    pub created_at: DateTime,
}

/// Defines relationships between `SaleOrderLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line sells one plant
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id"
    )]
    Plant,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
