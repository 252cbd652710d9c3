//! Nursery order entity - Orders received through category mail aliases.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Nursery order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nursery_orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order title, taken from the inbound message subject
    pub name: String,
    /// Sender of the inbound message
    pub customer_email: Option<String>,
    /// Category the order is filed under
    pub category_id: Option<i64>,
    /// When the order was created
    pub created_at: DateTime,
}

/// Defines relationships between `NurseryOrder` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
