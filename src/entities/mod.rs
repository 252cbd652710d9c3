//! Entity module - Contains all SeaORM entity definitions for the catalog database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod mail_alias;
pub mod nursery_order;
pub mod plant;
pub mod plant_tag;
pub mod sale_order_line;
pub mod tag;
pub mod tracking_message;
pub mod user;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use mail_alias::{Column as MailAliasColumn, Entity as MailAlias, Model as MailAliasModel};
pub use nursery_order::{
    Column as NurseryOrderColumn, Entity as NurseryOrder, Model as NurseryOrderModel,
};
pub use plant::{Column as PlantColumn, Entity as Plant, Model as PlantModel};
pub use plant_tag::{Column as PlantTagColumn, Entity as PlantTag, Model as PlantTagModel};
pub use sale_order_line::{
    Column as SaleOrderLineColumn, Entity as SaleOrderLine, Model as SaleOrderLineModel,
};
pub use tag::{Column as TagColumn, Entity as Tag, Model as TagModel};
pub use tracking_message::{
    Column as TrackingMessageColumn, Entity as TrackingMessage, Model as TrackingMessageModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
