//! Mail alias routing.
//!
//! An inbound message addressed to an alias becomes a record of the alias'
//! model, with the alias defaults applied. The catalog routes category aliases,
//! which create nursery orders filed under their category.

use crate::{
    core::category::ORDER_MODEL,
    entities::{MailAlias, mail_alias, nursery_order},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, warn};

/// Title given to orders whose message has no subject
pub const UNTITLED_ORDER: &str = "Untitled order";

/// The parts of an inbound message used to create a record
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    /// Message subject, becomes the order name
    pub subject: String,
    /// Sender address
    pub from: Option<String>,
}

/// Finds an alias by its local part, case-insensitively.
pub async fn get_alias_by_name(
    db: &DatabaseConnection,
    alias_name: &str,
) -> Result<Option<mail_alias::Model>> {
    MailAlias::find()
        .filter(mail_alias::Column::AliasName.eq(alias_name.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Default category of records created through an alias.
#[must_use]
pub fn alias_default_category(alias: &mail_alias::Model) -> Option<i64> {
    alias
        .alias_defaults
        .get("category_id")
        .and_then(serde_json::Value::as_i64)
}

/// Creates the record an inbound message addressed to `alias_name` stands for.
///
/// # Errors
/// Returns an error if:
/// - No alias has that name
/// - The alias creates records of a model other than nursery orders
/// - The insert fails
pub async fn create_record_from_alias(
    db: &DatabaseConnection,
    alias_name: &str,
    message: InboundMessage,
) -> Result<nursery_order::Model> {
    let alias = get_alias_by_name(db, alias_name)
        .await?
        .ok_or_else(|| Error::AliasNotFound {
            name: alias_name.to_string(),
        })?;

    if alias.alias_model != ORDER_MODEL {
        warn!(alias = alias_name, model = %alias.alias_model, "Unroutable alias");
        return Err(Error::AliasModelMismatch {
            alias: alias_name.to_string(),
            model: alias.alias_model,
        });
    }

    let subject = message.subject.trim();
    let name = if subject.is_empty() {
        UNTITLED_ORDER.to_string()
    } else {
        subject.to_string()
    };

    let order = nursery_order::ActiveModel {
        name: Set(name),
        customer_email: Set(message.from),
        category_id: Set(alias_default_category(&alias)),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(order_id = order.id, alias = alias_name, "Created order from alias");
    Ok(order)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::category::{create_category, get_category_alias};
    use crate::test_utils::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_alias_record_carries_category() -> Result<()> {
        let db = setup_test_db().await?;
        let category =
            create_category(&db, "Orchids".to_string(), Some("orchids".to_string())).await?;

        let order = create_record_from_alias(
            &db,
            "Orchids",
            InboundMessage {
                subject: "Two phalaenopsis please".to_string(),
                from: Some("jane@example.com".to_string()),
            },
        )
        .await?;

        assert_eq!(order.category_id, Some(category.id));
        assert_eq!(order.name, "Two phalaenopsis please");
        assert_eq!(order.customer_email.as_deref(), Some("jane@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn test_alias_without_subject() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "Ferns".to_string(), Some("ferns".to_string())).await?;

        let order = create_record_from_alias(&db, "ferns", InboundMessage::default()).await?;
        assert_eq!(order.name, UNTITLED_ORDER);
        assert!(order.customer_email.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_alias() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_record_from_alias(&db, "nobody", InboundMessage::default()).await;
        assert!(matches!(result, Err(Error::AliasNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_alias_for_other_model_is_refused() -> Result<()> {
        let db = setup_test_db().await?;
        let category =
            create_category(&db, "Bulbs".to_string(), Some("bulbs".to_string())).await?;

        let mut alias: mail_alias::ActiveModel =
            get_category_alias(&db, category.id).await?.into();
        alias.alias_model = Set("nursery.plant".to_string());
        alias.update(&db).await?;

        let result = create_record_from_alias(&db, "bulbs", InboundMessage::default()).await;
        assert!(matches!(result, Err(Error::AliasModelMismatch { .. })));

        Ok(())
    }

    #[test]
    fn test_alias_default_category() {
        let mut alias = mail_alias::Model {
            id: 1,
            alias_name: None,
            alias_model: ORDER_MODEL.to_string(),
            alias_defaults: json!({ "category_id": 8 }),
            alias_parent_model: None,
            alias_parent_thread_id: None,
        };
        assert_eq!(alias_default_category(&alias), Some(8));

        alias.alias_defaults = json!({});
        assert_eq!(alias_default_category(&alias), None);
    }
}
