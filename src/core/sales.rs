//! Sales flow - order lines selling plants.
//!
//! Order lines are what [`crate::core::plant::compute_order_count`] counts.
//! Selling through [`sell_plant`] also takes the units out of stock, and goes
//! through the same stock check as every other stock write.

use crate::{
    core::plant::write_number_in_stock,
    entities::{Plant, SaleOrderLine, plant, sale_order_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity <= 0 {
        return Err(Error::validation("Quantity must be positive."));
    }
    Ok(())
}

async fn insert_order_line<C>(
    db: &C,
    plant_id: i64,
    quantity: i32,
    price_unit: f64,
) -> Result<sale_order_line::Model>
where
    C: ConnectionTrait,
{
    sale_order_line::ActiveModel {
        plant_id: Set(plant_id),
        quantity: Set(quantity),
        price_unit: Set(price_unit),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Records an order line for a plant without touching its stock.
///
/// # Errors
/// Returns an error if the quantity is not positive, the price is invalid,
/// the plant does not exist, or the insert fails.
pub async fn create_order_line(
    db: &DatabaseConnection,
    plant_id: i64,
    quantity: i32,
    price_unit: f64,
) -> Result<sale_order_line::Model> {
    validate_quantity(quantity)?;
    if !price_unit.is_finite() || price_unit < 0.0 {
        return Err(Error::InvalidPrice { price: price_unit });
    }

    Plant::find_by_id(plant_id)
        .one(db)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;

    insert_order_line(db, plant_id, quantity, price_unit).await
}

/// Sells `quantity` units of a plant at its current price.
///
/// The order line and the stock decrement are written in one transaction; when
/// the stock would go negative the stock check fails and nothing is written.
///
/// # Errors
/// Returns an error if the quantity is not positive, the plant does not exist,
/// the plant does not have enough stock, or a database operation fails.
#[instrument(skip(db))]
pub async fn sell_plant(
    db: &DatabaseConnection,
    plant_id: i64,
    quantity: i32,
) -> Result<(sale_order_line::Model, plant::Model)> {
    validate_quantity(quantity)?;

    let txn = db.begin().await?;

    let plant = Plant::find_by_id(plant_id)
        .one(&txn)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;

    let line = insert_order_line(&txn, plant_id, quantity, plant.price).await?;
    let remaining = plant.number_in_stock - quantity;
    let plant = write_number_in_stock(&txn, plant, remaining).await?;

    txn.commit().await?;

    info!(
        plant_id,
        quantity,
        remaining = plant.number_in_stock,
        "Sold {}",
        plant.name
    );
    Ok((line, plant))
}

/// Retrieves the order lines of a plant, oldest first.
pub async fn get_order_lines_for_plant(
    db: &DatabaseConnection,
    plant_id: i64,
) -> Result<Vec<sale_order_line::Model>> {
    SaleOrderLine::find()
        .filter(sale_order_line::Column::PlantId.eq(plant_id))
        .order_by_asc(sale_order_line::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::plant::{NEGATIVE_STOCK_MESSAGE, compute_order_count, get_plant_by_id};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_order_line_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_order_line(&db, 1, 0, 10.0).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_order_line(&db, 1, 1, f64::INFINITY).await;
        assert!(matches!(result, Err(Error::InvalidPrice { .. })));

        let result = sell_plant(&db, 1, -2).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_order_line_for_missing_plant() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_order_line(&db, 404, 1, 5.0).await;
        assert!(matches!(result, Err(Error::PlantNotFound { id: 404 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_sell_plant_decrements_stock() -> Result<()> {
        let (db, ctx) = setup_with_user().await?;
        let plant = create_test_plant(&db, &ctx, "Monstera").await?;

        let (line, plant) = sell_plant(&db, plant.id, 4).await?;
        assert_eq!(line.quantity, 4);
        assert_eq!(line.price_unit, plant.price);
        assert_eq!(plant.number_in_stock, 6);

        let (_, plant) = sell_plant(&db, plant.id, 6).await?;
        assert_eq!(plant.number_in_stock, 0);

        let lines = get_order_lines_for_plant(&db, plant.id).await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(compute_order_count(&db, plant.id).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_overselling_writes_nothing() -> Result<()> {
        let (db, ctx) = setup_with_user().await?;
        let plant = create_test_plant(&db, &ctx, "Monstera").await?;

        let err = sell_plant(&db, plant.id, 11).await.unwrap_err();
        assert_eq!(err.to_string(), NEGATIVE_STOCK_MESSAGE);

        let stored = get_plant_by_id(&db, plant.id).await?.unwrap();
        assert_eq!(stored.number_in_stock, 10);
        assert_eq!(compute_order_count(&db, plant.id).await?, 0);

        Ok(())
    }
}
