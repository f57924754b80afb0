//! Repository layer for orders, including the create-order workflow.

use rust_decimal::Decimal;
use sqlx::{Acquire, PgConnection};

use super::models::{Order, OrderDetails, ValidNewOrder, total_price};
use crate::error::ServiceError;

const ORDER_RETURNING: &str = r#"
    RETURNING id, user_id, product_id, quantity, total_price, status, created_at"#;

pub struct OrderRepository;

impl OrderRepository {
    /// All orders, newest first, joined with username and product name.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<OrderDetails>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT o.id, o.user_id, o.product_id, o.quantity, o.total_price,
                      o.status, o.created_at, u.username, p.name AS product_name
               FROM orders o
               JOIN users u ON o.user_id = u.id
               JOIN products p ON o.product_id = p.id
               ORDER BY o.created_at DESC"#,
        )
        .fetch_all(conn)
        .await
    }

    pub async fn get(
        conn: &mut PgConnection,
        order_id: i32,
    ) -> Result<Option<OrderDetails>, sqlx::Error> {
        sqlx::query_as(
            r#"SELECT o.id, o.user_id, o.product_id, o.quantity, o.total_price,
                      o.status, o.created_at, u.username, p.name AS product_name
               FROM orders o
               JOIN users u ON o.user_id = u.id
               JOIN products p ON o.product_id = p.id
               WHERE o.id = $1"#,
        )
        .bind(order_id)
        .fetch_optional(conn)
        .await
    }

    /// The order creation workflow, one transaction:
    ///
    /// 1. read the product's price and stock (404 if absent),
    /// 2. reject if `stock < quantity` - no partial fulfillment,
    /// 3. insert the order with status `pending` and the frozen total,
    /// 4. decrement stock, conditional on it still covering the quantity.
    ///
    /// Step 4 is `UPDATE .. SET stock = stock - $q WHERE .. AND stock >= $q`,
    /// so two requests racing for the last units are settled by the store:
    /// the loser's decrement matches zero rows and the whole transaction
    /// (inserted order included) rolls back. Either both writes persist or
    /// neither does, and committed stock never goes negative.
    pub async fn create(
        conn: &mut PgConnection,
        new: ValidNewOrder,
    ) -> Result<Order, ServiceError> {
        let mut tx = conn.begin().await?;

        let product: Option<(Decimal, i32)> =
            sqlx::query_as(r#"SELECT price, stock FROM products WHERE id = $1"#)
                .bind(new.product_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (price, stock) = product.ok_or(ServiceError::NotFound("Product"))?;

        if stock < new.quantity {
            return Err(ServiceError::InsufficientStock);
        }

        let total = total_price(price, new.quantity);

        let order: Order = sqlx::query_as(&format!(
            r#"INSERT INTO orders (user_id, product_id, quantity, total_price, status)
               VALUES ($1, $2, $3, $4, 'pending'){ORDER_RETURNING}"#
        ))
        .bind(new.user_id)
        .bind(new.product_id)
        .bind(new.quantity)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        let decremented =
            sqlx::query(r#"UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1"#)
                .bind(new.quantity)
                .bind(new.product_id)
                .execute(&mut *tx)
                .await?;
        if decremented.rows_affected() == 0 {
            // A concurrent order consumed the stock after our read; the
            // transaction drops here and the inserted row never commits.
            return Err(ServiceError::InsufficientStock);
        }

        tx.commit().await?;
        Ok(order)
    }

    /// Overwrite the status unconditionally. Any string is accepted and
    /// stock is never restored (`cancelled` does not restock).
    pub async fn update_status(
        conn: &mut PgConnection,
        order_id: i32,
        status: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as(&format!(
            r#"UPDATE orders SET status = $1 WHERE id = $2{ORDER_RETURNING}"#
        ))
        .bind(status)
        .bind(order_id)
        .fetch_optional(conn)
        .await
    }
}
