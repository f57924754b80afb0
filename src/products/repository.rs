//! Repository layer for product rows

use rust_decimal::Decimal;
use sqlx::{PgConnection, QueryBuilder};

use super::models::{Product, ProductUpdate};

const PRODUCT_COLUMNS: &str = "id, name, price, stock, created_at";

pub struct ProductRepository;

impl ProductRepository {
    /// All products ordered by identifier.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as(r#"SELECT id, name, price, stock, created_at FROM products ORDER BY id"#)
            .fetch_all(conn)
            .await
    }

    pub async fn get(
        conn: &mut PgConnection,
        product_id: i32,
    ) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as(r#"SELECT id, name, price, stock, created_at FROM products WHERE id = $1"#)
            .bind(product_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        name: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as(
            r#"INSERT INTO products (name, price, stock) VALUES ($1, $2, $3)
               RETURNING id, name, price, stock, created_at"#,
        )
        .bind(name)
        .bind(price)
        .bind(stock)
        .fetch_one(conn)
        .await
    }

    /// Apply the fields present in `update`. The caller rejects the empty
    /// set before any SQL is built.
    pub async fn update(
        conn: &mut PgConnection,
        product_id: i32,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE products SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = &update.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(price) = update.price {
            set.push("price = ").push_bind_unseparated(price);
        }
        if let Some(stock) = update.stock {
            set.push("stock = ").push_bind_unseparated(stock);
        }
        qb.push(" WHERE id = ").push_bind(product_id);
        qb.push(" RETURNING ").push(PRODUCT_COLUMNS);

        qb.build_query_as().fetch_optional(conn).await
    }

    /// Remove the row; no cascade check against orders referencing it
    /// (pre-existing orders keep the stale reference).
    pub async fn delete(conn: &mut PgConnection, product_id: i32) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
            .bind(product_id)
            .execute(conn)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::db::Database;
    use std::str::FromStr;

    fn test_db() -> Database {
        let config = DbConfig {
            host: "localhost".to_string(),
            database: "ecommerce".to_string(),
            user: "admin".to_string(),
            password: "password".to_string(),
            port: 5432,
        };
        Database::connect(&config).expect("Failed to configure pool")
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL
    async fn test_create_get_delete_product() {
        let db = test_db();
        db.init_schema().await.expect("Schema init failed");
        let mut conn = db.acquire().await.expect("Failed to connect");

        let price = Decimal::from_str("19.99").unwrap();
        let product = ProductRepository::create(&mut conn, "Test Widget", price, 42)
            .await
            .expect("Should create product");
        assert_eq!(product.price, price);
        assert_eq!(product.stock, 42);

        let fetched = ProductRepository::get(&mut conn, product.id)
            .await
            .expect("Should query product")
            .expect("Product should exist");
        assert_eq!(fetched.name, "Test Widget");

        assert!(
            ProductRepository::delete(&mut conn, product.id)
                .await
                .expect("Delete should run")
        );
        // Second delete reports the row as already gone
        assert!(
            !ProductRepository::delete(&mut conn, product.id)
                .await
                .expect("Delete should run")
        );
    }

    #[tokio::test]
    #[ignore]
    async fn test_update_stock_only() {
        let db = test_db();
        db.init_schema().await.expect("Schema init failed");
        let mut conn = db.acquire().await.expect("Failed to connect");

        let price = Decimal::from_str("5.00").unwrap();
        let product = ProductRepository::create(&mut conn, "Restock Widget", price, 1)
            .await
            .expect("Should create product");

        let update = ProductUpdate {
            name: None,
            price: None,
            stock: Some(99),
        };
        let updated = ProductRepository::update(&mut conn, product.id, &update)
            .await
            .expect("Should update product")
            .expect("Product should exist");

        assert_eq!(updated.stock, 99);
        assert_eq!(updated.price, price); // untouched
        assert_eq!(updated.name, "Restock Widget");
    }
}
