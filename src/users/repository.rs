//! Repository layer for user rows

use sqlx::{PgConnection, QueryBuilder};

use super::models::{User, UserUpdate};
use crate::error::ServiceError;

const USER_COLUMNS: &str = "id, username, email, created_at";

pub struct UserRepository;

impl UserRepository {
    /// All users ordered by identifier.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as(r#"SELECT id, username, email, created_at FROM users ORDER BY id"#)
            .fetch_all(conn)
            .await
    }

    pub async fn get(conn: &mut PgConnection, user_id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(r#"SELECT id, username, email, created_at FROM users WHERE id = $1"#)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a new user; a duplicate username or email is a conflict.
    pub async fn create(
        conn: &mut PgConnection,
        username: &str,
        email: &str,
    ) -> Result<User, ServiceError> {
        sqlx::query_as(
            r#"INSERT INTO users (username, email) VALUES ($1, $2)
               RETURNING id, username, email, created_at"#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(conn)
        .await
        .map_err(|e| match &e {
            // 23505 unique_violation on username or email
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ServiceError::Conflict("Username or email already exists".to_string())
            }
            _ => ServiceError::Database(e),
        })
    }

    /// Apply the fields present in `update`. The caller rejects the empty
    /// set before any SQL is built.
    pub async fn update(
        conn: &mut PgConnection,
        user_id: i32,
        update: &UserUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut set = qb.separated(", ");
        if let Some(username) = &update.username {
            set.push("username = ").push_bind_unseparated(username);
        }
        if let Some(email) = &update.email {
            set.push("email = ").push_bind_unseparated(email);
        }
        qb.push(" WHERE id = ").push_bind(user_id);
        qb.push(" RETURNING ").push(USER_COLUMNS);

        qb.build_query_as().fetch_optional(conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::db::Database;

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
    async fn test_create_and_get_user() {
        let db = test_db();
        db.init_schema().await.expect("Schema init failed");
        let mut conn = db.acquire().await.expect("Failed to connect");

        let username = format!("test_user_{}", chrono::Utc::now().timestamp_micros());
        let email = format!("{username}@example.com");
        let user = UserRepository::create(&mut conn, &username, &email)
            .await
            .expect("Should create user");
        assert!(user.id > 0);
        assert_eq!(user.username, username);

        let fetched = UserRepository::get(&mut conn, user.id)
            .await
            .expect("Should query user");
        assert_eq!(fetched.unwrap().email, email);
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_username_is_conflict() {
        let db = test_db();
        db.init_schema().await.expect("Schema init failed");
        let mut conn = db.acquire().await.expect("Failed to connect");

        let username = format!("dup_user_{}", chrono::Utc::now().timestamp_micros());
        UserRepository::create(&mut conn, &username, &format!("{username}@example.com"))
            .await
            .expect("First insert should succeed");

        let err = UserRepository::create(&mut conn, &username, &format!("{username}2@example.com"))
            .await
            .expect_err("Second insert should conflict");
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_partial_update_applies_only_present_fields() {
        let db = test_db();
        db.init_schema().await.expect("Schema init failed");
        let mut conn = db.acquire().await.expect("Failed to connect");

        let username = format!("upd_user_{}", chrono::Utc::now().timestamp_micros());
        let user = UserRepository::create(&mut conn, &username, &format!("{username}@example.com"))
            .await
            .expect("Should create user");

        let update = UserUpdate {
            username: None,
            email: Some(format!("{username}@new.example.com")),
        };
        let updated = UserRepository::update(&mut conn, user.id, &update)
            .await
            .expect("Should update user")
            .expect("User should exist");

        assert_eq!(updated.username, username); // untouched
        assert_eq!(updated.email, format!("{username}@new.example.com"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_update_missing_user_is_none() {
        let db = test_db();
        db.init_schema().await.expect("Schema init failed");
        let mut conn = db.acquire().await.expect("Failed to connect");

        let update = UserUpdate {
            username: Some("ghost".to_string()),
            email: None,
        };
        let result = UserRepository::update(&mut conn, i32::MAX, &update)
            .await
            .expect("Query should run");
        assert!(result.is_none());
    }
}
