use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// User credential row. The hash never leaves the process in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Account {
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash
            FROM accounts
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Insert under the UNIQUE email constraint; a duplicate email surfaces
    /// as a database error the caller maps to Conflict.
    pub async fn create(
        db: &SqlitePool,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES (?, ?)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(account)
    }
}

/// True when the error chain bottoms out in a unique-constraint violation.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.is_unique_violation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn create_then_find_by_email() {
        let db = test_pool().await;
        let created = Account::create(&db, "user@example.com", "fake-hash")
            .await
            .expect("create");

        let found = Account::find_by_email(&db, "user@example.com")
            .await
            .expect("find")
            .expect("account exists");
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "fake-hash");

        let missing = Account::find_by_email(&db, "other@example.com")
            .await
            .expect("find");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_trips_unique_constraint() {
        let db = test_pool().await;
        Account::create(&db, "user@example.com", "hash-a")
            .await
            .expect("create");

        let err = Account::create(&db, "user@example.com", "hash-b")
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn hash_is_not_serialized() {
        let db = test_pool().await;
        let account = Account::create(&db, "user@example.com", "fake-hash")
            .await
            .expect("create");
        let json = serde_json::to_string(&account).expect("serialize");
        assert!(!json.contains("fake-hash"));
        assert!(json.contains("user@example.com"));
    }
}
