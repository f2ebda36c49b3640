//! Key/value repository over the local storage table.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::Permission;

/// Storage key for the admin-specific bearer token.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";
/// Generic token key checked when no admin token is stored.
pub const FALLBACK_TOKEN_KEY: &str = "token";
/// Storage key for the serialized permission array.
pub const PERMISSIONS_KEY: &str = "permissions";

/// Persisted client state.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read a raw value.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Insert or overwrite a raw value.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== TOKEN ====================

    /// Stored bearer token: the admin key wins, the generic key is the fallback.
    pub async fn load_token(&self) -> Result<Option<String>, AppError> {
        for key in [ADMIN_TOKEN_KEY, FALLBACK_TOKEN_KEY] {
            if let Some(token) = self.get_item(key).await? {
                if !token.trim().is_empty() {
                    return Ok(Some(token));
                }
            }
        }
        Ok(None)
    }

    pub async fn save_token(&self, token: &str) -> Result<(), AppError> {
        self.set_item(ADMIN_TOKEN_KEY, token).await
    }

    pub async fn clear_token(&self) -> Result<(), AppError> {
        self.remove_item(ADMIN_TOKEN_KEY).await?;
        self.remove_item(FALLBACK_TOKEN_KEY).await
    }

    // ==================== PERMISSIONS ====================

    /// Persisted permission array; a corrupt entry reads as empty.
    pub async fn load_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let Some(raw) = self.get_item(PERMISSIONS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(permissions) => Ok(permissions),
            Err(e) => {
                tracing::warn!("Discarding unreadable persisted permissions: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn save_permissions(&self, permissions: &[Permission]) -> Result<(), AppError> {
        let json = serde_json::to_string(permissions)?;
        self.set_item(PERMISSIONS_KEY, &json).await
    }

    pub async fn clear_permissions(&self) -> Result<(), AppError> {
        self.remove_item(PERMISSIONS_KEY).await
    }
}
