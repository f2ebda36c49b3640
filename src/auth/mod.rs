//! Session handling: where the bearer token comes from and what logout clears.
//!
//! Token lookup order is the admin key, then the generic key, then (for the
//! one screen that works this way) a `token` cookie.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::db::Repository;
use crate::errors::AppError;
use crate::permissions::PermissionStore;

/// Cookie name carrying the token.
pub const TOKEN_COOKIE: &str = "token";

/// Pull the token out of a `Cookie` header value.
pub fn token_from_cookie(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Signed-in state shared by the screens.
pub struct Session {
    repo: Repository,
    permissions: Arc<PermissionStore>,
}

impl Session {
    /// Open the session and hydrate persisted permissions.
    pub async fn start(repo: Repository) -> Result<Self, AppError> {
        let permissions = Arc::new(PermissionStore::hydrate(repo.clone()).await?);
        Ok(Self { repo, permissions })
    }

    pub fn permissions(&self) -> Arc<PermissionStore> {
        Arc::clone(&self.permissions)
    }

    /// Stored token, falling back to a cookie header when given.
    pub async fn token(&self, cookie_header: Option<&str>) -> Result<Option<String>, AppError> {
        if let Some(token) = self.repo.load_token().await? {
            return Ok(Some(token));
        }
        Ok(cookie_header.and_then(token_from_cookie))
    }

    pub async fn sign_in(&self, token: &str) -> Result<(), AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Validation("Token is required".to_string()));
        }
        self.repo.save_token(token.trim()).await?;
        tracing::info!("Token stored");
        Ok(())
    }

    /// Drop the token and the permission cache.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.repo.clear_token().await?;
        self.permissions.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// API client carrying the current token.
    pub async fn api_client(&self, config: &Config) -> Result<ApiClient, AppError> {
        let token = self.token(None).await?;
        if token.is_none() {
            tracing::warn!("No stored token; requests will be sent unauthenticated");
        }
        ApiClient::new(&config.api_url, token.as_deref(), config.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, FALLBACK_TOKEN_KEY};
    use crate::models::Permission;
    use tempfile::TempDir;

    #[test]
    fn test_token_from_cookie() {
        assert_eq!(
            token_from_cookie("theme=dark; token=abc.def; lang=en").as_deref(),
            Some("abc.def")
        );
        assert_eq!(token_from_cookie("mytoken=zzz"), None);
        assert_eq!(token_from_cookie("token="), None);
        assert_eq!(token_from_cookie(""), None);
    }

    #[tokio::test]
    async fn test_token_sources_and_sign_out() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(init_database(&dir.path().join("s.sqlite")).await.unwrap());
        let session = Session::start(repo.clone()).await.unwrap();

        assert_eq!(
            session.token(Some("token=from-cookie")).await.unwrap().as_deref(),
            Some("from-cookie")
        );

        repo.set_item(FALLBACK_TOKEN_KEY, "generic").await.unwrap();
        assert_eq!(
            session.token(Some("token=from-cookie")).await.unwrap().as_deref(),
            Some("generic")
        );

        session.sign_in(" admin-jwt ").await.unwrap();
        assert_eq!(session.token(None).await.unwrap().as_deref(), Some("admin-jwt"));

        session
            .permissions()
            .replace(vec![Permission {
                module: "packages".into(),
                ..Default::default()
            }])
            .await
            .unwrap();
        session.sign_out().await.unwrap();

        assert_eq!(session.token(None).await.unwrap(), None);
        assert!(session.permissions().snapshot().await.is_empty());
        assert!(repo.load_permissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_token_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(init_database(&dir.path().join("s.sqlite")).await.unwrap());
        let session = Session::start(repo).await.unwrap();
        assert!(session.sign_in("   ").await.unwrap_err().is_validation());
    }
}
