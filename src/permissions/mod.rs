//! Permission gate.
//!
//! Screens receive a `PermissionStore` and ask it once, on mount, what the
//! signed-in admin may do in their module. The answer only decides which
//! actions are offered; the backend enforces the real authorization.
//!
//! Lifecycle: hydrate from local storage at startup, replace wholesale on every
//! permission fetch, clear on logout. Every change is persisted.

use tokio::sync::RwLock;

use crate::api::{fetch_permissions, ApiClient};
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::Permission;

/// CRUD flags for one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleAccess {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl ModuleAccess {
    /// Everything allowed. Used by tooling that runs without a session.
    pub fn full() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }
}

impl From<&Permission> for ModuleAccess {
    fn from(p: &Permission) -> Self {
        Self {
            create: p.create,
            read: p.read,
            update: p.update,
            delete: p.delete,
        }
    }
}

pub struct PermissionStore {
    repo: Option<Repository>,
    permissions: RwLock<Vec<Permission>>,
}

impl PermissionStore {
    /// Load the persisted permission array.
    pub async fn hydrate(repo: Repository) -> Result<Self, AppError> {
        let permissions = repo.load_permissions().await?;
        tracing::debug!("Hydrated {} permission entries", permissions.len());
        Ok(Self {
            repo: Some(repo),
            permissions: RwLock::new(permissions),
        })
    }

    /// A store that is never persisted.
    pub fn detached(permissions: Vec<Permission>) -> Self {
        Self {
            repo: None,
            permissions: RwLock::new(permissions),
        }
    }

    /// Flags for `module`; an unknown module grants nothing.
    pub async fn access(&self, module: &str) -> ModuleAccess {
        self.permissions
            .read()
            .await
            .iter()
            .find(|p| p.module == module)
            .map(ModuleAccess::from)
            .unwrap_or_default()
    }

    pub async fn snapshot(&self) -> Vec<Permission> {
        self.permissions.read().await.clone()
    }

    /// Swap in a new permission array and persist it.
    pub async fn replace(&self, permissions: Vec<Permission>) -> Result<(), AppError> {
        if let Some(repo) = &self.repo {
            repo.save_permissions(&permissions).await?;
        }
        *self.permissions.write().await = permissions;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        if let Some(repo) = &self.repo {
            repo.clear_permissions().await?;
        }
        self.permissions.write().await.clear();
        Ok(())
    }

    /// Fetch permissions from the backend and replace the local copy.
    pub async fn refresh(&self, api: &ApiClient) -> Result<usize, AppError> {
        let permissions = fetch_permissions(api).await?;
        let count = permissions.len();
        self.replace(permissions).await?;
        tracing::info!("Permissions refreshed ({} modules)", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    fn perm(module: &str, create: bool, update: bool, delete: bool) -> Permission {
        Permission {
            module: module.to_string(),
            create,
            read: true,
            update,
            delete,
        }
    }

    #[tokio::test]
    async fn test_access_lookup() {
        let store = PermissionStore::detached(vec![
            perm("packages", true, true, false),
            perm("content", false, false, true),
        ]);

        let packages = store.access("packages").await;
        assert!(packages.create && packages.update && !packages.delete);
        assert!(store.access("content").await.delete);
        assert_eq!(store.access("finance").await, ModuleAccess::default());
    }

    #[tokio::test]
    async fn test_replace_and_clear_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.sqlite");
        let repo = Repository::new(init_database(&path).await.unwrap());

        let store = PermissionStore::hydrate(repo.clone()).await.unwrap();
        assert!(store.snapshot().await.is_empty());

        store
            .replace(vec![perm("coupons", true, true, true)])
            .await
            .unwrap();

        let rehydrated = PermissionStore::hydrate(repo.clone()).await.unwrap();
        assert!(rehydrated.access("coupons").await.delete);

        rehydrated.clear().await.unwrap();
        let after_logout = PermissionStore::hydrate(repo).await.unwrap();
        assert!(after_logout.snapshot().await.is_empty());
    }
}
