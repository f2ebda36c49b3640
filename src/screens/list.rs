//! Generic list screen.
//!
//! Holds what a table screen holds: the current query, the fetched page, the
//! delete confirmation dialog and the last notice. Fetches run on their own
//! task whose lifetime is tied to the call: dropping the pending `load`
//! aborts the request.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::errors::AppError;
use crate::forms::PendingFile;
use crate::models::{ListQuery, Page, Pagination};
use crate::notify::{outcome_notice, Notice};
use crate::permissions::{ModuleAccess, PermissionStore};
use crate::search::{Debouncer, SearchInput};

/// One backend collection a list screen can show.
#[async_trait]
pub trait ListResource: Send + Sync + 'static {
    type Item: Clone + Send + 'static;

    /// Permission module gating this screen's actions.
    fn module(&self) -> &'static str;

    /// Singular display name, e.g. "banner".
    fn label(&self) -> &'static str;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Self::Item>, AppError>;

    async fn delete(&self, id: &str) -> Result<Option<String>, AppError>;
}

/// A list whose rows can be created and edited from an inline dialog.
#[async_trait]
pub trait EditableResource: ListResource {
    /// Dialog fields; pre-filled from the selected row.
    type Input: for<'a> From<&'a Self::Item> + Send + Sync + 'static;

    fn item_id(item: &Self::Item) -> &str;

    async fn create(
        &self,
        input: &Self::Input,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError>;

    async fn update(
        &self,
        id: &str,
        input: &Self::Input,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError>;
}

/// Aborts the wrapped task when dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Actions offered on each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

pub struct ListScreen<R: ListResource> {
    resource: Arc<R>,
    access: ModuleAccess,
    query: ListQuery,
    items: Vec<R::Item>,
    pagination: Pagination,
    pending_delete: Option<String>,
    notice: Option<Notice>,
    debouncer: Debouncer,
    fetch_count: usize,
}

impl<R: ListResource> ListScreen<R> {
    /// Mount the screen: resolve module access and fetch the first page.
    pub async fn mount(
        resource: R,
        permissions: &PermissionStore,
        debouncer: Debouncer,
        limit: u32,
    ) -> Self {
        let access = permissions.access(resource.module()).await;
        let mut screen = Self::with_access(resource, access, debouncer, limit);
        screen.load().await;
        screen
    }

    /// Build without fetching.
    pub fn with_access(
        resource: R,
        access: ModuleAccess,
        debouncer: Debouncer,
        limit: u32,
    ) -> Self {
        Self {
            resource: Arc::new(resource),
            access,
            query: ListQuery::new(limit),
            items: Vec::new(),
            pagination: Pagination::default(),
            pending_delete: None,
            notice: None,
            debouncer,
            fetch_count: 0,
        }
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Adjust the query before the next `load`.
    pub fn query_mut(&mut self) -> &mut ListQuery {
        &mut self.query
    }

    pub fn access(&self) -> ModuleAccess {
        self.access
    }

    /// Number of list requests issued so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    pub fn can_create(&self) -> bool {
        self.access.create
    }

    pub fn row_actions(&self) -> RowActions {
        RowActions {
            view: true,
            edit: self.access.update,
            delete: self.access.delete,
        }
    }

    /// Take the last notice, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Fetch the page described by the current query. Failures are logged
    /// and leave the list empty; they never produce a notice.
    pub async fn load(&mut self) {
        self.fetch_count += 1;
        let resource = Arc::clone(&self.resource);
        let query = self.query.clone();
        let mut task = AbortOnDrop(tokio::spawn(async move {
            resource.fetch_page(&query).await
        }));

        let result = (&mut task.0).await;
        match result {
            Ok(Ok(page)) => {
                self.items = page.items;
                self.pagination = page.pagination;
            }
            Ok(Err(e)) => {
                tracing::warn!("Failed to load {} list: {}", self.resource.label(), e);
                self.items.clear();
                self.pagination = Pagination::default();
            }
            Err(e) => {
                tracing::warn!("{} list fetch did not complete: {}", self.resource.label(), e);
                self.items.clear();
                self.pagination = Pagination::default();
            }
        }
    }

    pub async fn set_page(&mut self, page: u32) {
        let last = self.pagination.pages.max(1);
        self.query.page = page.clamp(1, last);
        self.load().await;
    }

    pub async fn next_page(&mut self) {
        if self.pagination.has_next() {
            self.set_page(self.pagination.page + 1).await;
        }
    }

    pub async fn previous_page(&mut self) {
        if self.pagination.has_previous() {
            self.set_page(self.pagination.page - 1).await;
        }
    }

    /// Change a filter; goes back to page one.
    pub async fn set_filter(&mut self, key: &str, value: &str) {
        self.query.set_filter(key, value);
        self.query.page = 1;
        self.load().await;
    }

    /// Handle for the search box.
    pub fn search_input(&self) -> SearchInput {
        self.debouncer.input()
    }

    /// Record a keystroke in the search box.
    pub fn type_search(&self, text: &str) {
        self.debouncer.input().push(text);
    }

    /// Wait for the search box to settle, then fetch page one with the final
    /// text. Returns `false` if no keystrokes were pending.
    pub async fn settle_search(&mut self) -> bool {
        let Some(text) = self.debouncer.settle_pending().await else {
            return false;
        };
        self.set_search_now(&text).await;
        true
    }

    /// Wait for the next settled search, however long that takes.
    pub async fn next_search(&mut self) -> bool {
        let Some(text) = self.debouncer.settled().await else {
            return false;
        };
        self.set_search_now(&text).await;
        true
    }

    async fn set_search_now(&mut self, text: &str) {
        self.query.search = text.to_string();
        self.query.page = 1;
        self.load().await;
    }

    /// Open the delete confirmation for `id`. Without delete permission an
    /// error notice is raised instead and nothing opens.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if !self.access.delete {
            self.deny("delete");
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    /// Id waiting for confirmation, i.e. whether the dialog is open.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirm the open dialog: delete, then re-fetch the current page.
    pub async fn confirm_delete(&mut self) -> Option<Notice> {
        let id = self.pending_delete.take()?;
        let result = self.resource.delete(&id).await;
        if let Err(e) = &result {
            tracing::error!("Failed to delete {} {}: {}", self.resource.label(), id, e);
        }
        let success = format!("Deleted {}", self.resource.label());
        Some(self.finish_mutation(&result, &success).await)
    }

    fn deny(&mut self, action: &str) -> Notice {
        let notice = Notice::error(
            "Permission Denied",
            format!("You do not have permission to {} this {}", action, self.resource.label()),
        );
        self.notice = Some(notice.clone());
        notice
    }

    /// Record the outcome of a mutation and re-fetch when it went through.
    async fn finish_mutation(
        &mut self,
        result: &Result<Option<String>, AppError>,
        success: &str,
    ) -> Notice {
        let notice = outcome_notice(result, success);
        self.notice = Some(notice.clone());
        if result.is_ok() {
            self.load().await;
        }
        notice
    }
}

impl<R: EditableResource> ListScreen<R> {
    /// Fields for the edit dialog, copied from the row with `id`. Returns
    /// `None` (with a notice when access is missing) if the dialog cannot open.
    pub fn edit_prefill(&mut self, id: &str) -> Option<R::Input> {
        if !self.access.update {
            self.deny("edit");
            return None;
        }
        self.items
            .iter()
            .find(|item| R::item_id(item) == id)
            .map(R::Input::from)
    }

    /// Save the create dialog, then re-fetch the current page.
    pub async fn submit_create(&mut self, input: &R::Input, files: Vec<PendingFile>) -> Notice {
        if !self.access.create {
            return self.deny("create");
        }
        let result = self.resource.create(input, files).await;
        if let Err(e) = &result {
            tracing::error!("Failed to create {}: {}", self.resource.label(), e);
        }
        let success = format!("Created {}", self.resource.label());
        self.finish_mutation(&result, &success).await
    }

    /// Save the edit dialog for `id`, then re-fetch the current page.
    pub async fn submit_edit(
        &mut self,
        id: &str,
        input: &R::Input,
        files: Vec<PendingFile>,
    ) -> Notice {
        if !self.access.update {
            return self.deny("edit");
        }
        let result = self.resource.update(id, input, files).await;
        if let Err(e) = &result {
            tracing::error!("Failed to update {} {}: {}", self.resource.label(), id, e);
        }
        let success = format!("Updated {}", self.resource.label());
        self.finish_mutation(&result, &success).await
    }
}
