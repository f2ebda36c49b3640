//! Package endpoints.
//!
//! Detail is a POST with the id in the body, and updates use PATCH; both
//! follow the backend's existing contract.

use reqwest::Method;
use serde_json::json;

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::forms::FormPayload;
use crate::models::{ListQuery, Package, Page};

/// GET /api/admin/package - List packages.
pub async fn list_packages(api: &ApiClient, query: &ListQuery) -> Result<Page<Package>, AppError> {
    api.get::<Vec<Package>>(&admin_path("/package"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/package/detail - Fetch one package by id.
pub async fn get_package(api: &ApiClient, id: &str) -> Result<Package, AppError> {
    api.post_json::<_, Package>(&admin_path("/package/detail"), &json!({ "id": id }))
        .await?
        .into_data()
}

/// POST /api/admin/package/add - Create a package.
pub async fn create_package(
    api: &ApiClient,
    payload: FormPayload,
) -> Result<Option<String>, AppError> {
    api.send_multipart::<serde_json::Value>(Method::POST, &admin_path("/package/add"), payload)
        .await?
        .into_ack()
}

/// PATCH /api/admin/package/:id - Update a package.
pub async fn update_package(
    api: &ApiClient,
    id: &str,
    payload: FormPayload,
) -> Result<Option<String>, AppError> {
    api.send_multipart::<serde_json::Value>(
        Method::PATCH,
        &admin_path(&format!("/package/{}", id)),
        payload,
    )
    .await?
    .into_ack()
}

/// DELETE /api/admin/package/:id - Delete a package.
pub async fn delete_package(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/package/{}", id)))
        .await?
        .into_ack()
}
