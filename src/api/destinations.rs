//! Destination endpoints.

use reqwest::Method;
use serde_json::json;

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::forms::FormPayload;
use crate::models::{Destination, DestinationKind, ListQuery, Page};

/// GET /api/admin/destination - List destinations, optionally by `type`.
pub async fn list_destinations(
    api: &ApiClient,
    query: &ListQuery,
) -> Result<Page<Destination>, AppError> {
    api.get::<Vec<Destination>>(&admin_path("/destination"), &query.to_params())
        .await?
        .into_page()
}

/// Every destination of one kind, for pickers. Uses a single large page.
pub async fn list_all_destinations(
    api: &ApiClient,
    kind: Option<DestinationKind>,
) -> Result<Vec<Destination>, AppError> {
    let mut query = ListQuery::new(1000);
    if let Some(kind) = kind {
        query.set_filter("type", kind.as_str());
    }
    Ok(list_destinations(api, &query).await?.items)
}

/// POST /api/admin/destination/detail - Fetch one destination by id.
pub async fn get_destination(api: &ApiClient, id: &str) -> Result<Destination, AppError> {
    api.post_json::<_, Destination>(&admin_path("/destination/detail"), &json!({ "id": id }))
        .await?
        .into_data()
}

/// POST /api/admin/destination/add - Create a destination.
pub async fn create_destination(
    api: &ApiClient,
    payload: FormPayload,
) -> Result<Option<String>, AppError> {
    api.send_multipart::<serde_json::Value>(Method::POST, &admin_path("/destination/add"), payload)
        .await?
        .into_ack()
}

/// PUT /api/admin/destination/:id - Update a destination.
pub async fn update_destination(
    api: &ApiClient,
    id: &str,
    payload: FormPayload,
) -> Result<Option<String>, AppError> {
    api.send_multipart::<serde_json::Value>(
        Method::PUT,
        &admin_path(&format!("/destination/{}", id)),
        payload,
    )
    .await?
    .into_ack()
}

/// DELETE /api/admin/destination/:id - Delete a destination.
pub async fn delete_destination(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/destination/{}", id)))
        .await?
        .into_ack()
}
