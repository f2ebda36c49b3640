//! Adventure post endpoints.

use reqwest::Method;

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::forms::{FormPayload, PendingFile};
use crate::models::{AdventurePost, AdventurePostInput, ListQuery, Page};

fn adventure_payload(
    input: &AdventurePostInput,
    images: Vec<PendingFile>,
) -> Result<FormPayload, AppError> {
    let mut payload = FormPayload::new();
    payload
        .text("title", input.title.trim())
        .text("description", input.description.trim())
        .text_opt("location", input.location.as_deref())
        .text_opt("category", input.category.as_deref())
        .text("status", input.status.as_str());
    payload.json("existingImages", &input.existing_images)?;
    for file in images {
        payload.file("images", file);
    }
    Ok(payload)
}

/// GET /api/admin/adventure-post - List adventure posts.
pub async fn list_adventure_posts(
    api: &ApiClient,
    query: &ListQuery,
) -> Result<Page<AdventurePost>, AppError> {
    api.get::<Vec<AdventurePost>>(&admin_path("/adventure-post"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/adventure-post/add - Create a post.
pub async fn create_adventure_post(
    api: &ApiClient,
    input: &AdventurePostInput,
    images: Vec<PendingFile>,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.send_multipart::<serde_json::Value>(
        Method::POST,
        &admin_path("/adventure-post/add"),
        adventure_payload(input, images)?,
    )
    .await?
    .into_ack()
}

/// PUT /api/admin/adventure-post/:id - Update a post.
pub async fn update_adventure_post(
    api: &ApiClient,
    id: &str,
    input: &AdventurePostInput,
    images: Vec<PendingFile>,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.send_multipart::<serde_json::Value>(
        Method::PUT,
        &admin_path(&format!("/adventure-post/{}", id)),
        adventure_payload(input, images)?,
    )
    .await?
    .into_ack()
}

/// DELETE /api/admin/adventure-post/:id - Delete a post.
pub async fn delete_adventure_post(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/adventure-post/{}", id)))
        .await?
        .into_ack()
}
