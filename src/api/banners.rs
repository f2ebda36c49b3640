//! Banner endpoints.

use reqwest::Method;

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::forms::{FormPayload, PendingFile};
use crate::models::{Banner, BannerInput, ListQuery, Page};

fn banner_payload(input: &BannerInput, image: Option<PendingFile>) -> FormPayload {
    let mut payload = FormPayload::new();
    payload
        .text("title", input.title.trim())
        .text_opt("subtitle", input.subtitle.as_deref())
        .text_opt("link", input.link.as_deref())
        .text("order", input.order)
        .text("status", input.status.as_str());
    if let Some(file) = image {
        payload.file("image", file);
    }
    payload
}

/// GET /api/admin/banner - List banners.
pub async fn list_banners(api: &ApiClient, query: &ListQuery) -> Result<Page<Banner>, AppError> {
    api.get::<Vec<Banner>>(&admin_path("/banner"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/banner/add - Create a banner with its image.
pub async fn create_banner(
    api: &ApiClient,
    input: &BannerInput,
    image: PendingFile,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.send_multipart::<serde_json::Value>(
        Method::POST,
        &admin_path("/banner/add"),
        banner_payload(input, Some(image)),
    )
    .await?
    .into_ack()
}

/// PUT /api/admin/banner/:id - Update a banner, optionally replacing its image.
pub async fn update_banner(
    api: &ApiClient,
    id: &str,
    input: &BannerInput,
    image: Option<PendingFile>,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.send_multipart::<serde_json::Value>(
        Method::PUT,
        &admin_path(&format!("/banner/{}", id)),
        banner_payload(input, image),
    )
    .await?
    .into_ack()
}

/// DELETE /api/admin/banner/:id - Delete a banner.
pub async fn delete_banner(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/banner/{}", id)))
        .await?
        .into_ack()
}
