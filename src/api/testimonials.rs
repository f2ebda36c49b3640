//! Testimonial endpoints.

use reqwest::Method;
use serde_json::json;

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::forms::{FormPayload, PendingFile};
use crate::models::{ListQuery, Page, ReviewStatus, Testimonial, TestimonialInput};

fn testimonial_payload(input: &TestimonialInput, image: Option<PendingFile>) -> FormPayload {
    let mut payload = FormPayload::new();
    payload
        .text("name", input.name.trim())
        .text_opt("designation", input.designation.as_deref())
        .text("message", input.message.trim())
        .text("rating", input.rating)
        .text("status", input.status.as_str());
    if let Some(file) = image {
        payload.file("image", file);
    }
    payload
}

/// GET /api/admin/testimonial - List testimonials.
pub async fn list_testimonials(
    api: &ApiClient,
    query: &ListQuery,
) -> Result<Page<Testimonial>, AppError> {
    api.get::<Vec<Testimonial>>(&admin_path("/testimonial"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/testimonial/add - Create a testimonial.
pub async fn create_testimonial(
    api: &ApiClient,
    input: &TestimonialInput,
    image: Option<PendingFile>,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.send_multipart::<serde_json::Value>(
        Method::POST,
        &admin_path("/testimonial/add"),
        testimonial_payload(input, image),
    )
    .await?
    .into_ack()
}

/// PUT /api/admin/testimonial/:id - Update a testimonial.
pub async fn update_testimonial(
    api: &ApiClient,
    id: &str,
    input: &TestimonialInput,
    image: Option<PendingFile>,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.send_multipart::<serde_json::Value>(
        Method::PUT,
        &admin_path(&format!("/testimonial/{}", id)),
        testimonial_payload(input, image),
    )
    .await?
    .into_ack()
}

/// PUT /api/admin/testimonial/:id/status - Approve or reject.
pub async fn set_testimonial_status(
    api: &ApiClient,
    id: &str,
    status: ReviewStatus,
) -> Result<Option<String>, AppError> {
    api.put_json::<_, serde_json::Value>(
        &admin_path(&format!("/testimonial/{}/status", id)),
        &json!({ "status": status.as_str() }),
    )
    .await?
    .into_ack()
}

/// DELETE /api/admin/testimonial/:id - Delete a testimonial.
pub async fn delete_testimonial(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/testimonial/{}", id)))
        .await?
        .into_ack()
}
