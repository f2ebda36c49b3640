//! FAQ endpoints.

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::models::{Faq, FaqInput, ListQuery, Page};

/// GET /api/admin/faq - List FAQs.
pub async fn list_faqs(api: &ApiClient, query: &ListQuery) -> Result<Page<Faq>, AppError> {
    api.get::<Vec<Faq>>(&admin_path("/faq"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/faq/add - Create a FAQ.
pub async fn create_faq(api: &ApiClient, input: &FaqInput) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.post_json::<_, serde_json::Value>(&admin_path("/faq/add"), input)
        .await?
        .into_ack()
}

/// PUT /api/admin/faq/:id - Update a FAQ.
pub async fn update_faq(
    api: &ApiClient,
    id: &str,
    input: &FaqInput,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.put_json::<_, serde_json::Value>(&admin_path(&format!("/faq/{}", id)), input)
        .await?
        .into_ack()
}

/// DELETE /api/admin/faq/:id - Delete a FAQ.
pub async fn delete_faq(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/faq/{}", id)))
        .await?
        .into_ack()
}
