//! Coupon and promo code endpoints.

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::models::{Coupon, DiscountCodeInput, ListQuery, Page, PromoCode};

/// GET /api/admin/coupon - List coupons.
pub async fn list_coupons(api: &ApiClient, query: &ListQuery) -> Result<Page<Coupon>, AppError> {
    api.get::<Vec<Coupon>>(&admin_path("/coupon"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/coupon/add - Create a coupon.
pub async fn create_coupon(
    api: &ApiClient,
    input: &DiscountCodeInput,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.post_json::<_, serde_json::Value>(&admin_path("/coupon/add"), input)
        .await?
        .into_ack()
}

/// PUT /api/admin/coupon/:id - Update a coupon.
pub async fn update_coupon(
    api: &ApiClient,
    id: &str,
    input: &DiscountCodeInput,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.put_json::<_, serde_json::Value>(&admin_path(&format!("/coupon/{}", id)), input)
        .await?
        .into_ack()
}

/// DELETE /api/admin/coupon/:id - Delete a coupon.
pub async fn delete_coupon(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/coupon/{}", id)))
        .await?
        .into_ack()
}

/// GET /api/admin/promo-code - List promo codes.
pub async fn list_promo_codes(
    api: &ApiClient,
    query: &ListQuery,
) -> Result<Page<PromoCode>, AppError> {
    api.get::<Vec<PromoCode>>(&admin_path("/promo-code"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/promo-code/add - Create a promo code.
pub async fn create_promo_code(
    api: &ApiClient,
    input: &DiscountCodeInput,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.post_json::<_, serde_json::Value>(&admin_path("/promo-code/add"), input)
        .await?
        .into_ack()
}

/// PUT /api/admin/promo-code/:id - Update a promo code.
pub async fn update_promo_code(
    api: &ApiClient,
    id: &str,
    input: &DiscountCodeInput,
) -> Result<Option<String>, AppError> {
    input.validate()?;
    api.put_json::<_, serde_json::Value>(&admin_path(&format!("/promo-code/{}", id)), input)
        .await?
        .into_ack()
}

/// DELETE /api/admin/promo-code/:id - Delete a promo code.
pub async fn delete_promo_code(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/promo-code/{}", id)))
        .await?
        .into_ack()
}
