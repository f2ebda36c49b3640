//! Community trip moderation endpoints.

use serde_json::json;

use super::{admin_path, ApiClient};
use crate::errors::AppError;
use crate::models::{CommunityTrip, ListQuery, Page, TripStatus};

/// GET /api/admin/community-trip - List community trips.
pub async fn list_community_trips(
    api: &ApiClient,
    query: &ListQuery,
) -> Result<Page<CommunityTrip>, AppError> {
    api.get::<Vec<CommunityTrip>>(&admin_path("/community-trip"), &query.to_params())
        .await?
        .into_page()
}

/// POST /api/admin/community-trip/detail - Fetch one trip by id.
pub async fn get_community_trip(api: &ApiClient, id: &str) -> Result<CommunityTrip, AppError> {
    api.post_json::<_, CommunityTrip>(&admin_path("/community-trip/detail"), &json!({ "id": id }))
        .await?
        .into_data()
}

/// PUT /api/admin/community-trip/:id/status - Moderate a trip.
pub async fn set_community_trip_status(
    api: &ApiClient,
    id: &str,
    status: TripStatus,
) -> Result<Option<String>, AppError> {
    api.put_json::<_, serde_json::Value>(
        &admin_path(&format!("/community-trip/{}/status", id)),
        &json!({ "status": status.as_str() }),
    )
    .await?
    .into_ack()
}

/// DELETE /api/admin/community-trip/:id - Delete a trip.
pub async fn delete_community_trip(api: &ApiClient, id: &str) -> Result<Option<String>, AppError> {
    api.delete::<serde_json::Value>(&admin_path(&format!("/community-trip/{}", id)))
        .await?
        .into_ack()
}
