//! Permission endpoint.

use super::{admin_path, ApiClient, ApiOutcome};
use crate::errors::AppError;
use crate::models::Permission;

/// GET /api/admin/permissions - Permissions of the signed-in admin.
///
/// A success without data means "no permissions", not an error.
pub async fn fetch_permissions(api: &ApiClient) -> Result<Vec<Permission>, AppError> {
    match api
        .get::<Vec<Permission>>(&admin_path("/permissions"), &[])
        .await?
    {
        ApiOutcome::Data { data, .. } => Ok(data),
        ApiOutcome::Empty { .. } => Ok(Vec::new()),
        ApiOutcome::Failure { message } => Err(AppError::Api(message)),
    }
}
