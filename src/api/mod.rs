//! REST API module.
//!
//! `ApiClient` speaks the backend's envelope; one submodule per feature holds
//! that feature's endpoints.

mod adventure_posts;
mod banners;
mod client;
mod community_trips;
mod coupons;
mod dashboard;
mod destinations;
mod faqs;
mod packages;
mod permissions;
mod testimonials;

pub use adventure_posts::*;
pub use banners::*;
pub use client::*;
pub use community_trips::*;
pub use coupons::*;
pub use dashboard::*;
pub use destinations::*;
pub use faqs::*;
pub use packages::*;
pub use permissions::*;
pub use testimonials::*;

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Page, Pagination};

/// Prefix shared by every admin endpoint.
pub const ADMIN_PREFIX: &str = "/api/admin";

/// Raw response envelope as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEnvelope<T> {
    #[serde(default, alias = "success")]
    pub status: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Parsed response. Every caller handles all three cases.
#[derive(Debug, Clone)]
pub enum ApiOutcome<T> {
    /// `status: true` with a payload
    Data {
        data: T,
        pagination: Option<Pagination>,
        message: Option<String>,
    },
    /// `status: true` without a payload
    Empty { message: Option<String> },
    /// `status: false`, or a non-2xx answer
    Failure { message: String },
}

impl<T> ApiOutcome<T> {
    pub(crate) fn from_envelope(raw: RawEnvelope<T>) -> Self {
        match (raw.status.unwrap_or(false), raw.data) {
            (false, _) => ApiOutcome::Failure {
                message: raw
                    .message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            },
            (true, Some(data)) => ApiOutcome::Data {
                data,
                pagination: raw.pagination,
                message: raw.message,
            },
            (true, None) => ApiOutcome::Empty {
                message: raw.message,
            },
        }
    }

    /// The payload, or an error when there is none.
    pub fn into_data(self) -> Result<T, AppError> {
        match self {
            ApiOutcome::Data { data, .. } => Ok(data),
            ApiOutcome::Empty { .. } => Err(AppError::Api("No data returned".to_string())),
            ApiOutcome::Failure { message } => Err(AppError::Api(message)),
        }
    }

    /// Acknowledge a mutation. The backend message is passed through.
    pub fn into_ack(self) -> Result<Option<String>, AppError> {
        match self {
            ApiOutcome::Data { message, .. } | ApiOutcome::Empty { message } => Ok(message),
            ApiOutcome::Failure { message } => Err(AppError::Api(message)),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ApiOutcome::Failure { .. })
    }
}

impl<T> ApiOutcome<Vec<T>> {
    /// List payload plus pagination; a success with no data is an empty page.
    pub fn into_page(self) -> Result<Page<T>, AppError> {
        match self {
            ApiOutcome::Data {
                data, pagination, ..
            } => Ok(Page {
                items: data,
                pagination: pagination.unwrap_or_default(),
            }),
            ApiOutcome::Empty { .. } => Ok(Page::default()),
            ApiOutcome::Failure { message } => Err(AppError::Api(message)),
        }
    }
}

/// Join the admin prefix with a feature path.
pub(crate) fn admin_path(path: &str) -> String {
    format!("{}{}", ADMIN_PREFIX, path)
}
