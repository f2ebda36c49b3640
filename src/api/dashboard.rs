//! Collections the dashboard reads.
//!
//! All requests go out together. Each one is caught on its own, so a failing
//! endpoint leaves its slot `None` and the rest of the dashboard still renders.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{admin_path, ApiClient, ApiOutcome};
use crate::models::{Booking, Captain, Coupon, LedgerEntry, Package, PromoCode, Vendor};

/// Page size used when pulling whole collections.
const COLLECTION_LIMIT: u32 = 1000;

/// Raw inputs for the dashboard; `None` means that fetch failed.
#[derive(Debug, Clone, Default)]
pub struct DashboardSources {
    pub bookings: Option<Vec<Booking>>,
    pub trips: Option<Vec<Value>>,
    pub income: Option<Vec<LedgerEntry>>,
    pub expenses: Option<Vec<LedgerEntry>>,
    pub users: Option<Vec<Value>>,
    pub captains: Option<Vec<Captain>>,
    pub vendors: Option<Vec<Vendor>>,
    pub packages: Option<Vec<Package>>,
    pub coupons: Option<Vec<Coupon>>,
    pub promos: Option<Vec<PromoCode>>,
    pub blogs: Option<Vec<Value>>,
    pub articles: Option<Vec<Value>>,
    pub testimonials: Option<Vec<Value>>,
    pub faqs: Option<Vec<Value>>,
}

async fn fetch_collection<T: DeserializeOwned>(api: &ApiClient, path: &str) -> Option<Vec<T>> {
    let params = [("limit".to_string(), COLLECTION_LIMIT.to_string())];
    match api.get::<Vec<T>>(&admin_path(path), &params).await {
        Ok(ApiOutcome::Data { data, .. }) => Some(data),
        Ok(ApiOutcome::Empty { .. }) => Some(Vec::new()),
        Ok(ApiOutcome::Failure { message }) => {
            tracing::warn!("Dashboard source {} failed: {}", path, message);
            None
        }
        Err(e) => {
            tracing::warn!("Dashboard source {} unavailable: {}", path, e);
            None
        }
    }
}

/// Fire every dashboard GET concurrently.
pub async fn fetch_dashboard_sources(api: &ApiClient) -> DashboardSources {
    let (
        bookings,
        trips,
        income,
        expenses,
        users,
        captains,
        vendors,
        packages,
        coupons,
        promos,
        blogs,
        articles,
        testimonials,
        faqs,
    ) = tokio::join!(
        fetch_collection(api, "/bookings"),
        fetch_collection(api, "/trips"),
        fetch_collection(api, "/income"),
        fetch_collection(api, "/expenses"),
        fetch_collection(api, "/users"),
        fetch_collection(api, "/captains"),
        fetch_collection(api, "/vendors"),
        fetch_collection(api, "/package"),
        fetch_collection(api, "/coupon"),
        fetch_collection(api, "/promo-code"),
        fetch_collection(api, "/blogs"),
        fetch_collection(api, "/articles"),
        fetch_collection(api, "/testimonial"),
        fetch_collection(api, "/faq"),
    );

    DashboardSources {
        bookings,
        trips,
        income,
        expenses,
        users,
        captains,
        vendors,
        packages,
        coupons,
        promos,
        blogs,
        articles,
        testimonials,
        faqs,
    }
}
