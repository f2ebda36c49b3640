//! Coupon and promo code models.
//!
//! Both carry a validity window. Their displayed status is derived: once
//! `validUntil` has passed the record shows as expired whatever the stored
//! status says. The derived value is never written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{is_blank, parse_timestamp};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    #[default]
    Active,
    Inactive,
    Expired,
}

impl CouponStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponStatus::Active => "active",
            CouponStatus::Inactive => "inactive",
            CouponStatus::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Some(CouponStatus::Active),
            "inactive" => Some(CouponStatus::Inactive),
            "expired" => Some(CouponStatus::Expired),
            _ => None,
        }
    }
}

/// Records whose displayed status depends on an expiry timestamp.
pub trait Expiring {
    fn valid_until(&self) -> Option<&str>;
    fn stored_status(&self) -> CouponStatus;

    /// Status to show: `Expired` when the window closed before `now`.
    fn effective_status(&self, now: DateTime<Utc>) -> CouponStatus {
        let expired = self
            .valid_until()
            .and_then(parse_timestamp)
            .is_some_and(|until| until < now);
        if expired {
            CouponStatus::Expired
        } else {
            self.stored_status()
        }
    }
}

/// A checkout coupon.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_to: Option<String>,
    #[serde(default)]
    pub status: CouponStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Expiring for Coupon {
    fn valid_until(&self) -> Option<&str> {
        self.valid_until.as_deref()
    }

    fn stored_status(&self) -> CouponStatus {
        self.status
    }
}

/// A marketing promo code.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_packages: Option<Vec<String>>,
    #[serde(default)]
    pub status: CouponStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Expiring for PromoCode {
    fn valid_until(&self) -> Option<&str> {
        self.valid_until.as_deref()
    }

    fn stored_status(&self) -> CouponStatus {
        self.status
    }
}

/// Request body for creating or updating a coupon or promo code.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCodeInput {
    pub code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    pub status: CouponStatus,
}

impl From<&Coupon> for DiscountCodeInput {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            title: coupon.title.clone(),
            description: coupon.description.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            min_purchase: coupon.min_purchase,
            max_discount: coupon.max_discount,
            valid_from: coupon.valid_from.clone(),
            valid_until: coupon.valid_until.clone(),
            usage_limit: coupon.usage_limit,
            status: coupon.status,
        }
    }
}

impl From<&PromoCode> for DiscountCodeInput {
    fn from(promo: &PromoCode) -> Self {
        Self {
            code: promo.code.clone(),
            title: promo.title.clone(),
            description: promo.description.clone(),
            discount_type: promo.discount_type,
            discount_value: promo.discount_value,
            min_purchase: promo.min_purchase,
            max_discount: promo.max_discount,
            valid_from: promo.valid_from.clone(),
            valid_until: promo.valid_until.clone(),
            usage_limit: promo.usage_limit,
            status: promo.status,
        }
    }
}

impl DiscountCodeInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.code) {
            return Err(AppError::Validation("Code is required".to_string()));
        }
        if self.discount_value <= 0.0 {
            return Err(AppError::Validation(
                "Discount value must be greater than zero".to_string(),
            ));
        }
        if self.discount_type == DiscountType::Percentage && self.discount_value > 100.0 {
            return Err(AppError::Validation(
                "Percentage discount cannot exceed 100".to_string(),
            ));
        }
        if let (Some(from), Some(until)) = (&self.valid_from, &self.valid_until) {
            match (parse_timestamp(from), parse_timestamp(until)) {
                (Some(from), Some(until)) if until < from => {
                    return Err(AppError::Validation(
                        "Valid until must be after valid from".to_string(),
                    ));
                }
                (None, _) | (_, None) => {
                    return Err(AppError::Validation("Invalid validity date".to_string()));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_past_valid_until_shows_expired_for_any_stored_status() {
        for stored in [CouponStatus::Active, CouponStatus::Inactive] {
            let coupon = Coupon {
                code: "SUMMER".into(),
                status: stored,
                valid_until: Some("2025-06-01T00:00:00Z".into()),
                ..Default::default()
            };
            assert_eq!(coupon.effective_status(now()), CouponStatus::Expired);
            assert_eq!(coupon.status, stored);
        }
    }

    #[test]
    fn test_future_or_missing_valid_until_keeps_stored_status() {
        let promo = PromoCode {
            code: "MONSOON".into(),
            status: CouponStatus::Inactive,
            valid_until: Some("2025-07-01".into()),
            ..Default::default()
        };
        assert_eq!(promo.effective_status(now()), CouponStatus::Inactive);

        let open_ended = PromoCode {
            code: "FOREVER".into(),
            ..Default::default()
        };
        assert_eq!(open_ended.effective_status(now()), CouponStatus::Active);
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "c1", "code": "GOA10", "title": "Goa ten",
            "discountType": "fixed", "discountValue": 500,
            "validUntil": "2024-01-01T00:00:00.000Z", "status": "active",
            "usageCount": 7, "somethingNew": true
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.id, "c1");
        assert_eq!(coupon.discount_type, DiscountType::Fixed);
        assert_eq!(coupon.usage_count, 7);
        assert_eq!(coupon.effective_status(now()), CouponStatus::Expired);
    }

    #[test]
    fn test_record_with_both_id_keys() {
        let json = r#"{"_id": "c1", "id": "c1", "code": "GOA10"}"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.id, "c1");
        assert_eq!(coupon.code, "GOA10");
    }

    #[test]
    fn test_edit_prefill_keeps_stored_fields() {
        let coupon = Coupon {
            id: "c1".into(),
            code: "GOA10".into(),
            discount_type: DiscountType::Fixed,
            discount_value: 500.0,
            valid_until: Some("2024-01-01".into()),
            usage_limit: Some(50),
            ..Default::default()
        };
        let input = DiscountCodeInput::from(&coupon);
        assert_eq!(input.code, "GOA10");
        assert_eq!(input.discount_type, DiscountType::Fixed);
        assert_eq!(input.discount_value, 500.0);
        assert_eq!(input.usage_limit, Some(50));
        // Stored status is edited, not the derived one
        assert_eq!(input.status, CouponStatus::Active);
    }

    #[test]
    fn test_input_validation() {
        let mut input = DiscountCodeInput {
            code: "NEW".into(),
            title: "New".into(),
            discount_value: 10.0,
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.discount_value = 150.0;
        assert!(input.validate().unwrap_err().is_validation());

        input.discount_value = 10.0;
        input.valid_from = Some("2025-02-01".into());
        input.valid_until = Some("2025-01-01".into());
        assert!(input.validate().is_err());

        input.code = " ".into();
        assert!(input.validate().is_err());
    }
}
