//! The list resources behind each back-office table.

use async_trait::async_trait;

use super::list::{EditableResource, ListResource};
use crate::api::{self, ApiClient};
use crate::errors::AppError;
use crate::forms::PendingFile;
use crate::models::{
    modules, AdventurePost, AdventurePostInput, Banner, BannerInput, CommunityTrip, Coupon,
    Destination, DiscountCodeInput, Faq, FaqInput, ListQuery, Package, Page, PromoCode,
    Testimonial, TestimonialInput,
};

macro_rules! list_resource {
    ($name:ident, $item:ty, $module:expr, $label:literal, $list:path, $delete:path) => {
        #[derive(Clone)]
        pub struct $name {
            api: ApiClient,
        }

        impl $name {
            pub fn new(api: ApiClient) -> Self {
                Self { api }
            }
        }

        #[async_trait]
        impl ListResource for $name {
            type Item = $item;

            fn module(&self) -> &'static str {
                $module
            }

            fn label(&self) -> &'static str {
                $label
            }

            async fn fetch_page(&self, query: &ListQuery) -> Result<Page<$item>, AppError> {
                $list(&self.api, query).await
            }

            async fn delete(&self, id: &str) -> Result<Option<String>, AppError> {
                $delete(&self.api, id).await
            }
        }
    };
}

list_resource!(
    BannerResource,
    Banner,
    modules::CONTENT,
    "banner",
    api::list_banners,
    api::delete_banner
);
list_resource!(
    CouponResource,
    Coupon,
    modules::COUPONS,
    "coupon",
    api::list_coupons,
    api::delete_coupon
);
list_resource!(
    PromoCodeResource,
    PromoCode,
    modules::PROMO_CODES,
    "promo code",
    api::list_promo_codes,
    api::delete_promo_code
);
list_resource!(FaqResource, Faq, modules::CONTENT, "FAQ", api::list_faqs, api::delete_faq);
list_resource!(
    TestimonialResource,
    Testimonial,
    modules::CONTENT,
    "testimonial",
    api::list_testimonials,
    api::delete_testimonial
);
list_resource!(
    CommunityTripResource,
    CommunityTrip,
    modules::COMMUNITY,
    "community trip",
    api::list_community_trips,
    api::delete_community_trip
);
list_resource!(
    AdventurePostResource,
    AdventurePost,
    modules::CONTENT,
    "adventure post",
    api::list_adventure_posts,
    api::delete_adventure_post
);
list_resource!(
    PackageResource,
    Package,
    modules::PACKAGES,
    "package",
    api::list_packages,
    api::delete_package
);
list_resource!(
    DestinationResource,
    Destination,
    modules::DESTINATIONS,
    "destination",
    api::list_destinations,
    api::delete_destination
);

#[async_trait]
impl EditableResource for BannerResource {
    type Input = BannerInput;

    fn item_id(item: &Banner) -> &str {
        &item.id
    }

    async fn create(
        &self,
        input: &BannerInput,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        let image = files
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Validation("Banner image is required".to_string()))?;
        api::create_banner(&self.api, input, image).await
    }

    async fn update(
        &self,
        id: &str,
        input: &BannerInput,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::update_banner(&self.api, id, input, files.into_iter().next()).await
    }
}

/// Coupons and promo codes share one JSON input and take no files.
macro_rules! discount_code_editing {
    ($name:ident, $item:ty, $create:path, $update:path) => {
        #[async_trait]
        impl EditableResource for $name {
            type Input = DiscountCodeInput;

            fn item_id(item: &$item) -> &str {
                &item.id
            }

            async fn create(
                &self,
                input: &DiscountCodeInput,
                _files: Vec<PendingFile>,
            ) -> Result<Option<String>, AppError> {
                $create(&self.api, input).await
            }

            async fn update(
                &self,
                id: &str,
                input: &DiscountCodeInput,
                _files: Vec<PendingFile>,
            ) -> Result<Option<String>, AppError> {
                $update(&self.api, id, input).await
            }
        }
    };
}

discount_code_editing!(CouponResource, Coupon, api::create_coupon, api::update_coupon);
discount_code_editing!(
    PromoCodeResource,
    PromoCode,
    api::create_promo_code,
    api::update_promo_code
);

#[async_trait]
impl EditableResource for FaqResource {
    type Input = FaqInput;

    fn item_id(item: &Faq) -> &str {
        &item.id
    }

    async fn create(
        &self,
        input: &FaqInput,
        _files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::create_faq(&self.api, input).await
    }

    async fn update(
        &self,
        id: &str,
        input: &FaqInput,
        _files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::update_faq(&self.api, id, input).await
    }
}

#[async_trait]
impl EditableResource for TestimonialResource {
    type Input = TestimonialInput;

    fn item_id(item: &Testimonial) -> &str {
        &item.id
    }

    async fn create(
        &self,
        input: &TestimonialInput,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::create_testimonial(&self.api, input, files.into_iter().next()).await
    }

    async fn update(
        &self,
        id: &str,
        input: &TestimonialInput,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::update_testimonial(&self.api, id, input, files.into_iter().next()).await
    }
}

#[async_trait]
impl EditableResource for AdventurePostResource {
    type Input = AdventurePostInput;

    fn item_id(item: &AdventurePost) -> &str {
        &item.id
    }

    async fn create(
        &self,
        input: &AdventurePostInput,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::create_adventure_post(&self.api, input, files).await
    }

    async fn update(
        &self,
        id: &str,
        input: &AdventurePostInput,
        files: Vec<PendingFile>,
    ) -> Result<Option<String>, AppError> {
        api::update_adventure_post(&self.api, id, input, files).await
    }
}
