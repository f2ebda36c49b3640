//! Flat content records: banners, FAQs, testimonials, adventure posts.

use serde::{Deserialize, Serialize};

use super::{is_blank, ActiveStatus};
use crate::errors::AppError;

/// Homepage banner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Editable banner fields; the image goes up as a file.
#[derive(Debug, Clone, Default)]
pub struct BannerInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub link: Option<String>,
    pub order: i32,
    pub status: ActiveStatus,
}

impl From<&Banner> for BannerInput {
    fn from(banner: &Banner) -> Self {
        Self {
            title: banner.title.clone(),
            subtitle: banner.subtitle.clone(),
            link: banner.link.clone(),
            order: banner.order,
            status: banner.status,
        }
    }
}

impl BannerInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.title) {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub status: ActiveStatus,
}

impl From<&Faq> for FaqInput {
    fn from(faq: &Faq) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category: faq.category.clone(),
            status: faq.status,
        }
    }
}

impl FaqInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.question) {
            return Err(AppError::Validation("Question is required".to_string()));
        }
        if is_blank(&self.answer) {
            return Err(AppError::Validation("Answer is required".to_string()));
        }
        Ok(())
    }
}

/// Moderation state of a customer testimonial.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Stored as a number; older records carry half stars.
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialInput {
    pub name: String,
    pub designation: Option<String>,
    pub message: String,
    pub rating: u8,
    pub status: ReviewStatus,
}

impl From<&Testimonial> for TestimonialInput {
    fn from(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            designation: t.designation.clone(),
            message: t.message.clone(),
            rating: t.rating.round().clamp(0.0, 5.0) as u8,
            status: t.status,
        }
    }
}

impl TestimonialInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.name) {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if is_blank(&self.message) {
            return Err(AppError::Validation("Message is required".to_string()));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdventurePost {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AdventurePostInput {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub category: Option<String>,
    /// Already uploaded image URLs to keep
    pub existing_images: Vec<String>,
    pub status: ActiveStatus,
}

impl From<&AdventurePost> for AdventurePostInput {
    fn from(post: &AdventurePost) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            location: post.location.clone(),
            category: post.category.clone(),
            existing_images: post.images.clone(),
            status: post.status,
        }
    }
}

impl AdventurePostInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.title) {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if is_blank(&self.description) {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        Ok(())
    }
}
