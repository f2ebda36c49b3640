//! User-facing notices (toasts).
//!
//! Mutating actions report their outcome as a `Notice`. GET failures never
//! produce one; they are only logged.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notice. Local validation failures get their own title so the
    /// user can tell nothing was sent.
    pub fn from_error(err: &AppError) -> Self {
        let title = match err {
            AppError::Validation(_) => "Validation Error",
            AppError::Unauthorized(_) => "Session Expired",
            _ => "Error",
        };
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: err.message(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

/// Notice for a finished mutation: the backend message when it sent one,
/// otherwise `fallback`.
pub fn outcome_notice(result: &Result<Option<String>, AppError>, fallback: &str) -> Notice {
    match result {
        Ok(Some(message)) if !message.trim().is_empty() => Notice::success(message.clone()),
        Ok(_) => Notice::success(fallback),
        Err(e) => Notice::from_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_title() {
        let notice = Notice::from_error(&AppError::Validation("Title is required".into()));
        assert_eq!(notice.title, "Validation Error");
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "[Validation Error] Title is required");
    }

    #[test]
    fn test_outcome_notice_prefers_backend_message() {
        let ok = outcome_notice(&Ok(Some("Banner created".into())), "Saved");
        assert_eq!(ok.message, "Banner created");
        let bare = outcome_notice(&Ok(None), "Saved");
        assert_eq!(bare.message, "Saved");
        let failed = outcome_notice(&Err(AppError::Api("Duplicate".into())), "Saved");
        assert_eq!((failed.title.as_str(), failed.message.as_str()), ("Error", "Duplicate"));
    }
}
