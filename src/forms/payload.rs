//! Multipart payload builder.
//!
//! Scalars go up as plain strings, arrays and objects as JSON strings, and
//! every newly picked file under the field name of the collection it belongs
//! to. The backend pairs files with JSON siblings by array position.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::errors::AppError;

/// A locally selected file waiting for upload. Never serialized into JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name).to_string(),
            bytes,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(&file_name, bytes))
    }
}

/// Content type from the file extension; unknown types go up as octet-stream.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Ordered text fields plus files, ready to become `multipart/form-data`.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    files: Vec<(String, PendingFile)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar as a plain string.
    pub fn text(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    /// Append an optional scalar; `None` is left out.
    pub fn text_opt(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.text(name, v);
        }
        self
    }

    /// Append an array or object as a JSON string.
    pub fn json<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<&mut Self, AppError> {
        let encoded = serde_json::to_string(value)?;
        self.fields.push((name.to_string(), encoded));
        Ok(self)
    }

    pub fn file(&mut self, name: &str, file: PendingFile) -> &mut Self {
        self.files.push((name.to_string(), file));
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[(String, PendingFile)] {
        &self.files
    }

    /// Value of the first field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Files appended under `name`, in order.
    pub fn files_named(&self, name: &str) -> Vec<&PendingFile> {
        self.files
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, f)| f)
            .collect()
    }

    pub fn into_multipart(self) -> Result<Form, AppError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for (name, file) in self.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)
                .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}
