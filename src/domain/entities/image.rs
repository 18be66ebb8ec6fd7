use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use infer::MatcherType;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::blog_post::validate_required,
    errors::{AppError, FieldErrors},
};

pub const MAX_NAME_LENGTH: u64 = 50;

/// Storage namespace every uploaded image lives under.
pub const IMAGE_NAMESPACE: &str = "images";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Image {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_path: String, // key on the media store, e.g. "images/<uuid>.png"
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageInsert {
    pub name: String,
    pub description: String,
    pub image_path: String,
}

/// A validated upload whose file has not been written anywhere yet.
#[derive(Debug)]
pub struct NewImage {
    pub name: String,
    pub description: String,
    pub file: ImageFile,
}

impl NewImage {
    pub fn into_insert(self, image_path: String) -> (ImageInsert, ImageFile) {
        let insert = ImageInsert {
            name: self.name,
            description: self.description,
            image_path,
        };
        (insert, self.file)
    }
}

#[derive(Debug)]
pub struct ImageFile {
    pub content: Vec<u8>,
    pub extension: &'static str,
    pub mime_type: &'static str,
}

// ───── Form Input ───────────────────────────────────────────────────

/// Raw multipart body of the gallery upload form. Every part is optional so
/// that a missing part becomes a field error rather than a rejected request.
#[derive(Debug, MultipartForm)]
pub struct ImageUpload {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content: Vec<u8>,
}

/// The text half of the form, kept around to echo input back on failure.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ImageFormValues {
    #[validate(
        custom(function = "validate_required"),
        length(max = MAX_NAME_LENGTH, message = "Ensure this value has at most 50 characters.")
    )]
    pub name: String,

    #[validate(custom(function = "validate_required"))]
    pub description: String,
}

#[derive(Debug, Default)]
pub struct ImageForm {
    pub values: ImageFormValues,
    pub image: Option<UploadedFile>,
}

impl ImageForm {
    /// Reads the spooled upload into memory. Fails only on I/O trouble.
    pub async fn from_multipart(upload: ImageUpload) -> Result<Self, AppError> {
        let image = match upload.image {
            Some(temp) => {
                let content = tokio::fs::read(temp.file.path()).await?;
                Some(UploadedFile { file_name: temp.file_name, content })
            }
            None => None,
        };

        Ok(ImageForm {
            values: ImageFormValues {
                name: upload.name.map(|t| t.into_inner()).unwrap_or_default(),
                description: upload.description.map(|t| t.into_inner()).unwrap_or_default(),
            },
            image,
        })
    }

    pub fn validate_for_create(self, max_upload_bytes: usize) -> Result<NewImage, FieldErrors> {
        let values = ImageFormValues {
            name: self.values.name.trim().to_string(),
            description: self.values.description.trim().to_string(),
        };

        let mut errors = values
            .validate()
            .err()
            .map(FieldErrors::from)
            .unwrap_or_default();

        match validate_image_file(self.image, max_upload_bytes) {
            Ok(file) => {
                errors.into_result()?;
                Ok(NewImage {
                    name: values.name,
                    description: values.description,
                    file,
                })
            }
            Err(message) => {
                errors.add("image", message);
                Err(errors)
            }
        }
    }
}

fn validate_image_file(upload: Option<UploadedFile>, max_upload_bytes: usize) -> Result<ImageFile, String> {
    let upload = match upload {
        Some(upload) if upload.file_name.as_deref().is_some_and(|n| !n.is_empty()) || !upload.content.is_empty() => upload,
        _ => return Err("No file was submitted.".into()),
    };

    if upload.content.is_empty() {
        return Err("The submitted file is empty.".into());
    }
    if upload.content.len() > max_upload_bytes {
        return Err(format!("The file is too large; the limit is {} bytes.", max_upload_bytes));
    }

    match infer::get(&upload.content) {
        Some(kind) if kind.matcher_type() == MatcherType::Image => Ok(ImageFile {
            content: upload.content,
            extension: kind.extension(),
            mime_type: kind.mime_type(),
        }),
        _ => Err("Upload a valid image. The file you uploaded was either not an image or a corrupted image.".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest PNG header `infer` recognises.
    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn form(name: &str, description: &str, content: Option<&[u8]>) -> ImageForm {
        ImageForm {
            values: ImageFormValues { name: name.into(), description: description.into() },
            image: content.map(|c| UploadedFile { file_name: Some("cat.png".into()), content: c.to_vec() }),
        }
    }

    #[test]
    fn accepts_complete_upload() {
        let new_image = form(" Cat ", "A cat", Some(PNG_BYTES)).validate_for_create(1024).unwrap();

        assert_eq!(new_image.name, "Cat");
        assert_eq!(new_image.file.extension, "png");
        assert_eq!(new_image.file.mime_type, "image/png");
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = form("", " ", None).validate_for_create(1024).unwrap_err();

        assert!(errors.has_field("name"));
        assert!(errors.has_field("description"));
        assert_eq!(errors.for_field("image").next(), Some("No file was submitted."));
    }

    #[test]
    fn rejects_empty_file() {
        let errors = form("Cat", "A cat", Some(&[][..])).validate_for_create(1024).unwrap_err();
        assert_eq!(errors.for_field("image").next(), Some("The submitted file is empty."));
    }

    #[test]
    fn rejects_non_image_content() {
        let errors = form("Cat", "A cat", Some(&b"plain text, not pixels"[..])).validate_for_create(1024).unwrap_err();
        assert!(errors.for_field("image").next().unwrap().starts_with("Upload a valid image."));
    }

    #[test]
    fn rejects_oversized_file() {
        let errors = form("Cat", "A cat", Some(PNG_BYTES)).validate_for_create(4).unwrap_err();
        assert!(errors.has_field("image"));
    }

    #[test]
    fn rejects_long_name() {
        let errors = form(&"n".repeat(51), "A cat", Some(PNG_BYTES)).validate_for_create(1024).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("name"));
    }

    #[test]
    fn splits_into_insert_and_file() {
        let new_image = form("Cat", "A cat", Some(PNG_BYTES)).validate_for_create(1024).unwrap();
        let (insert, file) = new_image.into_insert("images/x.png".into());

        assert_eq!(insert.image_path, "images/x.png");
        assert_eq!(file.content, PNG_BYTES);
    }
}
