use std::borrow::Cow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{errors::FieldErrors, utils::markdown::safe_markdown_to_html};

// ───── Constants ──────────────────────────────────────────────────────
pub const MAX_TITLE_LENGTH: u64 = 200;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated post that has not been stored yet; the store assigns `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
}

/// A validated replacement for the mutable fields of an existing post.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPostUpdate {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

impl BlogPost {
    pub fn content_html(&self) -> String {
        safe_markdown_to_html(&self.content)
    }
}

// ───── Form Input ───────────────────────────────────────────────────

/// The post form exactly as submitted. Missing fields deserialize as empty
/// strings so they surface as field errors instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(
        custom(function = "validate_required"),
        length(max = MAX_TITLE_LENGTH, message = "Ensure this value has at most 200 characters.")
    )]
    pub title: String,

    #[validate(custom(function = "validate_required"))]
    pub content: String,
}

impl PostForm {
    /// Unbound form pre-filled from a stored post.
    pub fn from_post(post: &BlogPost) -> Self {
        PostForm {
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }

    /// Surrounding whitespace is not part of the value.
    pub fn normalized(self) -> Self {
        PostForm {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
        }
    }

    pub fn validate_for_create(&self) -> Result<NewBlogPost, FieldErrors> {
        let form = self.clone().normalized();
        form.validate()?;

        Ok(NewBlogPost {
            title: form.title,
            content: form.content,
        })
    }

    pub fn validate_for_update(&self, existing: &BlogPost) -> Result<BlogPostUpdate, FieldErrors> {
        let form = self.clone().normalized();
        form.validate()?;

        Ok(BlogPostUpdate {
            id: existing.id,
            title: form.title,
            content: form.content,
        })
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", "This field is required."));
    }
    Ok(())
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
