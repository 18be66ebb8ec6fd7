use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Error,
}

impl MessageLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageLevel::Success => "alert-success",
            MessageLevel::Error => "alert-error",
        }
    }
}

/// A one-shot note shown above the page content. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        StatusMessage { level: MessageLevel::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage { level: MessageLevel::Error, text: text.into() }
    }

    pub fn form_errors() -> Self {
        Self::error("Please correct the following errors:")
    }
}

/// Outcome of a successful post mutation, carried to the list page as
/// `?notice=...` across the redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
}

impl Notice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        }
    }

    pub fn message(&self) -> StatusMessage {
        StatusMessage::success(format!("The post has been {} successfully.", self.as_str()))
    }

    /// Redirect target for `path` carrying this notice.
    pub fn location(&self, path: &str) -> String {
        format!("{}?notice={}", path, self.as_str())
    }

    /// Lenient parse: anything unrecognised means "no notice".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "created" => Some(Notice::Created),
            "updated" => Some(Notice::Updated),
            "deleted" => Some(Notice::Deleted),
            _ => None,
        }
    }
}
