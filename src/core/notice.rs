//! User-facing notifications
//!
//! Domain failures are never fatal. Each error type knows the short title it
//! is shown under and turns into a [`Notice`] the front end displays.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStatus {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub status: NoticeStatus,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: NoticeStatus::Success,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: NoticeStatus::Info,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: NoticeStatus::Error,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(d) => write!(f, "{}: {}", self.title, d),
            None => write!(f, "{}", self.title),
        }
    }
}

/// An error that is reported to the user rather than propagated.
pub trait UserFacing: std::error::Error {
    fn title(&self) -> &'static str;

    fn notice(&self) -> Notice {
        let description = self.to_string();
        let notice = Notice::error(self.title());
        if description == notice.title {
            notice
        } else {
            notice.with_description(description)
        }
    }
}
