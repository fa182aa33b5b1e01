//! Transient, dismissible notices shown to the user.

use std::collections::VecDeque;

const MAX_NOTICES: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: None,
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: Some(description.into()),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Single-line rendering for a status bar.
    pub fn line(&self) -> String {
        match &self.description {
            Some(d) => format!("{}: {}", self.title, d),
            None => self.title.clone(),
        }
    }
}

/// Newest-first queue of notices, bounded in size.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, variant = ?notice.variant, "notice");
        self.queue.push_front(notice);
        self.queue.truncate(MAX_NOTICES);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.queue.front()
    }

    /// Dismiss the newest notice.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_bounded() {
        let mut notices = Notices::default();
        for i in 0..10 {
            notices.push(Notice::info(format!("n{i}")));
        }
        assert_eq!(notices.len(), MAX_NOTICES);
        assert_eq!(notices.latest().map(|n| n.title.as_str()), Some("n9"));
        notices.dismiss();
        assert_eq!(notices.latest().map(|n| n.title.as_str()), Some("n8"));
    }

    #[test]
    fn test_line_rendering() {
        let notice = Notice::error("Login failed", "Use: joao@example.com / 123456");
        assert_eq!(notice.line(), "Login failed: Use: joao@example.com / 123456");
        assert_eq!(notice.variant, NoticeVariant::Destructive);
        assert_eq!(Notice::info("Saved").line(), "Saved");
    }
}
