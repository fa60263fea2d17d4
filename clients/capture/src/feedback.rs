use std::time::{Duration, Instant};

/// Banners disappear on their own after this long
pub const BANNER_AUTO_DISMISS: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Message shown on the form after a submission settles
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub auto_dismiss: Option<Duration>,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Banner {
            kind: BannerKind::Success,
            message: message.into(),
            auto_dismiss: Some(BANNER_AUTO_DISMISS),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Banner {
            kind: BannerKind::Error,
            message: message.into(),
            auto_dismiss: Some(BANNER_AUTO_DISMISS),
        }
    }
}

/// Holds the single banner a form may show. Showing a new banner replaces the current one.
#[derive(Debug, Default)]
pub struct BannerSlot {
    current: Option<(Banner, Instant)>,
}

impl BannerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the banner that was replaced, if any
    pub fn show(&mut self, banner: Banner, now: Instant) -> Option<Banner> {
        self.current
            .replace((banner, now))
            .map(|(replaced, _)| replaced)
    }

    /// The visible banner at `now`, expired banners are dropped
    pub fn visible(&mut self, now: Instant) -> Option<&Banner> {
        let expired = match &self.current {
            Some((banner, shown_at)) => banner
                .auto_dismiss
                .map(|after| now.saturating_duration_since(*shown_at) >= after)
                .unwrap_or(false),
            None => false,
        };

        if expired {
            self.current = None;
        }

        self.current.as_ref().map(|(banner, _)| banner)
    }

    pub fn dismiss(&mut self) -> Option<Banner> {
        self.current.take().map(|(banner, _)| banner)
    }
}
