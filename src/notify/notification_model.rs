use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

pub const DEFAULT_DISPLAY: Duration = Duration::from_millis(5000);
pub const DEFAULT_EXIT_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn accent_color(self) -> &'static str {
        match self {
            NotificationKind::Success => "#28a745",
            NotificationKind::Error => "#dc3545",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "exclamation-circle",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "form-message success-message",
            NotificationKind::Error => "form-message error-message",
        }
    }
}

/// Viewport corner the overlay is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

/// Placement and look of the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStyle {
    pub corner: Corner,
    pub offset_px: u32,
    pub max_width_px: u32,
    pub accent_color: &'static str,
    pub icon: &'static str,
}

impl OverlayStyle {
    pub fn for_kind(kind: NotificationKind) -> Self {
        Self::placed(kind, Corner::default())
    }

    pub fn placed(kind: NotificationKind, corner: Corner) -> Self {
        Self {
            corner,
            offset_px: 20,
            max_width_px: 400,
            accent_color: kind.accent_color(),
            icon: kind.icon(),
        }
    }
}

/// The single transient on-screen message.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub style: OverlayStyle,
    /// When the exit transition starts.
    pub expires_at: Instant,
}

impl NotificationRecord {
    pub fn new(id: u64, kind: NotificationKind, message: &str, display: Duration) -> Self {
        Self {
            id,
            kind,
            message: message.to_string(),
            style: OverlayStyle::for_kind(kind),
            expires_at: Instant::now() + display,
        }
    }

    pub fn with_corner(mut self, corner: Corner) -> Self {
        self.style = OverlayStyle::placed(self.kind, corner);
        self
    }
}
