use std::sync::Arc;

use tracing::debug;

use crate::nav::focus::{ElementInfo, FocusDecision, FocusTrap, Key, KeyPress};
use crate::view::port::PanelView;

/// Viewports at or below this width treat the panel as an overlay.
pub const MOBILE_BREAKPOINT_PX: u32 = 992;

/// Where a document click landed relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickTarget {
    pub inside_panel: bool,
    pub inside_toggle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    PassThrough,
    Closed,
    FocusMoved(String),
}

/// Collapsible navigation panel. Owns the focus trap, which is only
/// consulted while the panel is open.
pub struct NavigationPanel {
    open: bool,
    trap: FocusTrap,
    view: Arc<dyn PanelView>,
}

impl NavigationPanel {
    pub fn new(elements: &[ElementInfo], view: Arc<dyn PanelView>) -> Self {
        Self {
            open: false,
            trap: FocusTrap::new(elements),
            view,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Following a nav link closes the overlay on narrow viewports.
    pub fn on_link_click(&mut self, viewport_width: u32) {
        if viewport_width <= MOBILE_BREAKPOINT_PX {
            self.close();
        }
    }

    pub fn on_outside_click(&mut self, viewport_width: u32, target: ClickTarget) {
        if viewport_width <= MOBILE_BREAKPOINT_PX
            && self.open
            && !target.inside_panel
            && !target.inside_toggle
        {
            self.close();
        }
    }

    pub fn on_resize(&mut self, viewport_width: u32) {
        if viewport_width > MOBILE_BREAKPOINT_PX {
            self.close();
        }
    }

    pub fn on_key(&mut self, press: &KeyPress, active: &str) -> KeyOutcome {
        if !self.open {
            return KeyOutcome::PassThrough;
        }

        if press.key == Key::Escape {
            self.close();
            return KeyOutcome::Closed;
        }

        match self.trap.handle_key(press, active) {
            FocusDecision::MoveTo(id) => {
                self.view.focus(&id);
                KeyOutcome::FocusMoved(id)
            }
            FocusDecision::PassThrough => KeyOutcome::PassThrough,
        }
    }

    fn set_open(&mut self, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        debug!(open, "navigation panel");
        self.view.render_panel(open);
    }
}
