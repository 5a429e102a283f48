use crate::form::form_model::{FieldValidity, FormIdentity, SubmitControl};
use crate::notify::notification_model::NotificationRecord;

// ============================================================================
// Presentation ports
//
// Every UI mutation the state machines perform goes through one of these
// traits. A page binding, the console driver and the test recorders all
// implement them.
// ============================================================================

/// Rendering side of a tracked form.
pub trait FormView: Send + Sync {
    /// The submit control changed (disabled/busy or restored).
    fn render_submit(&self, form: &FormIdentity, control: &SubmitControl);

    /// A field's valid/invalid decoration changed.
    fn render_validity(&self, form: &FormIdentity, field: &str, validity: FieldValidity);

    /// All field values were cleared.
    fn clear_fields(&self, form: &FormIdentity);

    /// Smoothly bring the form into view.
    fn scroll_into_view(&self, form: &FormIdentity);
}

/// Where notification overlays live.
pub trait NotificationSurface: Send + Sync {
    fn mount(&self, record: &NotificationRecord);

    /// Start the exit transition of a mounted notification.
    fn begin_exit(&self, id: u64);

    fn unmount(&self, id: u64);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Rendering side of the navigation panel.
pub trait PanelView: Send + Sync {
    /// Panel open state, mirrored to the content area, the toggle and the
    /// body scroll lock.
    fn render_panel(&self, open: bool);

    fn focus(&self, element_id: &str);
}

/// A port that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl FormView for NullView {
    fn render_submit(&self, _form: &FormIdentity, _control: &SubmitControl) {}
    fn render_validity(&self, _form: &FormIdentity, _field: &str, _validity: FieldValidity) {}
    fn clear_fields(&self, _form: &FormIdentity) {}
    fn scroll_into_view(&self, _form: &FormIdentity) {}
}

impl NotificationSurface for NullView {
    fn mount(&self, _record: &NotificationRecord) {}
    fn begin_exit(&self, _id: u64) {}
    fn unmount(&self, _id: u64) {}
}

impl Navigator for NullView {
    fn navigate(&self, _target: &str) {}
}

impl PanelView for NullView {
    fn render_panel(&self, _open: bool) {}
    fn focus(&self, _element_id: &str) {}
}
