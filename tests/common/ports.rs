use std::sync::Mutex;

use portal_forms::form::form_model::{FieldValidity, FormIdentity, SubmitControl};
use portal_forms::notify::notification_model::{NotificationKind, NotificationRecord};
use portal_forms::view::port::{FormView, Navigator, NotificationSurface, PanelView};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Submit { form: String, label: String, disabled: bool },
    Validity { form: String, field: String, validity: FieldValidity },
    Cleared { form: String },
    Scrolled { form: String },
    Mounted { id: u64, kind: NotificationKind, message: String },
    Exiting { id: u64 },
    Unmounted { id: u64 },
    Navigated { target: String },
    Panel { open: bool },
    Focus { element: String },
}

/// Records every port call and tracks which notifications are on screen.
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    live: Mutex<Vec<NotificationRecord>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn live(&self) -> Vec<NotificationRecord> {
        self.live.lock().unwrap().clone()
    }

    /// Every notification ever mounted, in order.
    pub fn mounted(&self) -> Vec<(NotificationKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Mounted { kind, message, .. } => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Navigated { target } => Some(target),
                _ => None,
            })
            .collect()
    }

    pub fn validity_of(&self, field: &str) -> Option<FieldValidity> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Validity { field: f, validity, .. } if f == field => Some(validity),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&ViewEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

impl FormView for RecordingView {
    fn render_submit(&self, form: &FormIdentity, control: &SubmitControl) {
        self.push(ViewEvent::Submit {
            form: form.to_string(),
            label: control.label.clone(),
            disabled: control.disabled,
        });
    }

    fn render_validity(&self, form: &FormIdentity, field: &str, validity: FieldValidity) {
        self.push(ViewEvent::Validity {
            form: form.to_string(),
            field: field.to_string(),
            validity,
        });
    }

    fn clear_fields(&self, form: &FormIdentity) {
        self.push(ViewEvent::Cleared { form: form.to_string() });
    }

    fn scroll_into_view(&self, form: &FormIdentity) {
        self.push(ViewEvent::Scrolled { form: form.to_string() });
    }
}

impl NotificationSurface for RecordingView {
    fn mount(&self, record: &NotificationRecord) {
        self.live.lock().unwrap().push(record.clone());
        self.push(ViewEvent::Mounted {
            id: record.id,
            kind: record.kind,
            message: record.message.clone(),
        });
    }

    fn begin_exit(&self, id: u64) {
        self.push(ViewEvent::Exiting { id });
    }

    fn unmount(&self, id: u64) {
        self.live.lock().unwrap().retain(|r| r.id != id);
        self.push(ViewEvent::Unmounted { id });
    }
}

impl Navigator for RecordingView {
    fn navigate(&self, target: &str) {
        self.push(ViewEvent::Navigated {
            target: target.to_string(),
        });
    }
}

impl PanelView for RecordingView {
    fn render_panel(&self, open: bool) {
        self.push(ViewEvent::Panel { open });
    }

    fn focus(&self, element_id: &str) {
        self.push(ViewEvent::Focus {
            element: element_id.to_string(),
        });
    }
}
