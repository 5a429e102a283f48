use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use portal_forms::form::form_model::{FieldKind, FormField, FormHandle, FormIdentity, FormState};
use portal_forms::form::payload::SubmissionRequest;
use portal_forms::notify::presenter::NotificationPresenter;
use portal_forms::submit::controller::{SubmissionController, SubmissionSettings};
use portal_forms::submit::endpoint::{EndpointBinding, EndpointTable};
use portal_forms::submit::error::TransportError;
use portal_forms::submit::transport::{SubmissionTransport, TransportResponse};

use super::ports::RecordingView;

/// One scripted reply of the mock endpoint.
#[derive(Debug, Clone)]
pub enum Scripted {
    Status(u16),
    Fault(&'static str),
    Hang,
}

#[derive(Default)]
struct Inner {
    script: Mutex<VecDeque<Scripted>>,
    bodies: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

/// Transport that records request bodies and replies from a script.
/// An exhausted script answers 200.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            inner: Arc::new(Inner {
                script: Mutex::new(script.into()),
                ..Default::default()
            }),
        }
    }

    /// Every request waits for `gate` to be notified before replying.
    pub fn gated(script: Vec<Scripted>, gate: Arc<Notify>) -> Self {
        Self {
            inner: Arc::new(Inner {
                script: Mutex::new(script.into()),
                gate: Some(gate),
                ..Default::default()
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<String> {
        self.inner.bodies.lock().unwrap().clone()
    }
}

impl SubmissionTransport for ScriptedTransport {
    async fn post(
        &self,
        _binding: &EndpointBinding,
        request: &SubmissionRequest<'_>,
    ) -> Result<TransportResponse, TransportError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        let body = serde_json::to_string(request).unwrap();
        self.inner.bodies.lock().unwrap().push(body);

        if let Some(gate) = &self.inner.gate {
            gate.notified().await;
        }

        let next = self
            .inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::Status(200));

        match next {
            Scripted::Status(status) => Ok(TransportResponse::new(status, "{\"created\":1}")),
            Scripted::Fault(message) => Err(TransportError::Other(message.to_string())),
            Scripted::Hang => std::future::pending().await,
        }
    }
}

pub fn registration_state() -> FormState {
    FormState::new(
        FormIdentity::Registration,
        vec![
            FormField::text("full_name").required().with_value("  Jane Doe "),
            FormField::new("email", FieldKind::Email, true).with_value("jane@example.com"),
            FormField::new("phone", FieldKind::Phone, false).with_value("+1 415 555 2671"),
            FormField::text("organization"),
        ],
    )
    .with_submit_label("Register Now")
}

pub fn registration_form() -> FormHandle {
    FormHandle::new(registration_state())
}

pub fn affiliate_form() -> FormHandle {
    FormHandle::new(
        FormState::new(
            FormIdentity::Affiliate,
            vec![
                FormField::text("full_name").required().with_value("Sam Lee"),
                FormField::new("email", FieldKind::Email, true).with_value("sam@example.org"),
                FormField::text("company").with_value("Acme"),
            ],
        )
        .with_submit_label("Become a Partner"),
    )
}

pub fn endpoints() -> EndpointTable {
    EndpointTable::new()
        .bind(
            FormIdentity::Registration,
            EndpointBinding::new("http://127.0.0.1:9/registration").with_auth("reg", "secret"),
        )
        .bind(
            FormIdentity::Affiliate,
            EndpointBinding::new("http://127.0.0.1:9/affiliate"),
        )
}

pub struct Harness {
    pub controller: Arc<SubmissionController<ScriptedTransport>>,
    pub transport: ScriptedTransport,
    pub view: Arc<RecordingView>,
}

pub fn harness(script: Vec<Scripted>) -> Harness {
    harness_with(ScriptedTransport::new(script), SubmissionSettings::default())
}

pub fn harness_with(transport: ScriptedTransport, settings: SubmissionSettings) -> Harness {
    let view = Arc::new(RecordingView::new());
    let presenter = Arc::new(NotificationPresenter::with_timing(
        view.clone(),
        Duration::from_millis(5000),
        Duration::from_millis(300),
    ));

    let controller = SubmissionController::new(
        transport.clone(),
        endpoints(),
        presenter,
        view.clone(),
        view.clone(),
    )
    .with_settings(settings);

    Harness {
        controller: Arc::new(controller),
        transport,
        view,
    }
}

/// Yield until the transport has seen `n` requests.
pub async fn wait_for_calls(transport: &ScriptedTransport, n: usize) {
    for _ in 0..1000 {
        if transport.calls() >= n {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("transport never reached {} calls", n);
}
