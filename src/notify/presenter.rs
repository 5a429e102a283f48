use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::notify::notification_model::{
    Corner, DEFAULT_DISPLAY, DEFAULT_EXIT_TRANSITION, NotificationKind, NotificationRecord,
};
use crate::view::port::NotificationSurface;

struct LiveNotification {
    record: NotificationRecord,
    dismissal: JoinHandle<()>,
}

type Slot = Arc<Mutex<Option<LiveNotification>>>;

/// Owns the one live notification.
///
/// Each `present` replaces the slot's occupant: the previous overlay is
/// unmounted on the spot and its dismissal timer is aborted. Timers only act
/// on the slot while it still holds their own notification id.
///
/// `present` spawns its timer and must be called inside a tokio runtime.
pub struct NotificationPresenter {
    surface: Arc<dyn NotificationSurface>,
    display: Duration,
    exit_transition: Duration,
    corner: Corner,
    next_id: AtomicU64,
    slot: Slot,
}

impl NotificationPresenter {
    pub fn new(surface: Arc<dyn NotificationSurface>) -> Self {
        Self::with_timing(surface, DEFAULT_DISPLAY, DEFAULT_EXIT_TRANSITION)
    }

    pub fn with_timing(
        surface: Arc<dyn NotificationSurface>,
        display: Duration,
        exit_transition: Duration,
    ) -> Self {
        Self {
            surface,
            display,
            exit_transition,
            corner: Corner::default(),
            next_id: AtomicU64::new(1),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    pub fn present(&self, kind: NotificationKind, message: &str) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = NotificationRecord::new(id, kind, message, self.display).with_corner(self.corner);

        let mut slot = lock(&self.slot);
        if let Some(previous) = slot.take() {
            previous.dismissal.abort();
            self.surface.unmount(previous.record.id);
            debug!(id = previous.record.id, "superseded notification");
        }

        self.surface.mount(&record);
        debug!(id, ?kind, "notification shown");

        let dismissal = tokio::spawn(dismiss_after(
            Arc::clone(&self.slot),
            Arc::clone(&self.surface),
            id,
            self.display,
            self.exit_transition,
        ));

        *slot = Some(LiveNotification { record, dismissal });
        id
    }

    pub fn success(&self, message: &str) -> u64 {
        self.present(NotificationKind::Success, message)
    }

    pub fn error(&self, message: &str) -> u64 {
        self.present(NotificationKind::Error, message)
    }

    /// The live notification, if any.
    pub fn current(&self) -> Option<NotificationRecord> {
        lock(&self.slot).as_ref().map(|live| live.record.clone())
    }

    /// Remove the live notification without waiting for its timer.
    pub fn dismiss(&self) {
        if let Some(live) = lock(&self.slot).take() {
            live.dismissal.abort();
            self.surface.unmount(live.record.id);
        }
    }
}

async fn dismiss_after(
    slot: Slot,
    surface: Arc<dyn NotificationSurface>,
    id: u64,
    display: Duration,
    exit_transition: Duration,
) {
    tokio::time::sleep(display).await;
    {
        let slot = lock(&slot);
        if !holds(&slot, id) {
            return;
        }
        surface.begin_exit(id);
    }

    tokio::time::sleep(exit_transition).await;
    let mut slot = lock(&slot);
    if holds(&slot, id) {
        slot.take();
        surface.unmount(id);
        debug!(id, "notification expired");
    }
}

fn holds(slot: &Option<LiveNotification>, id: u64) -> bool {
    slot.as_ref().is_some_and(|live| live.record.id == id)
}

fn lock(slot: &Slot) -> MutexGuard<'_, Option<LiveNotification>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
