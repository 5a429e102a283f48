use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::view::port::Navigator;

/// A single deferred navigation scheduled after a successful submission.
#[derive(Debug)]
pub struct RedirectHandle {
    target: String,
    task: JoinHandle<()>,
}

impl RedirectHandle {
    /// Navigate to `target` once, after `delay`.
    pub fn schedule(navigator: Arc<dyn Navigator>, target: &str, delay: Duration) -> Self {
        let owned = target.to_string();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(path = %owned, "redirecting after submission");
            navigator.navigate(&owned);
        });

        Self {
            target: target.to_string(),
            task,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_pending(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}
