use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use termfolio_core::session::Event;

/// Single-shot timers that feed events back into a session.
///
/// Every timer races a child of the session token, so cancelling the
/// session drops all pending events.
#[derive(Clone)]
pub struct Scheduler {
    token: CancellationToken,
    events: UnboundedSender<Event>,
}

impl Scheduler {
    pub fn new(token: CancellationToken, events: UnboundedSender<Event>) -> Self {
        Self { token, events }
    }

    pub fn schedule(&self, delay: Duration, event: Event) {
        let token = self.token.child_token();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("[Scheduler] Dropped {:?} after cancel", event);
                }
                _ = tokio::time::sleep(delay) => {
                    // The session may already be gone.
                    let _ = events.send(event);
                }
            }
        });
    }

    pub fn cancel_all(&self) {
        self.token.cancel();
    }
}
