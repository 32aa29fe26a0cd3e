//! Presentation timers with explicit cancellation.
//!
//! A [`Countdown`] schedules one [`TimerToken`] delivery after a delay. The
//! token carries the phase epoch it was scheduled in;
//! [`crate::session::Session::on_timer`] discards tokens whose epoch the
//! session has since left. Dropping the countdown aborts the task, so a torn
//! down view never delivers its pending timer at all.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Epoch-stamped handle for one scheduled timer delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    epoch: u64,
}

impl TimerToken {
    pub(crate) fn new(epoch: u64) -> Self {
        Self { epoch }
    }

    /// The phase epoch this token was issued in.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// A single cancellable delay. Sends its token on the channel when the delay
/// elapses; aborted when dropped.
#[derive(Debug)]
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Schedule `token` for delivery on `tx` after `delay`.
    #[must_use]
    pub fn start(delay: Duration, token: TimerToken, tx: UnboundedSender<TimerToken>) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may already be gone; nothing to do then.
            if tx.send(token).is_err() {
                debug!(epoch = token.epoch(), "Timer fired after receiver teardown");
            }
        });
        Self { handle }
    }

    /// Cancel the pending delivery.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
