//! Single-slot outcome channel
//!
//! Both data flows hold an [`OutcomeSlot`]. The first report is delivered to
//! the [`OutcomeWaiter`]; every later report is discarded without blocking.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use rx_core::error::SessionError;
use rx_core::Outcome;

/// Producer side, cloned into each flow
#[derive(Clone)]
pub struct OutcomeSlot {
    tx: Arc<Mutex<Option<oneshot::Sender<Outcome>>>>,
}

/// Consumer side, owned by the session
pub struct OutcomeWaiter {
    rx: oneshot::Receiver<Outcome>,
}

/// Create a connected slot/waiter pair
pub fn outcome_slot() -> (OutcomeSlot, OutcomeWaiter) {
    let (tx, rx) = oneshot::channel();
    (
        OutcomeSlot {
            tx: Arc::new(Mutex::new(Some(tx))),
        },
        OutcomeWaiter { rx },
    )
}

impl OutcomeSlot {
    /// Report an outcome; returns whether this report was the one delivered
    pub fn report(&self, outcome: Outcome) -> bool {
        let sender = match self.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => tx.send(outcome).is_ok(),
            None => {
                tracing::debug!(?outcome, "Outcome already reported, discarding");
                false
            }
        }
    }
}

impl OutcomeWaiter {
    /// Wait for the first reported outcome
    ///
    /// Resolves to `Failure(Aborted)` if every slot is dropped unreported.
    pub async fn wait(self) -> Outcome {
        self.rx
            .await
            .unwrap_or(Outcome::Failure(SessionError::Aborted))
    }
}
