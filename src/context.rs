//! Per-call cancellation and deadlines.
//!
//! A [`Context`] travels with every request. When it is cancelled, or its
//! deadline passes, the in-flight call returns
//! [`ZeroGateError::Cancelled`] or [`ZeroGateError::DeadlineExceeded`]
//! without waiting for the network.
//!
//! ```rust
//! use std::time::Duration;
//! use zerogate::Context;
//!
//! let ctx = Context::background().with_timeout(Duration::from_secs(5));
//! assert!(ctx.deadline().is_some());
//!
//! let (ctx, handle) = ctx.with_cancel();
//! handle.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use crate::error::{Result, ZeroGateError};
use futures_util::future::select_all;
use std::future::{pending, Future};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Cancellation and deadline scope for one or more calls.
///
/// Cloning is cheap; clones observe the same cancellation signals.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Vec<watch::Receiver<bool>>,
}

/// Cancels the [`Context`] it was created with, and every context derived from it.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context whose deadline is at most `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        // A timeout too large to represent never expires.
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Derive a context whose deadline is at most `deadline`.
    ///
    /// An earlier deadline inherited from `self` is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Derive a cancellable context.
    ///
    /// The derived context is also cancelled by any handle of `self`.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel.push(rx);
        (self, CancelHandle { tx: Arc::new(tx) })
    }

    /// The effective deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once any cancellation handle has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.iter().any(|rx| *rx.borrow())
    }

    /// Returns the error this context resolves to, if it is already done.
    pub fn err(&self) -> Option<ZeroGateError> {
        if self.is_cancelled() {
            return Some(ZeroGateError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ZeroGateError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves when the context is cancelled or its deadline passes.
    pub async fn done(&self) -> ZeroGateError {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            _ = self.cancelled() => ZeroGateError::Cancelled,
            _ = deadline => ZeroGateError::DeadlineExceeded,
        }
    }

    /// Run `fut` until it completes or the context is done, whichever is first.
    ///
    /// A context that is already done fails without polling `fut`.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => out,
        }
    }

    async fn cancelled(&self) {
        if self.cancel.is_empty() {
            return pending().await;
        }

        let waits = self.cancel.iter().cloned().map(|mut rx| {
            Box::pin(async move {
                // A dropped handle can no longer cancel.
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    pending::<()>().await;
                }
            })
        });
        select_all(waits).await;
    }
}
