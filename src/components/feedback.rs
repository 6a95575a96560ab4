//! Transient UI feedback: the "Copied!" window and the two failure banners.
//!
//! Copy confirmation expires on its own; banners stay until the next success
//! on their channel (or an explicit clear). The copy and media channels never
//! share a message. [`CopyResetTimer`] is the only place the expiry is
//! scheduled or cancelled.

use std::future::Future;

use futures_util::future::{AbortHandle, Abortable};

use crate::config::DEFAULT_COPY_FEEDBACK_MS;
use crate::utils::sleep_ms;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CopyFeedback {
    pub active: bool,
    /// Epoch milliseconds at which `active` drops back to false.
    pub expires_at: Option<f64>,
}

impl CopyFeedback {
    /// Milliseconds left in the window, zero once it has lapsed or closed.
    pub fn remaining_ms(&self, now_ms: f64) -> u32 {
        match self.expires_at {
            Some(due_at) if self.active => (due_at - now_ms).clamp(0.0, f64::from(u32::MAX)) as u32,
            _ => 0,
        }
    }
}

/// Handle for one scheduled copy-feedback reset. Only the ticket from the most
/// recent success can expire the feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyTicket {
    generation: u64,
    pub due_at: f64,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackState {
    window_ms: u32,
    generation: u64,
    copy: CopyFeedback,
    copy_error: Option<String>,
    media_error: Option<String>,
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_FEEDBACK_MS)
    }
}

impl FeedbackState {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            generation: 0,
            copy: CopyFeedback::default(),
            copy_error: None,
            media_error: None,
        }
    }

    /// Start (or restart) the feedback window. The returned ticket supersedes
    /// every earlier one, so the caller must replace its pending reset with it.
    pub fn on_copy_succeeded(&mut self, now_ms: f64) -> CopyTicket {
        self.generation += 1;
        let due_at = now_ms + f64::from(self.window_ms);
        self.copy = CopyFeedback {
            active: true,
            expires_at: Some(due_at),
        };
        self.copy_error = None;
        CopyTicket {
            generation: self.generation,
            due_at,
            delay_ms: self.window_ms,
        }
    }

    /// Fire a scheduled reset. Returns whether it took effect.
    pub fn expire_copy(&mut self, ticket: CopyTicket) -> bool {
        if ticket.generation != self.generation || !self.copy.active {
            return false;
        }
        self.copy = CopyFeedback::default();
        true
    }

    /// Record a failed copy. Any open "Copied!" window closes and its
    /// pending reset becomes stale.
    pub fn on_copy_failed(&mut self, reason: impl Into<String>) {
        self.generation += 1;
        self.copy = CopyFeedback::default();
        self.copy_error = Some(reason.into());
    }

    /// Returns false when the same message is already showing.
    pub fn on_media_error(&mut self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        if self.media_error.as_deref() == Some(reason.as_str()) {
            return false;
        }
        self.media_error = Some(reason);
        true
    }

    pub fn clear_media_error(&mut self) -> bool {
        self.media_error.take().is_some()
    }

    pub fn copy(&self) -> &CopyFeedback {
        &self.copy
    }

    pub fn copy_error(&self) -> Option<&str> {
        self.copy_error.as_deref()
    }

    pub fn media_error(&self) -> Option<&str> {
        self.media_error.as_deref()
    }
}

/// Holds the single pending copy reset.
#[derive(Debug, Default)]
pub struct CopyResetTimer {
    pending: Option<AbortHandle>,
}

impl CopyResetTimer {
    /// Cancel the pending reset, if any, and return the timer for `ticket`.
    /// The caller drives the future on its executor; `expire` runs once the
    /// ticket's delay has elapsed unless a later call cancelled it first.
    pub fn schedule<F>(&mut self, ticket: CopyTicket, expire: F) -> impl Future<Output = ()> + 'static
    where
        F: FnOnce(CopyTicket) + 'static,
    {
        self.cancel();
        let (handle, registration) = AbortHandle::new_pair();
        self.pending = Some(handle);
        let timer = Abortable::new(
            async move {
                sleep_ms(ticket.delay_ms).await;
                expire(ticket);
            },
            registration,
        );
        async move {
            let _ = timer.await;
        }
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
    }
}
