//! Stale-response guard for page-scoped loads.
//!
//! Every load takes a [`Ticket`] from the page's [`PageScope`]. Starting a
//! newer load or abandoning the page bumps the generation, and a response
//! carrying an older ticket is refused instead of being applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct PageScope {
    generation: Arc<AtomicU64>,
}

/// Cloneable handle that lets other tasks abandon the page.
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    generation: Arc<AtomicU64>,
}

impl PageScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            generation: Arc::clone(&self.generation),
        }
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Passes `value` through only if `ticket` is still the latest load.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Result<T, AppError> {
        let current = self.current();
        if current == ticket.0 {
            Ok(value)
        } else {
            tracing::debug!(issued = ticket.0, current, "discarding stale response");
            Err(AppError::StaleResponse {
                issued: ticket.0,
                current,
            })
        }
    }
}

impl ScopeHandle {
    pub fn abandon(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
