//! Navigation tickets for dropping stale fetch results.
//!
//! A `Navigator` holds a generation counter shared by every ticket it hands out.
//! Starting a new navigation (or cancelling) bumps the generation, which
//! invalidates all outstanding tickets. Walkers check their ticket before each
//! request and abort with `AppError::Cancelled` once it goes stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    generation: Arc<AtomicU64>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new navigation, invalidating every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            shared: Arc::clone(&self.generation),
        }
    }

    /// Ticket for the current navigation without starting a new one.
    pub fn current(&self) -> Ticket {
        Ticket {
            generation: self.generation.load(Ordering::SeqCst),
            shared: Arc::clone(&self.generation),
        }
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    shared: Arc<AtomicU64>,
}

impl Ticket {
    pub fn is_cancelled(&self) -> bool {
        self.shared.load(Ordering::SeqCst) != self.generation
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(AppError::Cancelled)
        } else {
            Ok(())
        }
    }
}
