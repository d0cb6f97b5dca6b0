//! Cancellation signals polled between elements.
//!
//! A pass is generic over its signal. [`Uninterrupted`] reports
//! `Infallible`, so a pass driven by it is a total function and needs no
//! fallback for the cancelled case.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

/// A pass was abandoned because its flag was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

pub trait CancelSignal: Sync {
    type Cancelled: Send;

    /// `Err` once the pass should stop.
    fn check(&self) -> Result<(), Self::Cancelled>;
}

impl CancelSignal for AtomicBool {
    type Cancelled = Cancelled;

    fn check(&self) -> Result<(), Cancelled> {
        if self.load(Ordering::Relaxed) {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A signal that is never raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninterrupted;

impl CancelSignal for Uninterrupted {
    type Cancelled = Infallible;

    fn check(&self) -> Result<(), Infallible> {
        Ok(())
    }
}
