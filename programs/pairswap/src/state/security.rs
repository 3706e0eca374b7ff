//! Reentrancy protection for pools.
//! A pool holds its lock for the whole of every mutating operation, including
//! the window in which a flash-swap callback runs, so nested calls into the
//! same pool fail closed instead of observing half-updated reserves.

use tracing::warn;

use crate::error::{ExchangeError, ExchangeResult};

/// Reentrancy guard status flags
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReentrancyStatus {
    /// Pool is unlocked and ready for operations
    #[default]
    Unlocked = 0,
    /// Pool is locked due to ongoing operation
    Locked = 1,
}

/// Reentrancy guard manager
pub struct ReentrancyGuard;

impl ReentrancyGuard {
    /// Acquire lock for pool operation
    pub fn acquire(status: &mut ReentrancyStatus) -> ExchangeResult<()> {
        match *status {
            ReentrancyStatus::Unlocked => {
                *status = ReentrancyStatus::Locked;
                Ok(())
            }
            ReentrancyStatus::Locked => {
                warn!("rejected reentrant pool call");
                Err(ExchangeError::Locked)
            }
        }
    }

    /// Release lock after operation completes
    pub fn release(status: &mut ReentrancyStatus) {
        if *status == ReentrancyStatus::Unlocked {
            // Already unlocked, this might indicate a bug
            warn!("attempted to release an unlocked pool");
        }
        *status = ReentrancyStatus::Unlocked;
    }

    /// Check if pool is currently locked
    pub fn is_locked(status: &ReentrancyStatus) -> bool {
        *status != ReentrancyStatus::Unlocked
    }
}
