use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use super::{FilterStats, TouchPanel, TouchSample};
use crate::regs::RegisterOps;

/// A [`TouchPanel`] reachable from both the touch IRQ and the poll loop.
///
/// Every access runs inside a critical section, so the reader never sees a
/// half-updated state even on ports where the touch IRQ can preempt another
/// IRQ or run on a second core.
pub struct SharedTouchPanel<R> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<TouchPanel<R>>>>,
}

impl<R> Default for SharedTouchPanel<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SharedTouchPanel<R> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Hands ownership of an initialised panel to the slot.
    pub fn install(&self, panel: TouchPanel<R>) -> Option<TouchPanel<R>> {
        self.inner.lock(|cell| cell.borrow_mut().replace(panel))
    }

    pub fn take(&self) -> Option<TouchPanel<R>> {
        self.inner.lock(|cell| cell.borrow_mut().take())
    }

    pub fn is_installed(&self) -> bool {
        self.inner.lock(|cell| cell.borrow().is_some())
    }

    /// Runs `f` on the installed panel. `None` when the slot is empty or already borrowed.
    pub fn with<U>(&self, f: impl FnOnce(&mut TouchPanel<R>) -> U) -> Option<U> {
        self.inner.lock(|cell| {
            let mut slot = cell.try_borrow_mut().ok()?;
            slot.as_mut().map(f)
        })
    }
}

impl<R: RegisterOps> SharedTouchPanel<R> {
    /// Entry point for the platform's touch IRQ dispatch.
    ///
    /// Returns `false` when the slot is empty or already borrowed, in which
    /// case the status register was not touched. The source must stay masked
    /// until a panel is installed.
    pub fn on_interrupt(&self) -> bool {
        let serviced = self.with(|panel| panel.on_interrupt()).is_some();
        if !serviced {
            log::warn!("touch: irq_unserviced reason=slot_empty_or_busy");
        }
        serviced
    }

    pub fn read_point(&self) -> Option<TouchSample> {
        self.with(|panel| panel.read_point()).flatten()
    }

    pub fn peek_point(&self) -> Option<TouchSample> {
        self.with(|panel| panel.peek_point()).flatten()
    }

    pub fn is_touching(&self) -> bool {
        self.with(|panel| panel.is_touching()).unwrap_or(false)
    }

    pub fn stats(&self) -> Option<FilterStats> {
        self.with(|panel| panel.stats())
    }
}

#[cfg(test)]
mod tests;
