//! Millisecond tick and polling timeouts.

use core::sync::atomic::{AtomicU32, Ordering};

pub trait TickSource {
    fn now_ms(&self) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Free-running millisecond counter advanced from the timer IRQ.
///
/// ARMv5 has no atomic read-modify-write, so `tick` is a load followed by a
/// store. It must only be called from one context.
pub struct MillisCounter {
    ms: AtomicU32,
}

impl Default for MillisCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl MillisCounter {
    pub const fn new() -> Self {
        Self {
            ms: AtomicU32::new(0),
        }
    }

    pub fn tick(&self) {
        let now = self.ms.load(Ordering::Relaxed);
        self.ms.store(now.wrapping_add(1), Ordering::Release);
    }

    pub fn reset(&self) {
        self.ms.store(0, Ordering::Release);
    }
}

impl TickSource for MillisCounter {
    fn now_ms(&self) -> u32 {
        self.ms.load(Ordering::Acquire)
    }
}

/// A deadline measured against a [`TickSource`]. Survives counter wrap-around
/// for durations below `u32::MAX / 2` ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeout {
    started_at: u32,
    duration_ms: u32,
}

impl Timeout {
    pub fn start(ticks: &impl TickSource, duration_ms: u32) -> Self {
        Self {
            started_at: ticks.now_ms(),
            duration_ms,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self, ticks: &impl TickSource) -> u32 {
        ticks.now_ms().wrapping_sub(self.started_at)
    }

    pub fn is_expired(&self, ticks: &impl TickSource) -> bool {
        self.elapsed_ms(ticks) >= self.duration_ms
    }

    pub fn remaining_ms(&self, ticks: &impl TickSource) -> u32 {
        self.duration_ms.saturating_sub(self.elapsed_ms(ticks))
    }

    pub fn restart(&mut self, ticks: &impl TickSource) {
        self.started_at = ticks.now_ms();
    }
}

#[cfg(test)]
mod tests;
