use core::cell::Cell;

use super::*;

struct FakeTicks(Cell<u32>);

impl FakeTicks {
    fn at(ms: u32) -> Self {
        Self(Cell::new(ms))
    }

    fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl TickSource for FakeTicks {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

#[test]
fn counter_ticks_and_resets() {
    let counter = MillisCounter::new();
    for _ in 0..5 {
        counter.tick();
    }
    assert_eq!(counter.now_ms(), 5);
    counter.reset();
    assert_eq!(counter.now_ms(), 0);
}

#[test]
fn expires_at_duration() {
    let ticks = FakeTicks::at(1_000);
    let timeout = Timeout::start(&ticks, 50);

    ticks.advance(49);
    assert!(!timeout.is_expired(&ticks));
    assert_eq!(timeout.remaining_ms(&ticks), 1);

    ticks.advance(1);
    assert!(timeout.is_expired(&ticks));
    assert_eq!(timeout.remaining_ms(&ticks), 0);
}

#[test]
fn survives_counter_wrap() {
    let ticks = FakeTicks::at(u32::MAX - 10);
    let timeout = Timeout::start(&ticks, 20);

    ticks.advance(15);
    assert_eq!(ticks.now_ms(), 4);
    assert!(!timeout.is_expired(&ticks));
    assert_eq!(timeout.elapsed_ms(&ticks), 15);

    ticks.advance(5);
    assert!(timeout.is_expired(&ticks));
}

#[test]
fn restart_moves_the_deadline() {
    let ticks = FakeTicks::at(0);
    let mut timeout = Timeout::start(&ticks, 10);
    ticks.advance(10);
    assert!(timeout.is_expired(&ticks));

    timeout.restart(&ticks);
    assert!(!timeout.is_expired(&ticks));
    assert_eq!(timeout.remaining_ms(&ticks), 10);
}

#[test]
fn zero_duration_is_already_expired() {
    let counter = MillisCounter::new();
    assert!(Timeout::start(&counter, 0).is_expired(&counter));
}
