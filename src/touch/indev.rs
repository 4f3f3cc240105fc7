//! Pointer device adapter for GUI input polling.
//!
//! A GUI toolkit polls the pointer at its own pace and wants a level
//! (pressed/released plus the last known point), not the one-shot points the
//! driver hands out. [`PointerInput`] folds driver reads into that level and
//! queues the edges as [`TouchEvent`]s for consumers that want gestures.

use heapless::Deque;

use super::{Calibration, SharedTouchPanel, TouchPanel, TouchSample};
use crate::regs::RegisterOps;

pub const EVENT_QUEUE_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerState {
    Released,
    Pressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerReading {
    pub state: PointerState,
    pub point: TouchSample,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEvent {
    Down(TouchSample),
    Move(TouchSample),
    Up(TouchSample),
}

pub struct PointerInput {
    calibration: Option<Calibration>,
    last_point: TouchSample,
    pressed: bool,
    events: Deque<TouchEvent, EVENT_QUEUE_LEN>,
    dropped_events: u32,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerInput {
    pub const fn new() -> Self {
        Self {
            calibration: None,
            last_point: TouchSample::new(0, 0),
            pressed: false,
            events: Deque::new(),
            dropped_events: 0,
        }
    }

    pub fn with_calibration(calibration: Calibration) -> Self {
        Self {
            calibration: Some(calibration),
            ..Self::new()
        }
    }

    pub fn set_calibration(&mut self, calibration: Option<Calibration>) {
        self.calibration = calibration;
    }

    /// Folds one driver read into the pointer level.
    ///
    /// `sample` is what `read_point` returned, `touching` whether the filter
    /// is still inside a contact. A fresh point always means pressed; without
    /// one the pointer stays pressed until contact ends.
    pub fn read(&mut self, sample: Option<TouchSample>, touching: bool) -> PointerReading {
        match sample {
            Some(raw) => {
                let point = self.calibrate(raw);
                if !self.pressed {
                    self.push_event(TouchEvent::Down(point));
                } else if point != self.last_point {
                    self.push_event(TouchEvent::Move(point));
                }
                self.pressed = true;
                self.last_point = point;
            }
            None if self.pressed && !touching => {
                self.pressed = false;
                self.push_event(TouchEvent::Up(self.last_point));
            }
            None => {}
        }
        self.reading()
    }

    pub fn poll<R: RegisterOps>(&mut self, panel: &mut TouchPanel<R>) -> PointerReading {
        let sample = panel.read_point();
        let touching = panel.is_touching();
        self.read(sample, touching)
    }

    /// Reads point and contact under one lock so an IRQ cannot split them.
    pub fn poll_shared<R: RegisterOps>(&mut self, shared: &SharedTouchPanel<R>) -> PointerReading {
        let (sample, touching) = shared
            .with(|panel| (panel.read_point(), panel.is_touching()))
            .unwrap_or((None, false));
        self.read(sample, touching)
    }

    pub fn reading(&self) -> PointerReading {
        PointerReading {
            state: if self.pressed {
                PointerState::Pressed
            } else {
                PointerState::Released
            },
            point: self.last_point,
        }
    }

    pub fn next_event(&mut self) -> Option<TouchEvent> {
        self.events.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    fn calibrate(&self, raw: TouchSample) -> TouchSample {
        match &self.calibration {
            Some(cal) => cal.apply(raw),
            None => raw,
        }
    }

    fn push_event(&mut self, event: TouchEvent) {
        if self.events.is_full() {
            self.events.pop_front();
            self.dropped_events = self.dropped_events.wrapping_add(1);
        }
        let _ = self.events.push_back(event);
    }
}
