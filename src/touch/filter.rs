use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{TouchSample, TouchState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterPhase {
    /// No contact; the next FIFO pair is discarded.
    IdleNoContact,
    /// Touch-down seen; the next FIFO pair is discarded.
    ArmedAwaitingFirstDiscard,
    /// Contact established; FIFO pairs are published.
    Sampling,
}

/// Counters kept by the interrupt path, readable from the poll side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub data_events: u32,
    pub discarded: u32,
    pub accepted: u32,
    pub touch_downs: u32,
    pub touch_ups: u32,
    pub overruns: u32,
    pub unhandled: u32,
}

#[derive(Clone, Copy, Debug)]
pub(super) enum FilterEvent {
    TouchDown,
    Data(TouchSample),
    TouchUp,
}

pub(super) struct FilterContext {
    pub(super) state: TouchState,
    pub(super) stats: FilterStats,
}

impl FilterContext {
    fn new() -> Self {
        Self {
            state: TouchState::new(),
            stats: FilterStats::default(),
        }
    }

    fn arm(&mut self) {
        self.state.ignore_next_sample = true;
        self.state.ready = false;
    }

    fn discard(&mut self, sample: TouchSample) {
        self.state.ignore_next_sample = false;
        self.stats.discarded = self.stats.discarded.wrapping_add(1);
        log::trace!("touch: discard x={} y={}", sample.x, sample.y);
    }

    fn publish(&mut self, sample: TouchSample) {
        self.state.last_sample = sample;
        self.state.ready = true;
        self.stats.accepted = self.stats.accepted.wrapping_add(1);
    }

    fn touch_up(&mut self) {
        self.stats.touch_ups = self.stats.touch_ups.wrapping_add(1);
        self.arm();
    }

    fn touch_down(&mut self) {
        self.stats.touch_downs = self.stats.touch_downs.wrapping_add(1);
        self.arm();
    }
}

/// Turns raw FIFO pairs and touch-up/down edges into published points.
pub(super) struct SampleFilter {
    machine: statig::blocking::StateMachine<FilterHsm>,
    context: FilterContext,
}

impl SampleFilter {
    pub(super) fn new() -> Self {
        Self {
            machine: FilterHsm.state_machine(),
            context: FilterContext::new(),
        }
    }

    pub(super) fn handle(&mut self, event: FilterEvent) {
        self.machine.handle_with_context(&event, &mut self.context);
    }

    pub(super) fn phase(&self) -> FilterPhase {
        match self.machine.state() {
            State::IdleNoContact { .. } => FilterPhase::IdleNoContact,
            State::ArmedAwaitingFirstDiscard { .. } => FilterPhase::ArmedAwaitingFirstDiscard,
            State::Sampling { .. } => FilterPhase::Sampling,
        }
    }

    pub(super) fn context(&self) -> &FilterContext {
        &self.context
    }

    pub(super) fn context_mut(&mut self) -> &mut FilterContext {
        &mut self.context
    }
}

struct FilterHsm;

#[state_machine(initial = "State::idle_no_contact()")]
impl FilterHsm {
    #[state]
    fn idle_no_contact(context: &mut FilterContext, event: &FilterEvent) -> Outcome<State> {
        match event {
            FilterEvent::Data(sample) => {
                context.discard(*sample);
                Transition(State::sampling())
            }
            FilterEvent::TouchDown => {
                context.touch_down();
                Transition(State::armed_awaiting_first_discard())
            }
            FilterEvent::TouchUp => {
                context.touch_up();
                Handled
            }
        }
    }

    #[state]
    fn armed_awaiting_first_discard(
        context: &mut FilterContext,
        event: &FilterEvent,
    ) -> Outcome<State> {
        match event {
            FilterEvent::Data(sample) => {
                context.discard(*sample);
                Transition(State::sampling())
            }
            FilterEvent::TouchDown => {
                context.touch_down();
                Handled
            }
            FilterEvent::TouchUp => {
                context.touch_up();
                Transition(State::idle_no_contact())
            }
        }
    }

    #[state]
    fn sampling(context: &mut FilterContext, event: &FilterEvent) -> Outcome<State> {
        match event {
            FilterEvent::Data(sample) => {
                context.publish(*sample);
                Handled
            }
            FilterEvent::TouchDown => {
                // Contact restarted without a release edge; treat like a fresh press.
                context.touch_down();
                Transition(State::armed_awaiting_first_discard())
            }
            FilterEvent::TouchUp => {
                context.touch_up();
                Transition(State::idle_no_contact())
            }
        }
    }
}

#[cfg(test)]
mod tests;
