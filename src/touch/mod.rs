//! Resistive touch panel ADC driver.
//!
//! The peripheral samples both axes continuously once enabled and raises a
//! data interrupt per x/y pair, plus a touch-up interrupt when the stylus
//! lifts. [`TouchPanel::on_interrupt`] runs in IRQ context and feeds the
//! sample filter; [`TouchPanel::read_point`] runs in the poll loop.

pub mod calibration;
pub mod config;
mod filter;
pub mod indev;
pub mod regs;
pub mod shared;

use crate::regs::RegisterOps;

pub use calibration::Calibration;
pub use config::{AdcClock, AdcClockDivider, FilterType, TouchConfig};
pub use filter::{FilterPhase, FilterStats};
pub use indev::{PointerInput, PointerReading, PointerState, TouchEvent};
pub use shared::SharedTouchPanel;

use filter::{FilterEvent, SampleFilter};
use regs::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
}

impl TouchSample {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub(crate) fn from_fifo(x: u32, y: u32) -> Self {
        Self {
            x: (x & SAMPLE_MASK) as u16,
            y: (y & SAMPLE_MASK) as u16,
        }
    }
}

/// State shared between the interrupt handler and the point reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchState {
    pub last_sample: TouchSample,
    pub ready: bool,
    pub ignore_next_sample: bool,
    pub temperature: Option<u16>,
}

impl TouchState {
    pub const fn new() -> Self {
        Self {
            last_sample: TouchSample::new(0, 0),
            ready: false,
            ignore_next_sample: true,
            temperature: None,
        }
    }
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchError {
    /// A configuration register did not hold the value written to it.
    NotResponding {
        offset: usize,
        wrote: u32,
        read: u32,
    },
}

impl core::fmt::Display for TouchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotResponding {
                offset,
                wrote,
                read,
            } => write!(
                f,
                "touch panel not responding: reg 0x{offset:02x} wrote 0x{wrote:08x} read 0x{read:08x}"
            ),
        }
    }
}

pub struct TouchPanel<R> {
    regs: R,
    config: TouchConfig,
    filter: SampleFilter,
}

impl<R: RegisterOps> TouchPanel<R> {
    pub fn new(regs: R, config: TouchConfig) -> Self {
        Self {
            regs,
            config,
            filter: SampleFilter::new(),
        }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    pub fn release(self) -> R {
        self.regs
    }

    /// Programs continuous dual-axis sampling and arms the data/touch-up interrupts.
    ///
    /// Must run once before the touch IRQ is unmasked at the interrupt
    /// controller. Pin muxing of the analog channels is the caller's job.
    pub fn init(&mut self) -> Result<(), TouchError> {
        self.filter = SampleFilter::new();

        let cfg = self.config;
        let ctrl0 = cfg.ctrl0();
        self.regs.write(CTRL0, ctrl0);
        self.regs.write(CTRL2, cfg.ctrl2());
        self.regs.write(CTRL3, cfg.ctrl3());
        self.regs.write(TPR, cfg.tpr());
        self.regs.write(INT_FIFO_CTRL, cfg.int_fifo_ctrl());
        let ctrl1 = cfg.ctrl1() | TP_EN.value(1);
        self.regs.write(CTRL1, ctrl1);

        if cfg.verify_readback {
            let read = self.regs.read(CTRL0);
            if read != ctrl0 {
                return Err(TouchError::NotResponding {
                    offset: CTRL0,
                    wrote: ctrl0,
                    read,
                });
            }
            let read = self.regs.read(CTRL1);
            if !TP_EN.is_set(read) {
                return Err(TouchError::NotResponding {
                    offset: CTRL1,
                    wrote: ctrl1,
                    read,
                });
            }
        }

        log::info!(
            "touch: ready ctrl0=0x{:08x} ctrl1=0x{:08x} fifo_ctrl=0x{:08x}",
            ctrl0,
            ctrl1,
            cfg.int_fifo_ctrl()
        );
        Ok(())
    }

    /// Services one touch-panel interrupt. Never blocks or loops.
    pub fn on_interrupt(&mut self) {
        let status = self.regs.read(INT_FIFO_STAT);

        if status & TEMP_DATA_PENDING != 0 {
            let temp = self.regs.read(TEMP_DATA) & SAMPLE_MASK;
            self.filter.context_mut().state.temperature = Some(temp as u16);
        }

        if status & TP_DOWN_PENDING != 0 {
            self.filter.handle(FilterEvent::TouchDown);
        }

        if status & FIFO_DATA_PENDING != 0 {
            let x = self.regs.read(DATA);
            let y = self.regs.read(DATA);
            let stats = &mut self.filter.context_mut().stats;
            stats.data_events = stats.data_events.wrapping_add(1);
            self.filter
                .handle(FilterEvent::Data(TouchSample::from_fifo(x, y)));
        }

        if status & TP_UP_PENDING != 0 {
            self.filter.handle(FilterEvent::TouchUp);
        }

        if status & FIFO_OVERRUN_PENDING != 0 {
            let stats = &mut self.filter.context_mut().stats;
            stats.overruns = stats.overruns.wrapping_add(1);
            log::warn!("touch: fifo overrun count={}", stats.overruns);
        }

        if status & HANDLED_STATUS == 0 {
            let stats = &mut self.filter.context_mut().stats;
            stats.unhandled = stats.unhandled.wrapping_add(1);
        }

        self.regs.write(INT_FIFO_STAT, status);
    }

    /// Returns the newest point once; `None` until the filter publishes another.
    pub fn read_point(&mut self) -> Option<TouchSample> {
        let state = &mut self.filter.context_mut().state;
        if !state.ready {
            return None;
        }
        state.ready = false;
        Some(state.last_sample)
    }

    /// Same as [`Self::read_point`] without consuming the ready flag.
    pub fn peek_point(&self) -> Option<TouchSample> {
        let state = &self.filter.context().state;
        state.ready.then_some(state.last_sample)
    }

    /// True while contact persists (between the first discarded sample and touch-up).
    pub fn is_touching(&self) -> bool {
        self.filter.phase() == FilterPhase::Sampling
    }

    pub fn state(&self) -> TouchState {
        self.filter.context().state
    }

    pub fn phase(&self) -> FilterPhase {
        self.filter.phase()
    }

    pub fn stats(&self) -> FilterStats {
        self.filter.context().stats
    }

    /// Last temperature conversion, raw 12-bit code.
    pub fn temperature(&self) -> Option<u16> {
        self.filter.context().state.temperature
    }
}
