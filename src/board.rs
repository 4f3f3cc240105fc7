//! Board-level wiring of the peripheral drivers.
//!
//! The order matters: pins are muxed before the ADC is enabled, and the
//! interrupt controller only unmasks a source once its driver is ready to
//! service it.

use core::fmt;

use crate::gpio::{Gpio, PIO_BASE};
use crate::intc::{Intc, IntcError, Priority, INTC_BASE, IRQ_TIMER0, IRQ_TOUCH_PANEL};
use crate::regs::{Mmio, RegisterOps, BLOCK_SIZE};
use crate::timer::{Channel, TimerConfig, Timers, TIMER_BASE};
use crate::touch::regs::TP_BASE;
use crate::touch::{SharedTouchPanel, TouchError, TouchPanel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BringUpError {
    Touch(TouchError),
    Intc(IntcError),
}

impl From<TouchError> for BringUpError {
    fn from(err: TouchError) -> Self {
        Self::Touch(err)
    }
}

impl From<IntcError> for BringUpError {
    fn from(err: IntcError) -> Self {
        Self::Intc(err)
    }
}

impl fmt::Display for BringUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Touch(err) => write!(f, "touch panel: {err}"),
            Self::Intc(err) => write!(f, "interrupt controller: {err}"),
        }
    }
}

/// MMIO handles for every block this crate drives.
pub struct Peripherals {
    pub gpio: Gpio<Mmio>,
    pub intc: Intc<Mmio>,
    pub timers: Timers<Mmio>,
    pub touch: Mmio,
}

impl Peripherals {
    /// # Safety
    ///
    /// Call once. Every returned handle assumes exclusive ownership of its block.
    pub unsafe fn steal() -> Self {
        unsafe {
            Self {
                gpio: Gpio::new(Mmio::new(PIO_BASE, BLOCK_SIZE)),
                intc: Intc::new(Mmio::new(INTC_BASE, BLOCK_SIZE)),
                timers: Timers::new(Mmio::new(TIMER_BASE, BLOCK_SIZE)),
                touch: Mmio::new(TP_BASE, BLOCK_SIZE),
            }
        }
    }
}

/// Muxes the touch pins, initialises the panel, installs it in `shared` and
/// only then unmasks its interrupt.
///
/// The panel is installed even when init fails so the caller can `take` it
/// back; its interrupt stays masked in that case.
pub fn bring_up_touch<G, T, I>(
    gpio: &mut Gpio<G>,
    mut panel: TouchPanel<T>,
    shared: &SharedTouchPanel<T>,
    intc: &mut Intc<I>,
    priority: Priority,
) -> Result<(), BringUpError>
where
    G: RegisterOps,
    T: RegisterOps,
    I: RegisterOps,
{
    // A previously installed panel may still be live; keep its IRQ off while swapping.
    intc.disable(IRQ_TOUCH_PANEL)?;
    gpio.configure_touch_pins();

    let init = panel.init();
    shared.install(panel);
    if let Err(err) = init {
        log::error!("touch: init_failed reason={err}");
        return Err(err.into());
    }

    intc.enable(IRQ_TOUCH_PANEL, priority)?;
    log::info!(
        "touch: irq_enabled source={} priority={:?}",
        IRQ_TOUCH_PANEL,
        priority
    );
    Ok(())
}

/// Starts timer 0 as the 1 kHz system tick and unmasks it.
pub fn start_tick<T, I>(
    timers: &mut Timers<T>,
    intc: &mut Intc<I>,
    priority: Priority,
) -> Result<(), BringUpError>
where
    T: RegisterOps,
    I: RegisterOps,
{
    timers.start(Channel::Timer0, TimerConfig::millisecond_tick());
    intc.enable(IRQ_TIMER0, priority)?;
    Ok(())
}
