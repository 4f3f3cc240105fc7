//! 32-bit down-counting timers 0..2.

use crate::regs::{Field, RegisterOps};

pub const TIMER_BASE: usize = 0x01C2_0C00;

pub const IRQ_EN: usize = 0x00;
pub const IRQ_STATUS: usize = 0x04;
const CHANNEL_BASE: usize = 0x10;
const CHANNEL_STRIDE: usize = 0x10;
const CTRL: usize = 0x00;
const INTERVAL: usize = 0x04;
const CURRENT: usize = 0x08;

pub const TMR_EN: Field = Field::bit(0);
pub const TMR_RELOAD: Field = Field::bit(1);
pub const TMR_CLK_SRC: Field = Field::new(2, 2);
pub const TMR_CLK_PRES: Field = Field::new(4, 3);
pub const TMR_MODE: Field = Field::bit(7);

pub const OSC24M_HZ: u32 = 24_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Timer0 = 0,
    Timer1 = 1,
    Timer2 = 2,
}

impl Channel {
    pub const fn ctrl(self) -> usize {
        CHANNEL_BASE + self as usize * CHANNEL_STRIDE + CTRL
    }

    pub const fn interval(self) -> usize {
        CHANNEL_BASE + self as usize * CHANNEL_STRIDE + INTERVAL
    }

    pub const fn current(self) -> usize {
        CHANNEL_BASE + self as usize * CHANNEL_STRIDE + CURRENT
    }

    const fn irq_bit(self) -> u32 {
        1 << self as u32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerClock {
    Losc = 0,
    #[default]
    Osc24M = 1,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Prescale {
    #[default]
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerMode {
    #[default]
    Continuous = 0,
    Single = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerConfig {
    pub clock: TimerClock,
    pub prescale: Prescale,
    pub interval: u32,
    pub mode: TimerMode,
    pub irq: bool,
}

impl TimerConfig {
    /// 1 kHz periodic interrupt from the 24 MHz oscillator.
    pub const fn millisecond_tick() -> Self {
        Self {
            clock: TimerClock::Osc24M,
            prescale: Prescale::Div1,
            interval: OSC24M_HZ / 1000,
            mode: TimerMode::Continuous,
            irq: true,
        }
    }

    pub const fn ctrl(&self) -> u32 {
        TMR_CLK_SRC.value(self.clock as u32)
            | TMR_CLK_PRES.value(self.prescale as u32)
            | TMR_MODE.value(self.mode as u32)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::millisecond_tick()
    }
}

pub struct Timers<R> {
    regs: R,
}

impl<R: RegisterOps> Timers<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Loads the interval, latches it with RELOAD, then enables the counter.
    pub fn start(&mut self, channel: Channel, config: TimerConfig) {
        let ctrl = config.ctrl();
        self.regs.write(channel.interval(), config.interval);
        self.regs.write(channel.ctrl(), ctrl | TMR_RELOAD.mask());
        self.regs
            .write(channel.ctrl(), ctrl | TMR_RELOAD.mask() | TMR_EN.mask());

        let bit = channel.irq_bit();
        self.regs.write(IRQ_STATUS, bit);
        if config.irq {
            self.regs.modify(IRQ_EN, |v| v | bit);
        } else {
            self.regs.modify(IRQ_EN, |v| v & !bit);
        }
        log::debug!(
            "timer: start channel={} interval={} irq={}",
            channel as u8,
            config.interval,
            config.irq
        );
    }

    pub fn stop(&mut self, channel: Channel) {
        self.regs.modify(channel.ctrl(), |v| v & !TMR_EN.mask());
        let bit = channel.irq_bit();
        self.regs.modify(IRQ_EN, |v| v & !bit);
    }

    /// Acknowledges the channel's interval interrupt. Other channels are untouched.
    pub fn clear_pending(&mut self, channel: Channel) {
        self.regs.write(IRQ_STATUS, channel.irq_bit());
    }

    pub fn is_pending(&mut self, channel: Channel) -> bool {
        self.regs.read(IRQ_STATUS) & channel.irq_bit() != 0
    }

    pub fn is_running(&mut self, channel: Channel) -> bool {
        TMR_EN.is_set(self.regs.read(channel.ctrl()))
    }

    pub fn current_value(&mut self, channel: Channel) -> u32 {
        self.regs.read(channel.current())
    }
}

#[cfg(test)]
mod tests;
