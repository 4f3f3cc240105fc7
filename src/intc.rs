//! Interrupt controller.
//!
//! 64 sources split over two 32-bit banks for pending, enable and mask, and
//! four priority registers holding a 2-bit level per source.

use core::fmt;

use crate::regs::{Field, RegisterOps};

pub const INTC_BASE: usize = 0x01C2_0400;

pub const VECTOR: usize = 0x00;
pub const BASE_ADDR: usize = 0x04;
pub const NMI_CTRL: usize = 0x0C;
pub const PEND: usize = 0x10;
pub const EN: usize = 0x20;
pub const MASK: usize = 0x30;
pub const RESP: usize = 0x40;
pub const FF: usize = 0x50;
pub const PRIO: usize = 0x60;

pub const IRQ_COUNT: u8 = 64;

pub const IRQ_UART0: u8 = 1;
pub const IRQ_UART1: u8 = 2;
pub const IRQ_UART2: u8 = 3;
pub const IRQ_TWI0: u8 = 7;
pub const IRQ_SPI0: u8 = 10;
pub const IRQ_TIMER0: u8 = 13;
pub const IRQ_TIMER1: u8 = 14;
pub const IRQ_TIMER2: u8 = 15;
pub const IRQ_DMA: u8 = 18;
pub const IRQ_TOUCH_PANEL: u8 = 20;
pub const IRQ_KEYADC: u8 = 22;
pub const IRQ_TCON: u8 = 29;

const VECTOR_ADDR: Field = Field::new(2, 30);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    #[default]
    Lowest = 0,
    Low = 1,
    High = 2,
    Highest = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntcError {
    InvalidSource(u8),
}

impl fmt::Display for IntcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSource(source) => {
                write!(f, "irq source {source} out of range (max {})", IRQ_COUNT - 1)
            }
        }
    }
}

pub struct Intc<R> {
    regs: R,
}

impl<R: RegisterOps> Intc<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Masks and disables every source and clears the vector base.
    pub fn init(&mut self) {
        for bank in 0..2 {
            self.regs.write(MASK + bank * 4, u32::MAX);
            self.regs.write(EN + bank * 4, 0);
            self.regs.write(FF + bank * 4, 0);
        }
        self.regs.write(BASE_ADDR, 0);
        log::debug!("intc: init sources={IRQ_COUNT}");
    }

    pub fn enable(&mut self, source: u8, priority: Priority) -> Result<(), IntcError> {
        let (bank, bit) = locate(source)?;
        self.set_priority(source, priority)?;
        self.regs.modify(MASK + bank, |v| v & !bit);
        self.regs.modify(EN + bank, |v| v | bit);
        Ok(())
    }

    pub fn disable(&mut self, source: u8) -> Result<(), IntcError> {
        let (bank, bit) = locate(source)?;
        self.regs.modify(EN + bank, |v| v & !bit);
        self.regs.modify(MASK + bank, |v| v | bit);
        Ok(())
    }

    pub fn is_enabled(&mut self, source: u8) -> Result<bool, IntcError> {
        let (bank, bit) = locate(source)?;
        Ok(self.regs.read(EN + bank) & bit != 0 && self.regs.read(MASK + bank) & bit == 0)
    }

    pub fn is_pending(&mut self, source: u8) -> Result<bool, IntcError> {
        let (bank, bit) = locate(source)?;
        Ok(self.regs.read(PEND + bank) & bit != 0)
    }

    pub fn set_priority(&mut self, source: u8, priority: Priority) -> Result<(), IntcError> {
        let (offset, field) = priority_field(source)?;
        self.regs.modify(offset, |v| field.set(v, priority as u32));
        Ok(())
    }

    pub fn priority(&mut self, source: u8) -> Result<Priority, IntcError> {
        let (offset, field) = priority_field(source)?;
        Ok(match field.get(self.regs.read(offset)) {
            0 => Priority::Lowest,
            1 => Priority::Low,
            2 => Priority::High,
            _ => Priority::Highest,
        })
    }

    /// Index of the highest priority pending source, from the vector register.
    pub fn pending_vector(&mut self) -> u8 {
        // VECTOR reads back as BASE_ADDR + source * 4.
        let base = VECTOR_ADDR.get(self.regs.read(BASE_ADDR));
        VECTOR_ADDR.get(self.regs.read(VECTOR)).wrapping_sub(base) as u8
    }
}

fn locate(source: u8) -> Result<(usize, u32), IntcError> {
    if source >= IRQ_COUNT {
        return Err(IntcError::InvalidSource(source));
    }
    Ok(((source as usize / 32) * 4, 1 << (source % 32)))
}

fn priority_field(source: u8) -> Result<(usize, Field), IntcError> {
    if source >= IRQ_COUNT {
        return Err(IntcError::InvalidSource(source));
    }
    Ok((
        PRIO + (source as usize / 16) * 4,
        Field::new((source % 16) * 2, 2),
    ))
}

#[cfg(test)]
mod tests;
