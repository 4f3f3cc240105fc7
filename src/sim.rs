//! Register models for running the drivers off-target.
//!
//! `SimRegisterFile` is plain memory with per-word access counters.
//! `SimTouchRegisters` additionally models the touch panel's sample FIFO and
//! its write-1-to-clear status register, and can inject interrupt causes.

use heapless::Deque;

use crate::regs::RegisterOps;
use crate::touch::regs::{
    DATA, FIFO_DATA_PENDING, FIFO_FLUSH, FIFO_OVERRUN_PENDING, INT_FIFO_CTRL, INT_FIFO_STAT,
    TEMP_DATA, TEMP_DATA_PENDING, TP_DOWN_PENDING, TP_UP_PENDING,
};

pub struct SimRegisterFile<const N: usize> {
    words: [u32; N],
    reads: [u32; N],
    writes: [u32; N],
    frozen: bool,
}

impl<const N: usize> Default for SimRegisterFile<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SimRegisterFile<N> {
    pub const fn new() -> Self {
        Self {
            words: [0; N],
            reads: [0; N],
            writes: [0; N],
            frozen: false,
        }
    }

    fn index(offset: usize) -> Option<usize> {
        let idx = offset / 4;
        (offset % 4 == 0 && idx < N).then_some(idx)
    }

    pub fn word(&self, offset: usize) -> u32 {
        Self::index(offset).map_or(0, |idx| self.words[idx])
    }

    /// Sets a word without counting it as a driver access.
    pub fn set_word(&mut self, offset: usize, value: u32) {
        if let Some(idx) = Self::index(offset) {
            self.words[idx] = value;
        }
    }

    pub fn reads_of(&self, offset: usize) -> u32 {
        Self::index(offset).map_or(0, |idx| self.reads[idx])
    }

    pub fn writes_of(&self, offset: usize) -> u32 {
        Self::index(offset).map_or(0, |idx| self.writes[idx])
    }

    pub fn reset_counters(&mut self) {
        self.reads = [0; N];
        self.writes = [0; N];
    }

    /// Drops every later write, as an absent or unclocked peripheral would.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

impl<const N: usize> RegisterOps for SimRegisterFile<N> {
    fn read(&mut self, offset: usize) -> u32 {
        match Self::index(offset) {
            Some(idx) => {
                self.reads[idx] = self.reads[idx].wrapping_add(1);
                self.words[idx]
            }
            None => 0,
        }
    }

    fn write(&mut self, offset: usize, value: u32) {
        if let Some(idx) = Self::index(offset) {
            self.writes[idx] = self.writes[idx].wrapping_add(1);
            if !self.frozen {
                self.words[idx] = value;
            }
        }
    }
}

pub const SIM_FIFO_DEPTH: usize = 32;

pub struct SimTouchRegisters {
    file: SimRegisterFile<16>,
    fifo: Deque<u32, SIM_FIFO_DEPTH>,
    status: u32,
    raise_after_status_read: u32,
    temperature: u32,
    last_status_write: Option<u32>,
}

impl Default for SimTouchRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimTouchRegisters {
    pub fn new() -> Self {
        Self {
            file: SimRegisterFile::new(),
            fifo: Deque::new(),
            status: 0,
            raise_after_status_read: 0,
            temperature: 0,
            last_status_write: None,
        }
    }

    /// A peripheral that ignores writes, so configuration never reads back.
    pub fn unresponsive() -> Self {
        let mut regs = Self::new();
        regs.file.freeze();
        regs
    }

    pub fn file(&self) -> &SimRegisterFile<16> {
        &self.file
    }

    /// Pushes a word into the FIFO, flagging overrun when it is full.
    pub fn push_word(&mut self, word: u32) {
        if self.fifo.push_back(word).is_err() {
            self.status |= FIFO_OVERRUN_PENDING;
        }
    }

    pub fn raise(&mut self, bits: u32) {
        self.status |= bits;
    }

    /// Queues an x/y pair and raises data-pending.
    pub fn inject_data(&mut self, x: u32, y: u32) {
        self.push_word(x);
        self.push_word(y);
        self.raise(FIFO_DATA_PENDING);
    }

    pub fn inject_touch_up(&mut self) {
        self.raise(TP_UP_PENDING);
    }

    pub fn inject_touch_down(&mut self) {
        self.raise(TP_DOWN_PENDING);
    }

    pub fn inject_temperature(&mut self, code: u32) {
        self.temperature = code;
        self.raise(TEMP_DATA_PENDING);
    }

    /// Bits that latch right after the next status read, before the handler acknowledges.
    pub fn raise_after_status_read(&mut self, bits: u32) {
        self.raise_after_status_read |= bits;
    }

    pub fn status(&self) -> u32 {
        self.status
    }

    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    pub fn fifo_reads(&self) -> u32 {
        self.file.reads_of(DATA)
    }

    pub fn status_reads(&self) -> u32 {
        self.file.reads_of(INT_FIFO_STAT)
    }

    pub fn last_status_write(&self) -> Option<u32> {
        self.last_status_write
    }

    pub fn word(&self, offset: usize) -> u32 {
        self.file.word(offset)
    }

    pub fn reset_counters(&mut self) {
        self.file.reset_counters();
        self.last_status_write = None;
    }
}

impl RegisterOps for SimTouchRegisters {
    fn read(&mut self, offset: usize) -> u32 {
        // Keeps the per-offset read counters in step.
        let _ = self.file.read(offset);
        match offset {
            INT_FIFO_STAT => {
                let value = self.status;
                self.status |= core::mem::take(&mut self.raise_after_status_read);
                value
            }
            DATA => self.fifo.pop_front().unwrap_or(0),
            TEMP_DATA => self.temperature,
            _ => self.file.word(offset),
        }
    }

    fn write(&mut self, offset: usize, value: u32) {
        match offset {
            INT_FIFO_STAT => {
                self.file.write(offset, value);
                self.last_status_write = Some(value);
                self.status &= !value;
            }
            INT_FIFO_CTRL => {
                if FIFO_FLUSH.is_set(value) {
                    self.fifo.clear();
                }
                // FIFO_FLUSH self-clears in hardware.
                self.file.write(offset, value & !FIFO_FLUSH.mask());
            }
            _ => self.file.write(offset, value),
        }
    }
}
