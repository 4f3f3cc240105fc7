//! Word-wide register access and bit-field helpers.
//!
//! Drivers in this crate never overlay structs on peripheral memory. They go
//! through [`RegisterOps`], which the hardware build implements with volatile
//! MMIO and the host tests implement with a simulated register file.

use core::ptr::{read_volatile, write_volatile};

pub trait RegisterOps {
    /// Reads the 32-bit register at `offset` bytes from the block base.
    fn read(&mut self, offset: usize) -> u32;
    /// Writes the 32-bit register at `offset` bytes from the block base.
    fn write(&mut self, offset: usize, value: u32);

    fn modify(&mut self, offset: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read(offset);
        self.write(offset, f(value));
    }
}

impl<T: RegisterOps + ?Sized> RegisterOps for &mut T {
    fn read(&mut self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&mut self, offset: usize, value: u32) {
        (**self).write(offset, value)
    }
}

/// Size of every APB peripheral window this crate drives.
pub const BLOCK_SIZE: usize = 0x400;

/// Volatile access to a memory-mapped register block.
///
/// Accesses outside `0..len` or not word aligned never reach the bus: reads
/// return 0 and writes are dropped.
pub struct Mmio {
    base: usize,
    len: usize,
}

impl Mmio {
    /// # Safety
    ///
    /// `base..base + len` must be the physical (identity-mapped) address range
    /// of one peripheral register block, word aligned, and nothing else may
    /// hold a driver for the same block.
    pub const unsafe fn new(base: usize, len: usize) -> Self {
        Self { base, len }
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    pub const fn size(&self) -> usize {
        self.len
    }

    fn address(&self, offset: usize) -> Option<usize> {
        let in_block = offset % 4 == 0 && offset.checked_add(4).is_some_and(|end| end <= self.len);
        if !in_block {
            log::warn!(
                "mmio: rejected offset=0x{offset:x} base=0x{:08x} len=0x{:x}",
                self.base,
                self.len
            );
        }
        in_block.then_some(self.base + offset)
    }
}

impl RegisterOps for Mmio {
    #[inline(always)]
    fn read(&mut self, offset: usize) -> u32 {
        match self.address(offset) {
            // In bounds of the block `new` was given.
            Some(addr) => unsafe { read_volatile(addr as *const u32) },
            None => 0,
        }
    }

    #[inline(always)]
    fn write(&mut self, offset: usize, value: u32) {
        if let Some(addr) = self.address(offset) {
            unsafe { write_volatile(addr as *mut u32, value) }
        }
    }
}

/// A contiguous bit field inside a 32-bit register word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    pub const fn bit(shift: u8) -> Self {
        Self { shift, width: 1 }
    }

    /// Unshifted mask covering `width` bits.
    pub const fn max(self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Mask of the field at its position in the word.
    pub const fn mask(self) -> u32 {
        self.max() << self.shift
    }

    /// Places `value` at the field position. Bits above the width are dropped.
    pub const fn value(self, value: u32) -> u32 {
        (value & self.max()) << self.shift
    }

    pub const fn get(self, word: u32) -> u32 {
        (word >> self.shift) & self.max()
    }

    pub const fn set(self, word: u32, value: u32) -> u32 {
        (word & !self.mask()) | self.value(value)
    }

    pub const fn is_set(self, word: u32) -> bool {
        word & self.mask() != 0
    }
}
