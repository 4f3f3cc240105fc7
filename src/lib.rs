#![no_std]

#[cfg(test)]
extern crate std;

pub mod board;
pub mod gpio;
pub mod intc;
pub mod regs;
pub mod sim;
pub mod timeout;
pub mod timer;
pub mod touch;
