//! Pin multiplexing and plain GPIO on the PIO block.

use crate::regs::{Field, RegisterOps};

pub const PIO_BASE: usize = 0x01C2_0800;
pub const PORT_STRIDE: usize = 0x24;

pub const CFG0: usize = 0x00;
pub const DATA: usize = 0x10;
pub const DRV0: usize = 0x14;
pub const PUL0: usize = 0x1C;

pub const FUNCTION_INPUT: u8 = 0;
pub const FUNCTION_OUTPUT: u8 = 1;
/// PA0..PA3 as TP_X1, TP_X2, TP_Y1, TP_Y2.
pub const FUNCTION_TOUCH_PANEL: u8 = 2;
pub const FUNCTION_DISABLED: u8 = 7;

pub const TOUCH_PINS: [u8; 4] = [0, 1, 2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl Port {
    pub const fn pin_count(self) -> u8 {
        match self {
            Self::A | Self::B | Self::C => 4,
            Self::D => 22,
            Self::E => 13,
            Self::F => 6,
        }
    }

    const fn offset(self) -> usize {
        self as usize * PORT_STRIDE
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pull {
    #[default]
    Disabled = 0,
    Up = 1,
    Down = 2,
}

pub struct Gpio<R> {
    regs: R,
}

impl<R: RegisterOps> Gpio<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Selects the mux function (0..=7) of one pin. Out-of-range pins are ignored.
    pub fn set_function(&mut self, port: Port, pin: u8, function: u8) {
        if pin >= port.pin_count() {
            return;
        }
        let offset = port.offset() + CFG0 + (pin as usize / 8) * 4;
        let field = Field::new((pin % 8) * 4, 3);
        self.regs.modify(offset, |v| field.set(v, function as u32));
    }

    /// Mux function of one pin. Out-of-range pins read as [`FUNCTION_DISABLED`].
    pub fn function(&mut self, port: Port, pin: u8) -> u8 {
        if pin >= port.pin_count() {
            return FUNCTION_DISABLED;
        }
        let offset = port.offset() + CFG0 + (pin as usize / 8) * 4;
        Field::new((pin % 8) * 4, 3).get(self.regs.read(offset)) as u8
    }

    pub fn set_pull(&mut self, port: Port, pin: u8, pull: Pull) {
        self.set_two_bit(port.offset() + PUL0, port, pin, pull as u32);
    }

    /// Drive strength level 0..=3.
    pub fn set_drive(&mut self, port: Port, pin: u8, level: u8) {
        self.set_two_bit(port.offset() + DRV0, port, pin, level as u32);
    }

    pub fn set_pin(&mut self, port: Port, pin: u8, high: bool) {
        if pin >= port.pin_count() {
            return;
        }
        let bit = 1 << pin;
        self.regs
            .modify(port.offset() + DATA, |v| if high { v | bit } else { v & !bit });
    }

    pub fn pin(&mut self, port: Port, pin: u8) -> bool {
        pin < port.pin_count() && self.regs.read(port.offset() + DATA) & (1 << pin) != 0
    }

    pub fn toggle_pin(&mut self, port: Port, pin: u8) {
        if pin >= port.pin_count() {
            return;
        }
        self.regs.modify(port.offset() + DATA, |v| v ^ (1 << pin));
    }

    /// Routes PA0..PA3 to the touch panel ADC with pulls disabled.
    pub fn configure_touch_pins(&mut self) {
        for pin in TOUCH_PINS {
            self.set_function(Port::A, pin, FUNCTION_TOUCH_PANEL);
            self.set_pull(Port::A, pin, Pull::Disabled);
        }
        log::debug!("gpio: touch pins PA0..PA3 function={FUNCTION_TOUCH_PANEL}");
    }

    fn set_two_bit(&mut self, base: usize, port: Port, pin: u8, value: u32) {
        if pin >= port.pin_count() {
            return;
        }
        let field = Field::new((pin % 16) * 2, 2);
        self.regs
            .modify(base + (pin as usize / 16) * 4, |v| field.set(v, value));
    }
}
