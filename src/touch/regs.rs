//! RTP (resistive touch panel ADC) register map.

use crate::regs::Field;

pub const TP_BASE: usize = 0x01C2_4800;

pub const CTRL0: usize = 0x00;
pub const CTRL1: usize = 0x04;
pub const CTRL2: usize = 0x08;
pub const CTRL3: usize = 0x0C;
pub const INT_FIFO_CTRL: usize = 0x10;
pub const INT_FIFO_STAT: usize = 0x14;
pub const TPR: usize = 0x18;
pub const CDAT: usize = 0x1C;
pub const TEMP_DATA: usize = 0x20;
pub const DATA: usize = 0x24;

// CTRL0
pub const ADC_FIRST_DLY: Field = Field::new(24, 8);
pub const ADC_FIRST_DLY_MODE: Field = Field::bit(23);
pub const ADC_CLK_SEL: Field = Field::bit(22);
pub const ADC_CLK_DIV: Field = Field::new(20, 2);
pub const FS_DIV: Field = Field::new(16, 4);
pub const T_ACQ: Field = Field::new(0, 16);

// CTRL1
pub const STYLUS_UP_DEBOUNCE: Field = Field::new(12, 8);
pub const STYLUS_UP_DEBOUNCE_EN: Field = Field::bit(9);
pub const TOUCH_PAN_CALI_EN: Field = Field::bit(6);
pub const TP_DUAL_EN: Field = Field::bit(5);
pub const TP_EN: Field = Field::bit(4);
pub const TP_ADC_SELECT: Field = Field::bit(3);
pub const ADC_CHAN_SELECT: Field = Field::new(0, 3);

// CTRL2
pub const TP_SENSITIVE_ADJUST: Field = Field::new(28, 4);
pub const TP_FIFO_MODE_SELECT: Field = Field::new(26, 2);
pub const PRE_MEA_EN: Field = Field::bit(24);
pub const PRE_MEA_THRE_CNT: Field = Field::new(0, 24);

// CTRL3
pub const FILTER_EN: Field = Field::bit(2);
pub const FILTER_TYPE: Field = Field::new(0, 2);

// INT_FIFO_CTRL
pub const TEMP_IRQ_EN: Field = Field::bit(18);
pub const OVERRUN_IRQ_EN: Field = Field::bit(17);
pub const DATA_IRQ_EN: Field = Field::bit(16);
pub const TP_DATA_XY_CHANGE: Field = Field::bit(13);
pub const FIFO_TRIG: Field = Field::new(8, 5);
pub const DATA_DRQ_EN: Field = Field::bit(7);
pub const FIFO_FLUSH: Field = Field::bit(4);
pub const TP_UP_IRQ_EN: Field = Field::bit(1);
pub const TP_DOWN_IRQ_EN: Field = Field::bit(0);

// INT_FIFO_STAT, write-1-to-clear
pub const TEMP_DATA_PENDING: u32 = 1 << 18;
pub const FIFO_OVERRUN_PENDING: u32 = 1 << 17;
pub const FIFO_DATA_PENDING: u32 = 1 << 16;
pub const TP_IDLE_FLAG: u32 = 1 << 2;
pub const TP_UP_PENDING: u32 = 1 << 1;
pub const TP_DOWN_PENDING: u32 = 1 << 0;

/// Status bits the filter acts on; anything else is acknowledged and ignored.
pub const HANDLED_STATUS: u32 =
    TEMP_DATA_PENDING | FIFO_OVERRUN_PENDING | FIFO_DATA_PENDING | TP_UP_PENDING | TP_DOWN_PENDING;

// TPR: temperature period t = x * 256 * 16 / clkin
pub const TEMP_ENABLE: Field = Field::bit(16);
pub const TEMP_PERIOD: Field = Field::new(0, 16);

/// FIFO and temperature words carry 12 significant bits.
pub const SAMPLE_MASK: u32 = 0x0FFF;
