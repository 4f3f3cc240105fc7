use super::regs::*;

/// ADC clock input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcClock {
    Hosc = 0,
    AudioPll = 1,
}

/// `clkin = clk / n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcClockDivider {
    Div2 = 0,
    Div3 = 1,
    Div6 = 2,
    Div1 = 3,
}

/// Median/averaging filter window, median size then averaging size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterType {
    Median4Average2 = 0,
    Median5Average3 = 1,
    Median8Average4 = 2,
    Median16Average8 = 3,
}

/// Static configuration written by [`super::TouchPanel::init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchConfig {
    pub clock: AdcClock,
    pub clock_divider: AdcClockDivider,
    /// Sample frequency is `clkin / 2^(20 - fs_div)`.
    pub fs_div: u8,
    /// Acquisition time is `clkin / (16 * (t_acq + 1))`.
    pub t_acq: u16,
    /// 0 is least sensitive, 15 most sensitive.
    pub sensitivity: u8,
    /// 0 keeps only the x/y pair in the FIFO.
    pub fifo_mode: u8,
    pub filter: Option<FilterType>,
    pub temperature_period: Option<u16>,
    pub fifo_trigger_level: u8,
    pub stylus_up_debounce: Option<u8>,
    pub adc_channels: u8,
    pub adc_select: bool,
    pub data_irq: bool,
    pub touch_up_irq: bool,
    /// The first sample after contact is unreliable; the filter drops it either way.
    pub touch_down_irq: bool,
    pub temperature_irq: bool,
    pub overrun_irq: bool,
    /// Read CTRL0/CTRL1 back after programming and fail init on mismatch.
    pub verify_readback: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        // HOSC, clkin = clk / 6, samplefreq = clkin / 8192, t_acq = clkin / (16 * 64)
        Self {
            clock: AdcClock::Hosc,
            clock_divider: AdcClockDivider::Div6,
            fs_div: 7,
            t_acq: 63,
            sensitivity: 15,
            fifo_mode: 0,
            filter: Some(FilterType::Median5Average3),
            temperature_period: Some(1953),
            fifo_trigger_level: 1,
            stylus_up_debounce: Some(5),
            adc_channels: 0b111,
            adc_select: true,
            data_irq: true,
            touch_up_irq: true,
            touch_down_irq: false,
            temperature_irq: false,
            overrun_irq: false,
            verify_readback: true,
        }
    }
}

impl TouchConfig {
    pub fn ctrl0(&self) -> u32 {
        ADC_CLK_SEL.value(self.clock as u32)
            | ADC_CLK_DIV.value(self.clock_divider as u32)
            | FS_DIV.value(self.fs_div as u32)
            | T_ACQ.value(self.t_acq as u32)
    }

    /// CTRL1 without the enable bit; the enable is written last.
    pub fn ctrl1(&self) -> u32 {
        let mut word = ADC_CHAN_SELECT.value(self.adc_channels as u32)
            | TP_ADC_SELECT.value(self.adc_select as u32);
        if let Some(debounce) = self.stylus_up_debounce {
            word |= STYLUS_UP_DEBOUNCE.value(debounce as u32) | STYLUS_UP_DEBOUNCE_EN.value(1);
        }
        word
    }

    pub fn ctrl2(&self) -> u32 {
        TP_SENSITIVE_ADJUST.value(self.sensitivity as u32)
            | TP_FIFO_MODE_SELECT.value(self.fifo_mode as u32)
    }

    pub fn ctrl3(&self) -> u32 {
        match self.filter {
            Some(filter) => FILTER_EN.value(1) | FILTER_TYPE.value(filter as u32),
            None => 0,
        }
    }

    pub fn tpr(&self) -> u32 {
        match self.temperature_period {
            Some(period) => TEMP_ENABLE.value(1) | TEMP_PERIOD.value(period as u32),
            None => 0,
        }
    }

    /// Includes FIFO_FLUSH so stale samples from before init never reach the filter.
    pub fn int_fifo_ctrl(&self) -> u32 {
        TEMP_IRQ_EN.value(self.temperature_irq as u32)
            | OVERRUN_IRQ_EN.value(self.overrun_irq as u32)
            | DATA_IRQ_EN.value(self.data_irq as u32)
            | FIFO_TRIG.value(self.fifo_trigger_level as u32)
            | FIFO_FLUSH.value(1)
            | TP_UP_IRQ_EN.value(self.touch_up_irq as u32)
            | TP_DOWN_IRQ_EN.value(self.touch_down_irq as u32)
    }
}
