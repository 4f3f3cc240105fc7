use super::*;
use crate::sim::SimRegisterFile;

type Regs = SimRegisterFile<16>;

#[test]
fn millisecond_tick_divides_24mhz() {
    let config = TimerConfig::millisecond_tick();
    assert_eq!(config.interval, 24_000);
    // OSC24M source, prescale 1, continuous.
    assert_eq!(config.ctrl(), 0b0000_0100);
}

#[test]
fn channel_offsets() {
    assert_eq!(Channel::Timer0.ctrl(), 0x10);
    assert_eq!(Channel::Timer0.interval(), 0x14);
    assert_eq!(Channel::Timer0.current(), 0x18);
    assert_eq!(Channel::Timer1.ctrl(), 0x20);
    assert_eq!(Channel::Timer2.interval(), 0x34);
}

#[test]
fn start_programs_interval_then_enables() {
    let mut timers = Timers::new(Regs::new());
    timers.start(Channel::Timer0, TimerConfig::millisecond_tick());

    let regs = timers.registers();
    assert_eq!(regs.word(Channel::Timer0.interval()), 24_000);
    assert_eq!(regs.word(Channel::Timer0.ctrl()), 0b0000_0111);
    assert_eq!(regs.writes_of(Channel::Timer0.ctrl()), 2);
    assert_eq!(regs.word(IRQ_EN), 0b001);
    assert!(timers.is_running(Channel::Timer0));
}

#[test]
fn start_without_irq_leaves_irq_disabled() {
    let mut regs = Regs::new();
    regs.set_word(IRQ_EN, 0b011);
    let mut timers = Timers::new(regs);

    let config = TimerConfig {
        irq: false,
        mode: TimerMode::Single,
        prescale: Prescale::Div8,
        ..TimerConfig::default()
    };
    timers.start(Channel::Timer1, config);

    assert_eq!(timers.registers().word(IRQ_EN), 0b001);
    assert_eq!(
        timers.registers().word(Channel::Timer1.ctrl()),
        TMR_EN.mask() | TMR_RELOAD.mask() | (1 << 2) | (3 << 4) | (1 << 7)
    );
}

#[test]
fn stop_clears_enable_and_irq() {
    let mut timers = Timers::new(Regs::new());
    timers.start(Channel::Timer2, TimerConfig::millisecond_tick());
    timers.stop(Channel::Timer2);

    assert!(!timers.is_running(Channel::Timer2));
    assert_eq!(timers.registers().word(IRQ_EN), 0);
}

#[test]
fn clear_pending_writes_only_its_bit() {
    let mut regs = Regs::new();
    regs.set_word(IRQ_STATUS, 0b101);
    let mut timers = Timers::new(regs);

    assert!(timers.is_pending(Channel::Timer2));
    assert!(!timers.is_pending(Channel::Timer1));

    timers.clear_pending(Channel::Timer2);
    // Plain memory stores the write-1-to-clear mask as written.
    assert_eq!(timers.registers().word(IRQ_STATUS), 0b100);
}

#[test]
fn current_value_reads_counter() {
    let mut regs = Regs::new();
    regs.set_word(Channel::Timer1.current(), 1234);
    let mut timers = Timers::new(regs);
    assert_eq!(timers.current_value(Channel::Timer1), 1234);
}
