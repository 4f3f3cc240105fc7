use super::*;
use crate::sim::SimRegisterFile;

type Regs = SimRegisterFile<32>;

fn intc() -> Intc<Regs> {
    let mut intc = Intc::new(Regs::new());
    intc.init();
    intc
}

#[test]
fn init_masks_everything() {
    let intc = intc();
    let regs = intc.registers();
    assert_eq!(regs.word(MASK), u32::MAX);
    assert_eq!(regs.word(MASK + 4), u32::MAX);
    assert_eq!(regs.word(EN), 0);
    assert_eq!(regs.word(EN + 4), 0);
    assert_eq!(regs.word(BASE_ADDR), 0);
}

#[test]
fn enable_touch_panel_source() {
    let mut intc = intc();
    intc.enable(IRQ_TOUCH_PANEL, Priority::High).unwrap();

    let regs = intc.registers();
    assert_eq!(regs.word(EN), 1 << 20);
    assert_eq!(regs.word(MASK), !(1 << 20));
    // Source 20 is slot 4 of PRIO1.
    assert_eq!(regs.word(PRIO + 4), 2 << 8);
    assert!(intc.is_enabled(IRQ_TOUCH_PANEL).unwrap());
}

#[test]
fn enable_second_bank_source() {
    let mut intc = intc();
    intc.enable(40, Priority::Highest).unwrap();

    assert_eq!(intc.registers().word(EN + 4), 1 << 8);
    assert_eq!(intc.registers().word(EN), 0);
    assert_eq!(intc.registers().word(PRIO + 8), 3 << 16);
    assert_eq!(intc.priority(40), Ok(Priority::Highest));
}

#[test]
fn priority_update_keeps_neighbours() {
    let mut intc = intc();
    intc.enable(IRQ_TIMER0, Priority::Low).unwrap();
    intc.enable(IRQ_TIMER1, Priority::Highest).unwrap();
    intc.set_priority(IRQ_TIMER0, Priority::High).unwrap();

    assert_eq!(intc.priority(IRQ_TIMER0), Ok(Priority::High));
    assert_eq!(intc.priority(IRQ_TIMER1), Ok(Priority::Highest));
}

#[test]
fn disable_masks_again() {
    let mut intc = intc();
    intc.enable(IRQ_TIMER0, Priority::Lowest).unwrap();
    intc.enable(IRQ_TOUCH_PANEL, Priority::Lowest).unwrap();
    intc.disable(IRQ_TIMER0).unwrap();

    assert!(!intc.is_enabled(IRQ_TIMER0).unwrap());
    assert!(intc.is_enabled(IRQ_TOUCH_PANEL).unwrap());
    assert_eq!(intc.registers().word(EN), 1 << 20);
}

#[test]
fn out_of_range_source_is_rejected() {
    let mut intc = intc();
    assert_eq!(
        intc.enable(64, Priority::Low),
        Err(IntcError::InvalidSource(64))
    );
    assert_eq!(intc.disable(200), Err(IntcError::InvalidSource(200)));
    assert_eq!(intc.is_pending(64), Err(IntcError::InvalidSource(64)));
    assert_eq!(intc.registers().word(EN + 4), 0);
}

#[test]
fn pending_reads_the_right_bank() {
    let mut intc = intc();
    intc.registers_mut().set_word(PEND, 1 << 20);
    intc.registers_mut().set_word(PEND + 4, 1 << 1);

    assert!(intc.is_pending(IRQ_TOUCH_PANEL).unwrap());
    assert!(!intc.is_pending(IRQ_TIMER0).unwrap());
    assert!(intc.is_pending(33).unwrap());
}

#[test]
fn vector_decodes_source_index() {
    let mut intc = intc();
    intc.registers_mut().set_word(VECTOR, 20 * 4);
    assert_eq!(intc.pending_vector(), IRQ_TOUCH_PANEL);

    intc.registers_mut().set_word(BASE_ADDR, 0x100);
    intc.registers_mut().set_word(VECTOR, 0x100 + 13 * 4);
    assert_eq!(intc.pending_vector(), IRQ_TIMER0);
}
