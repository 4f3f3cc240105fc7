use super::*;
use crate::sim::SimTouchRegisters;
use crate::touch::TouchConfig;

fn installed() -> SharedTouchPanel<SimTouchRegisters> {
    let shared = SharedTouchPanel::new();
    let mut panel = TouchPanel::new(SimTouchRegisters::new(), TouchConfig::default());
    panel.init().unwrap();
    assert!(shared.install(panel).is_none());
    shared
}

#[test]
fn empty_slot_reports_unserviced_interrupt() {
    let shared: SharedTouchPanel<SimTouchRegisters> = SharedTouchPanel::new();
    assert!(!shared.on_interrupt());
    assert!(!shared.is_installed());
    assert_eq!(shared.read_point(), None);
    assert!(!shared.is_touching());
    assert_eq!(shared.stats(), None);
}

#[test]
fn interrupt_and_reader_share_one_panel() {
    let shared = installed();

    shared.with(|panel| panel.registers_mut().inject_data(1, 2));
    assert!(shared.on_interrupt());
    shared.with(|panel| panel.registers_mut().inject_data(30, 40));
    assert!(shared.on_interrupt());

    assert!(shared.is_touching());
    assert_eq!(shared.peek_point(), Some(TouchSample::new(30, 40)));
    assert_eq!(shared.read_point(), Some(TouchSample::new(30, 40)));
    assert_eq!(shared.read_point(), None);
    assert_eq!(shared.stats().map(|s| s.accepted), Some(1));
}

#[test]
fn nested_access_does_not_panic() {
    let shared = installed();
    let nested = shared.with(|_| shared.read_point());
    assert_eq!(nested, Some(None));

    // An interrupt landing while the poll side holds the panel is reported, not lost silently.
    let nested_irq = shared.with(|_| shared.on_interrupt());
    assert_eq!(nested_irq, Some(false));
}

#[test]
fn take_empties_slot() {
    let shared = installed();
    assert!(shared.take().is_some());
    assert!(!shared.is_installed());
}

#[test]
fn works_from_a_static() {
    static TOUCH: SharedTouchPanel<SimTouchRegisters> = SharedTouchPanel::new();

    let mut panel = TouchPanel::new(SimTouchRegisters::new(), TouchConfig::default());
    panel.init().unwrap();
    TOUCH.install(panel);

    TOUCH.with(|panel| panel.registers_mut().inject_touch_up());
    TOUCH.on_interrupt();
    assert_eq!(TOUCH.read_point(), None);
    assert!(TOUCH.take().is_some());
}
