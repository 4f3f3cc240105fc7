use super::*;

fn data(x: u16, y: u16) -> FilterEvent {
    FilterEvent::Data(TouchSample::new(x, y))
}

#[test]
fn starts_idle_and_ignoring() {
    let filter = SampleFilter::new();
    let ctx = filter.context();
    assert_eq!(filter.phase(), FilterPhase::IdleNoContact);
    assert!(ctx.state.ignore_next_sample);
    assert!(!ctx.state.ready);
}

#[test]
fn first_sample_is_discarded_then_published() {
    let mut filter = SampleFilter::new();

    filter.handle(data(10, 20));
    assert_eq!(filter.phase(), FilterPhase::Sampling);
    assert!(!filter.context().state.ready);
    assert!(!filter.context().state.ignore_next_sample);
    assert_eq!(filter.context().state.last_sample, TouchSample::default());

    filter.handle(data(11, 21));
    assert!(filter.context().state.ready);
    assert_eq!(filter.context().state.last_sample, TouchSample::new(11, 21));
    assert_eq!(filter.context().stats.discarded, 1);
    assert_eq!(filter.context().stats.accepted, 1);
}

#[test]
fn touch_up_rearms_and_drops_ready() {
    let mut filter = SampleFilter::new();
    filter.handle(data(1, 1));
    filter.handle(data(2, 2));
    assert!(filter.context().state.ready);

    filter.handle(FilterEvent::TouchUp);
    let ctx = filter.context();
    assert_eq!(filter.phase(), FilterPhase::IdleNoContact);
    assert!(ctx.state.ignore_next_sample);
    assert!(!ctx.state.ready);
    // The stale point is kept but no longer flagged.
    assert_eq!(ctx.state.last_sample, TouchSample::new(2, 2));
}

#[test]
fn touch_down_arms_discard_from_sampling() {
    let mut filter = SampleFilter::new();
    filter.handle(data(1, 1));
    filter.handle(data(2, 2));

    filter.handle(FilterEvent::TouchDown);
    assert_eq!(
        filter.phase(),
        FilterPhase::ArmedAwaitingFirstDiscard
    );
    assert!(!filter.context().state.ready);

    filter.handle(data(3, 3));
    assert!(!filter.context().state.ready);
    assert_eq!(filter.phase(), FilterPhase::Sampling);

    filter.handle(data(4, 4));
    assert_eq!(filter.context().state.last_sample, TouchSample::new(4, 4));
}

#[test]
fn repeated_touch_ups_stay_idle() {
    let mut filter = SampleFilter::new();
    filter.handle(FilterEvent::TouchUp);
    filter.handle(FilterEvent::TouchUp);

    let ctx = filter.context();
    assert_eq!(filter.phase(), FilterPhase::IdleNoContact);
    assert_eq!(ctx.stats.touch_ups, 2);
    assert!(ctx.state.ignore_next_sample);
}

#[test]
fn armed_touch_up_returns_to_idle() {
    let mut filter = SampleFilter::new();
    filter.handle(FilterEvent::TouchDown);
    filter.handle(FilterEvent::TouchUp);

    assert_eq!(filter.phase(), FilterPhase::IdleNoContact);
    filter.handle(data(5, 5));
    assert!(!filter.context().state.ready);
}

#[test]
fn phase_tracks_machine_state_across_a_contact() {
    let mut filter = SampleFilter::new();
    let mut seen = [FilterPhase::IdleNoContact; 5];

    for (slot, event) in seen.iter_mut().zip([
        FilterEvent::TouchDown,
        data(1, 1),
        data(2, 2),
        FilterEvent::TouchDown,
        FilterEvent::TouchUp,
    ]) {
        filter.handle(event);
        *slot = filter.phase();
    }

    assert_eq!(
        seen,
        [
            FilterPhase::ArmedAwaitingFirstDiscard,
            FilterPhase::Sampling,
            FilterPhase::Sampling,
            FilterPhase::ArmedAwaitingFirstDiscard,
            FilterPhase::IdleNoContact,
        ]
    );
}
