//! Inactivity timeout and screensaver behaviour on a virtual clock.

mod common;

use common::{record, snapshot, stocked, VirtualShell};
use shared::{Event, KioskConfig, KioskState, ProductId, TimerOutput, ViewState};

#[test]
fn test_screensaver_after_timeout() {
    let mut shell = VirtualShell::loaded_with(KioskConfig::default(), stocked(2));
    assert_eq!(shell.idle_due_at(), Some(15_000));

    shell.advance(14_999);
    assert!(shell.is_loaded());

    shell.advance(1);
    assert_eq!(shell.view().state, ViewState::Idle);
    assert!(!shell.model.idle.is_active());
}

#[test]
fn test_interaction_restarts_countdown() {
    let mut shell = VirtualShell::loaded_with(KioskConfig::default(), stocked(2));

    shell.advance(14_999);
    shell.send(Event::UserInteraction);
    assert_eq!(shell.idle_due_at(), Some(29_999));

    shell.advance(1);
    assert!(shell.is_loaded());

    shell.advance(14_998);
    assert!(shell.is_loaded());

    shell.advance(1);
    assert_eq!(shell.view().state, ViewState::Idle);
}

#[test]
fn test_superseded_countdown_fire_is_stale() {
    let mut shell = VirtualShell::loaded_with(KioskConfig::default(), stocked(2));
    let first = shell.model.idle.armed();

    shell.send(Event::UserInteraction);
    assert_ne!(shell.model.idle.armed(), first);

    if let Some(id) = first {
        // A fire that raced with the cancel.
        shell.send(Event::TimerElapsed { id, output: TimerOutput::Fired });
    }
    assert!(matches!(shell.model.state, KioskState::Loaded(_)));
}

#[test]
fn test_screensaver_enters_once() {
    let mut shell = VirtualShell::loaded_with(KioskConfig::default(), stocked(2));
    shell.advance(15_000);
    let renders = shell.renders;

    shell.advance(120_000);
    assert_eq!(shell.view().state, ViewState::Idle);
    assert_eq!(shell.idle_due_at(), None);
    assert_eq!(shell.renders, renders);
}

#[test]
fn test_tap_dismisses_and_rearms() {
    let mut shell = VirtualShell::loaded_with(KioskConfig::default(), stocked(2));
    shell.advance(15_000);
    assert_eq!(shell.view().state, ViewState::Idle);

    shell.advance(5_000);
    shell.send(Event::IdleOverlayTapped);
    assert!(shell.is_loaded());
    assert_eq!(shell.idle_due_at(), Some(35_000));

    shell.advance(15_000);
    assert_eq!(shell.view().state, ViewState::Idle);
}

#[test]
fn test_dismissing_tap_is_swallowed() {
    let mut shell = VirtualShell::loaded_with(
        KioskConfig::default(),
        snapshot(vec![record("p7", "Lager", true, 2, 1)]),
    );
    shell.advance(15_000);

    shell.send(Event::BuyTapped { product_id: ProductId::new("p7") });
    let view = shell.view();
    assert!(matches!(view.state, ViewState::Loaded { .. }));
    assert_eq!(view.age_gate, None);
    assert_eq!(view.purchase, None);
}

#[test]
fn test_screensaver_closes_open_gate() {
    let mut shell = VirtualShell::loaded_with(
        KioskConfig::default(),
        snapshot(vec![record("p7", "Lager", true, 2, 1)]),
    );
    shell.send(Event::BuyTapped { product_id: ProductId::new("p7") });
    assert!(shell.view().age_gate.is_some());

    shell.advance(15_000);
    assert_eq!(shell.view().state, ViewState::Idle);
    assert_eq!(shell.view().age_gate, None);

    shell.send(Event::IdleOverlayTapped);
    assert_eq!(shell.view().age_gate, None);
}

#[test]
fn test_custom_timeout() {
    let config = KioskConfig { idle_timeout_ms: 2_000, ..KioskConfig::default() };
    let mut shell = VirtualShell::loaded_with(config, stocked(2));

    shell.advance(1_999);
    assert!(shell.is_loaded());
    shell.advance(1);
    assert_eq!(shell.view().state, ViewState::Idle);
}
