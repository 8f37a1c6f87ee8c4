use super::*;

#[test]
fn emitted_signals_arrive_in_order() {
    let (bus, mut rx) = signal_bus();
    let emitter = bus.emitter(InstanceId::new("clock.1"));

    assert!(emitter.raise_request());
    assert!(emitter.move_request(3, -4));
    assert!(emitter.end_move());

    let got: Vec<WidgetSignal> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|m| m.signal)
        .collect();
    assert_eq!(
        got,
        vec![
            WidgetSignal::RaiseRequest,
            WidgetSignal::MoveRequest { dx: 3, dy: -4 },
            WidgetSignal::EndMove,
        ]
    );
}

#[test]
fn emit_reports_closed_bus() {
    let (bus, rx) = signal_bus();
    let emitter = bus.emitter(InstanceId::new("a.1"));
    drop(rx);
    assert!(!emitter.remove_request());
}

#[test]
fn disconnect_revokes_handler() {
    let mut hub = SignalHub::new();
    let id = InstanceId::new("a.1");
    let move_handler = hub.connect(id.clone(), SignalKind::MoveRequest);
    let _raise = hub.connect(id.clone(), SignalKind::RaiseRequest);

    assert!(hub.is_connected("a.1", SignalKind::MoveRequest));
    assert_eq!(hub.handler_count("a.1"), 2);

    assert!(hub.disconnect(move_handler));
    assert!(!hub.disconnect(move_handler));
    assert!(!hub.is_connected("a.1", SignalKind::MoveRequest));
    assert_eq!(hub.handler_count("a.1"), 1);
}

#[test]
fn handler_tokens_are_not_reused_for_new_connections() {
    let mut hub = SignalHub::new();
    let first = hub.connect(InstanceId::new("a.1"), SignalKind::EndMove);
    hub.disconnect(first);
    let second = hub.connect(InstanceId::new("b.2"), SignalKind::EndMove);

    assert_ne!(first, second);
    assert!(!hub.disconnect(first));
    assert_eq!(hub.len(), 1);
}
