use super::*;
use crate::kernel::testing::{HostOp, RecordingHost};

fn layer() -> (CompositingLayer, RecordingHost) {
    let host = RecordingHost::new(Size::new(1920, 1080));
    let layer = CompositingLayer::new(Box::new(host.clone()));
    host.take_ops();
    (layer, host)
}

fn id(s: &str) -> InstanceId {
    InstanceId::new(s)
}

fn down(x: i32, y: i32) -> LayerInput {
    LayerInput::ButtonDown {
        button: MouseButton::Primary,
        pos: Pos::new(x, y),
    }
}

fn up(x: i32, y: i32) -> LayerInput {
    LayerInput::ButtonUp {
        button: MouseButton::Primary,
        pos: Pos::new(x, y),
    }
}

fn motion(x: i32, y: i32) -> LayerInput {
    LayerInput::PointerMotion { pos: Pos::new(x, y) }
}

#[test]
fn modifier_arms_and_disarms_move_mode() {
    let (mut layer, _) = layer();
    assert_eq!(layer.mode(), InputMode::Normal);

    let out = layer.on_input(&LayerInput::ModifierDown);
    assert_eq!(out.events, vec![LayerEvent::BeginMove]);
    assert_eq!(layer.mode(), InputMode::MoveArmed);

    let out = layer.on_input(&LayerInput::ModifierUp);
    assert_eq!(out.events, vec![LayerEvent::EndMove]);
    assert_eq!(layer.mode(), InputMode::Normal);
}

#[test]
fn modifier_repeat_is_ignored() {
    let (mut layer, _) = layer();
    layer.on_input(&LayerInput::ModifierDown);
    let out = layer.on_input(&LayerInput::ModifierDown);
    assert!(out.events.is_empty());
    assert_eq!(layer.mode(), InputMode::MoveArmed);
}

#[test]
fn button_edges_toggle_moving() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(10, 10, 100, 100));
    layer.on_input(&LayerInput::ModifierDown);

    layer.on_input(&down(20, 20));
    assert_eq!(layer.mode(), InputMode::Moving);
    assert_eq!(layer.grabbed(), Some(&id("a.1")));

    layer.on_input(&up(20, 20));
    assert_eq!(layer.mode(), InputMode::MoveArmed);
    assert_eq!(layer.grabbed(), None);
}

#[test]
fn modifier_release_wins_while_moving() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 50, 50));
    layer.on_input(&LayerInput::ModifierDown);
    layer.on_input(&down(5, 5));

    let out = layer.on_input(&LayerInput::ModifierUp);
    assert_eq!(out.events, vec![LayerEvent::EndMove]);
    assert_eq!(layer.mode(), InputMode::Normal);
    assert_eq!(layer.grabbed(), None);

    // The button release that follows must not re-enter a move mode.
    let out = layer.on_input(&up(5, 5));
    assert_eq!(layer.mode(), InputMode::Normal);
    assert!(matches!(out.events.as_slice(), [LayerEvent::PassThrough(_)]));
}

#[test]
fn motion_while_moving_yields_deltas_for_grabbed_widget() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 50, 50));
    layer.on_input(&LayerInput::ModifierDown);
    layer.on_input(&down(10, 10));

    let out = layer.on_input(&motion(15, 7));
    assert_eq!(
        out.events,
        vec![LayerEvent::MoveDelta {
            target: id("a.1"),
            dx: 5,
            dy: -3
        }]
    );
    assert!(out.needs_redraw);

    let out = layer.on_input(&motion(15, 7));
    assert!(out.events.is_empty());
}

#[test]
fn motion_while_armed_is_consumed() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 50, 50));
    layer.on_input(&LayerInput::ModifierDown);
    let out = layer.on_input(&motion(10, 10));
    assert!(out.events.is_empty());
}

#[test]
fn background_press_moves_nothing() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 50, 50));
    layer.on_input(&LayerInput::ModifierDown);
    layer.on_input(&down(500, 500));
    assert_eq!(layer.mode(), InputMode::Moving);

    let out = layer.on_input(&motion(520, 500));
    assert!(out.events.is_empty());
}

#[test]
fn normal_mode_passes_input_through() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 50, 50));
    let input = down(10, 10);
    let out = layer.on_input(&input);
    assert_eq!(out.events, vec![LayerEvent::PassThrough(input)]);
    assert_eq!(layer.mode(), InputMode::Normal);
}

#[test]
fn secondary_release_on_background_requests_menu() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 50, 50));
    let out = layer.on_input(&LayerInput::ButtonUp {
        button: MouseButton::Secondary,
        pos: Pos::new(300, 300),
    });
    assert_eq!(
        out.events,
        vec![LayerEvent::ContextMenu {
            pos: Pos::new(300, 300)
        }]
    );
}

#[test]
fn crossing_the_boundary_clears_hover_in_every_mode() {
    let (mut layer, _) = layer();
    assert_eq!(
        layer.on_input(&LayerInput::PointerLeave).events,
        vec![LayerEvent::ClearHover]
    );
    layer.on_input(&LayerInput::ModifierDown);
    assert_eq!(
        layer.on_input(&LayerInput::PointerEnter).events,
        vec![LayerEvent::ClearHover]
    );
    assert_eq!(layer.mode(), InputMode::MoveArmed);
}

#[test]
fn raise_moves_to_front_and_hit_test_prefers_front() {
    let (mut layer, host) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 100, 100));
    layer.add(id("b.2"), Rect::new(50, 50, 100, 100));
    assert_eq!(layer.hit_test(Pos::new(60, 60)), Some(&id("b.2")));

    assert!(layer.raise("a.1"));
    let order: Vec<&str> = layer.z_order().map(InstanceId::as_str).collect();
    assert_eq!(order, vec!["b.2", "a.1"]);
    assert_eq!(layer.hit_test(Pos::new(60, 60)), Some(&id("a.1")));
    assert!(host.take_ops().contains(&HostOp::Raise(id("a.1"))));
}

#[test]
fn move_keeps_z_order() {
    let (mut layer, host) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 10, 10));
    layer.add(id("b.2"), Rect::new(0, 0, 10, 10));
    host.take_ops();

    assert!(layer.move_to("a.1", Pos::new(40, 40)));
    let order: Vec<&str> = layer.z_order().map(InstanceId::as_str).collect();
    assert_eq!(order, vec!["a.1", "b.2"]);
    assert_eq!(layer.rect_of("a.1"), Some(Rect::new(40, 40, 10, 10)));
    assert_eq!(host.take_ops(), vec![HostOp::Move(id("a.1"), Pos::new(40, 40))]);
}

#[test]
fn remove_drops_entry_and_grab() {
    let (mut layer, _) = layer();
    layer.add(id("a.1"), Rect::new(0, 0, 10, 10));
    layer.on_input(&LayerInput::ModifierDown);
    layer.on_input(&down(1, 1));
    assert!(layer.remove("a.1"));
    assert!(!layer.remove("a.1"));
    assert!(layer.grabbed().is_none());
    assert!(layer.is_empty());
}

#[test]
fn presentation_state_is_mirrored_to_host() {
    let (mut layer, host) = layer();
    layer.set_opacity(1.7);
    layer.set_alpha(0.5);
    layer.set_type_hint(WindowTypeHint::Dock);
    layer.invalidate();
    assert_eq!(layer.opacity(), 1.0);
    assert_eq!(
        host.take_ops(),
        vec![
            HostOp::Opacity(1.0),
            HostOp::TypeHint(WindowTypeHint::Dock),
            HostOp::Invalidate(0.5),
        ]
    );
}
