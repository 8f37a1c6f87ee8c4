use super::*;

#[test]
fn button_numbers_follow_toolkit_convention() {
    assert_eq!(MouseButton::from_number(1), Some(MouseButton::Primary));
    assert_eq!(MouseButton::from_number(2), Some(MouseButton::Middle));
    assert_eq!(MouseButton::from_number(3), Some(MouseButton::Secondary));
    assert_eq!(MouseButton::from_number(9), None);
}

#[test]
fn only_pointer_inputs_carry_position() {
    let p = Pos::new(3, 4);
    assert_eq!(LayerInput::PointerMotion { pos: p }.pos(), Some(p));
    assert_eq!(
        LayerInput::ButtonUp {
            button: MouseButton::Primary,
            pos: p
        }
        .pos(),
        Some(p)
    );
    assert_eq!(LayerInput::ModifierDown.pos(), None);
    assert!(LayerInput::ModifierUp.is_modifier());
    assert!(!LayerInput::PointerLeave.is_modifier());
}
