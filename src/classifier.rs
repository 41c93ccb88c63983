//! Event classification

use crate::config::{ClickButton, Settings};
use crate::input_listener::{InputEvent, PointerButton};

/// What an input event means to the auto-clicker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Hotkey pressed: flip the active state
    HotkeyToggle,
    /// Check button pressed: candidate for a delayed click
    TriggerPress,
    Ignored,
}

/// Classify one event
///
/// Pure function of the event and the hotkey/check settings; the enabled
/// switch and the active state are applied later by the scheduler.
pub fn classify(event: &InputEvent, settings: &Settings) -> Classification {
    match *event {
        InputEvent::KeyDown { code } if code == settings.hotkey_code => {
            Classification::HotkeyToggle
        }
        InputEvent::MouseDown { button } if is_check_button(button, settings.check) => {
            Classification::TriggerPress
        }
        _ => Classification::Ignored,
    }
}

fn is_check_button(button: PointerButton, check: ClickButton) -> bool {
    matches!(
        (check, button),
        (ClickButton::Left, PointerButton::Primary) | (ClickButton::Right, PointerButton::Secondary)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new(30).with_check(ClickButton::Left)
    }

    #[test]
    fn hotkey_key_down_toggles() {
        let s = settings();
        assert_eq!(
            classify(&InputEvent::KeyDown { code: 30 }, &s),
            Classification::HotkeyToggle
        );
        assert_eq!(
            classify(&InputEvent::KeyUp { code: 30 }, &s),
            Classification::Ignored
        );
        assert_eq!(
            classify(&InputEvent::KeyDown { code: 31 }, &s),
            Classification::Ignored
        );
    }

    #[test]
    fn check_button_press_triggers() {
        let left = settings();
        let right = settings().with_check(ClickButton::Right);
        let primary = InputEvent::MouseDown {
            button: PointerButton::Primary,
        };
        let secondary = InputEvent::MouseDown {
            button: PointerButton::Secondary,
        };

        assert_eq!(classify(&primary, &left), Classification::TriggerPress);
        assert_eq!(classify(&secondary, &left), Classification::Ignored);
        assert_eq!(classify(&secondary, &right), Classification::TriggerPress);
        assert_eq!(classify(&primary, &right), Classification::Ignored);
        assert_eq!(
            classify(
                &InputEvent::MouseUp {
                    button: PointerButton::Primary
                },
                &left
            ),
            Classification::Ignored
        );
        assert_eq!(
            classify(
                &InputEvent::MouseDown {
                    button: PointerButton::Middle
                },
                &left
            ),
            Classification::Ignored
        );
    }

    #[test]
    fn enabled_switch_does_not_change_classification() {
        let disabled = settings().with_enabled(false);
        assert_eq!(
            classify(&InputEvent::KeyDown { code: 30 }, &disabled),
            Classification::HotkeyToggle
        );
        assert_eq!(
            classify(
                &InputEvent::MouseDown {
                    button: PointerButton::Primary
                },
                &disabled
            ),
            Classification::TriggerPress
        );
    }

    #[test]
    fn other_events_are_ignored() {
        assert_eq!(
            classify(&InputEvent::Other, &settings()),
            Classification::Ignored
        );
    }
}
