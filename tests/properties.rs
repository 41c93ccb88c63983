//! Property checks for classification and toggling

use echoclick::{
    classify, ActiveState, Classification, ClickButton, DispatchQueue, InputEvent, PointerButton,
    Settings,
};
use proptest::prelude::*;

fn pointer_button() -> impl Strategy<Value = PointerButton> {
    prop_oneof![
        Just(PointerButton::Primary),
        Just(PointerButton::Secondary),
        Just(PointerButton::Middle),
        any::<u8>().prop_map(PointerButton::Other),
    ]
}

fn input_event() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        (0u32..100).prop_map(|code| InputEvent::KeyDown { code }),
        (0u32..100).prop_map(|code| InputEvent::KeyUp { code }),
        pointer_button().prop_map(|button| InputEvent::MouseDown { button }),
        pointer_button().prop_map(|button| InputEvent::MouseUp { button }),
        Just(InputEvent::Other),
    ]
}

fn settings() -> impl Strategy<Value = Settings> {
    (
        0u32..100,
        any::<bool>(),
        prop_oneof![Just(ClickButton::Left), Just(ClickButton::Right)],
    )
        .prop_map(|(code, enabled, check)| {
            Settings::new(code).with_enabled(enabled).with_check(check)
        })
}

proptest! {
    #[test]
    fn classification_is_deterministic(
        events in prop::collection::vec(input_event(), 0..64),
        settings in settings(),
    ) {
        let first: Vec<_> = events.iter().map(|e| classify(e, &settings)).collect();
        let second: Vec<_> = events.iter().map(|e| classify(e, &settings)).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn toggles_only_on_hotkey_key_down(event in input_event(), settings in settings()) {
        let class = classify(&event, &settings);
        let is_hotkey = event == InputEvent::KeyDown { code: settings.hotkey_code };
        prop_assert_eq!(class == Classification::HotkeyToggle, is_hotkey);
    }

    #[test]
    fn toggle_parity(n in 0usize..200) {
        let state = ActiveState::new();
        for _ in 0..n {
            state.toggle();
        }
        prop_assert_eq!(state.is_active(), n % 2 == 1);
    }

    #[test]
    fn queue_keeps_first_capacity_events(capacity in 1usize..64) {
        let queue = DispatchQueue::new(capacity);
        let accepted = (0..=capacity as u32)
            .filter(|code| queue.try_enqueue(InputEvent::KeyDown { code: *code }))
            .count();
        prop_assert_eq!(accepted, capacity);
        prop_assert_eq!(queue.dropped(), 1);
        for code in 0..capacity as u32 {
            prop_assert_eq!(queue.dequeue(), Some(InputEvent::KeyDown { code }));
        }
    }
}
