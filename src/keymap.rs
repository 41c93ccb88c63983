//! Static key name and key code lookup table

use rdev::Key;

/// Codes of keys the hook reports as `Key::Unknown(raw)` start here
pub const UNKNOWN_KEY_BASE: u32 = 0x1_0000;

/// (name, rdev key, code). Aliases share a code so reverse lookups agree.
const KEY_TABLE: &[(&str, Key, u32)] = &[
    // Modifier keys
    ("alt", Key::Alt, 56),
    ("option", Key::Alt, 56),
    ("altgr", Key::AltGr, 3640),
    ("ctrl", Key::ControlLeft, 29),
    ("control", Key::ControlLeft, 29),
    ("rctrl", Key::ControlRight, 3613),
    ("shift", Key::ShiftLeft, 42),
    ("rshift", Key::ShiftRight, 54),
    ("cmd", Key::MetaLeft, 3675),
    ("command", Key::MetaLeft, 3675),
    ("meta", Key::MetaLeft, 3675),
    ("win", Key::MetaRight, 3676),
    ("super", Key::MetaRight, 3676),
    ("fn", Key::Function, 65280),
    // Alphabet keys
    ("a", Key::KeyA, 30),
    ("b", Key::KeyB, 48),
    ("c", Key::KeyC, 46),
    ("d", Key::KeyD, 32),
    ("e", Key::KeyE, 18),
    ("f", Key::KeyF, 33),
    ("g", Key::KeyG, 34),
    ("h", Key::KeyH, 35),
    ("i", Key::KeyI, 23),
    ("j", Key::KeyJ, 36),
    ("k", Key::KeyK, 37),
    ("l", Key::KeyL, 38),
    ("m", Key::KeyM, 50),
    ("n", Key::KeyN, 49),
    ("o", Key::KeyO, 24),
    ("p", Key::KeyP, 25),
    ("q", Key::KeyQ, 16),
    ("r", Key::KeyR, 19),
    ("s", Key::KeyS, 31),
    ("t", Key::KeyT, 20),
    ("u", Key::KeyU, 22),
    ("v", Key::KeyV, 47),
    ("w", Key::KeyW, 17),
    ("x", Key::KeyX, 45),
    ("y", Key::KeyY, 21),
    ("z", Key::KeyZ, 44),
    // Number keys
    ("0", Key::Num0, 11),
    ("1", Key::Num1, 2),
    ("2", Key::Num2, 3),
    ("3", Key::Num3, 4),
    ("4", Key::Num4, 5),
    ("5", Key::Num5, 6),
    ("6", Key::Num6, 7),
    ("7", Key::Num7, 8),
    ("8", Key::Num8, 9),
    ("9", Key::Num9, 10),
    // Function keys
    ("f1", Key::F1, 59),
    ("f2", Key::F2, 60),
    ("f3", Key::F3, 61),
    ("f4", Key::F4, 62),
    ("f5", Key::F5, 63),
    ("f6", Key::F6, 64),
    ("f7", Key::F7, 65),
    ("f8", Key::F8, 66),
    ("f9", Key::F9, 67),
    ("f10", Key::F10, 68),
    ("f11", Key::F11, 87),
    ("f12", Key::F12, 88),
    // Punctuation
    ("backquote", Key::BackQuote, 41),
    ("minus", Key::Minus, 12),
    ("equal", Key::Equal, 13),
    ("leftbracket", Key::LeftBracket, 26),
    ("rightbracket", Key::RightBracket, 27),
    ("semicolon", Key::SemiColon, 39),
    ("quote", Key::Quote, 40),
    ("backslash", Key::BackSlash, 43),
    ("intlbackslash", Key::IntlBackslash, 86),
    ("comma", Key::Comma, 51),
    ("dot", Key::Dot, 52),
    ("period", Key::Dot, 52),
    ("slash", Key::Slash, 53),
    // Editing and navigation
    ("space", Key::Space, 57),
    ("enter", Key::Return, 28),
    ("return", Key::Return, 28),
    ("esc", Key::Escape, 1),
    ("escape", Key::Escape, 1),
    ("tab", Key::Tab, 15),
    ("caps", Key::CapsLock, 58),
    ("capslock", Key::CapsLock, 58),
    ("backspace", Key::Backspace, 14),
    ("insert", Key::Insert, 3666),
    ("delete", Key::Delete, 3667),
    ("home", Key::Home, 3655),
    ("end", Key::End, 3663),
    ("pageup", Key::PageUp, 3657),
    ("pagedown", Key::PageDown, 3665),
    ("up", Key::UpArrow, 57416),
    ("left", Key::LeftArrow, 57419),
    ("right", Key::RightArrow, 57421),
    ("down", Key::DownArrow, 57424),
    ("printscreen", Key::PrintScreen, 3639),
    ("scrolllock", Key::ScrollLock, 70),
    ("pause", Key::Pause, 3653),
    ("numlock", Key::NumLock, 69),
    // Keypad
    ("kp0", Key::Kp0, 82),
    ("kp1", Key::Kp1, 79),
    ("kp2", Key::Kp2, 80),
    ("kp3", Key::Kp3, 81),
    ("kp4", Key::Kp4, 75),
    ("kp5", Key::Kp5, 76),
    ("kp6", Key::Kp6, 77),
    ("kp7", Key::Kp7, 71),
    ("kp8", Key::Kp8, 72),
    ("kp9", Key::Kp9, 73),
    ("kpminus", Key::KpMinus, 74),
    ("kpplus", Key::KpPlus, 78),
    ("kpmultiply", Key::KpMultiply, 55),
    ("kpdivide", Key::KpDivide, 3637),
    ("kpdelete", Key::KpDelete, 83),
    ("kpenter", Key::KpReturn, 3612),
];

/// Resolve a symbolic key name (case-insensitive) to its code
pub fn code_for_name(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    KEY_TABLE
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, _, code)| *code)
}

/// Code reported for a key press
///
/// Every named key is in the table; `Key::Unknown(raw)` lands at
/// `UNKNOWN_KEY_BASE + raw` so it can never pass for a named key.
pub fn code_for_key(key: Key) -> Option<u32> {
    if let Key::Unknown(raw) = key {
        return UNKNOWN_KEY_BASE.checked_add(raw);
    }
    KEY_TABLE
        .iter()
        .find(|(_, k, _)| *k == key)
        .map(|(_, _, code)| *code)
}

/// Canonical (first listed) name for a code
pub fn name_for_code(code: u32) -> Option<&'static str> {
    KEY_TABLE
        .iter()
        .find(|(_, _, c)| *c == code)
        .map(|(name, _, _)| *name)
}
