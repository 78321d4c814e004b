//! Standard key indices and the default key map
//!
//! Printable keys use their lowercase ASCII code. Everything else lives in
//! fixed ranges so platform layers can translate scancodes with a table.

use crate::input::aggregator::AggregatorType;
use crate::input::ids::KeyIndex;

pub const ANY_KEY: KeyIndex = KeyIndex::ANY;

pub const BACKSPACE: KeyIndex = KeyIndex(8);
pub const TAB: KeyIndex = KeyIndex(9);
pub const RETURN: KeyIndex = KeyIndex(13);
pub const ESCAPE: KeyIndex = KeyIndex(27);
pub const SPACE: KeyIndex = KeyIndex(32);

pub const KEY_A: KeyIndex = KeyIndex(b'a' as i32);
pub const KEY_B: KeyIndex = KeyIndex(b'b' as i32);
pub const KEY_C: KeyIndex = KeyIndex(b'c' as i32);
pub const KEY_D: KeyIndex = KeyIndex(b'd' as i32);
pub const KEY_E: KeyIndex = KeyIndex(b'e' as i32);
pub const KEY_F: KeyIndex = KeyIndex(b'f' as i32);
pub const KEY_G: KeyIndex = KeyIndex(b'g' as i32);
pub const KEY_H: KeyIndex = KeyIndex(b'h' as i32);
pub const KEY_I: KeyIndex = KeyIndex(b'i' as i32);
pub const KEY_J: KeyIndex = KeyIndex(b'j' as i32);
pub const KEY_K: KeyIndex = KeyIndex(b'k' as i32);
pub const KEY_L: KeyIndex = KeyIndex(b'l' as i32);
pub const KEY_M: KeyIndex = KeyIndex(b'm' as i32);
pub const KEY_N: KeyIndex = KeyIndex(b'n' as i32);
pub const KEY_O: KeyIndex = KeyIndex(b'o' as i32);
pub const KEY_P: KeyIndex = KeyIndex(b'p' as i32);
pub const KEY_Q: KeyIndex = KeyIndex(b'q' as i32);
pub const KEY_R: KeyIndex = KeyIndex(b'r' as i32);
pub const KEY_S: KeyIndex = KeyIndex(b's' as i32);
pub const KEY_T: KeyIndex = KeyIndex(b't' as i32);
pub const KEY_U: KeyIndex = KeyIndex(b'u' as i32);
pub const KEY_V: KeyIndex = KeyIndex(b'v' as i32);
pub const KEY_W: KeyIndex = KeyIndex(b'w' as i32);
pub const KEY_X: KeyIndex = KeyIndex(b'x' as i32);
pub const KEY_Y: KeyIndex = KeyIndex(b'y' as i32);
pub const KEY_Z: KeyIndex = KeyIndex(b'z' as i32);

pub const KEY_0: KeyIndex = KeyIndex(b'0' as i32);
pub const KEY_1: KeyIndex = KeyIndex(b'1' as i32);
pub const KEY_2: KeyIndex = KeyIndex(b'2' as i32);
pub const KEY_3: KeyIndex = KeyIndex(b'3' as i32);
pub const KEY_4: KeyIndex = KeyIndex(b'4' as i32);
pub const KEY_5: KeyIndex = KeyIndex(b'5' as i32);
pub const KEY_6: KeyIndex = KeyIndex(b'6' as i32);
pub const KEY_7: KeyIndex = KeyIndex(b'7' as i32);
pub const KEY_8: KeyIndex = KeyIndex(b'8' as i32);
pub const KEY_9: KeyIndex = KeyIndex(b'9' as i32);

pub const F1: KeyIndex = KeyIndex(129);
pub const F2: KeyIndex = KeyIndex(130);
pub const F3: KeyIndex = KeyIndex(131);
pub const F4: KeyIndex = KeyIndex(132);
pub const F5: KeyIndex = KeyIndex(133);
pub const F6: KeyIndex = KeyIndex(134);
pub const F7: KeyIndex = KeyIndex(135);
pub const F8: KeyIndex = KeyIndex(136);
pub const F9: KeyIndex = KeyIndex(137);
pub const F10: KeyIndex = KeyIndex(138);
pub const F11: KeyIndex = KeyIndex(139);
pub const F12: KeyIndex = KeyIndex(140);

pub const CAPS_LOCK: KeyIndex = KeyIndex(150);
pub const NUM_LOCK: KeyIndex = KeyIndex(151);
pub const SCROLL_LOCK: KeyIndex = KeyIndex(152);
pub const PRINT_SCREEN: KeyIndex = KeyIndex(153);
pub const PAUSE: KeyIndex = KeyIndex(154);

pub const LEFT_SHIFT: KeyIndex = KeyIndex(155);
pub const RIGHT_SHIFT: KeyIndex = KeyIndex(156);
pub const LEFT_CONTROL: KeyIndex = KeyIndex(157);
pub const RIGHT_CONTROL: KeyIndex = KeyIndex(158);
pub const LEFT_ALT: KeyIndex = KeyIndex(159);
pub const RIGHT_ALT: KeyIndex = KeyIndex(160);
pub const LEFT_GUI: KeyIndex = KeyIndex(161);
pub const RIGHT_GUI: KeyIndex = KeyIndex(162);

pub const RIGHT: KeyIndex = KeyIndex(166);
pub const LEFT: KeyIndex = KeyIndex(167);
pub const UP: KeyIndex = KeyIndex(168);
pub const DOWN: KeyIndex = KeyIndex(169);

pub const KEY_PAD_DIVIDE: KeyIndex = KeyIndex(170);
pub const KEY_PAD_MULTIPLY: KeyIndex = KeyIndex(171);
pub const KEY_PAD_SUBTRACT: KeyIndex = KeyIndex(172);
pub const KEY_PAD_ADD: KeyIndex = KeyIndex(173);
pub const KEY_PAD_ENTER: KeyIndex = KeyIndex(174);
pub const KEY_PAD_DECIMAL: KeyIndex = KeyIndex(175);
pub const KEY_PAD_EQUALS: KeyIndex = KeyIndex(176);
pub const KEY_PAD_0: KeyIndex = KeyIndex(177);
pub const KEY_PAD_1: KeyIndex = KeyIndex(178);
pub const KEY_PAD_2: KeyIndex = KeyIndex(179);
pub const KEY_PAD_3: KeyIndex = KeyIndex(180);
pub const KEY_PAD_4: KeyIndex = KeyIndex(181);
pub const KEY_PAD_5: KeyIndex = KeyIndex(182);
pub const KEY_PAD_6: KeyIndex = KeyIndex(183);
pub const KEY_PAD_7: KeyIndex = KeyIndex(184);
pub const KEY_PAD_8: KeyIndex = KeyIndex(185);
pub const KEY_PAD_9: KeyIndex = KeyIndex(186);

pub const DELETE: KeyIndex = KeyIndex(190);
pub const HOME: KeyIndex = KeyIndex(191);
pub const INSERT: KeyIndex = KeyIndex(192);
pub const END: KeyIndex = KeyIndex(193);
pub const PAGE_UP: KeyIndex = KeyIndex(194);
pub const PAGE_DOWN: KeyIndex = KeyIndex(195);

pub const MOUSE_X_AXIS: KeyIndex = KeyIndex(300);
pub const MOUSE_Y_AXIS: KeyIndex = KeyIndex(301);
pub const MOUSE_WHEEL_VERTICAL: KeyIndex = KeyIndex(302);
pub const MOUSE_WHEEL_HORIZONTAL: KeyIndex = KeyIndex(303);
pub const MOUSE_L_BUTTON: KeyIndex = KeyIndex(304);
pub const MOUSE_R_BUTTON: KeyIndex = KeyIndex(305);
pub const MOUSE_M_BUTTON: KeyIndex = KeyIndex(306);

// Grouped indices understood by `KeyIndex::contains`
pub const EITHER_SHIFT: KeyIndex = KeyIndex(1000);
pub const EITHER_CONTROL: KeyIndex = KeyIndex(1001);
pub const EITHER_ALT: KeyIndex = KeyIndex(1002);
pub const EITHER_GUI: KeyIndex = KeyIndex(1003);
pub const SHIFT_TAB: KeyIndex = KeyIndex(1004);
pub const DELETE_OR_BACKSPACE: KeyIndex = KeyIndex(1005);

/// One entry of the default key map
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDefinition {
    pub index: KeyIndex,
    pub aggregator: AggregatorType,
    pub name: String,
}

impl KeyDefinition {
    fn standard(index: KeyIndex, name: impl Into<String>) -> Self {
        Self {
            index,
            aggregator: AggregatorType::Standard,
            name: name.into(),
        }
    }

    fn with_aggregator(index: KeyIndex, aggregator: AggregatorType, name: impl Into<String>) -> Self {
        Self {
            index,
            aggregator,
            name: name.into(),
        }
    }
}

/// Builds the standard keyboard and mouse key map
pub fn default_keymap() -> Vec<KeyDefinition> {
    let mut keys = vec![KeyDefinition::standard(ANY_KEY, "AnyKey")];

    for c in b'a'..=b'z' {
        let name = format!("Key {}", c.to_ascii_uppercase() as char);
        keys.push(KeyDefinition::standard(KeyIndex(c as i32), name));
    }
    for c in "0123456789`[]\\-=;',./".chars() {
        keys.push(KeyDefinition::standard(KeyIndex(c as i32), format!("Key {c}")));
    }

    let named = [
        (SPACE, "Space"),
        (BACKSPACE, "Backspace"),
        (TAB, "Tab"),
        (RETURN, "Return"),
        (ESCAPE, "Escape"),
        (F1, "F1"),
        (F2, "F2"),
        (F3, "F3"),
        (F4, "F4"),
        (F5, "F5"),
        (F6, "F6"),
        (F7, "F7"),
        (F8, "F8"),
        (F9, "F9"),
        (F10, "F10"),
        (F11, "F11"),
        (F12, "F12"),
        (CAPS_LOCK, "CapsLock"),
        (NUM_LOCK, "NumLock"),
        (SCROLL_LOCK, "ScrollLock"),
        (PRINT_SCREEN, "PrintScreen"),
        (PAUSE, "Pause"),
        (LEFT_SHIFT, "LeftShift"),
        (RIGHT_SHIFT, "RightShift"),
        (LEFT_CONTROL, "LeftControl"),
        (RIGHT_CONTROL, "RightControl"),
        (LEFT_ALT, "LeftAlt"),
        (RIGHT_ALT, "RightAlt"),
        (LEFT_GUI, "LeftGui"),
        (RIGHT_GUI, "RightGui"),
        (RIGHT, "Right"),
        (LEFT, "Left"),
        (UP, "Up"),
        (DOWN, "Down"),
        (KEY_PAD_DIVIDE, "KeyPadDivide"),
        (KEY_PAD_MULTIPLY, "KeyPadMultiply"),
        (KEY_PAD_SUBTRACT, "KeyPadSubtract"),
        (KEY_PAD_ADD, "KeyPadAdd"),
        (KEY_PAD_ENTER, "KeyPadEnter"),
        (KEY_PAD_DECIMAL, "KeyPadDecimal"),
        (KEY_PAD_EQUALS, "KeyPadEquals"),
        (KEY_PAD_0, "KeyPad0"),
        (KEY_PAD_1, "KeyPad1"),
        (KEY_PAD_2, "KeyPad2"),
        (KEY_PAD_3, "KeyPad3"),
        (KEY_PAD_4, "KeyPad4"),
        (KEY_PAD_5, "KeyPad5"),
        (KEY_PAD_6, "KeyPad6"),
        (KEY_PAD_7, "KeyPad7"),
        (KEY_PAD_8, "KeyPad8"),
        (KEY_PAD_9, "KeyPad9"),
        (DELETE, "KeyDelete"),
        (HOME, "KeyHome"),
        (INSERT, "KeyInsert"),
        (END, "KeyEnd"),
        (PAGE_UP, "KeyPageUp"),
        (PAGE_DOWN, "KeyPageDown"),
    ];
    keys.extend(named.into_iter().map(|(index, name)| KeyDefinition::standard(index, name)));

    keys.extend([
        KeyDefinition::with_aggregator(MOUSE_X_AXIS, AggregatorType::Axis, "X Axis"),
        KeyDefinition::with_aggregator(MOUSE_Y_AXIS, AggregatorType::Axis, "Y Axis"),
        KeyDefinition::with_aggregator(MOUSE_WHEEL_VERTICAL, AggregatorType::Wheel, "MouseWheel"),
        KeyDefinition::with_aggregator(
            MOUSE_WHEEL_HORIZONTAL,
            AggregatorType::Wheel,
            "MouseWheelHorizontal",
        ),
        KeyDefinition::standard(MOUSE_L_BUTTON, "MouseLButton"),
        KeyDefinition::standard(MOUSE_R_BUTTON, "MouseRButton"),
        KeyDefinition::standard(MOUSE_M_BUTTON, "MouseMButton"),
    ]);

    keys
}
