//! Pointer side channel
//!
//! Mouse samples still flow through the key pipeline; this module
//! additionally reports them to pointer listeners as simplified
//! move/click/wheel records.

use tracing::{trace, warn};

use crate::input::events::RawSample;
use crate::input::ids::KeyIndex;
use crate::input::keycodes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    Move,
    Click,
    Wheel,
}

/// A pointer sample reduced to position and category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub kind: MouseEventType,
}

impl MouseEvent {
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Maps a mouse key index to its category
pub fn classify(index: KeyIndex) -> Option<MouseEventType> {
    match index {
        keycodes::MOUSE_X_AXIS | keycodes::MOUSE_Y_AXIS => Some(MouseEventType::Move),
        keycodes::MOUSE_WHEEL_VERTICAL | keycodes::MOUSE_WHEEL_HORIZONTAL => {
            Some(MouseEventType::Wheel)
        }
        keycodes::MOUSE_L_BUTTON | keycodes::MOUSE_M_BUTTON | keycodes::MOUSE_R_BUTTON => {
            Some(MouseEventType::Click)
        }
        _ => None,
    }
}

pub type MouseListener = Box<dyn FnMut(&MouseEvent)>;

/// Fans pointer samples out to registered callbacks
#[derive(Default)]
pub struct MouseInput {
    listeners: Vec<MouseListener>,
}

impl MouseInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&MouseEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Reports `sample` to every listener. Returns false if it is not a
    /// pointer sample.
    pub fn handle(&mut self, sample: &RawSample) -> bool {
        let Some(kind) = classify(sample.key.index) else {
            warn!(key = %sample.key, "mouse sample without a pointer key index");
            return false;
        };
        trace!(x = sample.x, y = sample.y, kind = ?kind, "pointer sample");

        let event = MouseEvent {
            x: sample.x,
            y: sample.y,
            kind,
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
        true
    }
}

impl std::fmt::Debug for MouseInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseInput")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ids::{DeviceId, KeyId};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_classify() {
        assert_eq!(classify(keycodes::MOUSE_X_AXIS), Some(MouseEventType::Move));
        assert_eq!(classify(keycodes::MOUSE_WHEEL_HORIZONTAL), Some(MouseEventType::Wheel));
        assert_eq!(classify(keycodes::MOUSE_M_BUTTON), Some(MouseEventType::Click));
        assert_eq!(classify(keycodes::KEY_A), None);
    }

    #[test]
    fn test_handle_reaches_every_listener() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut mouse = MouseInput::new();
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            mouse.add_listener(move |event| seen.borrow_mut().push(*event));
        }

        let click = RawSample::new(KeyId::new(keycodes::MOUSE_L_BUTTON, DeviceId::mouse(0)), 1.0, 3).at(17, 42);
        assert!(mouse.handle(&click));

        let expected = MouseEvent {
            x: 17,
            y: 42,
            kind: MouseEventType::Click,
        };
        assert_eq!(*seen.borrow(), vec![expected, expected]);
    }

    #[test]
    fn test_handle_skips_unmapped_keys() {
        let mut mouse = MouseInput::new();
        let sample = RawSample::new(KeyId::new(keycodes::KEY_A, DeviceId::mouse(0)), 1.0, 3);
        assert!(!mouse.handle(&sample));
    }
}
