//! Raw samples in, event groups out

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::aggregator::EventType;
use crate::input::ids::KeyId;

/// One device-level sample supplied by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub key: KeyId,
    pub press_amt: f64,
    pub timestamp_ms: i64,
    /// Pointer position when the sample was taken
    pub x: i32,
    pub y: i32,
}

impl RawSample {
    pub fn new(key: KeyId, press_amt: f64, timestamp_ms: i64) -> Self {
        Self {
            key,
            press_amt,
            timestamp_ms,
            x: 0,
            y: 0,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// A state transition of one key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub key: KeyId,
    pub kind: EventType,
}

impl Event {
    pub fn new(key: KeyId, kind: EventType) -> Self {
        Self { key, kind }
    }

    pub fn is_press(&self) -> bool {
        self.kind == EventType::Press
    }

    pub fn is_release(&self) -> bool {
        self.kind == EventType::Release
    }

    pub fn is_adjust(&self) -> bool {
        self.kind == EventType::Adjust
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == EventType::NoEvent {
            return f.write_str("NoEvent");
        }
        write!(f, "'{} {}'", self.kind, self.key)
    }
}

/// Every event caused by a single raw sample, in propagation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventGroup {
    pub events: Vec<Event>,
    pub timestamp_ms: i64,
    mouse_pos: Option<(i32, i32)>,
}

impl EventGroup {
    pub fn new(timestamp_ms: i64) -> Self {
        Self {
            events: Vec::new(),
            timestamp_ms,
            mouse_pos: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the event for exactly `id`, if any
    pub fn find_event(&self, id: KeyId) -> Option<Event> {
        self.events.iter().find(|e| e.key == id).copied()
    }

    /// True if a press of a key covered by `pattern` is in this group
    pub fn is_pressed(&self, pattern: KeyId) -> bool {
        self.events
            .iter()
            .any(|e| e.is_press() && pattern.contains(e.key))
    }

    /// True if a release of a key covered by `pattern` is in this group
    pub fn is_released(&self, pattern: KeyId) -> bool {
        self.events
            .iter()
            .any(|e| e.is_release() && pattern.contains(e.key))
    }

    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse_pos = Some((x, y));
    }

    pub fn mouse_position(&self) -> Option<(i32, i32)> {
        self.mouse_pos
    }

    pub fn has_mouse_position(&self) -> bool {
        self.mouse_pos.is_some()
    }
}

impl fmt::Display for EventGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventGroup{{t: {}, events: [", self.timestamp_ms)?;
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{event}")?;
        }
        f.write_str("], ")?;
        match self.mouse_pos {
            Some((x, y)) => write!(f, "mousePos: {x} {y}}}"),
            None => f.write_str("mousePos: nil}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ids::DeviceId;
    use crate::input::keycodes;

    fn key_x0() -> KeyId {
        KeyId::new(keycodes::KEY_X, DeviceId::keyboard(0))
    }

    #[test]
    fn test_mouse_position_is_optional() {
        let mut group = EventGroup::default();
        assert!(!group.has_mouse_position());
        assert_eq!(group.mouse_position(), None);

        group.set_mouse_position(14, 44);
        assert!(group.has_mouse_position());
        assert_eq!(group.mouse_position(), Some((14, 44)));
    }

    #[test]
    fn test_display_reports_mouse_position() {
        let mut group = EventGroup::default();
        assert!(group.to_string().contains("mousePos: nil"));

        group.set_mouse_position(14, 44);
        let shown = group.to_string();
        assert!(shown.contains("14 44"));
        assert_eq!(shown, format!("{}", &group));
    }

    #[test]
    fn test_is_pressed_uses_patterns() {
        let mut group = EventGroup::new(5);
        group.events.push(Event::new(key_x0(), EventType::Press));

        assert!(group.is_pressed(key_x0()));
        assert!(group.is_pressed(key_x0().any_instance()));
        assert!(group.is_pressed(KeyId::ANY));
        assert!(!group.is_released(key_x0()));
        assert!(!group.is_pressed(KeyId::new(keycodes::KEY_X, DeviceId::keyboard(1))));
    }

    #[test]
    fn test_find_event_is_exact() {
        let mut group = EventGroup::new(5);
        group.events.push(Event::new(key_x0(), EventType::Release));

        let found = group.find_event(key_x0());
        assert!(found.is_some_and(|e| e.is_release()));
        assert!(group.find_event(key_x0().any_instance()).is_none());
    }

    #[test]
    fn test_event_display() {
        let event = Event::new(key_x0(), EventType::Press);
        assert_eq!(event.to_string(), "'press 120@keyboard:0'");
        assert_eq!(Event::new(key_x0(), EventType::NoEvent).to_string(), "NoEvent");
    }
}
