//! Key and device addressing
//!
//! A [`KeyId`] is a tuple of (key index, device type, device index). Any of
//! the three components may be a wildcard, in which case the id names a
//! *pattern* over natural keys rather than one physical key:
//!
//! ```text
//! (specific, specific, specific) - a natural key
//! (specific, specific, any)      - that key on any device of that type
//! (specific, any,      any)      - that key on any device at all
//! (any,      specific, specific) - any key on one device
//! (any,      specific, any)      - any key on any device of that type
//! (any,      any,      any)      - any key anywhere
//! ```
//!
//! A concrete device index under a wildcard device type is meaningless and
//! is rejected by [`KeyId::validate`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::input::keycodes;

/// Logical key code. `0` is reserved for [`KeyIndex::ANY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyIndex(pub i32);

impl KeyIndex {
    /// Wildcard matching every key index
    pub const ANY: KeyIndex = KeyIndex(0);

    /// Returns true if this index covers `other`
    ///
    /// Plain indices cover only themselves. The standard derived groups
    /// (either-shift, either-control, ...) cover their member keys.
    pub fn contains(self, other: KeyIndex) -> bool {
        if self == Self::ANY {
            return true;
        }
        match self {
            keycodes::EITHER_SHIFT | keycodes::SHIFT_TAB => {
                other == keycodes::LEFT_SHIFT || other == keycodes::RIGHT_SHIFT
            }
            keycodes::EITHER_CONTROL => {
                other == keycodes::LEFT_CONTROL || other == keycodes::RIGHT_CONTROL
            }
            keycodes::EITHER_ALT => other == keycodes::LEFT_ALT || other == keycodes::RIGHT_ALT,
            keycodes::EITHER_GUI => other == keycodes::LEFT_GUI || other == keycodes::RIGHT_GUI,
            keycodes::DELETE_OR_BACKSPACE => {
                other == keycodes::DELETE || other == keycodes::BACKSPACE
            }
            _ => self == other,
        }
    }

    pub fn is_any(self) -> bool {
        self == Self::ANY
    }

    /// True for the standard derived groups, which are never handed out as
    /// registered or derived key indices
    pub fn is_group(self) -> bool {
        matches!(
            self,
            keycodes::EITHER_SHIFT
                | keycodes::EITHER_CONTROL
                | keycodes::EITHER_ALT
                | keycodes::EITHER_GUI
                | keycodes::SHIFT_TAB
                | keycodes::DELETE_OR_BACKSPACE
        )
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "any")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Kind of device a key lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceType {
    /// Wildcard matching every device type
    Any,
    Keyboard,
    Mouse,
    Controller,
    /// Device type of keys created by `bind_derived_key`
    Derived,
}

impl DeviceType {
    pub fn contains(self, other: DeviceType) -> bool {
        self == DeviceType::Any || self == other
    }

    /// True for the device types that physical samples can come from
    pub fn is_physical(self) -> bool {
        matches!(
            self,
            DeviceType::Keyboard | DeviceType::Mouse | DeviceType::Controller
        )
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceType::Any => "any",
            DeviceType::Keyboard => "keyboard",
            DeviceType::Mouse => "mouse",
            DeviceType::Controller => "controller",
            DeviceType::Derived => "derived",
        };
        f.write_str(name)
    }
}

/// Instance number of a device within its type. `-1` is [`DeviceIndex::ANY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceIndex(pub i32);

impl DeviceIndex {
    /// Wildcard matching every device instance
    pub const ANY: DeviceIndex = DeviceIndex(-1);

    pub fn contains(self, other: DeviceIndex) -> bool {
        self == Self::ANY || self == other
    }

    pub fn is_any(self) -> bool {
        self == Self::ANY
    }
}

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "any")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A device: its type plus its instance index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId {
    pub device_type: DeviceType,
    pub index: DeviceIndex,
}

impl DeviceId {
    /// Wildcard matching every device
    pub const ANY: DeviceId = DeviceId {
        device_type: DeviceType::Any,
        index: DeviceIndex::ANY,
    };

    pub const fn new(device_type: DeviceType, index: i32) -> Self {
        Self {
            device_type,
            index: DeviceIndex(index),
        }
    }

    pub const fn keyboard(index: i32) -> Self {
        Self::new(DeviceType::Keyboard, index)
    }

    pub const fn mouse(index: i32) -> Self {
        Self::new(DeviceType::Mouse, index)
    }

    pub const fn controller(index: i32) -> Self {
        Self::new(DeviceType::Controller, index)
    }

    pub fn contains(self, other: DeviceId) -> bool {
        self.device_type.contains(other.device_type) && self.index.contains(other.index)
    }

    /// Same device type, any instance
    pub fn any_instance(self) -> Self {
        Self {
            device_type: self.device_type,
            index: DeviceIndex::ANY,
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device_type, self.index)
    }
}

/// Unique identity of a key, or a wildcard pattern over natural keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId {
    pub index: KeyIndex,
    pub device: DeviceId,
}

impl KeyId {
    /// The any-key on any device
    pub const ANY: KeyId = KeyId {
        index: KeyIndex::ANY,
        device: DeviceId::ANY,
    };

    pub const fn new(index: KeyIndex, device: DeviceId) -> Self {
        Self { index, device }
    }

    pub const fn from_parts(index: KeyIndex, device_type: DeviceType, device_index: DeviceIndex) -> Self {
        Self {
            index,
            device: DeviceId {
                device_type,
                index: device_index,
            },
        }
    }

    /// `index` on any keyboard
    pub const fn any_keyboard(index: KeyIndex) -> Self {
        Self::from_parts(index, DeviceType::Keyboard, DeviceIndex::ANY)
    }

    /// `index` on any mouse
    pub const fn any_mouse(index: KeyIndex) -> Self {
        Self::from_parts(index, DeviceType::Mouse, DeviceIndex::ANY)
    }

    /// Checks the device type / device index combination
    pub fn validate(&self) -> Result<(), InputError> {
        if self.device.device_type == DeviceType::Any && !self.device.index.is_any() {
            return Err(InputError::InvalidDevice(*self));
        }
        Ok(())
    }

    /// True if any component is a wildcard
    pub fn is_pattern(&self) -> bool {
        self.index.is_any() || self.device.device_type == DeviceType::Any || self.device.index.is_any()
    }

    /// True for ids a physical sample can carry: no wildcard, physical device type
    pub fn is_concrete(&self) -> bool {
        !self.is_pattern() && self.device.device_type.is_physical()
    }

    /// Same key index and device type, any device instance
    pub fn any_instance(self) -> Self {
        Self {
            index: self.index,
            device: self.device.any_instance(),
        }
    }

    /// Returns true iff the set of keys covered by this pattern includes `other`
    pub fn contains(self, other: KeyId) -> bool {
        self.index.contains(other.index) && self.device.contains(other.device)
    }

    /// Returns true if the general key for this pattern should sum `natural`
    ///
    /// Unlike [`KeyId::contains`], the key index must match exactly unless it
    /// is [`KeyIndex::ANY`].
    pub(crate) fn matches_natural(self, natural: KeyId) -> bool {
        (self.index.is_any() || self.index == natural.index) && self.device.contains(natural.device)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == KeyId::ANY {
            return f.write_str("any-key");
        }
        write!(f, "{}@{}", self.index, self.device)
    }
}
