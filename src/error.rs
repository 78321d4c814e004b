//! Configuration errors raised by the input registry

use thiserror::Error;

use crate::input::{KeyId, KeyIndex};

/// Errors from building or querying the key registry
///
/// All of these are programming mistakes. The panicking entry points on
/// [`crate::input::Input`] report them at the caller's location; the `try_*`
/// variants hand them back instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("cannot overwrite key registration: index {index}, new name {new_name:?}, old name {old_name:?}")]
    DuplicateKeyIndex {
        index: KeyIndex,
        new_name: String,
        old_name: String,
    },

    #[error("key index {0} is reserved for a standard key group")]
    ReservedKeyIndex(KeyIndex),

    #[error("cannot register a key with a negative index: {0}")]
    NegativeKeyIndex(KeyIndex),

    #[error("device type any requires device index any, got {0}")]
    InvalidDevice(KeyId),

    #[error("no key registered with id {0}")]
    UnregisteredKey(KeyId),

    #[error("dependency cycle detected: {dependent} cannot depend on {depends_on}")]
    DependencyCycle { dependent: KeyId, depends_on: KeyId },

    #[error("binding for {primary} has {modifiers} modifiers but {down} down states")]
    BindingArity {
        primary: KeyId,
        modifiers: usize,
        down: usize,
    },

    #[error("invalid key family template {primary}: {reason}")]
    InvalidFamilyTemplate { primary: KeyId, reason: &'static str },
}
