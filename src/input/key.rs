//! Key state owned by the registry and read-only key views

use std::fmt;

use crate::input::aggregator::{Aggregate, Aggregator, AggregatorType, KeyStats};
use crate::input::binding::DerivedKey;
use crate::input::ids::KeyId;
use crate::input::registry::Input;

/// What a key is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Driven directly by raw samples
    Natural,
    /// Sum over every natural key matching a wildcard id
    General,
    /// Composed from bindings, including key family instances
    Derived,
}

#[derive(Debug, Clone)]
pub(crate) enum KeyBody {
    Natural,
    General { press_amt: f64 },
    Derived(DerivedKey),
}

/// A live key in the registry
#[derive(Debug, Clone)]
pub(crate) struct KeyState {
    pub id: KeyId,
    pub name: String,
    pub aggregator: Aggregator,
    pub body: KeyBody,
}

impl KeyState {
    pub fn natural(id: KeyId, name: String, aggregator: Aggregator) -> Self {
        Self {
            id,
            name,
            aggregator,
            body: KeyBody::Natural,
        }
    }

    pub fn general(id: KeyId) -> Self {
        Self {
            id,
            name: format!("General {id}"),
            aggregator: Aggregator::default(),
            body: KeyBody::General { press_amt: 0.0 },
        }
    }

    pub fn derived(id: KeyId, name: String, derived: DerivedKey) -> Self {
        Self {
            id,
            name,
            aggregator: Aggregator::default(),
            body: KeyBody::Derived(derived),
        }
    }

    pub fn kind(&self) -> KeyKind {
        match self.body {
            KeyBody::Natural => KeyKind::Natural,
            KeyBody::General { .. } => KeyKind::General,
            KeyBody::Derived(_) => KeyKind::Derived,
        }
    }

    pub fn is_natural(&self) -> bool {
        matches!(self.body, KeyBody::Natural)
    }
}

/// Read-only view of one key
///
/// `frame_*` values describe the last completed frame. `cur_*` values
/// include everything processed so far in the current frame.
#[derive(Clone, Copy)]
pub struct Key<'a> {
    input: &'a Input,
    state: &'a KeyState,
}

impl<'a> Key<'a> {
    pub(crate) fn new(input: &'a Input, state: &'a KeyState) -> Self {
        Self { input, state }
    }

    pub fn id(&self) -> KeyId {
        self.state.id
    }

    pub fn name(&self) -> &'a str {
        &self.state.name
    }

    pub fn kind(&self) -> KeyKind {
        self.state.kind()
    }

    pub fn aggregator_type(&self) -> AggregatorType {
        self.state.aggregator.kind()
    }

    pub fn is_down(&self) -> bool {
        self.input.key_is_down_of(self.state.id)
    }

    fn frame(&self) -> &'a KeyStats {
        self.state.aggregator.stats().frame()
    }

    fn current(&self) -> &'a KeyStats {
        self.state.aggregator.stats().current()
    }

    pub fn frame_press_count(&self) -> u32 {
        self.frame().press_count
    }

    pub fn frame_release_count(&self) -> u32 {
        self.frame().release_count
    }

    pub fn frame_press_amt(&self) -> f64 {
        self.frame().press_amt
    }

    /// Time integral of the amount for standard keys, plain sum for axes
    pub fn frame_press_sum(&self) -> f64 {
        self.frame().press_sum
    }

    pub fn frame_press_avg(&self) -> f64 {
        self.frame().press_avg
    }

    /// Raw total of supplied amounts last frame; wheels only
    pub fn frame_press_total(&self) -> Option<f64> {
        self.state.aggregator.frame_press_total()
    }

    pub fn cur_press_count(&self) -> u32 {
        self.current().press_count
    }

    pub fn cur_release_count(&self) -> u32 {
        self.current().release_count
    }

    /// Instantaneous amount; computed from bindings or matches for
    /// derived and general keys
    pub fn cur_press_amt(&self) -> f64 {
        self.input.key_press_amt_of(self.state.id)
    }

    pub fn cur_press_sum(&self) -> f64 {
        self.current().press_sum
    }

    pub fn cur_press_total(&self) -> Option<f64> {
        self.state.aggregator.cur_press_total()
    }
}

impl fmt::Debug for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.state.id)
            .field("name", &self.state.name)
            .field("kind", &self.kind())
            .field("aggregator", &self.state.aggregator)
            .finish()
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.state.name, self.state.id)
    }
}
