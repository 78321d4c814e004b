//! Key registry and dependency engine

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace};

use crate::config::InputConfig;
use crate::error::InputError;
use crate::input::aggregator::{Aggregate, Aggregator, AggregatorType, EventType, decide_event_type};
use crate::input::binding::{Binding, DerivedKey, KeyFamily, KeySource};
use crate::input::dependency::DependencyGraph;
use crate::input::events::{Event, EventGroup, RawSample};
use crate::input::handler::Listener;
use crate::input::ids::{DeviceId, DeviceIndex, DeviceType, KeyId, KeyIndex};
use crate::input::key::{Key, KeyBody, KeyState};
use crate::input::keycodes;
use crate::input::mouse::{MouseEvent, MouseInput};

/// Static registration of a natural key index
#[derive(Debug, Clone, PartialEq)]
struct KeyRegistration {
    aggregator: AggregatorType,
    name: String,
}

/// Owns every key and turns raw samples into event groups
///
/// Keys are created lazily the first time they are looked up and live as
/// long as the registry.
pub struct Input {
    keys: IndexMap<KeyId, KeyState>,
    registrations: IndexMap<KeyIndex, KeyRegistration>,
    families: IndexMap<KeyIndex, KeyFamily>,
    /// Physical devices with at least one materialized natural key
    seen_devices: IndexSet<DeviceId>,
    dependencies: DependencyGraph,
    listeners: Vec<Box<dyn Listener>>,
    mouse: MouseInput,
    next_derived_index: i32,
    dispatch_pointer_events: bool,
}

/// Unwraps a configuration result, panicking at the caller's location
#[track_caller]
fn fatal<T>(result: Result<T, InputError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl Input {
    /// Creates a registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(&InputConfig::default())
    }

    pub fn with_config(config: &InputConfig) -> Self {
        let capacity = config.registry.key_capacity;
        let mut input = Self {
            keys: IndexMap::with_capacity(capacity),
            registrations: IndexMap::with_capacity(capacity),
            families: IndexMap::new(),
            seen_devices: IndexSet::new(),
            dependencies: DependencyGraph::new(),
            listeners: Vec::new(),
            mouse: MouseInput::new(),
            next_derived_index: config.registry.derived_index_start,
            dispatch_pointer_events: config.mouse.dispatch_pointer_events,
        };

        if config.registry.register_default_keys {
            for key in keycodes::default_keymap() {
                // The default map has unique, non-negative indices.
                input.registrations.insert(
                    key.index,
                    KeyRegistration {
                        aggregator: key.aggregator,
                        name: key.name,
                    },
                );
            }
        }

        info!(
            profile = %config.profile,
            registered = input.registrations.len(),
            derived_index_start = config.registry.derived_index_start,
            "input registry ready"
        );
        input
    }

    /// Registers a natural key index with its aggregator type and name
    pub fn try_register_key_index(
        &mut self,
        index: KeyIndex,
        aggregator: AggregatorType,
        name: impl Into<String>,
    ) -> Result<(), InputError> {
        let name = name.into();
        if index.0 < 0 {
            return Err(InputError::NegativeKeyIndex(index));
        }
        if index.is_group() {
            return Err(InputError::ReservedKeyIndex(index));
        }
        let previous = self
            .registrations
            .get(&index)
            .map(|registration| registration.name.as_str())
            .or_else(|| self.derived_name(index));
        if let Some(old_name) = previous {
            return Err(InputError::DuplicateKeyIndex {
                index,
                new_name: name,
                old_name: old_name.to_string(),
            });
        }
        debug!(index = %index, name = %name, aggregator = ?aggregator, "registered key index");
        self.registrations
            .insert(index, KeyRegistration { aggregator, name });
        Ok(())
    }

    /// Panicking form of [`Input::try_register_key_index`]
    #[track_caller]
    pub fn register_key_index(&mut self, index: KeyIndex, aggregator: AggregatorType, name: impl Into<String>) {
        fatal(self.try_register_key_index(index, aggregator, name))
    }

    /// Resolves a key, creating it if needed
    ///
    /// Resolution order: an existing key, a key family instance, a general
    /// key for wildcard ids, then a natural key from the registered indices.
    pub fn try_get_key_by_id(&mut self, id: KeyId) -> Result<Key<'_>, InputError> {
        self.materialize(id)?;
        self.key(id).ok_or(InputError::UnregisteredKey(id))
    }

    /// Panicking form of [`Input::try_get_key_by_id`]
    #[track_caller]
    pub fn get_key_by_id(&mut self, id: KeyId) -> Key<'_> {
        fatal(self.try_get_key_by_id(id))
    }

    #[track_caller]
    pub fn get_key_by_parts(&mut self, index: KeyIndex, device_type: DeviceType, device_index: DeviceIndex) -> Key<'_> {
        self.get_key_by_id(KeyId::from_parts(index, device_type, device_index))
    }

    /// First key, in creation order, with the given name
    pub fn get_key_by_name(&self, name: &str) -> Option<Key<'_>> {
        self.keys
            .values()
            .find(|state| state.name == name)
            .map(|state| Key::new(self, state))
    }

    /// Looks up an existing key without creating it
    pub fn key(&self, id: KeyId) -> Option<Key<'_>> {
        self.keys.get(&id).map(|state| Key::new(self, state))
    }

    /// All live keys in creation order
    pub fn keys(&self) -> impl Iterator<Item = Key<'_>> + '_ {
        self.keys.values().map(move |state| Key::new(self, state))
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn family(&self, index: KeyIndex) -> Option<&KeyFamily> {
        self.families.get(&index)
    }

    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Builds a binding; `modifiers` and `down` must have the same length
    pub fn try_make_binding(&self, primary: KeyId, modifiers: &[KeyId], down: &[bool]) -> Result<Binding, InputError> {
        Binding::try_new(primary, modifiers.to_vec(), down.to_vec())
    }

    /// Panicking form of [`Input::try_make_binding`]
    #[track_caller]
    pub fn make_binding(&self, primary: KeyId, modifiers: &[KeyId], down: &[bool]) -> Binding {
        fatal(self.try_make_binding(primary, modifiers, down))
    }

    /// Creates a derived key that is down while any binding is down
    pub fn try_bind_derived_key(&mut self, name: impl Into<String>, bindings: Vec<Binding>) -> Result<KeyId, InputError> {
        let index = self.free_derived_index();
        let id = KeyId::new(index, DeviceId::new(DeviceType::Derived, 1));
        self.insert_derived(id, name.into(), bindings)?;
        self.next_derived_index = index.0 + 1;
        Ok(id)
    }

    /// Panicking form of [`Input::try_bind_derived_key`]
    #[track_caller]
    pub fn bind_derived_key(&mut self, name: impl Into<String>, bindings: Vec<Binding>) -> KeyId {
        fatal(self.try_bind_derived_key(name, bindings))
    }

    /// Creates a key family from a template binding on `(T, any)`
    ///
    /// Each device of type `T` gets its own derived key with id
    /// `(family index, T, device index)`, where every `(T, any)` key in the
    /// template is pinned to that device.
    pub fn try_bind_derived_key_family(&mut self, name: impl Into<String>, template: Binding) -> Result<KeyIndex, InputError> {
        let index = self.free_derived_index();
        let name = name.into();
        let family = KeyFamily::try_new(index, name.clone(), template)?;

        let shared = DeviceId {
            device_type: family.device_type(),
            index: DeviceIndex::ANY,
        };
        for id in family.template().keys() {
            id.validate()?;
            let pinned_later = id.device == shared && !id.index.is_any();
            if pinned_later
                && !self.registrations.contains_key(&id.index)
                && !self.families.contains_key(&id.index)
            {
                return Err(InputError::UnregisteredKey(id));
            }
        }
        for id in family.template().keys() {
            self.materialize(id)?;
        }

        let device_type = family.device_type();
        self.families.insert(index, family);
        self.next_derived_index = index.0 + 1;
        debug!(index = %index, name = %name, device_type = %device_type, "bound key family");

        let known: Vec<DeviceIndex> = self
            .seen_devices
            .iter()
            .filter(|device| device.device_type == device_type)
            .map(|device| device.index)
            .collect();
        for device in known {
            self.instantiate_family(index, device)?;
        }
        Ok(index)
    }

    /// Panicking form of [`Input::try_bind_derived_key_family`]
    #[track_caller]
    pub fn bind_derived_key_family(&mut self, name: impl Into<String>, template: Binding) -> KeyIndex {
        fatal(self.try_bind_derived_key_family(name, template))
    }

    /// Makes `dependent` re-evaluate whenever `depends_on` is pressed
    pub fn try_register_dependence(&mut self, dependent: KeyId, depends_on: KeyId) -> Result<(), InputError> {
        self.materialize(dependent)?;
        self.materialize(depends_on)?;
        let keys = &self.keys;
        self.dependencies
            .add_with(depends_on, dependent, |id| implied_presses(keys, id))?;
        debug!(dependent = %dependent, depends_on = %depends_on, "registered dependence");
        Ok(())
    }

    /// Panicking form of [`Input::try_register_dependence`]
    #[track_caller]
    pub fn register_dependence(&mut self, dependent: KeyId, depends_on: KeyId) {
        fatal(self.try_register_dependence(dependent, depends_on))
    }

    /// Register a listener; listeners are notified in registration order
    pub fn register_listener(&mut self, listener: Box<dyn Listener>) {
        debug!(listener = listener.name(), "registered listener");
        self.listeners.push(listener);
    }

    /// Get a reference to a listener by name
    pub fn listener(&self, name: &str) -> Option<&dyn Listener> {
        self.listeners
            .iter()
            .find(|l| l.name() == name)
            .map(|b| b.as_ref())
    }

    /// Get a mutable reference to a listener by name
    pub fn listener_mut(&mut self, name: &str) -> Option<&mut (dyn Listener + '_)> {
        if let Some(boxed) = self.listeners.iter_mut().find(|l| l.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Register a pointer callback for move/click/wheel samples
    pub fn add_mouse_listener(&mut self, listener: impl FnMut(&MouseEvent) + 'static) {
        self.mouse.add_listener(listener);
    }

    /// Processes one frame of raw samples
    ///
    /// Every sample key is resolved before any sample is processed, so a
    /// configuration error leaves all key state untouched.
    pub fn try_think(&mut self, ms: i64, samples: &[RawSample]) -> Result<Vec<EventGroup>, InputError> {
        for sample in samples {
            self.materialize(sample.key)?;
        }

        let mut groups = Vec::new();
        for sample in samples {
            let mut group = EventGroup::new(sample.timestamp_ms);
            group.set_mouse_position(sample.x, sample.y);
            self.press_key(sample.key, sample.press_amt, None, &mut group);

            if self.dispatch_pointer_events && sample.key.device.device_type == DeviceType::Mouse {
                self.mouse.handle(sample);
            }
            if !group.is_empty() {
                self.dispatch(&group);
                groups.push(group);
            }
        }

        let live: Vec<KeyId> = self.keys.keys().copied().collect();
        for id in live {
            let synthesized = self
                .keys
                .get_mut(&id)
                .and_then(|state| state.aggregator.think(ms));
            let Some(amt) = synthesized else {
                continue;
            };
            trace!(key = %id, amt, "synthetic event");

            let mut group = EventGroup::new(ms);
            self.press_key(id, amt, None, &mut group);
            if !group.is_empty() {
                self.dispatch(&group);
                groups.push(group);
            }
        }

        for listener in &mut self.listeners {
            listener.think(ms);
        }
        trace!(ms, groups = groups.len(), "frame complete");
        Ok(groups)
    }

    /// Panicking form of [`Input::try_think`]
    #[track_caller]
    pub fn think(&mut self, ms: i64, samples: &[RawSample]) -> Vec<EventGroup> {
        fatal(self.try_think(ms, samples))
    }

    /// First index at or after the derived counter that no registration or
    /// standard key group uses
    fn free_derived_index(&self) -> KeyIndex {
        let mut index = KeyIndex(self.next_derived_index);
        while index.0 <= 0 || index.is_group() || self.registrations.contains_key(&index) {
            index = KeyIndex(index.0 + 1);
        }
        index
    }

    /// Name of the derived key or key family that owns `index`
    fn derived_name(&self, index: KeyIndex) -> Option<&str> {
        if let Some(family) = self.families.get(&index) {
            return Some(family.name());
        }
        self.keys
            .get(&KeyId::new(index, DeviceId::new(DeviceType::Derived, 1)))
            .map(|state| state.name.as_str())
    }

    fn dispatch(&mut self, group: &EventGroup) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener.handle_event_group(group, self);
        }
        self.listeners = listeners;
    }

    /// Ensures a key exists for `id`
    fn materialize(&mut self, id: KeyId) -> Result<(), InputError> {
        id.validate()?;
        if self.keys.contains_key(&id) {
            return Ok(());
        }

        if let Some(family) = self.families.get(&id.index)
            && family.device_type() == id.device.device_type
            && !id.device.index.is_any()
        {
            return self.instantiate_family(id.index, id.device.index);
        }

        if id.is_pattern() {
            self.insert_general(id);
            return Ok(());
        }

        let Some(registration) = self.registrations.get(&id.index) else {
            return Err(InputError::UnregisteredKey(id));
        };
        let state = KeyState::natural(
            id,
            registration.name.clone(),
            Aggregator::for_type(registration.aggregator),
        );
        self.keys.insert(id, state);
        trace!(key = %id, "created natural key");

        if id.is_concrete() && self.seen_devices.insert(id.device) {
            debug!(device = %id.device, "new device");
            let families: Vec<KeyIndex> = self
                .families
                .values()
                .filter(|family| family.device_type() == id.device.device_type)
                .map(|family| family.index())
                .collect();
            for family in families {
                self.instantiate_family(family, id.device.index)?;
            }
        }
        Ok(())
    }

    fn insert_general(&mut self, id: KeyId) {
        if !self.keys.contains_key(&id) {
            trace!(key = %id, "created general key");
            self.keys.insert(id, KeyState::general(id));
        }
    }

    fn instantiate_family(&mut self, index: KeyIndex, device: DeviceIndex) -> Result<(), InputError> {
        let Some(family) = self.families.get_mut(&index) else {
            return Ok(());
        };
        // Reserve first; materializing the binding keys may see this device again.
        if !family.reserve(device) {
            return Ok(());
        }
        let id = family.instance_id(device);
        let name = family.name().to_string();
        let binding = family.instance_binding(device);
        self.insert_derived(id, name, vec![binding])
    }

    fn insert_derived(&mut self, id: KeyId, name: String, bindings: Vec<Binding>) -> Result<(), InputError> {
        let causes: Vec<KeyId> = bindings.iter().flat_map(|binding| binding.keys()).collect();
        for cause in &causes {
            self.materialize(*cause)?;
        }
        for cause in &causes {
            if self
                .dependencies
                .closes_cycle(*cause, id, |key| implied_presses(&self.keys, key))
            {
                return Err(InputError::DependencyCycle {
                    dependent: id,
                    depends_on: *cause,
                });
            }
        }

        self.keys
            .insert(id, KeyState::derived(id, name.clone(), DerivedKey::new(bindings)));
        let keys = &self.keys;
        for cause in causes {
            self.dependencies
                .add_with(cause, id, |key| implied_presses(keys, key))?;
        }
        debug!(key = %id, name = %name, "bound derived key");
        Ok(())
    }

    /// Sets a key's amount, records its event and propagates to observers
    fn press_key(&mut self, id: KeyId, amt: f64, cause: Option<KeyId>, group: &mut EventGroup) {
        let kind = self.set_key_press_amt(id, amt, group.timestamp_ms, cause);
        trace!(key = %id, amt, kind = %kind, "press");

        let observers = self.dependencies.observers(id);
        if kind != EventType::NoEvent {
            group.events.push(Event::new(id, kind));
        }
        for observer in observers {
            let observer_amt = self.key_press_amt_of(observer);
            self.press_key(observer, observer_amt, Some(id), group);
        }

        let natural = self.keys.get(&id).is_some_and(KeyState::is_natural);
        if natural && id.is_concrete() {
            for general in general_ids(id) {
                self.insert_general(general);
                self.press_key(general, amt, cause, group);
            }
        }
    }

    fn set_key_press_amt(&mut self, id: KeyId, amt: f64, ms: i64, cause: Option<KeyId>) -> EventType {
        let Some(state) = self.keys.get(&id) else {
            return EventType::NoEvent;
        };

        match &state.body {
            KeyBody::Natural => {
                let old = state.aggregator.stats().current().press_amt;
                let kind = decide_event_type(old, amt, state.aggregator.send_all_non_zero());
                if let Some(state) = self.keys.get_mut(&id) {
                    state.aggregator.set_press_amt(amt, ms, kind);
                }
                kind
            }
            KeyBody::General { press_amt: old } => {
                let old = *old;
                let new = self.general_press_amt(id);
                let Some(state) = self.keys.get_mut(&id) else {
                    return EventType::NoEvent;
                };
                state.body = KeyBody::General { press_amt: new };
                if (old == 0.0) == (new == 0.0) {
                    return EventType::NoEvent;
                }
                let kind = if new != 0.0 {
                    EventType::Press
                } else {
                    EventType::Release
                };
                state.aggregator.set_press_amt(new, ms, kind);
                kind
            }
            KeyBody::Derived(derived) => {
                let binding = cause.and_then(|cause| derived.binding_for_cause(cause));
                let kind = derived.decide_event(amt, binding);
                let refreshed = binding.map(|i| (i, derived.bindings()[i].press_amt(&*self) != 0.0));

                if let Some(state) = self.keys.get_mut(&id) {
                    if let (Some((index, down)), KeyBody::Derived(derived)) = (refreshed, &mut state.body) {
                        derived.set_binding_down(index, down);
                    }
                    state.aggregator.set_press_amt(amt, ms, kind);
                }
                kind
            }
        }
    }

    /// Sum of the current amounts of every natural key matching `pattern`
    fn general_press_amt(&self, pattern: KeyId) -> f64 {
        self.keys
            .values()
            .filter(|state| state.is_natural() && state.id.is_concrete() && pattern.matches_natural(state.id))
            .map(|state| state.aggregator.stats().current().press_amt)
            .sum()
    }

    pub(crate) fn key_press_amt_of(&self, id: KeyId) -> f64 {
        let Some(state) = self.keys.get(&id) else {
            return 0.0;
        };
        match &state.body {
            KeyBody::Natural => state.aggregator.stats().current().press_amt,
            KeyBody::General { .. } => self.general_press_amt(id),
            KeyBody::Derived(derived) => derived.cur_press_amt(self),
        }
    }

    pub(crate) fn key_is_down_of(&self, id: KeyId) -> bool {
        let Some(state) = self.keys.get(&id) else {
            return false;
        };
        match &state.body {
            KeyBody::Natural => state.aggregator.is_down(),
            KeyBody::General { press_amt } => *press_amt != 0.0,
            KeyBody::Derived(derived) => derived.is_down(),
        }
    }
}

impl KeySource for Input {
    fn key_press_amt(&self, id: KeyId) -> f64 {
        self.key_press_amt_of(id)
    }

    fn key_is_down(&self, id: KeyId) -> bool {
        self.key_is_down_of(id)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("keys", &self.keys.len())
            .field("registrations", &self.registrations.len())
            .field("families", &self.families.len())
            .field("edges", &self.dependencies.edge_count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Keys a press of `id` presses besides its observers
fn implied_presses(keys: &IndexMap<KeyId, KeyState>, id: KeyId) -> Vec<KeyId> {
    if id.is_concrete() && keys.get(&id).is_some_and(KeyState::is_natural) {
        general_ids(id).to_vec()
    } else {
        Vec::new()
    }
}

/// Wildcard keys that also observe a press of the concrete key `id`
fn general_ids(id: KeyId) -> [KeyId; 5] {
    let device_type = id.device.device_type;
    [
        KeyId::from_parts(KeyIndex::ANY, device_type, id.device.index),
        KeyId::from_parts(KeyIndex::ANY, device_type, DeviceIndex::ANY),
        KeyId::ANY,
        KeyId::from_parts(id.index, device_type, DeviceIndex::ANY),
        KeyId::from_parts(id.index, DeviceType::Any, DeviceIndex::ANY),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keycodes::{KEY_A, KEY_B, MOUSE_WHEEL_VERTICAL};

    fn kb(index: KeyIndex, device: i32) -> KeyId {
        KeyId::new(index, DeviceId::keyboard(device))
    }

    #[test]
    fn test_new_registers_default_keys() {
        let mut input = Input::new();
        let key = input.get_key_by_id(kb(KEY_A, 1));
        assert_eq!(key.name(), "Key A");
        assert_eq!(key.kind(), crate::input::KeyKind::Natural);
    }

    #[test]
    fn test_registration_errors() {
        let mut input = Input::new();
        assert!(matches!(
            input.try_register_key_index(KEY_A, AggregatorType::Standard, "again"),
            Err(InputError::DuplicateKeyIndex { .. })
        ));
        assert!(matches!(
            input.try_register_key_index(KeyIndex(-4), AggregatorType::Standard, "negative"),
            Err(InputError::NegativeKeyIndex(_))
        ));
        input.register_key_index(KeyIndex(500), AggregatorType::Axis, "Stick");
        assert_eq!(
            input.get_key_by_id(KeyId::new(KeyIndex(500), DeviceId::controller(0))).aggregator_type(),
            AggregatorType::Axis
        );
    }

    #[test]
    fn test_unregistered_and_invalid_ids() {
        let mut input = Input::new();
        let unknown = kb(KeyIndex(777), 1);
        assert_eq!(
            input.try_get_key_by_id(unknown).map(|k| k.id()),
            Err(InputError::UnregisteredKey(unknown))
        );

        let invalid = KeyId::new(KEY_A, DeviceId::new(DeviceType::Any, 2));
        assert!(matches!(
            input.try_get_key_by_id(invalid).map(|k| k.id()),
            Err(InputError::InvalidDevice(_))
        ));
    }

    #[test]
    #[should_panic(expected = "no key registered")]
    fn test_get_key_by_id_panics_on_unregistered_index() {
        let mut input = Input::new();
        input.get_key_by_id(kb(KeyIndex(777), 1));
    }

    #[test]
    fn test_think_rejects_bad_samples_before_processing() {
        let mut input = Input::new();
        let samples = [
            RawSample::new(kb(KEY_A, 1), 1.0, 1),
            RawSample::new(kb(KeyIndex(777), 1), 1.0, 2),
        ];
        assert!(input.try_think(10, &samples).is_err());
        assert!(!input.key(kb(KEY_A, 1)).is_some_and(|k| k.is_down()));
    }

    #[test]
    fn test_general_ids_cover_all_wildcards() {
        let ids = general_ids(kb(KEY_B, 3));
        assert!(ids.iter().all(|id| id.is_pattern()));
        assert!(ids.iter().all(|id| id.contains(kb(KEY_B, 3))));
    }

    #[test]
    fn test_get_key_by_name_uses_creation_order() {
        let mut input = Input::new();
        input.get_key_by_id(kb(KEY_A, 2));
        input.get_key_by_id(kb(KEY_A, 1));
        assert_eq!(input.get_key_by_name("Key A").map(|k| k.id()), Some(kb(KEY_A, 2)));
        assert!(input.get_key_by_name("No Such Key").is_none());
    }

    #[test]
    fn test_wheel_release_is_synthesized() {
        let mut input = Input::new();
        let wheel = KeyId::new(MOUSE_WHEEL_VERTICAL, DeviceId::mouse(0));
        let groups = input.think(10, &[RawSample::new(wheel, 3.0, 5)]);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].find_event(wheel).is_some_and(|e| e.is_press()));
        assert!(groups[1].find_event(wheel).is_some_and(|e| e.is_release()));
        assert!(!groups[1].has_mouse_position());

        let key = input.key(wheel).unwrap();
        assert!(key.frame_press_amt() > 0.0);
        assert_eq!(key.frame_press_total(), Some(3.0));
        assert!(!key.is_down());
    }

    #[test]
    fn test_registration_cannot_take_a_derived_index() {
        let mut input = Input::new();
        let jump = input.make_binding(KeyId::any_keyboard(keycodes::SPACE), &[], &[]);
        let family = input.bind_derived_key_family("Jump", jump);
        assert_eq!(
            input.try_register_key_index(family, AggregatorType::Standard, "Pedal"),
            Err(InputError::DuplicateKeyIndex {
                index: family,
                new_name: "Pedal".to_string(),
                old_name: "Jump".to_string(),
            })
        );

        let binding = input.make_binding(kb(KEY_A, 1), &[], &[]);
        let chord = input.bind_derived_key("A", vec![binding]);
        assert!(matches!(
            input.try_register_key_index(chord.index, AggregatorType::Standard, "Pedal"),
            Err(InputError::DuplicateKeyIndex { .. })
        ));
        assert_eq!(
            input.try_register_key_index(keycodes::EITHER_ALT, AggregatorType::Standard, "Alt"),
            Err(InputError::ReservedKeyIndex(keycodes::EITHER_ALT))
        );
    }

    #[test]
    fn test_derived_indices_skip_taken_indices() {
        let mut config = InputConfig::default();
        config.registry.derived_index_start = KEY_A.0;
        let mut input = Input::with_config(&config);

        let binding = input.make_binding(kb(KEY_B, 1), &[], &[]);
        let derived = input.bind_derived_key("B", vec![binding]);
        assert!(derived.index > KEY_A);
        assert!(!input.registrations.contains_key(&derived.index));

        let jump = input.make_binding(KeyId::any_keyboard(keycodes::SPACE), &[], &[]);
        let family = input.bind_derived_key_family("Jump", jump);
        assert!(family > derived.index);
        assert!(!input.registrations.contains_key(&family));
        assert_eq!(input.get_key_by_id(kb(KEY_A, 1)).kind(), crate::input::KeyKind::Natural);

        config.registry.derived_index_start = keycodes::EITHER_SHIFT.0;
        let mut input = Input::with_config(&config);
        let binding = input.make_binding(KeyId::ANY, &[], &[]);
        let derived = input.bind_derived_key("Any", vec![binding]);
        assert_eq!(derived.index, KeyIndex(1006));
    }
}
