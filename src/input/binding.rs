//! Bindings, derived keys and key families
//!
//! A derived key is down while any of its bindings is down. A binding is
//! down when its primary key is down and every modifier matches its
//! required down state. Modifiers only gate the *start* of a press: once a
//! binding went down it follows its primary key until that key is released.

use indexmap::IndexSet;

use crate::error::InputError;
use crate::input::aggregator::EventType;
use crate::input::ids::{DeviceId, DeviceIndex, DeviceType, KeyId, KeyIndex};

/// Read access to key state needed to evaluate bindings
pub(crate) trait KeySource {
    fn key_press_amt(&self, id: KeyId) -> f64;
    fn key_is_down(&self, id: KeyId) -> bool;
}

/// A primary key plus modifiers with required down states
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    primary: KeyId,
    modifiers: Vec<KeyId>,
    down: Vec<bool>,
}

impl Binding {
    /// Builds a binding; `modifiers` and `down` must have the same length
    pub fn try_new(primary: KeyId, modifiers: Vec<KeyId>, down: Vec<bool>) -> Result<Self, InputError> {
        if modifiers.len() != down.len() {
            return Err(InputError::BindingArity {
                primary,
                modifiers: modifiers.len(),
                down: down.len(),
            });
        }
        Ok(Self {
            primary,
            modifiers,
            down,
        })
    }

    /// A binding with no modifiers
    pub fn primary_only(primary: KeyId) -> Self {
        Self {
            primary,
            modifiers: Vec::new(),
            down: Vec::new(),
        }
    }

    pub fn primary(&self) -> KeyId {
        self.primary
    }

    pub fn modifiers(&self) -> &[KeyId] {
        &self.modifiers
    }

    pub fn down(&self) -> &[bool] {
        &self.down
    }

    /// Primary key followed by every modifier
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        std::iter::once(self.primary).chain(self.modifiers.iter().copied())
    }

    /// Gated amount: 0 unless all modifiers match and the primary key is down
    pub(crate) fn press_amt(&self, keys: &impl KeySource) -> f64 {
        let modifiers_match = self
            .modifiers
            .iter()
            .zip(&self.down)
            .all(|(modifier, down)| keys.key_is_down(*modifier) == *down);
        if !modifiers_match || !keys.key_is_down(self.primary) {
            return 0.0;
        }
        keys.key_press_amt(self.primary)
    }

    /// Copy of this binding with every `(T, any)` key pinned to `device`
    pub(crate) fn for_device(&self, device: DeviceId) -> Self {
        let pin = |id: KeyId| {
            if id.device == device.any_instance() {
                KeyId::new(id.index, device)
            } else {
                id
            }
        };
        Self {
            primary: pin(self.primary),
            modifiers: self.modifiers.iter().copied().map(pin).collect(),
            down: self.down.clone(),
        }
    }
}

/// Binding state of a derived key
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DerivedKey {
    bindings: Vec<Binding>,
    /// Whether each binding was down the last time its primary key changed
    bindings_down: Vec<bool>,
}

impl DerivedKey {
    pub fn new(bindings: Vec<Binding>) -> Self {
        let bindings_down = vec![false; bindings.len()];
        Self {
            bindings,
            bindings_down,
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn is_down(&self) -> bool {
        self.num_bindings_down() > 0
    }

    fn num_bindings_down(&self) -> usize {
        self.bindings_down.iter().filter(|down| **down).count()
    }

    /// Index of the last binding whose primary key is `cause`
    pub fn binding_for_cause(&self, cause: KeyId) -> Option<usize> {
        self.bindings.iter().rposition(|b| b.primary == cause)
    }

    /// Bindings that are already down follow their primary key's amount;
    /// the rest contribute their gated amount.
    pub fn cur_press_amt(&self, keys: &impl KeySource) -> f64 {
        self.bindings
            .iter()
            .zip(&self.bindings_down)
            .map(|(binding, down)| {
                if *down {
                    keys.key_press_amt(binding.primary)
                } else {
                    binding.press_amt(keys)
                }
            })
            .sum()
    }

    /// Event for moving to `amt` after the primary key of `binding` changed
    pub fn decide_event(&self, amt: f64, binding: Option<usize>) -> EventType {
        let Some(index) = binding else {
            return EventType::NoEvent;
        };
        let num_down = self.num_bindings_down();
        let was_down = self.bindings_down[index];
        if amt == 0.0 && num_down == 1 && was_down {
            EventType::Release
        } else if amt != 0.0 && num_down == 0 && !was_down {
            EventType::Press
        } else {
            EventType::NoEvent
        }
    }

    pub fn set_binding_down(&mut self, index: usize, down: bool) {
        self.bindings_down[index] = down;
    }
}

/// Template for a derived key instantiated once per device
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFamily {
    index: KeyIndex,
    name: String,
    template: Binding,
    device_type: DeviceType,
    instances: IndexSet<DeviceIndex>,
}

impl KeyFamily {
    /// The template's primary key must be on a physical device type with any index
    pub(crate) fn try_new(index: KeyIndex, name: String, template: Binding) -> Result<Self, InputError> {
        let primary = template.primary;
        if !primary.device.device_type.is_physical() {
            return Err(InputError::InvalidFamilyTemplate {
                primary,
                reason: "primary key must be on a keyboard, mouse or controller",
            });
        }
        if !primary.device.index.is_any() {
            return Err(InputError::InvalidFamilyTemplate {
                primary,
                reason: "primary key must use device index any",
            });
        }
        Ok(Self {
            index,
            name,
            template,
            device_type: primary.device.device_type,
            instances: IndexSet::new(),
        })
    }

    pub fn index(&self) -> KeyIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &Binding {
        &self.template
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Device indices this family has been instantiated for
    pub fn instances(&self) -> impl Iterator<Item = DeviceIndex> + '_ {
        self.instances.iter().copied()
    }

    /// Key id of the instance for `device`
    pub fn instance_id(&self, device: DeviceIndex) -> KeyId {
        KeyId::from_parts(self.index, self.device_type, device)
    }

    /// Reserves an instance; returns false if it already exists
    pub(crate) fn reserve(&mut self, device: DeviceIndex) -> bool {
        self.instances.insert(device)
    }

    /// Template binding pinned to `device`
    pub(crate) fn instance_binding(&self, device: DeviceIndex) -> Binding {
        self.template.for_device(DeviceId {
            device_type: self.device_type,
            index: device,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keycodes;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeKeys {
        amts: HashMap<KeyId, f64>,
    }

    impl FakeKeys {
        fn set(&mut self, id: KeyId, amt: f64) {
            self.amts.insert(id, amt);
        }
    }

    impl KeySource for FakeKeys {
        fn key_press_amt(&self, id: KeyId) -> f64 {
            self.amts.get(&id).copied().unwrap_or(0.0)
        }

        fn key_is_down(&self, id: KeyId) -> bool {
            self.key_press_amt(id) != 0.0
        }
    }

    fn kb(index: KeyIndex) -> KeyId {
        KeyId::new(index, DeviceId::keyboard(1))
    }

    #[test]
    fn test_binding_arity_is_checked() {
        let err = Binding::try_new(kb(keycodes::KEY_A), vec![kb(keycodes::KEY_B)], vec![]);
        assert!(matches!(
            err,
            Err(InputError::BindingArity {
                modifiers: 1,
                down: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_binding_gating() {
        let binding = Binding::try_new(
            kb(keycodes::KEY_A),
            vec![kb(keycodes::KEY_B), kb(keycodes::KEY_C)],
            vec![true, false],
        )
        .unwrap();
        let mut keys = FakeKeys::default();

        keys.set(kb(keycodes::KEY_A), 1.0);
        assert_eq!(binding.press_amt(&keys), 0.0);

        keys.set(kb(keycodes::KEY_B), 1.0);
        assert_eq!(binding.press_amt(&keys), 1.0);

        keys.set(kb(keycodes::KEY_C), 1.0);
        assert_eq!(binding.press_amt(&keys), 0.0);
    }

    #[test]
    fn test_derived_key_press_and_release_decisions() {
        let a = kb(keycodes::KEY_A);
        let e = kb(keycodes::KEY_E);
        let mut derived = DerivedKey::new(vec![Binding::primary_only(a), Binding::primary_only(e)]);

        assert_eq!(derived.binding_for_cause(e), Some(1));
        assert_eq!(derived.binding_for_cause(kb(keycodes::KEY_B)), None);

        assert_eq!(derived.decide_event(1.0, Some(0)), EventType::Press);
        derived.set_binding_down(0, true);

        // A second binding going down is absorbed.
        assert_eq!(derived.decide_event(2.0, Some(1)), EventType::NoEvent);
        derived.set_binding_down(1, true);

        derived.set_binding_down(1, false);
        assert_eq!(derived.decide_event(0.0, Some(0)), EventType::Release);
        assert_eq!(derived.decide_event(0.0, None), EventType::NoEvent);
    }

    #[test]
    fn test_down_binding_ignores_modifiers() {
        let a = kb(keycodes::KEY_A);
        let b = kb(keycodes::KEY_B);
        let binding = Binding::try_new(a, vec![b], vec![true]).unwrap();
        let mut derived = DerivedKey::new(vec![binding]);
        let mut keys = FakeKeys::default();

        keys.set(a, 1.0);
        assert_eq!(derived.cur_press_amt(&keys), 0.0);

        derived.set_binding_down(0, true);
        assert_eq!(derived.cur_press_amt(&keys), 1.0);
        assert!(derived.is_down());
    }

    #[test]
    fn test_family_pins_template_to_device() {
        let template = Binding::try_new(
            KeyId::any_keyboard(keycodes::KEY_A),
            vec![KeyId::any_keyboard(keycodes::LEFT_SHIFT), KeyId::any_mouse(keycodes::MOUSE_L_BUTTON)],
            vec![true, false],
        )
        .unwrap();
        let family = KeyFamily::try_new(KeyIndex(10000), "Shift A".into(), template).unwrap();

        let pinned = family.instance_binding(DeviceIndex(2));
        assert_eq!(pinned.primary(), KeyId::new(keycodes::KEY_A, DeviceId::keyboard(2)));
        assert_eq!(
            pinned.modifiers(),
            &[
                KeyId::new(keycodes::LEFT_SHIFT, DeviceId::keyboard(2)),
                KeyId::any_mouse(keycodes::MOUSE_L_BUTTON),
            ]
        );
        assert_eq!(
            family.instance_id(DeviceIndex(2)),
            KeyId::new(KeyIndex(10000), DeviceId::keyboard(2))
        );
    }

    #[test]
    fn test_family_template_validation() {
        let concrete = Binding::primary_only(kb(keycodes::KEY_A));
        assert!(matches!(
            KeyFamily::try_new(KeyIndex(10000), "A".into(), concrete),
            Err(InputError::InvalidFamilyTemplate { .. })
        ));

        let any_device = Binding::primary_only(KeyId::from_parts(
            keycodes::KEY_A,
            DeviceType::Any,
            DeviceIndex::ANY,
        ));
        assert!(KeyFamily::try_new(KeyIndex(10000), "A".into(), any_device).is_err());
    }
}
