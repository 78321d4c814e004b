//! Cause/effect edges between keys
//!
//! An edge `cause -> effect` means `effect` must be re-evaluated whenever
//! `cause` is pressed. A key pressed on device `(T, i)` also triggers the
//! effects registered for `(T, any)`, so both reachability and observer
//! lookup follow that alias. Edges are checked for cycles before they are
//! committed, which bounds the recursion in `Input::press_key`. Presses the
//! registry makes outside the graph (natural keys pressing their wildcard
//! keys) are supplied to the check by the caller.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::error::InputError;
use crate::input::ids::KeyId;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    effects: IndexMap<KeyId, Vec<KeyId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if pressing `cause` would eventually press `effect`
    pub fn will_trigger(&self, cause: KeyId, effect: KeyId) -> bool {
        self.reach(cause, |_| Vec::new()).contains(&effect)
    }

    /// Adds `cause -> effect`, rejecting edges that would close a cycle
    pub fn add(&mut self, cause: KeyId, effect: KeyId) -> Result<(), InputError> {
        self.add_with(cause, effect, |_| Vec::new())
    }

    /// Like [`DependencyGraph::add`], where `implied(id)` lists the keys a
    /// press of `id` presses outside the graph
    pub fn add_with(
        &mut self,
        cause: KeyId,
        effect: KeyId,
        implied: impl Fn(KeyId) -> Vec<KeyId>,
    ) -> Result<(), InputError> {
        if self.closes_cycle(cause, effect, implied) {
            return Err(InputError::DependencyCycle {
                dependent: effect,
                depends_on: cause,
            });
        }
        let list = self.effects.entry(cause).or_default();
        if !list.contains(&effect) {
            list.push(effect);
        }
        Ok(())
    }

    /// True if an edge `cause -> effect` would let a press of `effect` come
    /// back around to `effect`
    ///
    /// The edge fires for a press of `cause` itself and, when `cause` uses
    /// device index any, for a press of any instance of it.
    pub fn closes_cycle(&self, cause: KeyId, effect: KeyId, implied: impl Fn(KeyId) -> Vec<KeyId>) -> bool {
        self.reach(effect, implied).iter().any(|&pressed| {
            pressed == cause || (!pressed.device.index.is_any() && pressed.any_instance() == cause)
        })
    }

    /// Every key pressed, directly or transitively, by a press of `from`,
    /// including `from` itself
    fn reach(&self, from: KeyId, implied: impl Fn(KeyId) -> Vec<KeyId>) -> IndexSet<KeyId> {
        let mut visited = IndexSet::new();
        let mut queue = VecDeque::from([from]);

        while let Some(next) = queue.pop_front() {
            if !visited.insert(next) {
                continue;
            }
            for successor in self.observers(next).into_iter().chain(implied(next)) {
                if !visited.contains(&successor) {
                    queue.push_back(successor);
                }
            }
        }
        visited
    }

    /// Keys to notify when `id` is pressed: its own effects, then those
    /// registered for the same key on any instance of its device type
    pub fn observers(&self, id: KeyId) -> Vec<KeyId> {
        let mut observers = self.effects.get(&id).cloned().unwrap_or_default();
        if !id.device.index.is_any()
            && let Some(shared) = self.effects.get(&id.any_instance())
        {
            observers.extend(shared.iter().copied());
        }
        observers
    }

    /// Direct effects registered for exactly `cause`
    pub fn effects_of(&self, cause: KeyId) -> &[KeyId] {
        self.effects.get(&cause).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.effects.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ids::{DeviceId, DeviceType, KeyIndex};
    use crate::input::keycodes;

    fn kb(index: KeyIndex, device: i32) -> KeyId {
        KeyId::new(index, DeviceId::keyboard(device))
    }

    fn derived(index: i32) -> KeyId {
        KeyId::new(KeyIndex(index), DeviceId::new(DeviceType::Derived, 1))
    }

    #[test]
    fn test_self_dependence_is_a_cycle() {
        let mut graph = DependencyGraph::new();
        let a = kb(keycodes::KEY_A, 1);
        assert!(matches!(
            graph.add(a, a),
            Err(InputError::DependencyCycle { .. })
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_two_cycle_is_rejected() {
        let mut graph = DependencyGraph::new();
        let a = kb(keycodes::KEY_A, 1);
        let b = kb(keycodes::KEY_B, 1);

        graph.add(b, a).unwrap();
        let err = graph.add(a, b).unwrap_err();
        assert_eq!(
            err,
            InputError::DependencyCycle {
                dependent: b,
                depends_on: a
            }
        );
    }

    #[test]
    fn test_transitive_cycle_through_device_alias() {
        let mut graph = DependencyGraph::new();
        let x = derived(10000);
        let y = derived(10001);

        // x observes 'a' on any keyboard, y observes x.
        graph.add(KeyId::any_keyboard(keycodes::KEY_A), x).unwrap();
        graph.add(x, y).unwrap();

        assert!(graph.will_trigger(kb(keycodes::KEY_A, 3), y));
        assert!(graph.add(y, kb(keycodes::KEY_A, 3)).is_err());
        assert!(!graph.will_trigger(kb(keycodes::KEY_B, 3), y));
    }

    #[test]
    fn test_observers_include_any_instance_once() {
        let mut graph = DependencyGraph::new();
        let a1 = kb(keycodes::KEY_A, 1);
        let any_a = KeyId::any_keyboard(keycodes::KEY_A);

        graph.add(a1, derived(10000)).unwrap();
        graph.add(any_a, derived(10001)).unwrap();
        graph.add(a1, derived(10000)).unwrap();

        assert_eq!(graph.observers(a1), vec![derived(10000), derived(10001)]);
        assert_eq!(graph.observers(any_a), vec![derived(10001)]);
        assert!(graph.observers(kb(keycodes::KEY_A, 2)).contains(&derived(10001)));
        assert_eq!(graph.effects_of(a1), &[derived(10000)]);
    }

    #[test]
    fn test_instance_depending_on_its_any_instance_is_a_cycle() {
        let mut graph = DependencyGraph::new();
        let a1 = kb(keycodes::KEY_A, 1);
        let any_a = KeyId::any_keyboard(keycodes::KEY_A);

        assert!(matches!(
            graph.add(any_a, a1),
            Err(InputError::DependencyCycle { .. })
        ));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.add(any_a, kb(keycodes::KEY_B, 1)).is_ok());
    }

    #[test]
    fn test_implied_presses_close_cycles() {
        let mut graph = DependencyGraph::new();
        let a1 = kb(keycodes::KEY_A, 1);
        let b1 = kb(keycodes::KEY_B, 1);
        let implied = |id: KeyId| {
            if id == a1 || id == b1 {
                vec![KeyId::ANY]
            } else {
                Vec::new()
            }
        };

        assert!(graph.add(KeyId::ANY, a1).is_ok());
        assert!(matches!(
            graph.add_with(KeyId::ANY, b1, implied),
            Err(InputError::DependencyCycle { .. })
        ));
        assert!(graph.closes_cycle(KeyId::ANY, derived(10000), |_| vec![KeyId::ANY]));
        assert!(!graph.closes_cycle(KeyId::ANY, derived(10000), |_| Vec::new()));
    }
}
