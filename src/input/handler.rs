//! Listener trait for event group consumers

use std::any::Any;

use super::events::EventGroup;
use super::registry::Input;

/// Trait for subsystems that consume event groups
///
/// Listeners are called in registration order. Every listener sees every
/// non-empty group; there is no consumption.
pub trait Listener {
    /// Name of this listener for lookup and debugging
    fn name(&self) -> &str;

    /// Handle one event group
    ///
    /// # Arguments
    /// * `group` - All events caused by one raw sample
    /// * `input` - The registry, with `Cur*` values already reflecting the group
    fn handle_event_group(&mut self, group: &EventGroup, input: &Input);

    /// Called once per frame after every group has been delivered
    fn think(&mut self, _ms: i64) {
        // Default: no-op
    }

    /// Downcast to the concrete listener type
    fn as_any(&self) -> &dyn Any;

    /// Downcast to the concrete listener type for listener-specific methods
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
