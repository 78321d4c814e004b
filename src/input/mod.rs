//! Input event and aggregation engine
//!
//! Turns a time-ordered stream of raw device samples into a queryable
//! model of logical keys:
//! - Natural keys track one physical key, button or axis per device
//! - General keys aggregate every natural key matching a wildcard id
//! - Derived keys combine keys through bindings with modifiers
//! - Key families instantiate one derived key per device
//!
//! # Architecture
//!
//! ```text
//! Platform layer → SampleQueue → Input::think
//!                                     ↓
//!                          press_key (per sample)
//!                    aggregator update + event
//!                                     ↓
//!                    observers (dependency graph)
//!                    general keys (any-key, any-device)
//!                                     ↓
//!                         EventGroup → Listeners
//!                                     ↓
//!                  key think (synthetic events) → Listener::think
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut input = Input::new();
//! let a = KeyId::any_keyboard(keycodes::KEY_A);
//! let shift = KeyId::any_keyboard(keycodes::LEFT_SHIFT);
//! let chord = input.bind_derived_key("Shift A", vec![input.make_binding(a, &[shift], &[true])]);
//!
//! // Each frame
//! let samples = queue.drain_through(now);
//! for group in input.think(now, &samples) {
//!     if group.is_pressed(chord) { /* ... */ }
//! }
//! ```

mod aggregator;
mod binding;
mod collector;
mod dependency;
mod events;
mod handler;
mod ids;
mod key;
pub mod keycodes;
mod mouse;
mod registry;

// Re-export public API
pub use aggregator::{
    Aggregate, Aggregator, AggregatorType, AxisAggregator, EventType, FrameStats, KeyStats,
    StandardAggregator, WheelAggregator, decide_event_type,
};
pub use binding::{Binding, KeyFamily};
pub use collector::SampleQueue;
pub use dependency::DependencyGraph;
pub use events::{Event, EventGroup, RawSample};
pub use handler::Listener;
pub use ids::{DeviceId, DeviceIndex, DeviceType, KeyId, KeyIndex};
pub use key::{Key, KeyKind};
pub use mouse::{MouseEvent, MouseEventType, MouseInput, MouseListener, classify};
pub use registry::Input;
