//! Per-key frame statistics
//!
//! Every key owns exactly one aggregator. Aggregators keep two copies of
//! their statistics: `this` accumulates during the current frame and `prev`
//! is the frozen copy of the last completed frame. `think` swaps them.
//!
//! ```text
//!  set_press_amt ──► this ──think──► prev ──► Frame* accessors
//!                     │
//!                     └──────────────────────► Cur* accessors
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a press amount change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventType {
    #[default]
    NoEvent,
    Press,
    Release,
    /// The key was and is down, but its amount changed
    Adjust,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::NoEvent => "noevent",
            EventType::Press => "press",
            EventType::Release => "release",
            EventType::Adjust => "adjust",
        };
        f.write_str(name)
    }
}

/// Which aggregation rules a registered key index uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregatorType {
    Standard,
    Axis,
    Wheel,
}

/// Decides the event produced by moving a key from `old` to `new`
pub fn decide_event_type(old: f64, new: f64, send_all_non_zero: bool) -> EventType {
    if old == new {
        if send_all_non_zero {
            return EventType::Adjust;
        }
        return EventType::NoEvent;
    }
    if old == 0.0 {
        return EventType::Press;
    }
    if new == 0.0 {
        return EventType::Release;
    }
    EventType::Adjust
}

/// Statistics for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyStats {
    pub press_count: u32,
    pub release_count: u32,
    pub press_amt: f64,
    /// Time integral for standard keys, plain sum for axes
    pub press_sum: f64,
    pub press_avg: f64,
}

/// Double-buffered statistics shared by every aggregator variant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    this: KeyStats,
    prev: KeyStats,
}

impl FrameStats {
    pub fn current(&self) -> &KeyStats {
        &self.this
    }

    pub fn frame(&self) -> &KeyStats {
        &self.prev
    }

    fn count(&mut self, event: EventType) {
        match event {
            EventType::Press => self.this.press_count += 1,
            EventType::Release => self.this.release_count += 1,
            EventType::NoEvent | EventType::Adjust => {}
        }
    }
}

/// Operations every aggregator variant supports
pub trait Aggregate {
    fn stats(&self) -> &FrameStats;

    fn is_down(&self) -> bool;

    /// True if unchanged non-zero amounts should still be reported as `Adjust`
    fn send_all_non_zero(&self) -> bool {
        false
    }

    /// Records a new sample. `event` is the already-decided event type.
    fn set_press_amt(&mut self, amt: f64, ms: i64, event: EventType);

    /// Closes the current frame at `ms`
    ///
    /// Returns `Some(amount)` when the owning key should synthesize one more
    /// press to `amount`.
    fn think(&mut self, ms: i64) -> Option<f64>;

    /// Raw total of the amounts supplied last frame, for aggregators that keep one
    fn frame_press_total(&self) -> Option<f64> {
        None
    }

    /// Raw running total of the amounts supplied this frame
    fn cur_press_total(&self) -> Option<f64> {
        None
    }
}

/// Buttons and keys: the sum is the integral of the amount over time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardAggregator {
    stats: FrameStats,
    last_press: i64,
    last_think: i64,
}

impl Aggregate for StandardAggregator {
    fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn is_down(&self) -> bool {
        self.stats.this.press_amt != 0.0
    }

    fn set_press_amt(&mut self, amt: f64, ms: i64, event: EventType) {
        let this = &mut self.stats.this;
        this.press_sum += this.press_amt * (ms - self.last_press) as f64;
        this.press_amt = amt;
        self.last_press = ms;
        self.stats.count(event);
    }

    fn think(&mut self, ms: i64) -> Option<f64> {
        let this = &mut self.stats.this;
        this.press_sum += this.press_amt * (ms - self.last_press) as f64;
        this.press_avg = if ms != self.last_think {
            this.press_sum / (ms - self.last_think) as f64
        } else {
            0.0
        };

        self.stats.prev = self.stats.this;
        self.stats.this = KeyStats {
            press_amt: self.stats.prev.press_amt,
            ..KeyStats::default()
        };
        self.last_press = ms;
        self.last_think = ms;
        None
    }
}

/// Pointer axes: the sum is a plain sum and the key is down for the whole
/// frame once any non-zero amount arrived
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisAggregator {
    stats: FrameStats,
    is_down: bool,
}

impl Aggregate for AxisAggregator {
    fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn is_down(&self) -> bool {
        self.is_down
    }

    fn send_all_non_zero(&self) -> bool {
        true
    }

    fn set_press_amt(&mut self, amt: f64, _ms: i64, event: EventType) {
        self.stats.this.press_sum += amt;
        self.stats.this.press_amt = amt;
        if amt != 0.0 {
            self.is_down = true;
        }
        self.stats.count(event);
    }

    fn think(&mut self, _ms: i64) -> Option<f64> {
        let was_down = self.stats.prev.press_amt != 0.0;
        self.stats.prev = self.stats.this;
        self.stats.this = KeyStats::default();
        self.stats.prev.press_avg = self.stats.prev.press_sum;

        if self.stats.prev.press_amt == 0.0 {
            self.is_down = false;
            if was_down {
                return Some(0.0);
            }
        }
        None
    }
}

/// Mouse wheels: standard rules, plus a raw total and a synthetic reset
/// once a frame passes without new input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WheelAggregator {
    inner: StandardAggregator,
    frame_total: f64,
    cur_total: f64,
}

impl Aggregate for WheelAggregator {
    fn stats(&self) -> &FrameStats {
        self.inner.stats()
    }

    fn is_down(&self) -> bool {
        self.inner.is_down()
    }

    fn send_all_non_zero(&self) -> bool {
        true
    }

    fn set_press_amt(&mut self, amt: f64, ms: i64, event: EventType) {
        self.inner.set_press_amt(amt, ms, event);
        self.cur_total += amt;
    }

    fn think(&mut self, ms: i64) -> Option<f64> {
        let synthesized = self.inner.think(ms);
        debug_assert!(
            synthesized.is_none(),
            "standard aggregation must not synthesize events"
        );

        self.frame_total = self.cur_total;
        self.cur_total = 0.0;

        // The inner think carried the last amount into the new frame.
        if self.inner.stats().current().press_amt != 0.0 {
            return Some(0.0);
        }
        None
    }

    fn frame_press_total(&self) -> Option<f64> {
        Some(self.frame_total)
    }

    fn cur_press_total(&self) -> Option<f64> {
        Some(self.cur_total)
    }
}

/// Closed set of aggregator variants owned by keys
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregator {
    Standard(StandardAggregator),
    Axis(AxisAggregator),
    Wheel(WheelAggregator),
}

impl Aggregator {
    pub fn for_type(kind: AggregatorType) -> Self {
        match kind {
            AggregatorType::Standard => Aggregator::Standard(StandardAggregator::default()),
            AggregatorType::Axis => Aggregator::Axis(AxisAggregator::default()),
            AggregatorType::Wheel => Aggregator::Wheel(WheelAggregator::default()),
        }
    }

    pub fn kind(&self) -> AggregatorType {
        match self {
            Aggregator::Standard(_) => AggregatorType::Standard,
            Aggregator::Axis(_) => AggregatorType::Axis,
            Aggregator::Wheel(_) => AggregatorType::Wheel,
        }
    }

    fn inner(&self) -> &dyn Aggregate {
        match self {
            Aggregator::Standard(a) => a,
            Aggregator::Axis(a) => a,
            Aggregator::Wheel(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Aggregate {
        match self {
            Aggregator::Standard(a) => a,
            Aggregator::Axis(a) => a,
            Aggregator::Wheel(a) => a,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator::Standard(StandardAggregator::default())
    }
}

impl Aggregate for Aggregator {
    fn stats(&self) -> &FrameStats {
        self.inner().stats()
    }

    fn is_down(&self) -> bool {
        self.inner().is_down()
    }

    fn send_all_non_zero(&self) -> bool {
        self.inner().send_all_non_zero()
    }

    fn set_press_amt(&mut self, amt: f64, ms: i64, event: EventType) {
        self.inner_mut().set_press_amt(amt, ms, event)
    }

    fn think(&mut self, ms: i64) -> Option<f64> {
        self.inner_mut().think(ms)
    }

    fn frame_press_total(&self) -> Option<f64> {
        self.inner().frame_press_total()
    }

    fn cur_press_total(&self) -> Option<f64> {
        self.inner().cur_press_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_event_type() {
        assert_eq!(decide_event_type(0.0, 1.0, false), EventType::Press);
        assert_eq!(decide_event_type(1.0, 0.0, false), EventType::Release);
        assert_eq!(decide_event_type(1.0, 2.0, false), EventType::Adjust);
        assert_eq!(decide_event_type(1.0, 1.0, false), EventType::NoEvent);
        assert_eq!(decide_event_type(1.0, 1.0, true), EventType::Adjust);
        assert_eq!(decide_event_type(0.0, 0.0, true), EventType::Adjust);
        assert_eq!(decide_event_type(0.0, 0.0, false), EventType::NoEvent);
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(EventType::Press.to_string(), "press");
        assert_eq!(EventType::Release.to_string(), "release");
        assert_eq!(EventType::Adjust.to_string(), "adjust");
        assert_eq!(EventType::NoEvent.to_string(), "noevent");
    }

    #[test]
    fn test_standard_integrates_over_time() {
        let mut agg = StandardAggregator::default();
        agg.set_press_amt(3.0, 10, EventType::Press);
        agg.set_press_amt(7.0, 15, EventType::Adjust);
        assert_eq!(agg.think(20), None);

        let frame = agg.stats().frame();
        assert_eq!(frame.press_sum, 3.0 * 5.0 + 7.0 * 5.0);
        assert_eq!(frame.press_count, 1);
        assert_eq!(frame.press_amt, 7.0);
        assert_eq!(frame.press_avg, 50.0 / 20.0);

        // The amount carries into the next frame, counters do not.
        let cur = agg.stats().current();
        assert_eq!(cur.press_amt, 7.0);
        assert_eq!(cur.press_count, 0);
        assert!(agg.is_down());
    }

    #[test]
    fn test_standard_zero_length_frame_has_zero_average() {
        let mut agg = StandardAggregator::default();
        agg.think(0);
        assert_eq!(agg.stats().frame().press_avg, 0.0);
    }

    #[test]
    fn test_axis_sums_and_stays_down() {
        let mut agg = AxisAggregator::default();
        agg.set_press_amt(5.0, 5, EventType::Press);
        agg.set_press_amt(-5.0, 6, EventType::Adjust);
        assert_eq!(agg.think(10), None);
        assert_eq!(agg.stats().frame().press_sum, 0.0);
        assert_eq!(agg.stats().frame().press_avg, 0.0);
        assert!(agg.is_down());

        // A quiet frame releases the axis and asks for a reset event.
        assert_eq!(agg.think(20), Some(0.0));
        assert!(!agg.is_down());
        assert_eq!(agg.think(30), None);
    }

    #[test]
    fn test_wheel_synthesizes_reset_and_totals() {
        let mut agg = WheelAggregator::default();
        agg.set_press_amt(2.0, 1, EventType::Press);
        agg.set_press_amt(3.0, 2, EventType::Adjust);
        assert_eq!(agg.cur_press_total(), Some(5.0));

        assert_eq!(agg.think(10), Some(0.0));
        assert_eq!(agg.frame_press_total(), Some(5.0));
        assert_eq!(agg.cur_press_total(), Some(0.0));

        agg.set_press_amt(0.0, 10, EventType::Release);
        assert_eq!(agg.think(20), None);
        assert!(!agg.is_down());
    }

    #[test]
    fn test_enum_delegates_to_variant() {
        let wheel = Aggregator::for_type(AggregatorType::Wheel);
        assert!(wheel.send_all_non_zero());
        assert_eq!(wheel.frame_press_total(), Some(0.0));
        assert_eq!(wheel.kind(), AggregatorType::Wheel);

        let standard = Aggregator::default();
        assert!(!standard.send_all_non_zero());
        assert_eq!(standard.frame_press_total(), None);
    }
}
