//! Raw sample buffering between the platform layer and `Input::think`

use tracing::{debug, warn};

use super::events::RawSample;

/// Collects raw samples and releases them in timestamp order
///
/// The platform layer pushes samples as they arrive and promises, via the
/// horizon passed to [`SampleQueue::drain_through`], that no later sample
/// will carry a timestamp at or before it.
#[derive(Debug, Clone, Default)]
pub struct SampleQueue {
    pending: Vec<RawSample>,
    horizon: Option<i64>,
}

impl SampleQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one sample
    pub fn push(&mut self, sample: RawSample) {
        if let Some(horizon) = self.horizon
            && sample.timestamp_ms <= horizon
        {
            warn!(
                key = %sample.key,
                timestamp_ms = sample.timestamp_ms,
                horizon,
                "sample arrived at or before an already drained horizon"
            );
        }
        self.pending.push(sample);
    }

    /// Release every sample with a timestamp at or before `horizon`
    ///
    /// Samples come back sorted by timestamp; samples sharing a timestamp
    /// keep their arrival order. Later samples stay buffered.
    pub fn drain_through(&mut self, horizon: i64) -> Vec<RawSample> {
        if let Some(previous) = self.horizon
            && horizon < previous
        {
            warn!(horizon, previous, "horizon moved backwards");
        }
        self.horizon = Some(self.horizon.map_or(horizon, |previous| previous.max(horizon)));

        self.pending.sort_by_key(|s| s.timestamp_ms);
        let split = self.pending.partition_point(|s| s.timestamp_ms <= horizon);
        let rest = self.pending.split_off(split);
        let ready = std::mem::replace(&mut self.pending, rest);

        debug!(released = ready.len(), buffered = self.pending.len(), horizon, "drained samples");
        ready
    }

    /// Latest horizon drained so far
    pub fn horizon(&self) -> Option<i64> {
        self.horizon
    }

    /// Get number of buffered samples
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
