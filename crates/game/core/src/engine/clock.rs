use crate::state::Timestamp;

/// One driver frame: a monotonic timestamp and the wall-clock delta since the
/// previous frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub now: Timestamp,
    pub delta_ms: u64,
}

impl Frame {
    pub fn new(now: Timestamp, delta_ms: u64) -> Self {
        Self { now, delta_ms }
    }
}

/// Turns monotonic driver timestamps into clamped per-frame deltas.
///
/// The first frame after creation or [`FrameClock::reset`] yields a zero delta.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Timestamp>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&mut self, now: Timestamp, max_delta_ms: u64) -> Frame {
        let delta_ms = match self.last {
            Some(last) => now.since(last).min(max_delta_ms),
            None => 0,
        };
        self.last = Some(now);
        Frame { now, delta_ms }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
