//! Core configuration for hays-logo-core.

use serde::{Deserialize, Serialize};

/// Maps the host clock onto sequence time.
///
/// `sequence_t = (host_t - start_offset) * time_scale`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Multiplier applied to host seconds. `2.0` plays the sequence twice as fast.
    pub time_scale: f32,
    /// Host time (seconds) at which the sequence starts.
    pub start_offset: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            start_offset: 0.0,
        }
    }
}

impl Config {
    /// Convert host elapsed seconds to sequence time.
    #[inline]
    pub fn sequence_time(&self, host_t: f32) -> f32 {
        (host_t - self.start_offset) * self.time_scale
    }
}
