//! Output contracts from the sequencer.
//!
//! Outputs carry the full set of channel values for one evaluation, keyed by target
//! name. Every tick recomputes all of them; nothing is diffed against prior frames.

use serde::{Deserialize, Serialize};

use crate::value::{Channel, Vec3};

/// One channel value for one target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub target: String,
    pub channel: Channel,
    pub value: Vec3,
}

/// Outputs returned by `Sequencer::evaluate()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    /// Sequence time (after config mapping) these values were computed for.
    pub time: f32,
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn get(&self, target: &str, channel: Channel) -> Option<Vec3> {
        self.changes
            .iter()
            .find(|c| c.target == target && c.channel == channel)
            .map(|c| c.value)
    }
}

/// What `Sequencer::apply()` did this tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Changes written through the sink.
    pub written: usize,
    /// Targets skipped because their handle is not available yet.
    pub skipped: Vec<String>,
}

impl ApplyReport {
    pub fn all_written(&self) -> bool {
        self.skipped.is_empty()
    }
}
