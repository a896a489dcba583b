//! Error types for sequence construction and loading.
//!
//! Evaluation itself never fails: missing handles and unresolved references are
//! skipped per tick. Only malformed sequence data is an error.

use crate::value::Channel;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SequenceError {
    /// A track has no segments to evaluate.
    #[error("Track '{target}' ({channel:?}) has no segments")]
    EmptyTrack { target: String, channel: Channel },

    /// A segment's time range is non-finite or ends before it starts.
    #[error("Invalid range [{start}, {end:?}] on track '{target}'")]
    InvalidRange {
        target: String,
        start: f32,
        end: Option<f32>,
    },

    /// Segment starts must be non-decreasing within a track.
    #[error("Segment {index} of track '{target}' starts before its predecessor")]
    UnorderedSegments { target: String, index: usize },

    /// Orbit radius and angular speed must be finite; radius must be positive.
    #[error("Invalid orbit on track '{target}': {reason}")]
    InvalidOrbit { target: String, reason: String },

    /// Two tracks animate the same channel of the same target.
    #[error("Duplicate track for '{target}' ({channel:?})")]
    DuplicateTrack { target: String, channel: Channel },

    /// Sequence JSON could not be parsed.
    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

impl From<serde_json::Error> for SequenceError {
    fn from(e: serde_json::Error) -> Self {
        SequenceError::Parse {
            reason: e.to_string(),
        }
    }
}
