//! Canonical sequence data model.
//!
//! A [`Sequence`] is a set of [`Track`]s; each track drives one channel of one named
//! target through an ordered list of [`Segment`]s (keyframe ranges).

use serde::{Deserialize, Serialize};

use crate::error::SequenceError;
use crate::interp::Easing;
use crate::value::{Channel, Vec3};

/// Time interval in sequence seconds. `end = None` is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f32,
    #[serde(default)]
    pub end: Option<f32>,
    /// Whether `t == end` belongs to this range.
    #[serde(default)]
    pub end_inclusive: bool,
}

impl TimeRange {
    /// `[start, end)`
    pub fn half_open(start: f32, end: f32) -> Self {
        Self {
            start,
            end: Some(end),
            end_inclusive: false,
        }
    }

    /// `[start, end]`
    pub fn closed(start: f32, end: f32) -> Self {
        Self {
            start,
            end: Some(end),
            end_inclusive: true,
        }
    }

    /// `[start, ∞)`
    pub fn starting_at(start: f32) -> Self {
        Self {
            start,
            end: None,
            end_inclusive: false,
        }
    }

    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        if t < self.start {
            return false;
        }
        match self.end {
            None => true,
            Some(end) if self.end_inclusive => t <= end,
            Some(end) => t < end,
        }
    }

    /// Normalized progress of `t` through the range, clamped to [0,1].
    /// Unbounded and zero-length ranges report 1 once started.
    #[inline]
    pub fn progress(&self, t: f32) -> f32 {
        match self.end {
            Some(end) if end > self.start => ((t - self.start) / (end - self.start)).clamp(0.0, 1.0),
            _ => {
                if t >= self.start {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Which rest-state property of a reference node a derived endpoint reads.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestSource {
    #[default]
    Position,
    Rotation,
}

/// One end of a keyframe range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endpoint {
    Fixed { value: Vec3 },
    /// Rest-state value of the named model node plus `offset`, resolved once at
    /// scene construction.
    Derived {
        reference: String,
        #[serde(default)]
        source: RestSource,
        #[serde(default)]
        offset: Vec3,
    },
}

impl Endpoint {
    pub fn fixed(value: Vec3) -> Self {
        Endpoint::Fixed { value }
    }

    pub fn derived(reference: impl Into<String>, source: RestSource, offset: Vec3) -> Self {
        Endpoint::Derived {
            reference: reference.into(),
            source,
            offset,
        }
    }
}

/// Plane an orbit is drawn in. The circle's two varying axes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitPlane {
    /// x = cos, z = sin
    Xz,
    /// x = cos, y = sin
    Xy,
}

/// What a segment does over its range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    Hold {
        value: Endpoint,
    },
    Lerp {
        from: Endpoint,
        to: Endpoint,
        #[serde(default)]
        easing: Easing,
    },
    /// Point on a circle at angle `t * angular_speed + phase`, with `t` the absolute
    /// sequence time.
    Orbit {
        center: Vec3,
        radius: f32,
        angular_speed: f32,
        #[serde(default)]
        phase: f32,
        plane: OrbitPlane,
    },
}

/// A keyframe range: interval plus motion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub range: TimeRange,
    pub motion: Motion,
}

impl Segment {
    pub fn new(range: TimeRange, motion: Motion) -> Self {
        Self { range, motion }
    }

    pub fn hold(range: TimeRange, value: Endpoint) -> Self {
        Self::new(range, Motion::Hold { value })
    }

    pub fn lerp(range: TimeRange, from: Endpoint, to: Endpoint, easing: Easing) -> Self {
        Self::new(range, Motion::Lerp { from, to, easing })
    }
}

/// Drives one channel of one target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub target: String,
    pub channel: Channel,
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn new(target: impl Into<String>, channel: Channel, segments: Vec<Segment>) -> Self {
        Self {
            target: target.into(),
            channel,
            segments,
        }
    }
}

/// A complete timeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Sequence {
    /// Validate structural invariants: non-empty tracks, finite ordered ranges,
    /// sane orbits and at most one track per (target, channel).
    pub fn validate(&self) -> Result<(), SequenceError> {
        let mut seen: Vec<(&str, Channel)> = Vec::with_capacity(self.tracks.len());
        for track in &self.tracks {
            let key = (track.target.as_str(), track.channel);
            if seen.contains(&key) {
                return Err(SequenceError::DuplicateTrack {
                    target: track.target.clone(),
                    channel: track.channel,
                });
            }
            seen.push(key);

            if track.segments.is_empty() {
                return Err(SequenceError::EmptyTrack {
                    target: track.target.clone(),
                    channel: track.channel,
                });
            }

            let mut last_start = -f32::INFINITY;
            for (index, seg) in track.segments.iter().enumerate() {
                let r = seg.range;
                let end_ok = r.end.map_or(true, |e| e.is_finite() && e >= r.start);
                if !r.start.is_finite() || !end_ok {
                    return Err(SequenceError::InvalidRange {
                        target: track.target.clone(),
                        start: r.start,
                        end: r.end,
                    });
                }
                if r.start < last_start {
                    return Err(SequenceError::UnorderedSegments {
                        target: track.target.clone(),
                        index,
                    });
                }
                last_start = r.start;

                if let Motion::Orbit {
                    radius,
                    angular_speed,
                    phase,
                    center,
                    ..
                } = &seg.motion
                {
                    let reason = if !(radius.is_finite() && *radius > 0.0) {
                        Some(format!("radius must be positive, got {radius}"))
                    } else if !angular_speed.is_finite() || !phase.is_finite() {
                        Some("angular speed and phase must be finite".to_string())
                    } else if center.iter().any(|c| !c.is_finite()) {
                        Some("center must be finite".to_string())
                    } else {
                        None
                    };
                    if let Some(reason) = reason {
                        return Err(SequenceError::InvalidOrbit {
                            target: track.target.clone(),
                            reason,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Names of every animated target, in first-appearance order.
    pub fn target_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for t in &self.tracks {
            if !out.contains(&t.target.as_str()) {
                out.push(&t.target);
            }
        }
        out
    }
}
