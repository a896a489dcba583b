//! Sequencer: compiled tracks and per-tick evaluation.
//!
//! Methods:
//! - new (validate + compile), resolve_derived (once per endpoint),
//!   sample / evaluate (pure in t), apply (evaluate + write through a sink)

use crate::binding::HandleTable;
use crate::config::Config;
use crate::data::{Endpoint, Motion, OrbitPlane, RestSource, Sequence, TimeRange};
use crate::error::SequenceError;
use crate::interp::functions::{add_vec3, lerp_vec3};
use crate::interp::Easing;
use crate::outputs::{ApplyReport, Change, Outputs};
use crate::scene::ReferenceLookup;
use crate::value::{Channel, Vec3};

/// Receives channel writes for bound targets. Adapters implement this over their
/// host objects (transforms, materials).
pub trait PoseSink {
    type Handle;
    fn write(&mut self, handle: &Self::Handle, channel: Channel, value: Vec3);
}

#[derive(Clone, Debug)]
struct DerivedRef {
    reference: String,
    source: RestSource,
    offset: Vec3,
}

/// An endpoint after compilation. `value` is `None` until a derived endpoint resolves.
#[derive(Clone, Debug)]
struct Slot {
    derived: Option<DerivedRef>,
    value: Option<Vec3>,
}

impl Slot {
    fn compile(ep: &Endpoint) -> Self {
        match ep {
            Endpoint::Fixed { value } => Slot {
                derived: None,
                value: Some(*value),
            },
            Endpoint::Derived {
                reference,
                source,
                offset,
            } => Slot {
                derived: Some(DerivedRef {
                    reference: reference.clone(),
                    source: *source,
                    offset: *offset,
                }),
                value: None,
            },
        }
    }

    fn is_pending(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Clone, Debug)]
enum CompiledMotion {
    Hold(Slot),
    Lerp(Slot, Slot, Easing),
    Orbit {
        center: Vec3,
        radius: f32,
        angular_speed: f32,
        phase: f32,
        plane: OrbitPlane,
    },
}

impl CompiledMotion {
    fn compile(m: &Motion) -> Self {
        match m {
            Motion::Hold { value } => CompiledMotion::Hold(Slot::compile(value)),
            Motion::Lerp { from, to, easing } => {
                CompiledMotion::Lerp(Slot::compile(from), Slot::compile(to), *easing)
            }
            Motion::Orbit {
                center,
                radius,
                angular_speed,
                phase,
                plane,
            } => CompiledMotion::Orbit {
                center: *center,
                radius: *radius,
                angular_speed: *angular_speed,
                phase: *phase,
                plane: *plane,
            },
        }
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        let (a, b) = match self {
            CompiledMotion::Hold(s) => (Some(s), None),
            CompiledMotion::Lerp(a, b, _) => (Some(a), Some(b)),
            CompiledMotion::Orbit { .. } => (None, None),
        };
        a.into_iter().chain(b)
    }

    fn slots(&self) -> impl Iterator<Item = &Slot> {
        let (a, b) = match self {
            CompiledMotion::Hold(s) => (Some(s), None),
            CompiledMotion::Lerp(a, b, _) => (Some(a), Some(b)),
            CompiledMotion::Orbit { .. } => (None, None),
        };
        a.into_iter().chain(b)
    }
}

#[derive(Clone, Debug)]
struct CompiledSegment {
    range: TimeRange,
    motion: CompiledMotion,
}

impl CompiledSegment {
    /// Value at `t`, or `None` if an endpoint it needs is unresolved.
    fn eval(&self, t: f32) -> Option<Vec3> {
        match &self.motion {
            CompiledMotion::Hold(slot) => slot.value,
            CompiledMotion::Lerp(from, to, easing) => {
                let s = easing.apply(self.range.progress(t));
                Some(lerp_vec3(from.value?, to.value?, s))
            }
            CompiledMotion::Orbit {
                center,
                radius,
                angular_speed,
                phase,
                plane,
            } => {
                let angle = t * angular_speed + phase;
                let (c, s) = (angle.cos() * radius, angle.sin() * radius);
                Some(match plane {
                    OrbitPlane::Xz => [center[0] + c, center[1], center[2] + s],
                    OrbitPlane::Xy => [center[0] + c, center[1] + s, center[2]],
                })
            }
        }
    }

    /// Clamp `t` into this segment's range (used before the first segment and in gaps).
    fn clamp_time(&self, t: f32) -> f32 {
        let t = t.max(self.range.start);
        match self.range.end {
            Some(end) => t.min(end),
            None => t,
        }
    }
}

#[derive(Clone, Debug)]
struct CompiledTrack {
    target: String,
    channel: Channel,
    segments: Vec<CompiledSegment>,
}

impl CompiledTrack {
    /// First segment in list order whose range contains `t`; otherwise the latest
    /// segment starting at or before `t`; before everything, the first segment.
    fn select(&self, t: f32) -> &CompiledSegment {
        if let Some(seg) = self.segments.iter().find(|s| s.range.contains(t)) {
            return seg;
        }
        self.segments
            .iter()
            .rev()
            .find(|s| s.range.start <= t)
            .unwrap_or(&self.segments[0])
    }

    fn initial(&self) -> Option<Vec3> {
        let first = &self.segments[0];
        first.eval(first.range.start)
    }

    fn sample(&self, t: f32) -> Option<Vec3> {
        let seg = self.select(t);
        seg.eval(seg.clamp_time(t)).or_else(|| self.initial())
    }
}

/// Evaluates a [`Sequence`] at arbitrary times.
#[derive(Clone, Debug)]
pub struct Sequencer {
    cfg: Config,
    name: String,
    tracks: Vec<CompiledTrack>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Sequencer {
    /// Validate and compile a sequence. Derived endpoints start unresolved.
    pub fn new(cfg: Config, sequence: &Sequence) -> Result<Self, SequenceError> {
        sequence.validate()?;
        let tracks = sequence
            .tracks
            .iter()
            .map(|t| CompiledTrack {
                target: t.target.clone(),
                channel: t.channel,
                segments: t
                    .segments
                    .iter()
                    .map(|s| CompiledSegment {
                        range: s.range,
                        motion: CompiledMotion::compile(&s.motion),
                    })
                    .collect(),
            })
            .collect();
        Ok(Self {
            cfg,
            name: sequence.name.clone(),
            tracks,
            outputs: Outputs::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: Config) {
        self.cfg = cfg;
    }

    /// Animated target names in track order, deduplicated.
    pub fn targets(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for t in &self.tracks {
            if !out.contains(&t.target.as_str()) {
                out.push(&t.target);
            }
        }
        out
    }

    /// Resolve pending derived endpoints from a model's object graph. Values that
    /// resolve are cached for good; missing references stay pending. Returns the
    /// number of endpoints resolved by this call.
    pub fn resolve_derived(&mut self, lookup: &impl ReferenceLookup) -> usize {
        let mut resolved = 0;
        for track in &mut self.tracks {
            for seg in &mut track.segments {
                for slot in seg.motion.slots_mut() {
                    if !slot.is_pending() {
                        continue;
                    }
                    let Some(d) = slot.derived.as_ref() else {
                        continue;
                    };
                    match lookup.rest_value(&d.reference, d.source) {
                        Some(rest) => {
                            slot.value = Some(add_vec3(rest, d.offset));
                            resolved += 1;
                        }
                        None => {
                            log::debug!(
                                "reference '{}' not found for '{}' ({:?}); keeping fallback",
                                d.reference,
                                track.target,
                                track.channel
                            );
                        }
                    }
                }
            }
        }
        resolved
    }

    /// Distinct reference names still waiting to resolve.
    pub fn pending_references(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for track in &self.tracks {
            for seg in &track.segments {
                for slot in seg.motion.slots() {
                    if let (true, Some(d)) = (slot.is_pending(), slot.derived.as_ref()) {
                        if !out.contains(&d.reference.as_str()) {
                            out.push(&d.reference);
                        }
                    }
                }
            }
        }
        out
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.pending_references().is_empty()
    }

    /// Value of one channel at sequence time `t`. `None` if the target/channel is not
    /// animated, or its value depends on an unresolved reference with no fallback.
    pub fn sample(&self, target: &str, channel: Channel, t: f32) -> Option<Vec3> {
        self.tracks
            .iter()
            .find(|tr| tr.target == target && tr.channel == channel)
            .and_then(|tr| tr.sample(t))
    }

    /// Value at sequence time 0, used to place objects at scene construction.
    pub fn initial_value(&self, target: &str, channel: Channel) -> Option<Vec3> {
        self.sample(target, channel, 0.0)
    }

    /// Evaluate every track at host time `host_t`.
    pub fn evaluate(&mut self, host_t: f32) -> &Outputs {
        let t = self.cfg.sequence_time(host_t);
        self.outputs.clear();
        self.outputs.time = t;
        for track in &self.tracks {
            if let Some(value) = track.sample(t) {
                self.outputs.push_change(Change {
                    target: track.target.clone(),
                    channel: track.channel,
                    value,
                });
            }
        }
        &self.outputs
    }

    /// Evaluate at `host_t` and write each change for which the table holds a handle.
    /// Unbound targets are skipped this tick and listed in the report.
    pub fn apply<S: PoseSink>(
        &mut self,
        host_t: f32,
        table: &HandleTable<S::Handle>,
        sink: &mut S,
    ) -> ApplyReport {
        self.evaluate(host_t);
        let mut report = ApplyReport::default();
        for change in &self.outputs.changes {
            match table.get(&change.target) {
                Some(handle) => {
                    sink.write(handle, change.channel, change.value);
                    report.written += 1;
                }
                None => {
                    if !report.skipped.contains(&change.target) {
                        log::trace!("target '{}' not bound; skipping", change.target);
                        report.skipped.push(change.target.clone());
                    }
                }
            }
        }
        report
    }
}
