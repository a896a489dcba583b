//! Interpolation and easing.
//!
//! Every motion reduces to `lerp(from, to, ease(s))` with `s` clamped to [0,1].

pub mod functions;

use serde::{Deserialize, Serialize};

use functions::{bezier_ease, power3_out};

/// Timing curve applied to the normalized segment parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ctrl", rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// `1 - (1 - s)^3`, the "power3.out" curve used for the tweened logo.
    Power3Out,
    /// CSS-style cubic bezier with control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    /// Map s ∈ [0,1] to eased progress. Input outside [0,1] is clamped first.
    #[inline]
    pub fn apply(&self, s: f32) -> f32 {
        let s = s.clamp(0.0, 1.0);
        match self {
            Easing::Linear => s,
            Easing::Power3Out => power3_out(s),
            Easing::CubicBezier([x1, y1, x2, y2]) => bezier_ease(s, *x1, *y1, *x2, *y2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for e in [
            Easing::Linear,
            Easing::Power3Out,
            Easing::CubicBezier([0.42, 0.0, 0.58, 1.0]),
        ] {
            assert!(e.apply(0.0).abs() < 1e-5, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-5, "{e:?} at 1");
        }
    }

    #[test]
    fn monotone_on_unit_interval() {
        for e in [
            Easing::Linear,
            Easing::Power3Out,
            Easing::CubicBezier([0.42, 0.0, 0.58, 1.0]),
        ] {
            let mut last = e.apply(0.0);
            for i in 1..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= last, "{e:?} decreased at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn out_of_range_input_clamps() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Power3Out.apply(1.5), 1.0);
    }
}
