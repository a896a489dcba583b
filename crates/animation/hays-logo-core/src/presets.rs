//! Built-in logo timelines and material plans.
//!
//! - [`reveal`]: lights orbit for three seconds, the logo slides in, then the blue
//!   triangle docks next to the `H`.
//! - [`tween`]: the triangle eases into its rest pose while the letters fade from
//!   glowing white to black.

use std::f32::consts::{FRAC_PI_4, TAU};

use crate::data::{Endpoint, Motion, OrbitPlane, RestSource, Segment, Sequence, TimeRange, Track};
use crate::interp::Easing;
use crate::materials::{MaterialPlan, MaterialSpec};
use crate::value::{srgb_hex_to_linear, Channel, Vec3};

pub const BLUE_LIGHT: &str = "blue_light";
pub const GOLD_LIGHT: &str = "gold_light";
pub const LOGO: &str = "logo";
pub const BLUE_TRIANGLE: &str = "Blue_triangle";
pub const H_MESH: &str = "H";
pub const LETTERS: [&str; 4] = ["H", "A", "Y", "S"];

/// Orbit radius for both spotlights.
pub const ORBIT_RADIUS: f32 = 3.0;
/// One revolution every three seconds.
pub const ORBIT_SPEED: f32 = TAU / 3.0;
/// Lights stop orbiting and the logo starts sliding at this time.
pub const ORBIT_END: f32 = 3.0;

pub const BLUE_LIGHT_REST: Vec3 = [-2.0, 2.0, 2.0];
pub const GOLD_LIGHT_REST: Vec3 = [2.0, 3.0, -1.0];
pub const LOGO_START: Vec3 = [-8.0, 0.0, 0.0];
pub const LOGO_END: Vec3 = [0.0, 0.0, 0.0];
pub const TRIANGLE_OFFSTAGE: Vec3 = [-4.0, 0.0, 0.0];
/// The triangle docks just behind the `H`.
pub const TRIANGLE_DOCK_OFFSET: Vec3 = [0.0, 0.0, -0.5];

const TRIANGLE_COLOR: u32 = 0xaeede1;
const WHITE: Vec3 = [1.0, 1.0, 1.0];
const BLACK: Vec3 = [0.0, 0.0, 0.0];

fn orbit(center: Vec3, plane: OrbitPlane) -> Motion {
    Motion::Orbit {
        center,
        radius: ORBIT_RADIUS,
        angular_speed: ORBIT_SPEED,
        phase: 0.0,
        plane,
    }
}

/// Lerp over `[start, end]`, then hold `to` forever.
fn tween_and_hold(start: f32, end: f32, from: Endpoint, to: Endpoint, easing: Easing) -> Vec<Segment> {
    vec![
        Segment::lerp(TimeRange::closed(start, end), from, to.clone(), easing),
        Segment::hold(TimeRange::starting_at(end), to),
    ]
}

/// Hold `from` until `start`, lerp to `to` over `[start, end]`, then hold `to`.
fn hold_slide_hold(start: f32, end: f32, from: Endpoint, to: Endpoint) -> Vec<Segment> {
    let mut segs = vec![Segment::hold(TimeRange::half_open(0.0, start), from.clone())];
    segs.extend(tween_and_hold(start, end, from, to, Easing::Linear));
    segs
}

/// The spotlight / slide-in / dock timeline.
pub fn reveal() -> Sequence {
    let dock = Endpoint::derived(H_MESH, RestSource::Position, TRIANGLE_DOCK_OFFSET);
    Sequence {
        name: "reveal".into(),
        tracks: vec![
            Track::new(
                BLUE_LIGHT,
                Channel::Position,
                vec![
                    // y pinned at 2, circling in the floor plane
                    Segment::new(
                        TimeRange::half_open(0.0, ORBIT_END),
                        orbit([0.0, 2.0, 0.0], OrbitPlane::Xz),
                    ),
                    Segment::hold(TimeRange::starting_at(ORBIT_END), Endpoint::fixed(BLUE_LIGHT_REST)),
                ],
            ),
            Track::new(
                GOLD_LIGHT,
                Channel::Position,
                vec![
                    // circling upright behind the logo
                    Segment::new(
                        TimeRange::half_open(0.0, ORBIT_END),
                        orbit([0.0, 2.0, -1.0], OrbitPlane::Xy),
                    ),
                    Segment::hold(TimeRange::starting_at(ORBIT_END), Endpoint::fixed(GOLD_LIGHT_REST)),
                ],
            ),
            Track::new(
                LOGO,
                Channel::Position,
                hold_slide_hold(
                    ORBIT_END,
                    ORBIT_END + 1.0,
                    Endpoint::fixed(LOGO_START),
                    Endpoint::fixed(LOGO_END),
                ),
            ),
            Track::new(
                BLUE_TRIANGLE,
                Channel::Position,
                hold_slide_hold(
                    ORBIT_END + 1.0,
                    ORBIT_END + 2.0,
                    Endpoint::fixed(TRIANGLE_OFFSTAGE),
                    dock,
                ),
            ),
        ],
    }
}

/// The eased triangle arrival and letter fade.
pub fn tween() -> Sequence {
    let rest_pos = Endpoint::derived(BLUE_TRIANGLE, RestSource::Position, [0.0; 3]);
    let start_pos = Endpoint::derived(BLUE_TRIANGLE, RestSource::Position, [-3.0, 0.0, -3.0]);
    let rest_rot = Endpoint::derived(BLUE_TRIANGLE, RestSource::Rotation, [0.0; 3]);
    let start_rot = Endpoint::derived(BLUE_TRIANGLE, RestSource::Rotation, [0.0, 0.0, FRAC_PI_4]);

    let mut tracks = vec![
        Track::new(
            BLUE_TRIANGLE,
            Channel::Position,
            tween_and_hold(0.0, 3.0, start_pos, rest_pos, Easing::Power3Out),
        ),
        Track::new(
            BLUE_TRIANGLE,
            Channel::Rotation,
            tween_and_hold(0.0, 3.0, start_rot, rest_rot, Easing::Power3Out),
        ),
    ];
    for letter in LETTERS {
        tracks.push(Track::new(
            letter,
            Channel::BaseColor,
            tween_and_hold(
                0.0,
                10.0,
                Endpoint::fixed(WHITE),
                Endpoint::fixed(BLACK),
                Easing::Power3Out,
            ),
        ));
        tracks.push(Track::new(
            letter,
            Channel::Emissive,
            tween_and_hold(
                0.0,
                4.0,
                Endpoint::fixed(WHITE),
                Endpoint::fixed(BLACK),
                Easing::Power3Out,
            ),
        ));
    }
    Sequence {
        name: "tween".into(),
        tracks,
    }
}

/// Look up a preset by name.
pub fn by_name(name: &str) -> Option<Sequence> {
    match name {
        "reveal" => Some(reveal()),
        "tween" => Some(tween()),
        _ => None,
    }
}

/// Dark reflective floor scene: matte pastel triangle, `H` as modelled, glossy
/// black everything else.
pub fn materials_reveal() -> MaterialPlan {
    MaterialPlan::new(MaterialSpec::new(BLACK, 0.9, 0.2))
        .rule(
            [BLUE_TRIANGLE],
            MaterialSpec::new(srgb_hex_to_linear(TRIANGLE_COLOR), 0.0, 1.0),
        )
        .keep([H_MESH])
}

/// Static white-background scene.
pub fn materials_static() -> MaterialPlan {
    MaterialPlan::new(MaterialSpec::new(BLACK, 1.0, 0.3)).rule(
        [BLUE_TRIANGLE],
        MaterialSpec::new(srgb_hex_to_linear(TRIANGLE_COLOR), 0.3, 0.4),
    )
}

/// Static scene plus glowing letters that [`tween`] fades out.
pub fn materials_tween() -> MaterialPlan {
    materials_static().rule(
        LETTERS,
        MaterialSpec::new(WHITE, 0.0, 1.0).with_emissive(WHITE, 6.0),
    )
}

/// Material plan that goes with a preset timeline.
pub fn materials_by_name(name: &str) -> Option<MaterialPlan> {
    match name {
        "reveal" => Some(materials_reveal()),
        "tween" => Some(materials_tween()),
        "static" => Some(materials_static()),
        _ => None,
    }
}
