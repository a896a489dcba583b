use approx::assert_relative_eq;
use hays_logo_core::presets::{
    self, BLUE_LIGHT, BLUE_LIGHT_REST, BLUE_TRIANGLE, GOLD_LIGHT, GOLD_LIGHT_REST, LOGO,
    LOGO_START, ORBIT_RADIUS, ORBIT_SPEED, TRIANGLE_OFFSTAGE,
};
use hays_logo_core::{
    Channel, Config, Endpoint, ModelGraph, Motion, OrbitPlane, SceneNode, Segment, Sequence,
    Sequencer, TimeRange, Track,
};

fn model_with_h(h: [f32; 3]) -> ModelGraph {
    ModelGraph::new(SceneNode::group(
        "Scene",
        vec![
            SceneNode::mesh("H", h),
            SceneNode::mesh("A", [1.0, 0.0, 0.0]),
            SceneNode::mesh(BLUE_TRIANGLE, [0.0, 0.0, 0.0]),
        ],
    ))
}

fn resolved_reveal() -> Sequencer {
    let mut s = Sequencer::new(Config::default(), &presets::reveal()).unwrap();
    assert_eq!(s.resolve_derived(&model_with_h([0.5, 1.0, 0.25])), 2);
    assert!(s.is_fully_resolved());
    s
}

fn pos(s: &Sequencer, target: &str, t: f32) -> [f32; 3] {
    s.sample(target, Channel::Position, t)
        .unwrap_or_else(|| panic!("{target} has no position at t={t}"))
}

#[test]
fn lights_orbit_on_circle_before_three_seconds() {
    let s = resolved_reveal();
    for i in 0..30 {
        let t = i as f32 * 0.1;
        let angle = t * ORBIT_SPEED;

        let blue = pos(&s, BLUE_LIGHT, t);
        assert_relative_eq!(blue[0], angle.cos() * ORBIT_RADIUS, epsilon = 1e-5);
        assert_relative_eq!(blue[1], 2.0);
        assert_relative_eq!(blue[2], angle.sin() * ORBIT_RADIUS, epsilon = 1e-5);
        assert_relative_eq!(
            (blue[0] * blue[0] + blue[2] * blue[2]).sqrt(),
            ORBIT_RADIUS,
            epsilon = 1e-4
        );

        let gold = pos(&s, GOLD_LIGHT, t);
        assert_relative_eq!(gold[0], angle.cos() * ORBIT_RADIUS, epsilon = 1e-5);
        assert_relative_eq!(gold[1], angle.sin() * ORBIT_RADIUS + 2.0, epsilon = 1e-5);
        assert_relative_eq!(gold[2], -1.0);
    }
}

#[test]
fn orbit_honours_phase_offset() {
    let phase = 1.25_f32;
    let seq = Sequence {
        name: "phased".into(),
        tracks: vec![Track::new(
            "light",
            Channel::Position,
            vec![Segment::new(
                TimeRange::half_open(0.0, 3.0),
                Motion::Orbit {
                    center: [0.0, 0.0, 0.0],
                    radius: 2.0,
                    angular_speed: ORBIT_SPEED,
                    phase,
                    plane: OrbitPlane::Xz,
                },
            )],
        )],
    };
    let s = Sequencer::new(Config::default(), &seq).unwrap();
    let p = pos(&s, "light", 0.75);
    let angle = 0.75 * ORBIT_SPEED + phase;
    assert_relative_eq!(p[0], angle.cos() * 2.0, epsilon = 1e-5);
    assert_relative_eq!(p[2], angle.sin() * 2.0, epsilon = 1e-5);
}

#[test]
fn lights_freeze_from_three_seconds() {
    let s = resolved_reveal();
    for t in [3.0, 3.001, 4.5, 10.0, 1000.0] {
        assert_eq!(pos(&s, BLUE_LIGHT, t), BLUE_LIGHT_REST);
        assert_eq!(pos(&s, GOLD_LIGHT, t), GOLD_LIGHT_REST);
    }
}

#[test]
fn logo_slides_in_between_three_and_four() {
    let s = resolved_reveal();
    assert_eq!(pos(&s, LOGO, 0.0), LOGO_START);
    assert_eq!(pos(&s, LOGO, 2.99), LOGO_START);
    assert_eq!(pos(&s, LOGO, 3.0), LOGO_START);
    assert_eq!(pos(&s, LOGO, 3.5), [-4.0, 0.0, 0.0]);
    assert_eq!(pos(&s, LOGO, 4.0), [0.0, 0.0, 0.0]);
    assert_eq!(pos(&s, LOGO, 7.0), [0.0, 0.0, 0.0]);
}

#[test]
fn triangle_docks_behind_h() {
    let s = resolved_reveal();
    let dock = [0.5, 1.0, -0.25];
    assert_eq!(pos(&s, BLUE_TRIANGLE, 0.0), TRIANGLE_OFFSTAGE);
    assert_eq!(pos(&s, BLUE_TRIANGLE, 3.99), TRIANGLE_OFFSTAGE);
    assert_eq!(pos(&s, BLUE_TRIANGLE, 4.0), TRIANGLE_OFFSTAGE);

    let mid = pos(&s, BLUE_TRIANGLE, 4.5);
    assert_relative_eq!(mid[0], (-4.0 + 0.5) / 2.0, epsilon = 1e-6);
    assert_relative_eq!(mid[1], 0.5, epsilon = 1e-6);
    assert_relative_eq!(mid[2], -0.125, epsilon = 1e-6);

    assert_eq!(pos(&s, BLUE_TRIANGLE, 5.0), dock);
    assert_eq!(pos(&s, BLUE_TRIANGLE, 60.0), dock);
}

#[test]
fn evaluation_is_idempotent() {
    let mut s = resolved_reveal();
    for t in [0.0, 1.3, 3.0, 3.7, 4.2, 5.0, 9.0] {
        let first = s.evaluate(t).clone();
        let second = s.evaluate(t).clone();
        assert_eq!(first, second, "t={t}");
    }
}

#[test]
fn seeking_backward_matches_monotonic_run() {
    let mut monotonic = resolved_reveal();
    let mut seeking = resolved_reveal();

    for i in 0..40 {
        monotonic.evaluate(i as f32 * 0.1);
    }
    let expected = monotonic.evaluate(4.0).clone();

    for t in [4.9, 1.0, 3.5, 0.2, 4.4, 2.0] {
        seeking.evaluate(t);
    }
    let got = seeking.evaluate(4.0).clone();
    assert_eq!(got, expected);
}

#[test]
fn missing_reference_leaves_triangle_offstage() {
    let model = ModelGraph::new(SceneNode::group(
        "Scene",
        vec![SceneNode::mesh(BLUE_TRIANGLE, [0.0; 3])],
    ));
    let mut s = Sequencer::new(Config::default(), &presets::reveal()).unwrap();
    assert_eq!(s.resolve_derived(&model), 0);
    assert_eq!(s.pending_references(), vec!["H"]);

    for t in [0.0, 3.0, 4.0, 4.5, 5.0, 6.0, 100.0] {
        assert_eq!(pos(&s, BLUE_TRIANGLE, t), TRIANGLE_OFFSTAGE, "t={t}");
    }
    // The rest of the timeline is unaffected.
    assert_eq!(pos(&s, LOGO, 3.5), [-4.0, 0.0, 0.0]);
}

#[test]
fn resolution_is_cached() {
    let mut s = resolved_reveal();
    let before = pos(&s, BLUE_TRIANGLE, 6.0);
    // A later lookup with a different H must not move the cached dock point.
    assert_eq!(s.resolve_derived(&model_with_h([9.0, 9.0, 9.0])), 0);
    assert_eq!(pos(&s, BLUE_TRIANGLE, 6.0), before);
}

#[test]
fn late_resolution_takes_effect_next_evaluation() {
    let mut s = Sequencer::new(Config::default(), &presets::reveal()).unwrap();
    assert_eq!(pos(&s, BLUE_TRIANGLE, 6.0), TRIANGLE_OFFSTAGE);
    s.resolve_derived(&model_with_h([1.0, 0.0, 0.0]));
    assert_eq!(pos(&s, BLUE_TRIANGLE, 6.0), [1.0, 0.0, -0.5]);
}

#[test]
fn derived_endpoint_can_be_fixed_in_custom_sequences() {
    let seq = Sequence {
        name: "custom".into(),
        tracks: vec![Track::new(
            "thing",
            Channel::Rotation,
            vec![Segment::hold(TimeRange::starting_at(0.0), Endpoint::fixed([0.0, 1.0, 0.0]))],
        )],
    };
    let s = Sequencer::new(Config::default(), &seq).unwrap();
    assert!(s.is_fully_resolved());
    assert_eq!(s.initial_value("thing", Channel::Rotation), Some([0.0, 1.0, 0.0]));
}
