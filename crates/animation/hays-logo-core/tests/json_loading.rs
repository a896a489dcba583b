use hays_logo_core::presets;
use hays_logo_core::{
    parse_scene_json, parse_sequence_json, sequence_to_json, Channel, Config, Easing, Motion,
    SequenceError, Sequencer,
};

#[test]
fn presets_survive_json() {
    for seq in [presets::reveal(), presets::tween()] {
        let json = sequence_to_json(&seq).unwrap();
        assert_eq!(parse_sequence_json(&json).unwrap(), seq);
    }
}

#[test]
fn hand_written_sequence_loads() {
    let json = r#"{
        "name": "slide",
        "tracks": [{
            "target": "logo",
            "channel": "position",
            "segments": [
                { "range": { "start": 0.0, "end": 1.0 },
                  "motion": { "kind": "hold", "value": { "kind": "fixed", "value": [-8, 0, 0] } } },
                { "range": { "start": 1.0, "end": 2.0, "end_inclusive": true },
                  "motion": { "kind": "lerp",
                              "from": { "kind": "fixed", "value": [-8, 0, 0] },
                              "to": { "kind": "derived", "reference": "H", "offset": [0, 0, -0.5] },
                              "easing": { "kind": "power3_out" } } },
                { "range": { "start": 2.0 },
                  "motion": { "kind": "hold", "value": { "kind": "derived", "reference": "H" } } }
            ]
        }]
    }"#;
    let seq = parse_sequence_json(json).unwrap();
    match &seq.tracks[0].segments[1].motion {
        Motion::Lerp { easing, .. } => assert_eq!(*easing, Easing::Power3Out),
        other => panic!("unexpected motion {other:?}"),
    }
    let s = Sequencer::new(Config::default(), &seq).unwrap();
    assert_eq!(s.pending_references(), vec!["H"]);
    assert_eq!(
        s.sample("logo", Channel::Position, 0.5),
        Some([-8.0, 0.0, 0.0])
    );
}

#[test]
fn unknown_motion_kind_is_parse_error() {
    let json = r#"{
        "name": "bad",
        "tracks": [{ "target": "logo", "channel": "position",
                     "segments": [{ "range": { "start": 0 }, "motion": { "kind": "spin" } }] }]
    }"#;
    assert!(matches!(
        parse_sequence_json(json),
        Err(SequenceError::Parse { .. })
    ));
}

#[test]
fn scene_document_carries_config_and_materials() {
    let doc = serde_json::json!({
        "sequence": presets::reveal(),
        "config": { "time_scale": 2.0 },
        "materials": presets::materials_reveal(),
    });
    let doc = parse_scene_json(&doc.to_string()).unwrap();
    assert_eq!(doc.config.time_scale, 2.0);
    assert_eq!(doc.config.start_offset, 0.0);
    assert_eq!(doc.materials, Some(presets::materials_reveal()));
    assert_eq!(doc.sequence, presets::reveal());
}
