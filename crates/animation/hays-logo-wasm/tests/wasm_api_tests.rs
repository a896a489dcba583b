#![cfg(target_arch = "wasm32")]
use hays_logo_wasm::{abi_version, HaysLogo};
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn slide_json() -> JsValue {
    let v = json!({
        "name": "slide",
        "tracks": [{
            "target": "logo",
            "channel": "position",
            "segments": [
                { "range": { "start": 0.0, "end": 1.0, "end_inclusive": true },
                  "motion": { "kind": "lerp",
                              "from": { "kind": "fixed", "value": [-8.0, 0.0, 0.0] },
                              "to": { "kind": "fixed", "value": [0.0, 0.0, 0.0] } } }
            ]
        }]
    });
    js_sys::JSON::parse(&v.to_string()).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_from_json_and_preset() {
    assert!(HaysLogo::new(slide_json(), JsValue::UNDEFINED).is_ok());
    assert!(HaysLogo::from_preset("reveal", JsValue::NULL).is_ok());
    assert!(HaysLogo::from_preset("spin", JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn evaluate_returns_changes() {
    let mut logo = HaysLogo::new(slide_json(), JsValue::UNDEFINED).unwrap();
    let out = logo.evaluate(0.5).unwrap();
    let changes = Reflect::get(&out, &JsValue::from_str("changes")).unwrap();
    let changes: Array = changes.into();
    assert_eq!(changes.length(), 1);
}

#[wasm_bindgen_test]
fn rest_pose_resolves_dock_point() {
    let mut logo = HaysLogo::from_preset("reveal", JsValue::UNDEFINED).unwrap();
    assert_eq!(logo.pending_references(), vec!["H".to_string()]);
    let n = logo
        .set_rest_pose("H".into(), vec![1.0, 0.0, 0.0], vec![])
        .unwrap();
    assert_eq!(n, 2);
    assert!(logo.pending_references().is_empty());
}

#[wasm_bindgen_test]
fn apply_skips_unresolved_handles() {
    let mut logo = HaysLogo::from_preset("reveal", JsValue::UNDEFINED).unwrap();
    let handle: JsValue = Object::new().into();
    let resolver = Function::new_with_args("h, name", "return name === 'logo' ? h : null;")
        .bind1(&JsValue::NULL, &handle);
    assert_eq!(logo.prebind(resolver), 1);

    let writer = Function::new_with_args("h, ch, x, y, z", "h.x = x; h.y = y; h.z = z;");
    let skipped = logo.apply(3.5, writer);
    assert_eq!(skipped.len(), 3);
    assert!(!skipped.contains(&"logo".to_string()));

    let axis = |k: &str| Reflect::get(&handle, &JsValue::from_str(k)).unwrap().as_f64();
    assert_eq!(axis("x"), Some(-4.0));
    assert_eq!(axis("y"), Some(0.0));
    assert_eq!(axis("z"), Some(0.0));
}

#[wasm_bindgen_test]
fn set_config_shifts_the_clock() {
    let mut logo = HaysLogo::new(slide_json(), JsValue::UNDEFINED).unwrap();
    assert_eq!(logo.name(), "slide");

    let cfg = js_sys::JSON::parse(r#"{ "start_offset": 10.0 }"#).unwrap();
    logo.set_config(cfg).unwrap();
    let current = logo.config().unwrap();
    let offset = Reflect::get(&current, &JsValue::from_str("start_offset")).unwrap();
    assert_eq!(offset.as_f64(), Some(10.0));

    let out = logo.evaluate(10.5).unwrap();
    let time = Reflect::get(&out, &JsValue::from_str("time")).unwrap();
    assert_eq!(time.as_f64(), Some(0.5));

    logo.set_config(JsValue::NULL).unwrap();
    let out = logo.evaluate(0.25).unwrap();
    let time = Reflect::get(&out, &JsValue::from_str("time")).unwrap();
    assert_eq!(time.as_f64(), Some(0.25));
}

#[wasm_bindgen_test]
fn kept_mesh_has_no_material() {
    let logo = HaysLogo::from_preset("reveal", JsValue::UNDEFINED).unwrap();
    assert!(logo.material_for("H").unwrap().is_undefined());
    assert!(logo.material_for("Blue_triangle").unwrap().is_object());
}
