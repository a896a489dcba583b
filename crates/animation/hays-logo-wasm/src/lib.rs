use hashbrown::HashMap;
use js_sys::{Array, Function, JSON};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use hays_logo_core::{
    parse_sequence_json, presets, Channel, Config, HandleTable, MaterialPlan, ModelGraph,
    Outputs, PoseSink, RestPose, SceneNode, Sequence, Sequencer, TargetResolver, Vec3,
};

/// Sequencer handle exported to JS. A render loop calls `apply(elapsed, writer)`
/// (or `evaluate(elapsed)`) once per frame.
#[wasm_bindgen]
pub struct HaysLogo {
    core: Sequencer,
    materials: Option<MaterialPlan>,
    handles: HandleTable<JsValue>,
    resolver: Option<Function>,
    rest: HashMap<String, RestPose>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn parse_config(config: JsValue) -> Result<Config, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        Ok(Config::default())
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
    }
}

struct JsResolver<'a> {
    f: &'a Function,
}

impl TargetResolver for JsResolver<'_> {
    type Handle = JsValue;
    fn resolve(&mut self, name: &str) -> Option<JsValue> {
        // resolver(name) -> object | null/undefined; throwing counts as "not ready"
        match self.f.call1(&JsValue::UNDEFINED, &JsValue::from_str(name)) {
            Ok(val) if !jsvalue_is_undefined_or_null(&val) => Some(val),
            _ => None,
        }
    }
}

struct JsWriter<'a> {
    f: &'a Function,
    failures: u32,
}

impl PoseSink for JsWriter<'_> {
    type Handle = JsValue;
    fn write(&mut self, handle: &JsValue, channel: Channel, value: Vec3) {
        let args = Array::of5(
            handle,
            &JsValue::from_str(channel_name(channel)),
            &JsValue::from_f64(value[0] as f64),
            &JsValue::from_f64(value[1] as f64),
            &JsValue::from_f64(value[2] as f64),
        );
        if self.f.apply(&JsValue::UNDEFINED, &args).is_err() {
            self.failures += 1;
        }
    }
}

fn channel_name(channel: Channel) -> &'static str {
    match channel {
        Channel::Position => "position",
        Channel::Rotation => "rotation",
        Channel::BaseColor => "base_color",
        Channel::Emissive => "emissive",
    }
}

impl HaysLogo {
    fn build(
        cfg: Config,
        seq: &Sequence,
        materials: Option<MaterialPlan>,
    ) -> Result<HaysLogo, JsError> {
        let core = Sequencer::new(cfg, seq).map_err(|e| JsError::new(&e.to_string()))?;
        let handles = HandleTable::with_targets(core.targets());
        Ok(HaysLogo {
            core,
            materials,
            handles,
            resolver: None,
            rest: Default::default(),
        })
    }
}

#[wasm_bindgen]
impl HaysLogo {
    /// Create from a sequence JSON object. `config` is optional JSON matching Config.
    /// Example:
    ///   new HaysLogo(sequence, { start_offset: 0.5 })
    #[wasm_bindgen(constructor)]
    pub fn new(sequence_json: JsValue, config: JsValue) -> Result<HaysLogo, JsError> {
        console_error_panic_hook::set_once();

        if jsvalue_is_undefined_or_null(&sequence_json) {
            return Err(JsError::new("sequence_json is null/undefined"));
        }
        // Stringify so the core parser (with validation) can be reused.
        let s = JSON::stringify(&sequence_json)
            .map_err(|e| JsError::new(&format!("sequence stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("sequence stringify produced non-string"))?;
        let seq = parse_sequence_json(&s).map_err(|e| JsError::new(&e.to_string()))?;
        let cfg = parse_config(config)?;
        Self::build(cfg, &seq, None)
    }

    /// Create from a built-in timeline: "reveal" or "tween".
    #[wasm_bindgen(js_name = fromPreset)]
    pub fn from_preset(name: &str, config: JsValue) -> Result<HaysLogo, JsError> {
        console_error_panic_hook::set_once();

        let seq = presets::by_name(name)
            .ok_or_else(|| JsError::new(&format!("unknown preset '{name}'")))?;
        let cfg = parse_config(config)?;
        Self::build(cfg, &seq, presets::materials_by_name(name))
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.core.name().to_owned()
    }

    /// Current clock mapping as `{ time_scale, start_offset }`.
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.config()).map_err(|e| JsError::new(&format!("config error: {e}")))
    }

    /// Replace the clock mapping, e.g. to replay from a new page time.
    /// Undefined or null restores the defaults.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        self.core.set_config(parse_config(config)?);
        Ok(())
    }

    /// Animated target names.
    #[wasm_bindgen]
    pub fn targets(&self) -> Vec<String> {
        self.core.targets().into_iter().map(str::to_owned).collect()
    }

    /// Reference names whose rest pose has not been provided yet.
    #[wasm_bindgen(js_name = pendingReferences)]
    pub fn pending_references(&self) -> Vec<String> {
        self.core
            .pending_references()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Record the rest pose of a named model node (e.g. while traversing a loaded
    /// glTF scene) and resolve any derived endpoints that reference it.
    /// Returns the number of endpoints resolved.
    #[wasm_bindgen(js_name = setRestPose)]
    pub fn set_rest_pose(
        &mut self,
        name: String,
        position: Vec<f32>,
        rotation: Vec<f32>,
    ) -> Result<u32, JsError> {
        let to_vec3 = |v: &[f32], what: &str| -> Result<Vec3, JsError> {
            match v {
                [] => Ok([0.0; 3]),
                [x, y, z] => Ok([*x, *y, *z]),
                _ => Err(JsError::new(&format!("{what} must have 3 components"))),
            }
        };
        let pose = RestPose {
            position: to_vec3(&position, "position")?,
            rotation: to_vec3(&rotation, "rotation")?,
        };
        self.rest.insert(name, pose);
        Ok(self.core.resolve_derived(&self.rest) as u32)
    }

    /// Resolve derived endpoints from a whole object graph (SceneNode JSON).
    #[wasm_bindgen(js_name = resolveModel)]
    pub fn resolve_model(&mut self, graph: JsValue) -> Result<u32, JsError> {
        let root: SceneNode =
            swb::from_value(graph).map_err(|e| JsError::new(&format!("model error: {e}")))?;
        Ok(self.core.resolve_derived(&ModelGraph::new(root)) as u32)
    }

    /// Register a resolver `resolver(name) -> object | null`. Unresolved targets are
    /// retried on every `apply` until the resolver returns a handle.
    #[wasm_bindgen]
    pub fn prebind(&mut self, resolver: Function) -> u32 {
        let bound = self.handles.bind_with(&mut JsResolver { f: &resolver });
        self.resolver = Some(resolver);
        bound as u32
    }

    /// Evaluate at elapsed seconds and return Outputs JSON.
    #[wasm_bindgen]
    pub fn evaluate(&mut self, elapsed: f32) -> Result<JsValue, JsError> {
        let out: &Outputs = self.core.evaluate(elapsed);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Evaluate at elapsed seconds and call `writer(handle, channel, x, y, z)` for
    /// every bound target. Returns the names skipped because no handle exists yet.
    #[wasm_bindgen]
    pub fn apply(&mut self, elapsed: f32, writer: Function) -> Vec<String> {
        if let Some(resolver) = self.resolver.as_ref() {
            if !self.handles.is_complete() {
                self.handles.bind_with(&mut JsResolver { f: resolver });
            }
        }
        let mut sink = JsWriter {
            f: &writer,
            failures: 0,
        };
        let report = self.core.apply(elapsed, &self.handles, &mut sink);
        if sink.failures > 0 {
            log::warn!("writer threw for {} change(s)", sink.failures);
        }
        report.skipped
    }

    /// Material for a mesh name from the preset's plan. Undefined when there is
    /// no plan or the plan keeps the mesh's own material.
    #[wasm_bindgen(js_name = materialFor)]
    pub fn material_for(&self, mesh: &str) -> Result<JsValue, JsError> {
        match self.materials.as_ref() {
            Some(plan) => swb::to_value(&plan.for_mesh(mesh))
                .map_err(|e| JsError::new(&format!("material error: {e}"))),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
