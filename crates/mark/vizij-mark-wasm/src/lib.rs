use js_sys::{Array, JSON};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_mark_core::{
    ApplyReport, Channel, Encoding, Mark, MarkConfig, MarkError, SceneObjectState,
};

/// Bumped whenever the JS-facing surface changes shape.
const ABI_VERSION: u32 = 1;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn mark_error(e: MarkError) -> JsError {
    JsError::new(&e.to_string())
}

#[derive(Serialize)]
struct ReportJs {
    applied: usize,
    failures: Vec<FailureJs>,
}

#[derive(Serialize)]
struct FailureJs {
    channel: String,
    error: String,
}

impl From<ApplyReport> for ReportJs {
    fn from(report: ApplyReport) -> Self {
        Self {
            applied: report.applied,
            failures: report
                .failures
                .into_iter()
                .map(|(channel, error)| FailureJs {
                    channel: channel.name().to_string(),
                    error: error.to_string(),
                })
                .collect(),
        }
    }
}

/// A mark bound to an in-memory scene object. JS hosts read the resulting
/// transform/color back with `state()` and push it into their own renderer.
#[wasm_bindgen]
pub struct VizijMark {
    mark: Mark,
    object: SceneObjectState,
}

#[wasm_bindgen]
impl VizijMark {
    /// Create a mark. Pass a config object such as `{ unit_scale: 0.01 }`, or
    /// undefined/null for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, config: JsValue) -> Result<VizijMark, JsError> {
        console_error_panic_hook::set_once();

        let cfg: MarkConfig = if jsvalue_is_undefined_or_null(&config) {
            MarkConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(VizijMark {
            mark: Mark::new(name).with_config(cfg),
            object: SceneObjectState::default(),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.mark.name.clone()
    }

    /// Size of the untransformed geometry the mark scales against.
    #[wasm_bindgen(js_name = set_mesh_size)]
    pub fn set_mesh_size(&mut self, x: f32, y: f32, z: f32) {
        self.object.mesh_size = Some([x, y, z]);
    }

    #[wasm_bindgen(js_name = set_channel_value)]
    pub fn set_channel_value(&mut self, channel: &str, value: &str) -> Result<(), JsError> {
        self.mark
            .set_channel_value(&mut self.object, channel, value)
            .map_err(mark_error)
    }

    /// Apply an encoding object (`{ x: "10", color: "#f00" }`). Every channel
    /// is attempted; returns `{ applied, failures: [{ channel, error }] }`.
    /// Throws only when the encoding itself does not parse.
    #[wasm_bindgen(js_name = apply_encoding)]
    pub fn apply_encoding(&mut self, encoding: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&encoding) {
            return Err(JsError::new("apply_encoding: encoding is null/undefined"));
        }
        let text: String = JSON::stringify(&encoding)
            .map_err(|e| JsError::new(&format!("apply_encoding stringify error: {:?}", e)))?
            .into();
        let encoding = Encoding::from_json_str(&text).map_err(mark_error)?;
        let report = self.mark.apply_all_lenient(&mut self.object, &encoding);
        log::debug!(
            "apply_encoding '{}': {} applied, {} failed",
            self.mark.name,
            report.applied,
            report.failures.len()
        );
        swb::to_value(&ReportJs::from(report)).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Current transform, color and mesh size of the scene object.
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.object).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Replace the scene object, e.g. to sync with a host-side transform.
    #[wasm_bindgen(js_name = set_state)]
    pub fn set_state(&mut self, state: JsValue) -> Result<(), JsError> {
        self.object = swb::from_value(state)
            .map_err(|e| JsError::new(&format!("set_state parse error: {e}")))?;
        Ok(())
    }
}

/// Every channel name a mark accepts.
#[wasm_bindgen]
pub fn channel_names() -> Array {
    Channel::ALL
        .iter()
        .map(|c| JsValue::from_str(c.name()))
        .collect()
}

#[wasm_bindgen]
pub fn abi_version() -> u32 {
    ABI_VERSION
}
