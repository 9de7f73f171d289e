use crate::error;
use crate::interop::{arr_f64, arr_u32, new_obj, set_kv, to_js};
use crate::render::JsRenderer;
use crate::Editor;
use serde::Serialize;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct ViolationSer {
    kind: wirenet::ViolationKind,
    message: String,
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        crate::Editor::rs_new()
    }
    /// Build from a partial JSON config; throws an error envelope if it does not parse or validate.
    pub fn with_config(json: &str) -> Result<Editor, JsValue> {
        wirenet::EditorConfig::from_json(json)
            .and_then(crate::Editor::rs_with_config)
            .map_err(|e| error::from_wire(&e))
    }
    pub fn set_config_res(&mut self, json: &str) -> JsValue {
        match wirenet::EditorConfig::from_json(json).and_then(|c| self.inner.set_config(c)) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::from_wire(&e),
        }
    }
    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Pointer + keyboard
    pub fn pointer_down(&mut self, x: f64, y: f64, modifier: bool, button: u8) -> bool {
        self.inner.pointer_down(x, y, modifier, button).is_ok()
    }
    pub fn pointer_down_res(&mut self, x: f64, y: f64, modifier: bool, button: u8) -> JsValue {
        match self.inner.pointer_down(x, y, modifier, button) {
            Ok(()) => error::ok(JsValue::from_bool(self.inner.dragging().is_some())),
            Err(e) => error::from_wire(&e),
        }
    }
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(x, y).is_ok()
    }
    /// `true` if the drag was consumed by a point; `false` leaves it to the caller (panning).
    pub fn pointer_drag(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_drag(x, y).unwrap_or(false)
    }
    pub fn pointer_drag_res(&mut self, x: f64, y: f64) -> JsValue {
        match self.inner.pointer_drag(x, y) {
            Ok(consumed) => error::ok(JsValue::from_bool(consumed)),
            Err(e) => error::from_wire(&e),
        }
    }
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }
    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }
    pub fn key_down(&mut self, key: &str) {
        self.inner.key_down(key);
    }
    pub fn dragging(&self) -> Option<u32> {
        self.inner.dragging()
    }

    // Rendering
    pub fn take_dirty(&mut self) -> bool {
        self.inner.take_dirty()
    }
    pub fn frame(&self) -> JsValue {
        to_js(&self.inner.frame())
    }
    /// Draw the current frame through `target.fillCircle/line/fillText`.
    pub fn render(&self, target: &JsValue) {
        let mut r = JsRenderer::new(target);
        self.inner.render(&mut r);
    }

    // Typed arrays getters
    pub fn get_point_data(&self) -> JsValue {
        let (ids, pos) = self.inner.graph().get_point_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f64(&pos).into());
        obj.into()
    }
    pub fn get_segment_data(&self) -> JsValue {
        let segs = self.inner.graph().segments();
        let mut endpoints = Vec::with_capacity(segs.len() * 2);
        for s in &segs {
            endpoints.push(s.a);
            endpoints.push(s.b);
        }
        let obj = new_obj();
        set_kv(&obj, "endpoints", &arr_u32(&endpoints).into());
        obj.into()
    }
    pub fn point_count(&self) -> u32 {
        self.inner.graph().point_count()
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.graph().edge_count()
    }

    // Picking
    pub fn pick(&self, x: f64, y: f64, radius: f64) -> JsValue {
        if let Some(hit) = self.inner.graph().pick(x, y, radius) {
            // Flatten to { kind: 'point'|'segment', ... }
            let obj = new_obj();
            match hit {
                wirenet::Hit::Point { id, dist } => {
                    set_kv(&obj, "kind", &JsValue::from_str("point"));
                    set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                    set_kv(&obj, "dist", &JsValue::from_f64(dist));
                }
                wirenet::Hit::Segment { a, b, t, dist } => {
                    set_kv(&obj, "kind", &JsValue::from_str("segment"));
                    set_kv(&obj, "a", &JsValue::from_f64(a as f64));
                    set_kv(&obj, "b", &JsValue::from_f64(b as f64));
                    set_kv(&obj, "t", &JsValue::from_f64(t));
                    set_kv(&obj, "dist", &JsValue::from_f64(dist));
                }
            }
            obj.into()
        } else {
            JsValue::NULL
        }
    }
    pub fn pick_res(&self, x: f64, y: f64, radius: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !radius.is_finite() {
            return error::non_finite("radius");
        }
        if !wirenet::geometry::limits::in_radius_bounds(radius) {
            return error::out_of_range("radius", 0.0, wirenet::geometry::limits::RADIUS_MAX, radius);
        }
        error::ok(self.pick(x, y, radius))
    }

    // Diagnostics
    pub fn adjacency(&self) -> String {
        self.inner.graph().adjacency_list()
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.graph().to_json_value())
    }
    /// Current session log as JSON text.
    pub fn log_json(&self) -> JsValue {
        match self.inner.log().to_json() {
            Ok(s) => error::ok(JsValue::from_str(&s)),
            Err(e) => error::from_wire(&e),
        }
    }
    /// Log persisted by this or an earlier session, if any.
    pub fn last_log(&self) -> Option<String> {
        use wirenet::DiagnosticsHost;
        self.inner.host().load(&self.inner.config().storage_key)
    }
    /// Run the checker regardless of config; returns `[{ kind, message }]`.
    pub fn check(&mut self) -> JsValue {
        let found: Vec<ViolationSer> = self
            .inner
            .graph()
            .check()
            .iter()
            .map(|v| ViolationSer { kind: v.kind(), message: v.to_string() })
            .collect();
        if !found.is_empty() {
            self.inner.verify_now();
        }
        to_js(&found)
    }
    pub fn clear(&mut self) {
        self.inner.graph_mut().clear();
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
