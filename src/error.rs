use crate::interop::{new_obj, set_kv};
use wasm_bindgen::prelude::*;
use wirenet::WireError;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_button(got: u8) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("invalid_button", "button must be 0:Primary, 1:Middle, 2:Secondary, 3:Back, 4:Forward", Some(d.into()))
}

/// Envelope for any core error, keyed by its stable code.
pub fn from_wire(e: &WireError) -> JsValue {
    match *e {
        WireError::NonFinite { param } => non_finite(param),
        WireError::OutOfRange { param, min, max, got } => out_of_range(param, min, max, got),
        WireError::InvalidButton(b) => invalid_button(b),
        WireError::Config(_) | WireError::Serialize(_) => err(e.code(), e.to_string(), None),
    }
}
