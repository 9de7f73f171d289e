use crate::interop::{args, method};
use js_sys::Function;
use wasm_bindgen::JsValue;
use wirenet::{Highlight, Ink, Renderer};

/// Forwards draw calls to a JS object exposing `fillCircle`, `line` and `fillText`.
/// Missing methods are skipped; exceptions thrown by them are swallowed.
pub struct JsRenderer<'a> {
    target: &'a JsValue,
    fill_circle: Option<Function>,
    line: Option<Function>,
    fill_text: Option<Function>,
}

impl<'a> JsRenderer<'a> {
    pub fn new(target: &'a JsValue) -> Self {
        JsRenderer {
            target,
            fill_circle: method(target, "fillCircle"),
            line: method(target, "line"),
            fill_text: method(target, "fillText"),
        }
    }
}

fn ink_name(ink: Ink) -> &'static str {
    match ink {
        Ink::Component(Highlight::Normal) => "normal",
        Ink::Component(Highlight::Hover) => "hover",
        Ink::Component(Highlight::Drag) => "drag",
        Ink::Mirror => "mirror",
        Ink::Cursor => "cursor",
    }
}

impl Renderer for JsRenderer<'_> {
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, ink: Ink) {
        if let Some(f) = &self.fill_circle {
            let a = args(&[x.into(), y.into(), radius.into(), ink_name(ink).into()]);
            let _ = f.apply(self.target, &a);
        }
    }
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, ink: Ink, width: f64) {
        if let Some(f) = &self.line {
            let a = args(&[x1.into(), y1.into(), x2.into(), y2.into(), ink_name(ink).into(), width.into()]);
            let _ = f.apply(self.target, &a);
        }
    }
    fn fill_text(&mut self, x: f64, y: f64, text: &str, size: f64, ink: Ink) {
        if let Some(f) = &self.fill_text {
            let a = args(&[x.into(), y.into(), text.into(), size.into(), ink_name(ink).into()]);
            let _ = f.apply(self.target, &a);
        }
    }
}
