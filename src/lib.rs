use wasm_bindgen::prelude::*;
mod api;
mod error;
mod host;
mod interop;
mod render;

pub use host::BrowserHost;

#[wasm_bindgen]
pub struct Editor { pub(crate) inner: wirenet::EditorSession<BrowserHost> }

impl Editor {
    pub fn rs_new() -> Editor { Editor { inner: wirenet::EditorSession::new(BrowserHost) } }
    pub fn rs_with_config(config: wirenet::EditorConfig) -> wirenet::Result<Editor> {
        Ok(Editor { inner: wirenet::EditorSession::with_config(BrowserHost, config)? })
    }
    pub fn rs_geom_version(&self) -> u64 { self.inner.graph().geom_version() }
}
