//! Imageica WASM - WebAssembly bindings for Imageica
//!
//! This crate exposes the imageica-core editing pipeline to JavaScript and
//! TypeScript front ends.
//!
//! # Module Structure
//!
//! - `types` - `JsImage`, the image wrapper passed across the boundary
//! - `operations` - `JsOperationsState`, the pending edits for one image
//! - `filter` - colour filters by name
//! - `pipeline` - stateless preview rendering
//! - `session` - `JsEditSession`, an image with its filter, edits and last preview
//! - `codec` - PNG/JPEG decoding and encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditSession } from '@imageica/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession(decode_image(new Uint8Array(await file.arrayBuffer())));
//! session.select_filter("sepia");
//! const state = session.state();
//! state.rotate_left();
//! session.set_state(state);
//! const preview = session.render_preview();
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod filter;
mod operations;
mod pipeline;
mod session;
mod types;

pub use codec::{decode_image, encode_jpeg, encode_png};
pub use filter::{apply_color_filter, filter_label, filter_names};
pub use operations::JsOperationsState;
pub use pipeline::{render_preview, render_preview_with_config};
pub use session::JsEditSession;
pub use types::JsImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
