//! WASM bindings for browser-based file naming.
//!
//! This module exposes keyword expansion to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::template::{Keywords, expand};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Expand a keyword pattern.
///
/// `keys` and `values` are parallel arrays forming the keyword map.
#[wasm_bindgen]
pub fn expand_keywords(
    pattern: &str,
    keys: Vec<String>,
    values: Vec<String>,
) -> Result<String, JsValue> {
    if keys.len() != values.len() {
        return Err(JsValue::from_str(&format!(
            "got {} keys but {} values",
            keys.len(),
            values.len()
        )));
    }

    let keywords: Keywords = keys.into_iter().zip(values).collect();
    Ok(expand(pattern, &keywords))
}
