pub mod dsp;
pub mod error;
pub mod fixed;
pub mod handoff;
pub mod parameters;

use crate::parameters::Parameters;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the polyptic_core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: render a JSON parameter set to a WAV byte array.
#[wasm_bindgen]
pub fn render_parameters_wav(json: &str, seconds: f32) -> Result<Vec<u8>, JsValue> {
    let params = Parameters::from_json(json).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    Ok(dsp::renderer::render_wav(&params, seconds))
}
