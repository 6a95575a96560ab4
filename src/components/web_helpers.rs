// Browser-only helpers shared by the clipboard writer and the music controller.
use wasm_bindgen::JsValue;

fn js_string_field(value: &JsValue, field: &str) -> Option<String> {
    js_sys::Reflect::get(value, &field.into())
        .ok()
        .and_then(|field| field.as_string())
        .filter(|field| !field.trim().is_empty())
}

/// `DOMException.name`, or an empty string for non-exception values.
pub fn js_error_name(value: &JsValue) -> String {
    js_string_field(value, "name").unwrap_or_default()
}

/// Best human-readable text for a thrown JS value.
pub fn js_error_message(value: &JsValue) -> String {
    js_string_field(value, "message")
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
