use wasm_bindgen::prelude::*;

use credits_pricing_core::cost;
use credits_pricing_core::fetch::FetchSnapshot;
use credits_pricing_core::model::{self, Model};
use credits_pricing_core::selection::{Selection, DEFAULT_MODEL_ID};
use credits_pricing_core::tasks::EXAMPLE_TASKS;
use credits_pricing_core::view::{self, View};

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Build the view model for the page.
///
/// `snapshot` mirrors the query hook: `{ data?: { models }, is_loading,
/// error?: { message? } }`. Returns the tagged view (`state` is one of
/// `loading`, `error`, `ready`) or null for malformed input.
#[wasm_bindgen]
pub fn render_page(snapshot: JsValue, selected_model_id: &str) -> JsValue {
    let snapshot: FetchSnapshot = match serde_wasm_bindgen::from_value(snapshot) {
        Ok(s) => s,
        Err(_) => return JsValue::NULL,
    };
    to_js(&page_view(&snapshot, selected_model_id))
}

fn page_view(snapshot: &FetchSnapshot, selected_model_id: &str) -> View {
    view::render(snapshot, &Selection::new(selected_model_id))
}

/// Model id preselected on first render.
#[wasm_bindgen]
pub fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// Filter a model array down to those with both costs, in order.
#[wasm_bindgen]
pub fn eligible_models(models: JsValue) -> JsValue {
    let models: Vec<Model> = match serde_wasm_bindgen::from_value(models) {
        Ok(m) => m,
        Err(_) => return JsValue::NULL,
    };
    to_js(&model::eligible_models(Some(models.as_slice())))
}

/// Get the fixed example tasks.
#[wasm_bindgen]
pub fn example_tasks() -> JsValue {
    to_js(&EXAMPLE_TASKS)
}

// ---------------------------------------------------------------------------
// Cost utilities
// ---------------------------------------------------------------------------

/// Cost of a run on `model`. Token counts are f64 to avoid BigInt on the JS
/// side; NaN for a malformed model.
#[wasm_bindgen]
pub fn calculate_cost(input_tokens: f64, output_tokens: f64, model: JsValue) -> f64 {
    match serde_wasm_bindgen::from_value::<Model>(model) {
        Ok(m) => cost::cost(input_tokens as u64, output_tokens as u64, &m),
        Err(_) => f64::NAN,
    }
}

/// "$11.64".
#[wasm_bindgen]
pub fn format_usd(amount: f64) -> String {
    cost::format_usd(amount)
}

/// "3,410,337".
#[wasm_bindgen]
pub fn format_tokens(n: f64) -> String {
    cost::format_tokens(n as u64)
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> JsValue {
    // Plain objects, not Maps, so the page can read fields directly.
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&ser).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_view_from_hook_json() {
        let snap: FetchSnapshot = serde_json::from_str(
            r#"{"data":{"models":[
                {"id":"m1","display_name":"Model One",
                 "input_cost_per_million_tokens":3.0,"output_cost_per_million_tokens":15.0}
            ]},"is_loading":false}"#,
        )
        .unwrap();
        let json = serde_json::to_value(page_view(&snap, "m1")).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["examples"][0]["cost"]["display"], "$11.64");
        assert_eq!(json["table"]["rows"][0]["highlighted"], true);
    }

    #[test]
    fn page_view_error_without_message() {
        let snap: FetchSnapshot =
            serde_json::from_str(r#"{"is_loading":false,"error":{}}"#).unwrap();
        let json = serde_json::to_value(page_view(&snap, "m1")).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], view::ERROR_FALLBACK);
    }

    #[test]
    fn formatting_wrappers() {
        assert_eq!(format_usd(0.687606), "$0.69");
        assert_eq!(format_tokens(559_918.0), "559,918");
        assert_eq!(default_model_id(), DEFAULT_MODEL_ID);
    }
}
