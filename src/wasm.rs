use crate::member::Member;
use crate::recommend::recommend;
use crate::schedule::{FinderConfig, OptimalTimeFinder, Query};
use crate::slot::Slot;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindRequest {
    members: Vec<Member>,
    #[serde(flatten)]
    query: Query,
    #[serde(default)]
    config: FinderConfig,
    today: Option<NaiveDate>,
}

/// `{ members, selectedMemberIds, durationHours, preferredStart, preferredEnd, daysAhead, config?, today? }`
/// in, ranked slots out. Validation errors are thrown as strings.
#[wasm_bindgen(js_name = findOptimalTimes)]
pub fn find_optimal_times(request: JsValue) -> Result<JsValue, JsValue> {
    let request: FindRequest = serde_wasm_bindgen::from_value(request)?;
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    let slots = OptimalTimeFinder::with_config(&request.members, request.config)
        .find(&request.query, today)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(serde_wasm_bindgen::to_value(&slots)?)
}

#[wasm_bindgen]
pub fn recommendations(slots: JsValue) -> Result<JsValue, JsValue> {
    let slots: Vec<Slot> = serde_wasm_bindgen::from_value(slots)?;
    let messages: Vec<String> = recommend(&slots)
        .into_iter()
        .map(|recommendation| recommendation.to_string())
        .collect();

    Ok(serde_wasm_bindgen::to_value(&messages)?)
}
