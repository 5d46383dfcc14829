use log::debug;
use serde_json::{Map, Value};

use crate::configuration::main_configuration::MAX_ALTERNATIVE_TIMES;
use crate::error::PredictError;
use crate::models::PredictionResult;

pub const KEY_NEEDS_WATERING: &str = "membutuhkan_siram";
pub const KEY_OPTIMAL_TIME: &str = "waktu_optimal";
pub const KEY_ALTERNATIVE_TIMES: &str = "waktu_alternatif";
pub const KEY_PROBABILITY: &str = "probabilitas_siram";

/// Value of the watering flag meaning "yes".
const NEEDS_WATERING_YES: &str = "Ya";

/// Decodes the server reply into a fully populated result.
///
/// Every key is optional: a missing or mistyped key keeps the default of its field.
/// Only a body that is not a JSON object is rejected.
pub fn decode_response(body: &str) -> Result<PredictionResult, PredictError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| PredictError::MalformedResponse(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(decode_fields(&map)),
        other => Err(PredictError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn decode_fields(map: &Map<String, Value>) -> PredictionResult {
    let mut result = PredictionResult::default();

    match map.get(KEY_NEEDS_WATERING).map(Value::as_str) {
        Some(Some(flag)) => result.needs_watering = flag == NEEDS_WATERING_YES,
        Some(None) => debug!("Ignoring non string {KEY_NEEDS_WATERING}"),
        None => (),
    }

    if let Some(time) = map.get(KEY_OPTIMAL_TIME).and_then(Value::as_str) {
        result.optimal_time = time.to_string();
    }

    if let Some(times) = map.get(KEY_ALTERNATIVE_TIMES).and_then(Value::as_array) {
        if times.len() > MAX_ALTERNATIVE_TIMES {
            debug!(
                "Server sent {} alternative times, keeping {MAX_ALTERNATIVE_TIMES}",
                times.len()
            );
        }

        result.alternative_times = times
            .iter()
            .filter_map(Value::as_str)
            .take(MAX_ALTERNATIVE_TIMES)
            .map(str::to_string)
            .collect();
    }

    if let Some(probability) = map.get(KEY_PROBABILITY).and_then(Value::as_f64) {
        result.watering_probability = (probability as f32).clamp(0.0, 1.0);
    }

    result
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
