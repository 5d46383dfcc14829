use heapless::Vec;

use crate::configuration::main_configuration::MAX_ALTERNATIVE_TIMES;
use crate::error::PredictError;

pub const DEFAULT_OPTIMAL_TIME: &str = "00:00";

/// One reading of both sensors, already converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature: f32,
    pub relative_humidity: f32,
    pub soil_humidity_scaled: f32,
    pub soil_moisture_percent: u8,
    pub raw_soil_adc: u16,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub needs_watering: bool,
    pub optimal_time: String,
    pub alternative_times: Vec<String, MAX_ALTERNATIVE_TIMES>,
    pub watering_probability: f32,
}

impl Default for PredictionResult {
    fn default() -> Self {
        Self {
            needs_watering: false,
            optimal_time: DEFAULT_OPTIMAL_TIME.to_string(),
            alternative_times: Vec::new(),
            watering_probability: 0.0,
        }
    }
}

/// Outcome of a round trip to the prediction server.
///
/// Keeps "the server said no watering" apart from "there was no answer", which
/// the bare default [`PredictionResult`] cannot express.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Available(PredictionResult),
    Unavailable(PredictError),
}

impl Prediction {
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Prediction::Available(result) => Some(result),
            Prediction::Unavailable(_) => None,
        }
    }

    pub fn result_or_default(&self) -> PredictionResult {
        self.result().cloned().unwrap_or_default()
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Prediction::Available(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_result_means_no_watering_at_midnight() {
        let result = PredictionResult::default();

        assert!(!result.needs_watering);
        assert_eq!(result.optimal_time, "00:00");
        assert!(result.alternative_times.is_empty());
        assert_eq!(result.watering_probability, 0.0);
    }

    #[test]
    fn unavailable_prediction_degrades_to_default() {
        let prediction = Prediction::Unavailable(PredictError::NetworkUnavailable);

        assert!(!prediction.is_available());
        assert!(prediction.result().is_none());
        assert_eq!(prediction.result_or_default(), PredictionResult::default());
    }
}
