use log::debug;

use crate::error::SensorError;
use crate::models::SensorSample;
use crate::sensors::moisture_sensor::{soil_humidity_scaled, soil_moisture_percent};
use crate::sensors::sensor::{ClimateSensor, SoilProbe};

pub struct Sampler<C: ClimateSensor, S: SoilProbe> {
    climate: C,
    soil: S,
}

impl<C: ClimateSensor, S: SoilProbe> Sampler<C, S> {
    pub fn new(climate: C, soil: S) -> Self {
        Self { climate, soil }
    }

    /// Reads both sensors and converts the soil value.
    ///
    /// The soil probe is read even when the climate sensor failed so both see the same cadence.
    pub fn sample(&mut self, timestamp: i64) -> Result<SensorSample, SensorError> {
        let climate = self.climate.read();
        let raw_soil_adc = self.soil.read_raw_value();

        if !climate.is_valid() {
            return Err(SensorError::ReadFailed {
                temperature: climate.temperature,
                humidity: climate.humidity,
            });
        }

        let sample = SensorSample {
            temperature: climate.temperature,
            relative_humidity: climate.humidity,
            soil_humidity_scaled: soil_humidity_scaled(raw_soil_adc),
            soil_moisture_percent: soil_moisture_percent(raw_soil_adc),
            raw_soil_adc,
            timestamp,
        };
        debug!("New sample: {sample:?}");

        Ok(sample)
    }
}
