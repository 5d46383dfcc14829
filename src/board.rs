use esp_idf_svc::hal::{
    adc::{oneshot::AdcDriver, ADC1},
    gpio::{Gpio16, Gpio34, Pins},
};

use crate::sensors::{dht_sensor::DhtSensor, moisture_sensor::AdcSoilProbe};

pub type SoilProbeOnBoard<'a> = AdcSoilProbe<'a, ADC1, Gpio34, AdcDriver<'a, ADC1>>;

/// DHT11 on GPIO16, soil probe on GPIO34 (ADC1).
pub struct Board<'a> {
    pub climate_sensor: DhtSensor<'a, Gpio16>,
    pub soil_probe: SoilProbeOnBoard<'a>,
}

impl<'a> Board<'a> {
    pub fn new(adc_1: ADC1, pins: Pins) -> anyhow::Result<Self> {
        let adc_driver = AdcDriver::new(adc_1)?;

        Ok(Self {
            climate_sensor: DhtSensor::new(pins.gpio16)?,
            soil_probe: AdcSoilProbe::new(adc_driver, pins.gpio34)?,
        })
    }
}
