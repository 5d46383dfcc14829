use dht_sensor::{dht11, DhtReading};
use esp_idf_svc::hal::{
    delay::Ets,
    gpio::{InputOutput, InputPin, OutputPin, PinDriver},
    peripheral::Peripheral,
};
use log::warn;

use crate::sensors::sensor::{ClimateReading, ClimateSensor};

pub struct DhtSensor<'a, P: InputPin + OutputPin> {
    pin: PinDriver<'a, P, InputOutput>,
    delay: Ets,
}

impl<'a, P: InputPin + OutputPin> DhtSensor<'a, P> {
    pub fn new(pin: impl Peripheral<P = P> + 'a) -> anyhow::Result<Self> {
        let mut pin = PinDriver::input_output_od(pin)?;
        pin.set_high()?;

        Ok(Self { pin, delay: Ets })
    }
}

impl<'a, P: InputPin + OutputPin> ClimateSensor for DhtSensor<'a, P> {
    fn read(&mut self) -> ClimateReading {
        match dht11::Reading::read(&mut self.delay, &mut self.pin) {
            Ok(reading) => ClimateReading {
                temperature: reading.temperature as f32,
                humidity: reading.relative_humidity as f32,
            },
            Err(e) => {
                warn!("DHT11 read error: {e:?}");
                ClimateReading::FAILED
            }
        }
    }
}
