use crate::configuration::calibration::{MAX_SOIL_VALUE, MIN_SOIL_VALUE, SOIL_SCALE_MAX};

/// Position of `adc_value` between the dry and wet calibration points: 0.0 is dry, 1.0 is wet.
/// Not clamped.
fn wetness_ratio(adc_value: u16) -> f32 {
    (adc_value as f32 - MAX_SOIL_VALUE as f32) / (MIN_SOIL_VALUE as f32 - MAX_SOIL_VALUE as f32)
}

/// Soil humidity on the 0.0 - 2.0 scale the prediction model was trained on.
pub fn soil_humidity_scaled(adc_value: u16) -> f32 {
    (wetness_ratio(adc_value) * SOIL_SCALE_MAX).clamp(0.0, SOIL_SCALE_MAX)
}

pub fn soil_moisture_percent(adc_value: u16) -> u8 {
    (wetness_ratio(adc_value) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(target_os = "espidf")]
pub use self::esp::AdcSoilProbe;

#[cfg(target_os = "espidf")]
mod esp {
    use std::borrow::Borrow;

    use esp_idf_svc::hal::{
        adc::{
            attenuation,
            oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
            Adc,
        },
        gpio::ADCPin,
    };
    use log::debug;

    use crate::configuration::calibration::SOIL_SAMPLE_COUNT;
    use crate::sensors::sensor::SoilProbe;

    pub struct AdcSoilProbe<'a, ADC: Adc + 'a, APin: ADCPin<Adc = ADC>, M: Borrow<AdcDriver<'a, ADC>>>
    {
        channel: AdcChannelDriver<'a, APin, M>,
    }

    impl<'a, ADC: Adc + 'a, APin: ADCPin<Adc = ADC>, M: Borrow<AdcDriver<'a, ADC>>>
        AdcSoilProbe<'a, ADC, APin, M>
    {
        pub fn new(adc_driver: M, pin_adc: APin) -> anyhow::Result<Self> {
            Ok(Self {
                channel: AdcChannelDriver::new(
                    adc_driver,
                    pin_adc,
                    &AdcChannelConfig {
                        attenuation: attenuation::DB_11,
                        calibration: false,
                        ..Default::default()
                    },
                )?,
            })
        }
    }

    impl<'a, ADC: Adc + 'a, APin: ADCPin<Adc = ADC>, M: Borrow<AdcDriver<'a, ADC>>> SoilProbe
        for AdcSoilProbe<'a, ADC, APin, M>
    {
        fn read_raw_value(&mut self) -> u16 {
            let mut total: u32 = 0;

            for _ in 0..SOIL_SAMPLE_COUNT {
                total += self.channel.read_raw().unwrap_or(0) as u32;
            }

            let value = (total / SOIL_SAMPLE_COUNT as u32) as u16;
            debug!("Soil probe raw value: {value}");
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_is_monotonically_decreasing_over_calibration_range() {
        let mut previous = soil_humidity_scaled(MIN_SOIL_VALUE);

        for adc in (MIN_SOIL_VALUE + 1)..=MAX_SOIL_VALUE {
            let scaled = soil_humidity_scaled(adc);
            assert!(scaled <= previous, "{adc}: {scaled} > {previous}");
            assert!((0.0..=2.0).contains(&scaled));
            previous = scaled;
        }
    }

    #[test]
    fn scaled_hits_both_ends_of_the_range() {
        assert_eq!(soil_humidity_scaled(MIN_SOIL_VALUE), 2.0);
        assert_eq!(soil_humidity_scaled(MAX_SOIL_VALUE), 0.0);

        let middle = (MIN_SOIL_VALUE + MAX_SOIL_VALUE) / 2;
        assert!((soil_humidity_scaled(middle) - 1.0).abs() < 0.01);
    }

    #[test]
    fn scaled_clamps_outside_calibration_range() {
        assert_eq!(soil_humidity_scaled(0), 2.0);
        assert_eq!(soil_humidity_scaled(MIN_SOIL_VALUE - 100), 2.0);
        assert_eq!(soil_humidity_scaled(MAX_SOIL_VALUE + 100), 0.0);
        assert_eq!(soil_humidity_scaled(4095), 0.0);
        assert_eq!(soil_humidity_scaled(u16::MAX), 0.0);
    }

    #[test]
    fn percent_follows_the_same_mapping() {
        assert_eq!(soil_moisture_percent(MIN_SOIL_VALUE), 100);
        assert_eq!(soil_moisture_percent(MAX_SOIL_VALUE), 0);
        assert_eq!(soil_moisture_percent(0), 100);
        assert_eq!(soil_moisture_percent(u16::MAX), 0);

        for adc in (0..=4095).step_by(7) {
            let percent = soil_moisture_percent(adc);
            let from_scaled = (soil_humidity_scaled(adc) * 50.0).round() as u8;

            assert!(percent <= 100);
            assert!(percent.abs_diff(from_scaled) <= 1, "{adc}: {percent} vs {from_scaled}");
        }
    }
}
