/// Raw output of a temperature/humidity sensor. Either value is NaN when the read failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature: f32,
    pub humidity: f32,
}

impl ClimateReading {
    pub const FAILED: ClimateReading = ClimateReading {
        temperature: f32::NAN,
        humidity: f32::NAN,
    };

    pub fn is_valid(&self) -> bool {
        !self.temperature.is_nan() && !self.humidity.is_nan()
    }
}

pub trait ClimateSensor {
    fn read(&mut self) -> ClimateReading;
}

pub trait SoilProbe {
    fn read_raw_value(&mut self) -> u16;
}
