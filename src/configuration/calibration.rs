// Capacitive probe on a 12 bit ADC: the reading goes down as the soil gets wetter.

/// Raw reading with the probe in water.
pub const MIN_SOIL_VALUE: u16 = 1200;
/// Raw reading with the probe in dry air.
pub const MAX_SOIL_VALUE: u16 = 3500;

pub const SOIL_SCALE_MAX: f32 = 2.0;

/// ADC conversions averaged for one soil reading.
pub const SOIL_SAMPLE_COUNT: u16 = 10;

// Thresholds on the 0.0 - 2.0 soil scale.
pub const SOIL_VERY_DRY: f32 = 0.4;
pub const SOIL_DRY: f32 = 0.6;
pub const SOIL_WET: f32 = 1.2;
