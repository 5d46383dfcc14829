//! Stand-in sensors for running the firmware loop on a desktop.

use crate::sensors::sensor::{ClimateReading, ClimateSensor, SoilProbe};

/// Slow triangle wave around a base value, one step per read.
fn drift(base: f32, amplitude: f32, period: u32, step: u32) -> f32 {
    let phase = (step % period) as f32 / period as f32;
    let triangle = if phase < 0.5 {
        phase * 4.0 - 1.0
    } else {
        3.0 - phase * 4.0
    };
    base + amplitude * triangle
}

pub struct SimulatedClimate {
    step: u32,
}

impl SimulatedClimate {
    pub fn new() -> Self {
        Self { step: 0 }
    }
}

impl Default for SimulatedClimate {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateSensor for SimulatedClimate {
    fn read(&mut self) -> ClimateReading {
        self.step = self.step.wrapping_add(1);

        ClimateReading {
            temperature: drift(29.0, 3.0, 24, self.step),
            humidity: drift(70.0, 12.0, 36, self.step),
        }
    }
}

/// Soil that dries out a little on every read, then gets watered again.
pub struct SimulatedSoil {
    value: u16,
    wet_value: u16,
    dry_value: u16,
    step: u16,
}

impl SimulatedSoil {
    pub fn new(wet_value: u16, dry_value: u16) -> Self {
        Self {
            value: wet_value,
            wet_value,
            dry_value,
            step: 60,
        }
    }
}

impl SoilProbe for SimulatedSoil {
    fn read_raw_value(&mut self) -> u16 {
        let current = self.value;

        self.value = if current >= self.dry_value {
            self.wet_value
        } else {
            current.saturating_add(self.step).min(self.dry_value)
        };

        current
    }
}
